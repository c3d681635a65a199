//! Shared utilities: host-loop clock and easing curves.

pub mod clock;
pub mod easing;
