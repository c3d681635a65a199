//! Event bus and the signals the host loop publishes on it.

/// Name-keyed publish/subscribe registry.
pub mod bus;
/// Payload type and well-known event names.
pub mod signal;

pub use bus::{EventBus, EventNames, Handler, Subscription};
pub use signal::Signal;
