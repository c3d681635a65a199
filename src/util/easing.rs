//! Easing functions for camera transitions.
//!
//! A curve is a family (Cubic, Elastic, ...) combined with a direction
//! (In, Out, InOut). Families and directions can be named in
//! configuration; unknown names are rejected when parsed so a bad name
//! never reaches a running transition.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::OrbisError;

/// Shape of an easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EasingFamily {
    /// Constant speed.
    Linear,
    /// Power of two.
    Quadratic,
    /// Power of three.
    #[default]
    Cubic,
    /// Power of four.
    Quartic,
    /// Power of five.
    Quintic,
    /// Quarter sine wave.
    Sinusoidal,
    /// Base-2 exponential.
    Exponential,
    /// Quarter circle.
    Circular,
    /// Damped sine overshoot.
    Elastic,
    /// Pulls back before moving.
    Back,
    /// Decaying bounces.
    Bounce,
}

/// Which end of the curve is eased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EasingDirection {
    /// Slow start.
    In,
    /// Slow end.
    #[default]
    Out,
    /// Slow start and end.
    InOut,
}

/// A complete easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Easing {
    /// Curve shape.
    pub family: EasingFamily,
    /// Eased end(s).
    pub direction: EasingDirection,
}

impl EasingFamily {
    const ALL: [Self; 11] = [
        Self::Linear,
        Self::Quadratic,
        Self::Cubic,
        Self::Quartic,
        Self::Quintic,
        Self::Sinusoidal,
        Self::Exponential,
        Self::Circular,
        Self::Elastic,
        Self::Back,
        Self::Bounce,
    ];

    /// Canonical capitalized name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Quadratic => "Quadratic",
            Self::Cubic => "Cubic",
            Self::Quartic => "Quartic",
            Self::Quintic => "Quintic",
            Self::Sinusoidal => "Sinusoidal",
            Self::Exponential => "Exponential",
            Self::Circular => "Circular",
            Self::Elastic => "Elastic",
            Self::Back => "Back",
            Self::Bounce => "Bounce",
        }
    }

    fn ease_in(self, k: f32) -> f32 {
        match self {
            Self::Linear => k,
            Self::Quadratic => k * k,
            Self::Cubic => k * k * k,
            Self::Quartic => k * k * k * k,
            Self::Quintic => k * k * k * k * k,
            Self::Sinusoidal => 1.0 - (k * PI / 2.0).cos(),
            Self::Exponential => {
                if k == 0.0 {
                    0.0
                } else {
                    1024.0_f32.powf(k - 1.0)
                }
            }
            Self::Circular => 1.0 - (1.0 - k * k).sqrt(),
            Self::Elastic => {
                if k == 0.0 || k == 1.0 {
                    k
                } else {
                    -(2.0_f32.powf(10.0 * (k - 1.0)))
                        * ((k - 1.1) * 5.0 * PI).sin()
                }
            }
            Self::Back => {
                let s = BACK_OVERSHOOT;
                k * k * ((s + 1.0) * k - s)
            }
            Self::Bounce => 1.0 - bounce_out(1.0 - k),
        }
    }

    fn ease_out(self, k: f32) -> f32 {
        match self {
            Self::Bounce => bounce_out(k),
            // Mirror of the in-curve for every other family.
            _ => 1.0 - self.ease_in(1.0 - k),
        }
    }

    fn ease_in_out(self, k: f32) -> f32 {
        if k < 0.5 {
            0.5 * self.ease_in(k * 2.0)
        } else {
            0.5 * self.ease_out(k * 2.0 - 1.0) + 0.5
        }
    }
}

impl EasingDirection {
    /// Canonical capitalized name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::In => "In",
            Self::Out => "Out",
            Self::InOut => "InOut",
        }
    }
}

const BACK_OVERSHOOT: f32 = 1.701_58;

fn bounce_out(k: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if k < 1.0 / D {
        N * k * k
    } else if k < 2.0 / D {
        let k = k - 1.5 / D;
        N * k * k + 0.75
    } else if k < 2.5 / D {
        let k = k - 2.25 / D;
        N * k * k + 0.9375
    } else {
        let k = k - 2.625 / D;
        N * k * k + 0.984_375
    }
}

impl Easing {
    /// Curve from family and direction.
    #[must_use]
    pub const fn new(family: EasingFamily, direction: EasingDirection) -> Self {
        Self { family, direction }
    }

    /// Constant-speed curve.
    pub const LINEAR: Self = Self::new(EasingFamily::Linear, EasingDirection::InOut);

    /// Parse a curve from family and direction names, e.g. `("Cubic",
    /// "Out")`.
    pub fn from_names(family: &str, direction: &str) -> Result<Self, OrbisError> {
        Ok(Self::new(family.parse()?, direction.parse()?))
    }

    /// Evaluate the curve at `t`.
    ///
    /// Input is clamped to [0.0, 1.0]; the endpoints map to exactly 0.0
    /// and 1.0. Elastic and Back overshoot in between.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self.direction {
            EasingDirection::In => self.family.ease_in(t),
            EasingDirection::Out => self.family.ease_out(t),
            EasingDirection::InOut => self.family.ease_in_out(t),
        }
    }
}

impl FromStr for EasingFamily {
    type Err = OrbisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self::Linear);
        }
        Self::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OrbisError::UnknownEasing(format!("family '{s}'")))
    }
}

impl FromStr for EasingDirection {
    type Err = OrbisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::In, Self::Out, Self::InOut]
            .into_iter()
            .find(|dir| dir.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                OrbisError::UnknownEasing(format!("direction '{s}'"))
            })
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.family.name(), self.direction.name())
    }
}
