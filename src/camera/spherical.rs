//! Spherical coordinates around an orbit target.
//!
//! Y is up. The polar angle is measured from +Y, the azimuthal angle is
//! `atan2(x, z)` and is kept in (-π, π].

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Radius, polar angle, and azimuthal angle of an offset vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalCoords {
    /// Distance from the origin.
    pub radius: f32,
    /// Angle from +Y, in [0, π].
    pub polar: f32,
    /// Angle around Y, in (-π, π].
    pub azimuth: f32,
}

impl SphericalCoords {
    /// Coordinates from components. The azimuth is normalized.
    #[must_use]
    pub fn new(radius: f32, polar: f32, azimuth: f32) -> Self {
        Self {
            radius,
            polar,
            azimuth: normalize_azimuth(azimuth),
        }
    }

    /// Decompose an offset vector. A zero vector yields all zeros.
    #[must_use]
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                polar: 0.0,
                azimuth: 0.0,
            };
        }
        Self {
            radius,
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            azimuth: normalize_azimuth(offset.x.atan2(offset.z)),
        }
    }

    /// Rebuild the offset vector.
    #[must_use]
    pub fn to_offset(&self) -> Vec3 {
        let ring = self.polar.sin() * self.radius;
        Vec3::new(
            ring * self.azimuth.sin(),
            self.polar.cos() * self.radius,
            ring * self.azimuth.cos(),
        )
    }
}

/// Wrap an angle into (-π, π].
#[inline]
#[must_use]
pub fn normalize_azimuth(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Signed sweep from `from` to `to` along the shorter arc.
///
/// The magnitude is at most π. An exact half-turn keeps the sign of the
/// raw difference, so identical inputs always sweep the same way.
#[inline]
#[must_use]
pub fn shortest_azimuth_delta(from: f32, to: f32) -> f32 {
    let raw = to - from;
    let mut sign = if raw < 0.0 { -1.0 } else { 1.0 };
    let mut delta = raw.abs();
    if delta > PI {
        delta = TAU - delta;
        sign = -sign;
    }
    delta * sign
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_offset_round_trip() {
        let offset = Vec3::new(3.0, 4.0, -5.0);
        let s = SphericalCoords::from_offset(offset);
        assert!((s.to_offset() - offset).length() < 1e-4);
        assert!((s.radius - offset.length()).abs() < EPSILON);
    }

    #[test]
    fn test_axis_conventions() {
        let s = SphericalCoords::from_offset(Vec3::Z * 2.0);
        assert!(s.azimuth.abs() < EPSILON);
        assert!((s.polar - PI / 2.0).abs() < EPSILON);

        let s = SphericalCoords::from_offset(Vec3::X);
        assert!((s.azimuth - PI / 2.0).abs() < EPSILON);

        let s = SphericalCoords::from_offset(Vec3::Y);
        assert!(s.polar.abs() < EPSILON);
    }

    #[test]
    fn test_zero_offset() {
        let s = SphericalCoords::from_offset(Vec3::ZERO);
        assert_eq!(s.radius, 0.0);
        assert_eq!(s.to_offset(), Vec3::ZERO);
    }

    #[test]
    fn test_negative_z_axis_reads_as_positive_pi() {
        let s = SphericalCoords::from_offset(Vec3::new(-0.0, 0.0, -1.0));
        assert!((s.azimuth - PI).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_azimuth_range() {
        assert!((normalize_azimuth(PI) - PI).abs() < EPSILON);
        assert!((normalize_azimuth(-PI) - PI).abs() < EPSILON);
        assert!((normalize_azimuth(3.0 * PI / 2.0) + PI / 2.0).abs() < EPSILON);
        assert!((normalize_azimuth(-3.0 * PI / 2.0) - PI / 2.0).abs() < EPSILON);
        assert!((normalize_azimuth(5.0 * TAU + 0.25) - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_shortest_delta_across_seam() {
        // 3.0 -> -3.0 goes forward through π, not back through 0
        let d = shortest_azimuth_delta(3.0, -3.0);
        assert!((d - (TAU - 6.0)).abs() < EPSILON);
        let d = shortest_azimuth_delta(-3.0, 3.0);
        assert!((d + (TAU - 6.0)).abs() < EPSILON);
    }

    #[test]
    fn test_shortest_delta_bounded() {
        let steps = 48;
        for i in 0..=steps {
            for j in 0..=steps {
                let a = normalize_azimuth(-PI + TAU * i as f32 / steps as f32);
                let b = normalize_azimuth(-PI + TAU * j as f32 / steps as f32);
                let d = shortest_azimuth_delta(a, b);
                assert!(d.abs() <= PI + EPSILON, "{a} -> {b}: {d}");
                // landing point matches the requested azimuth
                let landed = normalize_azimuth(a + d);
                let err = shortest_azimuth_delta(landed, b).abs();
                assert!(err < 1e-4, "{a} -> {b} landed {landed}");
            }
        }
    }

    #[test]
    fn test_half_turn_is_deterministic() {
        let first = shortest_azimuth_delta(0.0, PI);
        let second = shortest_azimuth_delta(0.0, PI);
        assert_eq!(first, second);
        assert!((first - PI).abs() < EPSILON);
        assert!((shortest_azimuth_delta(PI / 2.0, -PI / 2.0) + PI).abs() < EPSILON);
    }
}
