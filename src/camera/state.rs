//! Camera view states: loose serializable snapshots and the validated form
//! a transition interpolates between.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::spherical::{normalize_azimuth, SphericalCoords};
use crate::error::OrbisError;

/// A camera view as supplied by callers or produced by
/// [`OrbitController::view_state`](super::controller::OrbitController::view_state).
///
/// Either the Cartesian `position` or the spherical triple (`radius`,
/// `polar_angle`, `azimuthal_angle`) describes the eye; a snapshot carries
/// both. Serializes to JSON with camelCase keys.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Orbit target point.
    pub target: Vec3,
    /// Eye position in world space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    /// Eye distance from the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    /// Angle from +Y in [0, π].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polar_angle: Option<f32>,
    /// Angle around +Y in (-π, π].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azimuthal_angle: Option<f32>,
}

impl ViewState {
    /// Cartesian view: eye `position` looking at `target`.
    #[must_use]
    pub fn cartesian(position: Vec3, target: Vec3) -> Self {
        Self {
            target,
            position: Some(position),
            ..Self::default()
        }
    }

    /// Spherical view around `target`.
    #[must_use]
    pub fn spherical(target: Vec3, radius: f32, polar: f32, azimuth: f32) -> Self {
        Self {
            target,
            position: None,
            radius: Some(radius),
            polar_angle: Some(polar),
            azimuthal_angle: Some(azimuth),
        }
    }

    /// Whether any spherical field is present.
    #[must_use]
    pub fn has_spherical_fields(&self) -> bool {
        self.radius.is_some()
            || self.polar_angle.is_some()
            || self.azimuthal_angle.is_some()
    }

    /// Render as a JSON string for storage.
    pub fn to_json(&self) -> Result<String, OrbisError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a JSON string produced by [`to_json`](Self::to_json).
    pub fn from_json(s: &str) -> Result<Self, OrbisError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Whether both spherical angles are present.
    #[must_use]
    pub fn has_spherical_angles(&self) -> bool {
        self.polar_angle.is_some() && self.azimuthal_angle.is_some()
    }

    /// Validate into the form a transition interpolates toward.
    ///
    /// `use_spherical` selects the mode. `None` picks spherical when both
    /// angles are present, otherwise linear when a position is present.
    /// Missing or non-finite fields for the chosen mode are an error.
    pub fn resolve(
        &self,
        use_spherical: Option<bool>,
    ) -> Result<CameraState, OrbisError> {
        check_finite("target", self.target)?;
        let spherical = use_spherical.unwrap_or_else(|| {
            self.has_spherical_angles()
                || (self.position.is_none() && self.has_spherical_fields())
        });
        if spherical {
            self.resolve_spherical()
        } else {
            self.resolve_linear()
        }
    }

    fn resolve_linear(&self) -> Result<CameraState, OrbisError> {
        let position = self.position.ok_or_else(|| {
            OrbisError::InvalidViewState(
                "linear transition requires a position".into(),
            )
        })?;
        check_finite("position", position)?;
        Ok(CameraState::Cartesian {
            position,
            target: self.target,
        })
    }

    fn resolve_spherical(&self) -> Result<CameraState, OrbisError> {
        let (Some(radius), Some(polar), Some(azimuth)) =
            (self.radius, self.polar_angle, self.azimuthal_angle)
        else {
            let missing: Vec<&str> = [
                ("radius", self.radius.is_none()),
                ("polarAngle", self.polar_angle.is_none()),
                ("azimuthalAngle", self.azimuthal_angle.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            return Err(OrbisError::InvalidViewState(format!(
                "spherical transition missing {}",
                missing.join(", ")
            )));
        };
        if !(radius.is_finite() && radius > 0.0) {
            return Err(OrbisError::InvalidViewState(format!(
                "radius must be positive and finite, got {radius}"
            )));
        }
        if !(0.0..=PI).contains(&polar) {
            return Err(OrbisError::InvalidViewState(format!(
                "polar angle must lie in [0, π], got {polar}"
            )));
        }
        if !azimuth.is_finite() {
            return Err(OrbisError::InvalidViewState(format!(
                "azimuthal angle must be finite, got {azimuth}"
            )));
        }
        Ok(CameraState::Spherical {
            target: self.target,
            coords: SphericalCoords {
                radius,
                polar,
                azimuth: normalize_azimuth(azimuth),
            },
        })
    }
}

fn check_finite(field: &str, v: Vec3) -> Result<(), OrbisError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(OrbisError::InvalidViewState(format!(
            "{field} must be finite, got {v}"
        )))
    }
}

/// A validated camera state. Exactly one form per transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraState {
    /// Eye position and look-at target.
    Cartesian {
        /// Eye position.
        position: Vec3,
        /// Look-at target.
        target: Vec3,
    },
    /// Eye placed on a sphere around the target.
    Spherical {
        /// Orbit target.
        target: Vec3,
        /// Eye offset from the target.
        coords: SphericalCoords,
    },
}

impl CameraState {
    /// Orbit target of either form.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        match self {
            Self::Cartesian { target, .. } | Self::Spherical { target, .. } => {
                *target
            }
        }
    }

    /// Eye position of either form.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        match self {
            Self::Cartesian { position, .. } => *position,
            Self::Spherical { target, coords } => *target + coords.to_offset(),
        }
    }

    /// Whether this is the spherical form.
    #[must_use]
    pub fn is_spherical(&self) -> bool {
        matches!(self, Self::Spherical { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infers_spherical_mode() {
        let view = ViewState::spherical(Vec3::ZERO, 10.0, 1.0, 0.5);
        assert!(view.resolve(None).unwrap().is_spherical());

        let view = ViewState::cartesian(Vec3::Z, Vec3::ZERO);
        assert!(!view.resolve(None).unwrap().is_spherical());
    }

    #[test]
    fn test_position_with_partial_spherical_fields_is_linear() {
        let view = ViewState {
            target: Vec3::ZERO,
            position: Some(Vec3::new(0.0, 10.0, 10.0)),
            radius: Some(14.0),
            polar_angle: None,
            azimuthal_angle: None,
        };
        let state = view.resolve(None).unwrap();
        assert!(!state.is_spherical());
        assert_eq!(state.position(), Vec3::new(0.0, 10.0, 10.0));

        let view = ViewState {
            azimuthal_angle: Some(0.5),
            ..view
        };
        assert!(!view.resolve(None).unwrap().is_spherical());
    }

    #[test]
    fn test_both_angles_infer_spherical_even_with_position() {
        let mut view = ViewState::spherical(Vec3::ZERO, 10.0, 1.0, 0.5);
        view.position = Some(Vec3::ONE);
        assert!(view.resolve(None).unwrap().is_spherical());

        // angles without a radius cannot fall back to linear
        view.radius = None;
        let err = view.resolve(None).unwrap_err().to_string();
        assert!(err.contains("radius"));
    }

    #[test]
    fn test_explicit_mode_overrides_inference() {
        let mut view = ViewState::spherical(Vec3::ZERO, 10.0, 1.0, 0.5);
        view.position = Some(Vec3::ONE);
        let state = view.resolve(Some(false)).unwrap();
        assert_eq!(state.position(), Vec3::ONE);
    }

    #[test]
    fn test_linear_requires_position() {
        let view = ViewState::spherical(Vec3::ZERO, 10.0, 1.0, 0.5);
        let err = view.resolve(Some(false)).unwrap_err();
        assert!(err.to_string().contains("position"));
    }

    #[test]
    fn test_spherical_reports_missing_fields() {
        let view = ViewState {
            radius: Some(5.0),
            ..ViewState::default()
        };
        let err = view.resolve(None).unwrap_err().to_string();
        assert!(err.contains("polarAngle"));
        assert!(err.contains("azimuthalAngle"));
        assert!(!err.contains("radius,"));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let bad_radius = ViewState::spherical(Vec3::ZERO, 0.0, 1.0, 0.0);
        assert!(bad_radius.resolve(None).is_err());

        let bad_polar = ViewState::spherical(Vec3::ZERO, 1.0, 4.0, 0.0);
        assert!(bad_polar.resolve(None).is_err());

        let nan_azimuth = ViewState::spherical(Vec3::ZERO, 1.0, 1.0, f32::NAN);
        assert!(nan_azimuth.resolve(None).is_err());

        let nan_target = ViewState::cartesian(Vec3::ONE, Vec3::splat(f32::NAN));
        assert!(nan_target.resolve(None).is_err());
    }

    #[test]
    fn test_azimuth_is_normalized() {
        let view = ViewState::spherical(Vec3::ZERO, 1.0, 1.0, 3.0 * PI / 2.0);
        let CameraState::Spherical { coords, .. } = view.resolve(None).unwrap()
        else {
            panic!("expected spherical state");
        };
        assert!((coords.azimuth + PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_json_round_trip() {
        let mut view = ViewState::spherical(Vec3::new(1.0, 2.0, 3.0), 4.0, 0.5, -1.0);
        view.position = Some(Vec3::new(5.0, 6.0, 7.0));
        let json = view.to_json().unwrap();
        assert!(json.contains("\"polarAngle\""));
        assert_eq!(ViewState::from_json(&json).unwrap(), view);
    }

    #[test]
    fn test_json_without_optional_fields() {
        let view = ViewState::from_json(r#"{"target":[0,1,0],"position":[0,1,5]}"#)
            .unwrap();
        assert_eq!(view.target, Vec3::Y);
        assert!(!view.has_spherical_fields());
        assert!(matches!(
            ViewState::from_json("{not json"),
            Err(OrbisError::ViewStateParse(_))
        ));
    }
}
