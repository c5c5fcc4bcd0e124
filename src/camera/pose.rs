use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{PoseEndpoint, VistaError};

/// Positions closer to the origin than this are treated as degenerate.
pub const MIN_RADIUS: f32 = 1e-6;

/// Camera pose: a position relative to the fixed look-at origin plus a zoom
/// factor. Orientation is never stored; it is always derived by looking at
/// the origin with a fixed up vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Eye position relative to the look-at origin.
    pub position: Vec3,
    /// Zoom factor (1.0 = unzoomed). Narrows the field of view.
    pub zoom: f32,
}

impl CameraPose {
    /// Pose at `position` with the given zoom.
    #[must_use]
    pub const fn new(position: Vec3, zoom: f32) -> Self {
        Self { position, zoom }
    }

    /// Pose from orbit-camera angles (radians) and distance to the origin.
    #[must_use]
    pub fn from_orbit(yaw: f32, pitch: f32, distance: f32) -> Self {
        let position = Vec3::new(
            distance * pitch.cos() * yaw.cos(),
            distance * pitch.sin(),
            distance * pitch.cos() * yaw.sin(),
        );
        Self { position, zoom: 1.0 }
    }

    /// Distance from the look-at origin.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.position.length()
    }

    /// Whether the position is far enough from the origin to define a view
    /// direction.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.position.is_finite() || self.radius() < MIN_RADIUS
    }

    /// Fail with [`VistaError::DegeneratePose`] when the position sits on the
    /// look-at origin.
    pub fn validate(&self, endpoint: PoseEndpoint) -> Result<(), VistaError> {
        if self.is_degenerate() {
            return Err(VistaError::DegeneratePose(endpoint));
        }
        Ok(())
    }

    /// Up vector used for the look-at basis. +Y, except when the camera
    /// looks straight along Y where +Z keeps the basis well defined.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        let dir = self.position.normalize_or_zero();
        if dir.y.abs() > 0.999 {
            Vec3::Z
        } else {
            Vec3::Y
        }
    }

    /// View matrix looking from the pose position at the origin.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, self.up())
    }

    /// Combined view-projection matrix. Zoom divides the vertical field of
    /// view (given in degrees).
    #[must_use]
    pub fn view_proj(&self, aspect: f32, fovy: f32) -> Mat4 {
        let zoom = self.zoom.max(0.01);
        let radius = self.radius().max(MIN_RADIUS);
        let proj = Mat4::perspective_rh(
            (fovy / zoom).clamp(1.0, 179.0).to_radians(),
            aspect,
            radius * 0.01,
            radius * 100.0,
        );
        proj * self.view_matrix()
    }
}

impl Default for CameraPose {
    /// The explorer's opening view, looking from (3, 3, 3).
    fn default() -> Self {
        Self::new(Vec3::splat(3.0), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn radius_and_degeneracy() {
        let pose = CameraPose::new(Vec3::new(3.0, 0.0, 4.0), 1.0);
        assert_eq!(pose.radius(), 5.0);
        assert!(!pose.is_degenerate());
        assert!(CameraPose::new(Vec3::ZERO, 1.0).is_degenerate());
        assert!(CameraPose::new(Vec3::new(f32::NAN, 0.0, 1.0), 1.0)
            .is_degenerate());
    }

    #[test]
    fn validate_reports_endpoint() {
        let err = CameraPose::new(Vec3::ZERO, 1.0)
            .validate(PoseEndpoint::End)
            .unwrap_err();
        assert!(matches!(err, VistaError::DegeneratePose(PoseEndpoint::End)));
    }

    #[test]
    fn orbit_angles_map_to_cartesian() {
        let pose = CameraPose::from_orbit(0.0, 0.0, 2.0);
        assert!((pose.position - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);

        let top = CameraPose::from_orbit(0.0, FRAC_PI_2, 2.0);
        assert!((top.position - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        assert_eq!(top.up(), Vec3::Z);
    }

    #[test]
    fn view_matrix_maps_origin_in_front_of_camera() {
        let pose = CameraPose::new(Vec3::new(0.0, 0.0, 10.0), 1.0);
        let origin_in_view = pose.view_matrix().transform_point3(Vec3::ZERO);
        // Right-handed view space looks down -Z
        assert!((origin_in_view - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-5);
    }

    #[test]
    fn serde_shape() {
        let pose = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), 1.5);
        let json = serde_json::to_string(&pose).unwrap();
        assert_eq!(json, r#"{"position":[1.0,2.0,3.0],"zoom":1.5}"#);
        let back: CameraPose = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pose);
    }
}
