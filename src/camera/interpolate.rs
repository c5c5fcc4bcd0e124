//! Arc interpolation between two camera poses.
//!
//! Positions are lerped as Cartesian vectors, re-projected onto the unit
//! sphere, and scaled back out to the lerped radius. Both poses must be
//! expressed relative to the shared look-at origin; the arc is only
//! visually continuous because orientation is always derived from that
//! origin with a fixed up vector.

use super::pose::CameraPose;
use crate::error::{PoseEndpoint, VistaError};

/// Linear interpolation between two scalars.
#[inline]
#[must_use]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Intermediate pose at `eased_t` between `start` and `end`.
///
/// `|result.position| == lerp(|start|, |end|, eased_t)`, zoom is lerped
/// linearly. Fails with [`VistaError::DegeneratePose`] if either position
/// sits on the origin.
pub fn interpolate_pose(
    start: &CameraPose,
    end: &CameraPose,
    eased_t: f32,
) -> Result<CameraPose, VistaError> {
    start.validate(PoseEndpoint::Start)?;
    end.validate(PoseEndpoint::End)?;

    let radius = lerp(start.radius(), end.radius(), eased_t);
    let blended = start.position.lerp(end.position, eased_t);
    // Antipodal endpoints pass through the origin halfway; route the arc
    // around it instead of collapsing.
    let direction = blended.try_normalize().unwrap_or_else(|| {
        (start.position / start.radius()).any_orthonormal_vector()
    });

    Ok(CameraPose {
        position: direction * radius,
        zoom: lerp(start.zoom, end.zoom, eased_t),
    })
}
