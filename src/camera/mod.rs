//! Camera poses and pose interpolation.
//!
//! The camera always looks at a fixed origin with a fixed up vector, so a
//! pose is fully described by a position and a zoom factor.

/// Arc interpolation between two poses.
pub mod interpolate;
/// Camera pose type and view-matrix helpers.
pub mod pose;

pub use interpolate::{interpolate_pose, lerp};
pub use pose::CameraPose;
