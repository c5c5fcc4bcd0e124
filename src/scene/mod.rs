//! Auxiliary scene state carried by views: instance visibility, the
//! section-plane position, and discrete parameters.
//!
//! [`SceneSnapshot`] is the saved form stored on a view; [`SceneState`] is
//! the live form the animation session mutates each tick.

mod snapshot;
mod state;

pub use snapshot::{InstanceId, SceneSnapshot};
pub use state::SceneState;
