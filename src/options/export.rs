use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Export", inline)]
#[serde(default)]
/// Still-image and animated-document export parameters.
pub struct ExportOptions {
    /// Interpolated frames generated between consecutive keyframes.
    #[schemars(title = "Frames per Transition", range(min = 1, max = 120))]
    pub frames_per_transition: u32,
    /// Hold frames emitted at each keyframe.
    #[schemars(title = "Hold Frames", range(min = 0, max = 10))]
    pub hold_frames: u32,
    /// Display time of each hold frame, in milliseconds.
    #[schemars(title = "Hold Frame (ms)", range(min = 10, max = 5000))]
    pub hold_frame_ms: u32,
    /// Curve applied to `k / N` for interpolated frames. Linear keeps the
    /// frames evenly spaced along the arc.
    #[schemars(skip)]
    pub easing: EasingFunction,
    /// Output width in pixels.
    #[schemars(title = "Width", range(min = 16, max = 8192))]
    pub width: u32,
    /// Output height in pixels.
    #[schemars(title = "Height", range(min = 16, max = 8192))]
    pub height: u32,
    /// Player loop count written on the animated document (0 = forever).
    #[schemars(skip)]
    pub repeat_count: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            frames_per_transition: 10,
            hold_frames: 3,
            hold_frame_ms: 200,
            easing: EasingFunction::Linear,
            width: 800,
            height: 600,
            repeat_count: 0,
        }
    }
}
