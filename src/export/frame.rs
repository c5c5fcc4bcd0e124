use crate::camera::CameraPose;
use crate::scene::SceneState;
use crate::views::ViewId;

/// Whether a frame shows a keyframe verbatim or a point along a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Exact keyframe state, shown for the hold duration.
    Hold,
    /// Interpolated between two keyframes.
    Interpolated,
}

/// One frame of an exported animation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFrame {
    /// Position in the sequence.
    pub index: usize,
    /// Hold or interpolated.
    pub kind: FrameKind,
    /// Keyframe this frame belongs to: the held keyframe, or the
    /// destination of the transition.
    pub keyframe: usize,
    /// View id of [`keyframe`](Self::keyframe).
    pub view: ViewId,
    /// Camera pose to render.
    pub pose: CameraPose,
    /// Scene state to render.
    pub scene: SceneState,
    /// Offset from the start of the document, in milliseconds.
    pub begin_ms: u64,
    /// How long the frame stays visible, in milliseconds.
    pub duration_ms: u64,
}

impl ExportFrame {
    /// Whether this is a hold frame.
    #[must_use]
    pub fn is_hold(&self) -> bool {
        self.kind == FrameKind::Hold
    }

    /// Offset at which the next frame begins.
    #[must_use]
    pub fn end_ms(&self) -> u64 {
        self.begin_ms + self.duration_ms
    }
}
