use std::path::Path;

use serde::{Deserialize, Serialize};

use super::frame::ExportFrame;
use crate::error::VistaError;
use crate::options::ExportOptions;
use crate::views::ViewId;

/// Timing of one exported frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestFrame {
    /// Position in the sequence.
    pub index: usize,
    /// Offset from the start, in milliseconds.
    pub begin_ms: u64,
    /// Visible time, in milliseconds.
    pub duration_ms: u64,
    /// Whether this frame holds a keyframe.
    pub hold: bool,
    /// Keyframe the frame belongs to.
    pub view: ViewId,
}

/// Frame ordering and timing metadata written next to an animated export,
/// for tools that rasterize the frames into a bitmap animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportManifest {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Player loop count (0 = forever).
    pub repeat_count: u32,
    /// Every frame, in order.
    pub frames: Vec<ManifestFrame>,
    /// Indices of hold frames.
    pub hold_indices: Vec<usize>,
    /// Length of one pass, in milliseconds.
    pub total_duration_ms: u64,
}

impl ExportManifest {
    /// Manifest describing `frames`.
    #[must_use]
    pub fn from_frames(
        frames: &[ExportFrame],
        options: &ExportOptions,
    ) -> Self {
        let manifest_frames: Vec<ManifestFrame> = frames
            .iter()
            .map(|f| ManifestFrame {
                index: f.index,
                begin_ms: f.begin_ms,
                duration_ms: f.duration_ms,
                hold: f.is_hold(),
                view: f.view.clone(),
            })
            .collect();
        Self {
            width: options.width,
            height: options.height,
            repeat_count: options.repeat_count,
            hold_indices: frames
                .iter()
                .filter(|f| f.is_hold())
                .map(|f| f.index)
                .collect(),
            total_duration_ms: frames.last().map_or(0, ExportFrame::end_ms),
            frames: manifest_frames,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, VistaError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VistaError::Render(e.to_string()))
    }

    /// Write the manifest as JSON.
    pub fn save(&self, path: &Path) -> Result<(), VistaError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::CameraPose;
    use crate::export::sequence::build_sequence;
    use crate::options::Options;
    use crate::scene::SceneState;
    use crate::views::View;

    #[test]
    fn manifest_lists_holds_and_total() {
        let views = vec![
            View::new("a", "A", CameraPose::new(Vec3::Z * 5.0, 1.0))
                .with_duration_ms(1000),
            View::new("b", "B", CameraPose::new(Vec3::X * 5.0, 1.0))
                .with_duration_ms(1000),
        ];
        let options = Options::default();
        let frames =
            build_sequence(&views, &SceneState::default(), &options).unwrap();
        let manifest = ExportManifest::from_frames(&frames, &options.export);

        assert_eq!(manifest.frames.len(), 16);
        assert_eq!(manifest.hold_indices, [0, 1, 2, 13, 14, 15]);
        assert_eq!(manifest.total_duration_ms, 600 + 1000 + 600);

        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"holdIndices\""));
        assert!(json.contains("\"totalDurationMs\": 2200"));
        let parsed: ExportManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn empty_manifest() {
        let manifest =
            ExportManifest::from_frames(&[], &ExportOptions::default());
        assert!(manifest.frames.is_empty());
        assert_eq!(manifest.total_duration_ms, 0);
    }
}
