//! Export pipeline: batch stills and animated vector documents.
//!
//! Both modes are pure functions of the ordered view list. They never touch
//! a live session's camera. Frames are rendered in sequence so the
//! assembled output is deterministic.
//!
//! # Modes
//! - [`Exporter::batch`]: one still per posed view, at its exact saved state.
//! - [`Exporter::animate`]: hold and interpolated frames assembled into one
//!   animated SVG, plus an [`ExportManifest`] with the frame timings.

mod axes;
mod batch;
mod frame;
mod manifest;
mod render;
mod sequence;
mod svg;

pub use axes::AxesRenderer;
pub use batch::{export_batch, ExportArtifact};
pub use frame::{ExportFrame, FrameKind};
pub use manifest::{ExportManifest, ManifestFrame};
pub use render::{FrameRenderer, VectorDocument};
use rustc_hash::FxHashMap;
pub use sequence::{build_sequence, keyframes, Keyframe};
pub use svg::assemble_animation;

use crate::error::VistaError;
use crate::options::Options;
use crate::scene::SceneState;
use crate::views::View;

/// Result of an animated export.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationExport {
    /// The assembled SVG document.
    pub svg: String,
    /// Frame timing metadata.
    pub manifest: ExportManifest,
    /// The frames that were rendered, in order.
    pub frames: Vec<ExportFrame>,
}

/// Export entry point bound to a set of options and a starting scene state.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: Options,
    base_scene: SceneState,
}

impl Exporter {
    /// Exporter using `options`, starting from an empty scene.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            base_scene: SceneState::default(),
        }
    }

    /// Scene state shown at keyframes before the first view that carries a
    /// snapshot.
    #[must_use]
    pub fn with_base_scene(mut self, scene: SceneState) -> Self {
        self.base_scene = scene;
        self
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Timed frame sequence for `views`, without rendering.
    pub fn frames(
        &self,
        views: &[View],
    ) -> Result<Vec<ExportFrame>, VistaError> {
        build_sequence(views, &self.base_scene, &self.options)
    }

    /// Render one still per posed view.
    pub fn batch<R: FrameRenderer + ?Sized>(
        &self,
        views: &[View],
        renderer: &mut R,
    ) -> Result<Vec<ExportArtifact>, VistaError> {
        let artifacts = export_batch(views, &self.base_scene, renderer)?;
        log::info!("batch export: {} stills", artifacts.len());
        Ok(artifacts)
    }

    /// Render and assemble the animated document for `views`.
    ///
    /// Hold frames of the same keyframe are rendered once and reused.
    pub fn animate<R: FrameRenderer + ?Sized>(
        &self,
        views: &[View],
        renderer: &mut R,
    ) -> Result<AnimationExport, VistaError> {
        let frames = self.frames(views)?;

        let mut holds: FxHashMap<usize, VectorDocument> = FxHashMap::default();
        let mut documents = Vec::with_capacity(frames.len());
        for frame in &frames {
            if frame.is_hold() {
                if let Some(cached) = holds.get(&frame.keyframe) {
                    documents.push(cached.clone());
                    continue;
                }
            }
            let document = renderer.render(&frame.pose, &frame.scene)?;
            if frame.is_hold() {
                let _ = holds.insert(frame.keyframe, document.clone());
            }
            documents.push(document);
        }

        let export = &self.options.export;
        let svg = assemble_animation(frames.iter().zip(&documents), export);
        let manifest = ExportManifest::from_frames(&frames, export);
        log::info!(
            "animated export: {} frames, {} ms per pass",
            frames.len(),
            manifest.total_duration_ms
        );
        Ok(AnimationExport {
            svg,
            manifest,
            frames,
        })
    }
}
