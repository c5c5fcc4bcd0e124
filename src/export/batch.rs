use std::path::{Path, PathBuf};

use super::render::{FrameRenderer, VectorDocument};
use super::sequence::keyframes;
use crate::error::VistaError;
use crate::scene::SceneState;
use crate::util::text::slugify;
use crate::views::{View, ViewId};

/// One still image produced by batch export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// File name, `NN-<slug>.svg`, numbered from 1 in keyframe order.
    pub name: String,
    /// View the image shows.
    pub view: ViewId,
    /// Rendered document.
    pub document: VectorDocument,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its name.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, VistaError> {
        let path = dir.join(&self.name);
        std::fs::write(&path, self.document.to_svg())?;
        Ok(path)
    }
}

/// Render every posed view at its saved pose and scene state, with no
/// interpolation. Views without a pose are skipped.
pub fn export_batch<R: FrameRenderer + ?Sized>(
    views: &[View],
    base: &SceneState,
    renderer: &mut R,
) -> Result<Vec<ExportArtifact>, VistaError> {
    keyframes(views, base)
        .into_iter()
        .enumerate()
        .map(|(i, key)| {
            let document = renderer.render(&key.pose, &key.scene)?;
            Ok(ExportArtifact {
                name: format!("{:02}-{}.svg", i + 1, slugify(&key.view.name)),
                view: key.view.id.clone(),
                document,
            })
        })
        .collect()
}
