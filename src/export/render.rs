//! Render-to-image collaborator and the vector documents it produces.

use std::fmt::Write as _;

use crate::camera::CameraPose;
use crate::error::VistaError;
use crate::scene::SceneState;

/// A rendered vector image: SVG markup for the body of a document of the
/// given size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorDocument {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Inner SVG markup (everything between the `<svg>` tags).
    pub body: String,
}

impl VectorDocument {
    /// Document of the given size with the given inner markup.
    #[must_use]
    pub fn new(width: u32, height: u32, body: impl Into<String>) -> Self {
        Self {
            width,
            height,
            body: body.into(),
        }
    }

    /// Standalone SVG file contents.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(self.body.len() + 192);
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" \
             height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height,
        );
        svg.push_str(&self.body);
        if !self.body.is_empty() && !self.body.ends_with('\n') {
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

/// Renders a camera pose and scene state to a vector image.
///
/// Implementations must be deterministic: identical inputs give identical
/// documents. Exports depend on it for reproducible output.
pub trait FrameRenderer {
    /// Render one frame.
    fn render(
        &mut self,
        pose: &CameraPose,
        scene: &SceneState,
    ) -> Result<VectorDocument, VistaError>;
}

impl<F> FrameRenderer for F
where
    F: FnMut(&CameraPose, &SceneState) -> Result<VectorDocument, VistaError>,
{
    fn render(
        &mut self,
        pose: &CameraPose,
        scene: &SceneState,
    ) -> Result<VectorDocument, VistaError> {
        self(pose, scene)
    }
}
