//! Built-in renderer that draws the Cartesian frame as seen from a pose.
//!
//! Real hosts plug in their own [`FrameRenderer`]; this one exists so the
//! command-line exporter produces something meaningful with no external
//! renderer, and so tests have a deterministic collaborator.

use std::fmt::Write as _;

use glam::{Mat4, Vec3};

use super::render::{FrameRenderer, VectorDocument};
use crate::camera::CameraPose;
use crate::error::VistaError;
use crate::scene::SceneState;
use crate::util::text::{fmt_coord, xml_escape};

/// Axis arrows and their stroke colors.
const AXES: [(Vec3, &str, &str); 3] = [
    (Vec3::X, "x", "#d64541"),
    (Vec3::Y, "y", "#3fa34d"),
    (Vec3::Z, "z", "#2f6fd6"),
];

/// Projects the basis arrows, the section plane, and the visible-instance
/// list for a pose.
#[derive(Debug, Clone, PartialEq)]
pub struct AxesRenderer {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Unzoomed vertical field of view in degrees.
    pub fovy: f32,
    /// World-space length of each axis arrow.
    pub axis_length: f32,
}

impl AxesRenderer {
    /// Renderer for the given output size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fovy: 45.0,
            axis_length: 2.0,
        }
    }

    /// Project a world point to screen pixels. `None` behind the camera.
    #[allow(clippy::cast_precision_loss)]
    fn project(&self, view_proj: &Mat4, point: Vec3) -> Option<(f32, f32)> {
        let clip = *view_proj * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x + 1.0) * 0.5 * self.width as f32;
        let y = (1.0 - ndc.y) * 0.5 * self.height as f32;
        Some((x, y))
    }

    fn draw_axes(&self, out: &mut String, view_proj: &Mat4) {
        let Some((ox, oy)) = self.project(view_proj, Vec3::ZERO) else {
            return;
        };
        for (dir, label, color) in AXES {
            let Some((x, y)) = self.project(view_proj, dir * self.axis_length)
            else {
                continue;
            };
            let _ = writeln!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" \
                 stroke=\"{color}\" stroke-width=\"2\" \
                 stroke-linecap=\"round\"/>",
                fmt_coord(ox),
                fmt_coord(oy),
                fmt_coord(x),
                fmt_coord(y),
            );
            let _ = writeln!(
                out,
                "<text x=\"{}\" y=\"{}\" fill=\"{color}\" \
                 font-size=\"12\">{label}</text>",
                fmt_coord(x + 4.0),
                fmt_coord(y - 4.0),
            );
        }
    }

    fn draw_cutplane(&self, out: &mut String, view_proj: &Mat4, z: f32) {
        let h = self.axis_length;
        let corners = [
            Vec3::new(-h, -h, z),
            Vec3::new(h, -h, z),
            Vec3::new(h, h, z),
            Vec3::new(-h, h, z),
        ];
        let projected: Option<Vec<String>> = corners
            .iter()
            .map(|&c| {
                self.project(view_proj, c)
                    .map(|(x, y)| format!("{},{}", fmt_coord(x), fmt_coord(y)))
            })
            .collect();
        if let Some(points) = projected {
            let _ = writeln!(
                out,
                "<polygon points=\"{}\" fill=\"#8a8a8a\" fill-opacity=\"0.2\" \
                 stroke=\"#8a8a8a\"/>",
                points.join(" ")
            );
        }
    }

    fn draw_instances(out: &mut String, scene: &SceneState) {
        for (row, id) in scene.visible.iter().enumerate() {
            let opacity = scene.opacity_of(id);
            let _ = writeln!(
                out,
                "<text x=\"8\" y=\"{}\" font-size=\"12\" \
                 fill-opacity=\"{}\">{}</text>",
                16 + row * 14,
                fmt_coord(opacity),
                xml_escape(id.as_str()),
            );
        }
    }
}

impl Default for AxesRenderer {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl FrameRenderer for AxesRenderer {
    #[allow(clippy::cast_precision_loss)]
    fn render(
        &mut self,
        pose: &CameraPose,
        scene: &SceneState,
    ) -> Result<VectorDocument, VistaError> {
        if self.width == 0 || self.height == 0 {
            return Err(VistaError::Render(format!(
                "output size {}x{} is empty",
                self.width, self.height
            )));
        }
        let aspect = self.width as f32 / self.height as f32;
        let view_proj = pose.view_proj(aspect, self.fovy);

        let mut body = String::new();
        if let Some(z) = scene.cutplane {
            self.draw_cutplane(&mut body, &view_proj, z);
        }
        self.draw_axes(&mut body, &view_proj);
        Self::draw_instances(&mut body, scene);
        Ok(VectorDocument::new(self.width, self.height, body))
    }
}
