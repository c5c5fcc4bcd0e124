//! Animated SVG assembly.
//!
//! Every frame becomes an initially hidden `<g>` layer with a SMIL `<set>`
//! that makes it visible at its `begin_ms` for exactly `duration_ms`, after
//! which it reverts to hidden. Looping is requested through an attribute on
//! the root element and is left to the player.

use std::fmt::Write as _;

use super::frame::ExportFrame;
use super::render::VectorDocument;
use crate::options::ExportOptions;
use crate::util::text::xml_escape;

/// Value written to `data-repeat-count`: `indefinite` for 0.
fn repeat_attr(repeat_count: u32) -> String {
    if repeat_count == 0 {
        "indefinite".to_owned()
    } else {
        repeat_count.to_string()
    }
}

/// Assemble one animated SVG document from rendered frames, in order.
#[must_use]
pub fn assemble_animation<'a, I>(frames: I, options: &ExportOptions) -> String
where
    I: IntoIterator<Item = (&'a ExportFrame, &'a VectorDocument)>,
{
    let mut layers = String::new();
    let mut total_ms = 0;
    for (frame, document) in frames {
        let _ = writeln!(
            layers,
            "<g id=\"frame-{:04}\" visibility=\"hidden\" data-view=\"{}\" \
             data-hold=\"{}\">",
            frame.index,
            xml_escape(frame.view.as_str()),
            frame.is_hold(),
        );
        let _ = writeln!(
            layers,
            "<set attributeName=\"visibility\" to=\"visible\" begin=\"{}ms\" \
             dur=\"{}ms\" fill=\"remove\"/>",
            frame.begin_ms, frame.duration_ms,
        );
        layers.push_str(&document.body);
        if !document.body.is_empty() && !document.body.ends_with('\n') {
            layers.push('\n');
        }
        layers.push_str("</g>\n");
        total_ms = total_ms.max(frame.end_ms());
    }

    let mut svg = String::with_capacity(layers.len() + 256);
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" \
         height=\"{h}\" viewBox=\"0 0 {w} {h}\" data-repeat-count=\"{}\" \
         data-duration-ms=\"{total_ms}\">",
        repeat_attr(options.repeat_count),
        w = options.width,
        h = options.height,
    );
    svg.push_str(&layers);
    svg.push_str("</svg>\n");
    svg
}
