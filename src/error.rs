//! Crate-level error types.

use std::fmt;

/// Which end of a transition carried an unusable camera pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseEndpoint {
    /// The pose the transition starts from (usually the live camera).
    Start,
    /// The pose the transition moves toward.
    End,
}

impl fmt::Display for PoseEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Errors produced by the vista crate.
#[derive(Debug)]
pub enum VistaError {
    /// A camera position coincides with the look-at origin, so the arc
    /// between the two poses is undefined.
    DegeneratePose(PoseEndpoint),
    /// The render-to-image collaborator failed for a frame.
    Render(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// View list JSON parsing/serialization failure.
    ViewsParse(String),
}

impl fmt::Display for VistaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegeneratePose(which) => write!(
                f,
                "degenerate camera pose: {which} position is at the look-at \
                 origin"
            ),
            Self::Render(msg) => write!(f, "render error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::ViewsParse(msg) => write!(f, "view list parse error: {msg}"),
        }
    }
}

impl std::error::Error for VistaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VistaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
