//! Shared utilities: easing curves and text helpers for vector output.

pub mod easing;
pub mod text;
