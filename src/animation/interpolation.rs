//! Per-tick interpolation context.

use crate::camera::lerp;

/// Progress values computed once per tick, then shared by the camera and
/// scene-state interpolation so the two never desync.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationContext {
    /// Raw progress (0.0 to 1.0), `min(elapsed / duration, 1)`.
    pub raw_t: f32,
    /// Eased progress. Drives poses, fades, and the cutplane.
    pub eased_t: f32,
}

impl InterpolationContext {
    /// Context from raw and eased values.
    #[must_use]
    pub fn new(raw_t: f32, eased_t: f32) -> Self {
        Self { raw_t, eased_t }
    }

    /// Animation complete (t=1.0).
    #[must_use]
    pub fn identity() -> Self {
        Self::new(1.0, 1.0)
    }

    /// Linear context (no easing).
    #[must_use]
    pub fn linear(raw_t: f32) -> Self {
        Self::new(raw_t, raw_t)
    }

    /// Whether this is the final tick.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.raw_t >= 1.0
    }

    /// Lerp two f32 values by eased progress.
    #[inline]
    #[must_use]
    pub fn lerp_f32(&self, start: f32, end: f32) -> f32 {
        lerp(start, end, self.eased_t)
    }

    /// Step between two integers at even raw-progress intervals.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    #[must_use]
    pub fn step_i64(&self, start: i64, end: i64) -> i64 {
        let span = i128::from(end) - i128::from(start);
        let offset =
            (span as f64 * f64::from(self.raw_t.clamp(0.0, 1.0))).round();
        (i128::from(start) + offset as i128).clamp(
            i128::from(i64::MIN),
            i128::from(i64::MAX),
        ) as i64
    }
}

impl Default for InterpolationContext {
    fn default() -> Self {
        Self::identity()
    }
}
