use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Preview", inline)]
#[serde(default)]
/// Looping preview timing.
pub struct PreviewOptions {
    /// Fraction of the transition duration to hold at each keyframe.
    #[schemars(
        title = "Hold Fraction",
        range(min = 0.0, max = 1.0),
        extend("step" = 0.05)
    )]
    pub hold_fraction: f32,
    /// Minimum hold at each keyframe, in milliseconds.
    #[schemars(title = "Minimum Hold (ms)", range(min = 0, max = 10000))]
    pub hold_floor_ms: u32,
}

impl PreviewOptions {
    /// Hold time after a transition of `transition` length:
    /// `max(transition * hold_fraction, hold_floor)`.
    #[must_use]
    pub fn hold_after(&self, transition: Duration) -> Duration {
        let fraction = Self::clamp_fraction(self.hold_fraction);
        let scaled = Duration::try_from_secs_f64(
            transition.as_secs_f64() * f64::from(fraction),
        )
        .unwrap_or(transition);
        scaled.max(Duration::from_millis(u64::from(self.hold_floor_ms)))
    }

    /// Clamp `hold_fraction` into `[0, 1]`, warning when it was out of
    /// range. Non-finite values fall back to the default.
    pub fn sanitize(&mut self) {
        let clamped = Self::clamp_fraction(self.hold_fraction);
        if clamped != self.hold_fraction {
            log::warn!(
                "preview.hold_fraction {} out of range, using {clamped}",
                self.hold_fraction
            );
            self.hold_fraction = clamped;
        }
    }

    fn clamp_fraction(fraction: f32) -> f32 {
        if fraction.is_nan() {
            Self::default().hold_fraction
        } else {
            fraction.clamp(0.0, 1.0)
        }
    }
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            hold_fraction: 1.0 / 3.0,
            hold_floor_ms: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_uses_floor_for_short_transitions() {
        let opts = PreviewOptions::default();
        assert_eq!(
            opts.hold_after(Duration::from_millis(1000)),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn hold_scales_with_long_transitions() {
        let opts = PreviewOptions::default();
        let hold = opts.hold_after(Duration::from_millis(3000));
        assert!(
            (hold.as_secs_f64() - 1.0).abs() < 1e-6,
            "expected ~1s hold, got {hold:?}"
        );
    }

    #[test]
    fn non_finite_fraction_never_panics() {
        let transition = Duration::from_millis(1000);
        let inf = PreviewOptions {
            hold_fraction: f32::INFINITY,
            ..PreviewOptions::default()
        };
        assert_eq!(inf.hold_after(transition), transition);

        let nan = PreviewOptions {
            hold_fraction: f32::NAN,
            ..PreviewOptions::default()
        };
        assert_eq!(nan.hold_after(transition), Duration::from_millis(500));

        let negative = PreviewOptions {
            hold_fraction: -2.0,
            hold_floor_ms: 0,
        };
        assert_eq!(negative.hold_after(transition), Duration::ZERO);
    }

    #[test]
    fn sanitize_clamps_into_unit_range() {
        let mut opts = PreviewOptions {
            hold_fraction: f32::INFINITY,
            ..PreviewOptions::default()
        };
        opts.sanitize();
        assert_eq!(opts.hold_fraction, 1.0);

        opts.hold_fraction = f32::NAN;
        opts.sanitize();
        assert_eq!(opts.hold_fraction, PreviewOptions::default().hold_fraction);
    }
}
