//! Easing functions for camera transitions.
//!
//! Every curve maps normalized progress in `[0, 1]` onto eased progress in
//! `[0, 1]`, is monotonically non-decreasing, and hits both endpoints
//! exactly. The default is smoothstep, whose zero slope at both ends lets
//! consecutive transitions chain without a velocity jump.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Smoothstep polynomial `t²(3 − 2t)`.
    #[default]
    Smoothstep,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First inner control value.
        c1: f32,
        /// Second inner control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0], and the endpoints are returned
    /// exactly so a finished transition lands on its end pose.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        match self {
            EasingFunction::Linear => t,
            EasingFunction::Smoothstep => smoothstep(t),
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

/// Smoothstep polynomial `t²(3 − 2t)`. Callers clamp `t` first.
#[inline]
#[must_use]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 5] = [
        EasingFunction::Linear,
        EasingFunction::Smoothstep,
        EasingFunction::QuadraticIn,
        EasingFunction::QuadraticOut,
        EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 },
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.evaluate(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.evaluate(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_smoothstep_is_monotonic() {
        let easing = EasingFunction::Smoothstep;
        let mut prev = easing.evaluate(0.0);
        for i in 1..=1000 {
            let value = easing.evaluate(i as f32 / 1000.0);
            assert!(value >= prev, "not monotonic at step {i}");
            assert!((0.0..=1.0).contains(&value));
            prev = value;
        }
    }

    #[test]
    fn test_smoothstep_midpoint_and_shape() {
        assert_eq!(smoothstep(0.5), 0.5);
        // Symmetric around the midpoint
        let a = smoothstep(0.25);
        let b = smoothstep(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
        // Slow start
        assert!(a < 0.25);
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);

        let smooth = EasingFunction::Smoothstep;
        assert_eq!(smooth.evaluate(-3.0), 0.0);
        assert_eq!(smooth.evaluate(7.0), 1.0);
    }

    #[test]
    fn test_quadratic_curves() {
        assert_eq!(EasingFunction::QuadraticIn.evaluate(0.5), 0.25);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
    }

    #[test]
    fn test_default_is_smoothstep() {
        assert_eq!(EasingFunction::default(), EasingFunction::Smoothstep);
    }

    #[test]
    fn test_toml_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: EasingFunction,
        }
        let parsed: Wrapper = toml::from_str("easing = \"linear\"").unwrap();
        assert_eq!(parsed.easing, EasingFunction::Linear);
        let source = "easing = { cubic_hermite = { c1 = 0.5, c2 = 1.0 } }";
        let parsed: Wrapper = toml::from_str(source).unwrap();
        assert_eq!(
            parsed.easing,
            EasingFunction::CubicHermite { c1: 0.5, c2: 1.0 }
        );
    }
}
