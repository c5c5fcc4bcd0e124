use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;
use crate::views::{
    View, DEFAULT_TRANSITION_MS, MAX_TRANSITION_MS, MIN_TRANSITION_MS,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Transitions", inline)]
#[serde(default)]
/// Live camera transition parameters.
pub struct TransitionOptions {
    /// Duration used when a view does not store its own.
    #[schemars(title = "Default Duration (ms)", range(min = 1000, max = 24000))]
    pub default_duration_ms: u32,
    /// Lower bound applied to per-view durations.
    #[schemars(skip)]
    pub min_duration_ms: u32,
    /// Upper bound applied to per-view durations.
    #[schemars(skip)]
    pub max_duration_ms: u32,
    /// Easing curve applied to raw progress.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
}

impl TransitionOptions {
    /// Clamp a requested duration to the configured range.
    #[must_use]
    pub fn clamp_ms(&self, ms: u32) -> u32 {
        let (lo, hi) = if self.min_duration_ms <= self.max_duration_ms {
            (self.min_duration_ms, self.max_duration_ms)
        } else {
            (self.max_duration_ms, self.min_duration_ms)
        };
        ms.clamp(lo, hi)
    }

    /// Transition duration into `view` in milliseconds: its stored value or
    /// the default, clamped.
    #[must_use]
    pub fn duration_ms_for(&self, view: &View) -> u32 {
        self.clamp_ms(
            view.transition_duration_ms
                .unwrap_or(self.default_duration_ms),
        )
    }

    /// Transition duration into `view`.
    #[must_use]
    pub fn duration_for(&self, view: &View) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms_for(view)))
    }
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_TRANSITION_MS,
            min_duration_ms: MIN_TRANSITION_MS,
            max_duration_ms: MAX_TRANSITION_MS,
            easing: EasingFunction::Smoothstep,
        }
    }
}
