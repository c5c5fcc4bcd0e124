//! Looping preview sequencer.
//!
//! The loop walks an ordered keyframe list forever: transition to a
//! keyframe, wait for it to complete, hold, move on. It never issues
//! overlapping transitions. Only the first pass can start mid-list (resuming
//! after the last view reached); every later pass restarts at index 0.

use std::time::Duration;

use crate::views::{View, ViewId};

/// Where the loop is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewPhase {
    /// Waiting for the transition of this generation to complete.
    Transitioning {
        /// Generation of the transition in flight.
        generation: u64,
    },
    /// Holding at the reached keyframe until the given time.
    Holding {
        /// Scheduler time at which the hold ends.
        until: Duration,
    },
}

/// State of a running preview loop.
#[derive(Debug, Clone)]
pub struct PreviewLoop {
    keyframes: Vec<View>,
    index: usize,
    passes: u64,
    phase: PreviewPhase,
}

impl PreviewLoop {
    /// Loop over the animatable views in `views`. `None` when fewer than two
    /// views have a camera pose.
    ///
    /// The first keyframe is the one after `last_reached` if it is in the
    /// list, wrapping to 0, else index 0.
    #[must_use]
    pub fn new(views: &[View], last_reached: Option<&ViewId>) -> Option<Self> {
        let keyframes: Vec<View> =
            views.iter().filter(|v| v.is_animatable()).cloned().collect();
        if keyframes.len() < 2 {
            return None;
        }
        let index = Self::start_index(&keyframes, last_reached);
        Some(Self {
            keyframes,
            index,
            passes: 0,
            phase: PreviewPhase::Holding {
                until: Duration::ZERO,
            },
        })
    }

    /// Index the loop starts at when resuming after `last_reached`.
    #[must_use]
    pub fn start_index(
        keyframes: &[View],
        last_reached: Option<&ViewId>,
    ) -> usize {
        last_reached
            .and_then(|id| keyframes.iter().position(|v| &v.id == id))
            .map_or(0, |i| (i + 1) % keyframes.len().max(1))
    }

    /// Keyframes the loop cycles through.
    #[must_use]
    pub fn keyframes(&self) -> &[View] {
        &self.keyframes
    }

    /// Index of the keyframe currently targeted (or held at).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Keyframe currently targeted (or held at).
    #[must_use]
    pub fn current(&self) -> &View {
        &self.keyframes[self.index]
    }

    /// Completed passes (wraps from the last keyframe back to index 0).
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> PreviewPhase {
        self.phase
    }

    /// Record the transition just issued toward the current keyframe.
    pub fn transitioning(&mut self, generation: u64) {
        self.phase = PreviewPhase::Transitioning { generation };
    }

    /// The current keyframe was reached: hold until `until`. Ignored unless
    /// `generation` is the transition this loop is waiting for.
    pub fn reached(&mut self, generation: u64, until: Duration) -> bool {
        match self.phase {
            PreviewPhase::Transitioning { generation: waiting }
                if waiting == generation =>
            {
                self.phase = PreviewPhase::Holding { until };
                true
            }
            _ => false,
        }
    }

    /// Whether the hold has elapsed at `now`.
    #[must_use]
    pub fn hold_elapsed(&self, now: Duration) -> bool {
        matches!(self.phase, PreviewPhase::Holding { until } if now >= until)
    }

    /// Step to the next keyframe. Returns `true` when this wrapped around,
    /// completing a pass.
    pub fn advance(&mut self) -> bool {
        self.index += 1;
        if self.index >= self.keyframes.len() {
            self.index = 0;
            self.passes += 1;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::CameraPose;

    fn views(ids: &[&str]) -> Vec<View> {
        ids.iter()
            .map(|id| View::new(*id, *id, CameraPose::new(Vec3::Z, 1.0)))
            .collect()
    }

    #[test]
    fn needs_two_animatable_views() {
        assert!(PreviewLoop::new(&views(&["a"]), None).is_none());

        let mut list = views(&["a"]);
        list.push(View {
            camera: None,
            ..views(&["b"]).remove(0)
        });
        assert!(PreviewLoop::new(&list, None).is_none());
        assert!(PreviewLoop::new(&views(&["a", "b"]), None).is_some());
    }

    #[test]
    fn resume_starts_after_last_reached() {
        let list = views(&["a", "b", "c"]);
        let resumed = PreviewLoop::new(&list, Some(&"b".into())).unwrap();
        assert_eq!(resumed.index(), 2);
        let wrapped = PreviewLoop::new(&list, Some(&"c".into())).unwrap();
        assert_eq!(wrapped.index(), 0);
        let unknown = PreviewLoop::new(&list, Some(&"zz".into())).unwrap();
        assert_eq!(unknown.index(), 0);
    }

    #[test]
    fn later_passes_restart_at_zero() {
        let list = views(&["a", "b", "c"]);
        let mut preview = PreviewLoop::new(&list, Some(&"a".into())).unwrap();
        assert_eq!(preview.current().id.as_str(), "b");
        assert!(!preview.advance());
        assert_eq!(preview.current().id.as_str(), "c");
        assert!(preview.advance());
        assert_eq!(preview.index(), 0);
        assert_eq!(preview.passes(), 1);
    }

    #[test]
    fn reached_only_honors_awaited_generation() {
        let mut preview = PreviewLoop::new(&views(&["a", "b"]), None).unwrap();
        preview.transitioning(5);
        assert!(!preview.reached(4, Duration::from_millis(10)));
        assert!(!preview.hold_elapsed(Duration::from_secs(100)));
        assert!(preview.reached(5, Duration::from_millis(10)));
        assert!(!preview.hold_elapsed(Duration::from_millis(9)));
        assert!(preview.hold_elapsed(Duration::from_millis(10)));
    }
}
