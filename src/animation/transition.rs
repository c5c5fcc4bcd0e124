//! One in-flight camera transition and the handle callers hold on to.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::camera::CameraPose;
use crate::views::ViewId;

/// Describes a single interpolation: captured start pose, target pose,
/// duration, and the generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    /// Live camera pose when the transition was requested.
    pub start: CameraPose,
    /// Pose copied from the target view.
    pub end: CameraPose,
    /// Total duration. Zero completes immediately.
    pub duration: Duration,
    /// Generation id this transition was started under.
    pub generation: u64,
    /// Target view, if the transition heads to a saved view.
    pub view: Option<ViewId>,
}

/// Lifecycle of a transition as seen through its handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    /// Still ticking.
    Pending,
    /// Reached its end pose.
    Completed,
    /// Stopped before reaching its end pose.
    Canceled,
}

impl TransitionStatus {
    /// Whether the completion signal has fired.
    #[must_use]
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Cancelable handle to a transition.
///
/// Clones share the same completion signal. The signal leaves
/// [`TransitionStatus::Pending`] exactly once; later attempts to complete or
/// cancel are ignored.
#[derive(Debug, Clone)]
pub struct TransitionHandle {
    generation: u64,
    view: Option<ViewId>,
    status: Rc<Cell<TransitionStatus>>,
}

impl TransitionHandle {
    pub(crate) fn new(generation: u64, view: Option<ViewId>) -> Self {
        Self {
            generation,
            view,
            status: Rc::new(Cell::new(TransitionStatus::Pending)),
        }
    }

    /// Generation this transition was started under.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Target view, if any.
    #[must_use]
    pub fn view(&self) -> Option<&ViewId> {
        self.view.as_ref()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> TransitionStatus {
        self.status.get()
    }

    /// Whether the completion signal has fired.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    /// Cancel the transition. The signal fires immediately; the controller
    /// stops ticking it at its next frame. No-op once finished.
    pub fn cancel(&self) {
        let _ = self.finish(TransitionStatus::Canceled);
    }

    /// Fire the completion signal. Returns `false` if it already fired.
    pub(crate) fn finish(&self, outcome: TransitionStatus) -> bool {
        if self.is_finished() || !outcome.is_finished() {
            return false;
        }
        self.status.set(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_fires_once() {
        let handle = TransitionHandle::new(3, None);
        let observer = handle.clone();
        assert_eq!(observer.status(), TransitionStatus::Pending);

        assert!(handle.finish(TransitionStatus::Completed));
        assert_eq!(observer.status(), TransitionStatus::Completed);

        // Later cancel or re-completion is ignored
        handle.cancel();
        assert!(!handle.finish(TransitionStatus::Canceled));
        assert_eq!(observer.status(), TransitionStatus::Completed);
    }

    #[test]
    fn cancel_is_idempotent() {
        let handle = TransitionHandle::new(1, Some("a".into()));
        handle.cancel();
        handle.cancel();
        assert_eq!(handle.status(), TransitionStatus::Canceled);
        assert_eq!(handle.view().map(ViewId::as_str), Some("a"));
    }

    #[test]
    fn pending_is_not_an_outcome() {
        let handle = TransitionHandle::new(1, None);
        assert!(!handle.finish(TransitionStatus::Pending));
        assert!(!handle.is_finished());
    }
}
