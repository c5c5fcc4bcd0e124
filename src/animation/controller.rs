//! Transition controller: drives one pose interpolation to completion.
//!
//! On each tick it computes `raw_t = min(elapsed / duration, 1)`, eases it,
//! interpolates the pose, and commits it to the live camera. At most one
//! transition is ever active; beginning a new one cancels the previous
//! before any new pose is committed.

use std::time::Duration;

use super::interpolation::InterpolationContext;
use super::scheduler::{FrameScheduler, FrameToken};
use super::transition::{TransitionHandle, TransitionRequest, TransitionStatus};
use crate::camera::{interpolate_pose, CameraPose};
use crate::error::{PoseEndpoint, VistaError};
use crate::util::easing::EasingFunction;

/// Result of one controller tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing is animating.
    Idle,
    /// A pose was committed and another frame was requested.
    Running(InterpolationContext),
    /// The end pose was committed; the completion signal fired.
    Completed {
        /// Generation of the finished transition.
        generation: u64,
    },
    /// The handle was canceled from outside since the last tick.
    Canceled {
        /// Generation of the canceled transition.
        generation: u64,
    },
}

struct ActiveTransition {
    request: TransitionRequest,
    started_at: Duration,
    frame: FrameToken,
    handle: TransitionHandle,
}

impl ActiveTransition {
    fn progress(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.started_at);
        if self.request.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.request.duration.as_secs_f32())
                .min(1.0)
        }
    }
}

/// Drives a single transition on the live camera.
pub struct TransitionController {
    easing: EasingFunction,
    active: Option<ActiveTransition>,
}

impl TransitionController {
    /// Controller that eases progress with `easing`.
    #[must_use]
    pub fn new(easing: EasingFunction) -> Self {
        Self {
            easing,
            active: None,
        }
    }

    /// Easing applied to raw progress.
    #[must_use]
    pub fn easing(&self) -> EasingFunction {
        self.easing
    }

    /// Change the easing used by later ticks.
    pub fn set_easing(&mut self, easing: EasingFunction) {
        self.easing = easing;
    }

    /// Whether a transition is driving the camera.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Generation of the active transition, if any.
    #[must_use]
    pub fn active_generation(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.request.generation)
    }

    /// Start driving `request`.
    ///
    /// Both poses are validated first; on error nothing changes, including
    /// any transition already running. Otherwise the running transition is
    /// canceled, and a zero duration commits the end pose immediately with
    /// no frame scheduled.
    pub fn begin<S: FrameScheduler>(
        &mut self,
        scheduler: &mut S,
        request: TransitionRequest,
        camera: &mut CameraPose,
    ) -> Result<TransitionHandle, VistaError> {
        request.start.validate(PoseEndpoint::Start)?;
        request.end.validate(PoseEndpoint::End)?;

        let _ = self.cancel(scheduler);

        let handle =
            TransitionHandle::new(request.generation, request.view.clone());

        if request.duration.is_zero() {
            *camera = request.end;
            let _ = handle.finish(TransitionStatus::Completed);
            log::trace!(
                "transition gen {} completed immediately",
                request.generation
            );
            return Ok(handle);
        }

        log::trace!(
            "transition gen {} started ({:?})",
            request.generation,
            request.duration
        );
        let frame = scheduler.request_frame();
        self.active = Some(ActiveTransition {
            started_at: scheduler.now(),
            request,
            frame,
            handle: handle.clone(),
        });
        Ok(handle)
    }

    /// Advance the active transition to the scheduler's current time.
    ///
    /// On error the camera keeps the last committed pose and the
    /// transition stays registered.
    pub fn tick<S: FrameScheduler>(
        &mut self,
        scheduler: &mut S,
        camera: &mut CameraPose,
    ) -> Result<TickOutcome, VistaError> {
        let Some(active) = self.active.as_mut() else {
            return Ok(TickOutcome::Idle);
        };

        if active.handle.status() == TransitionStatus::Canceled {
            let generation = active.request.generation;
            scheduler.cancel_frame(active.frame);
            self.active = None;
            return Ok(TickOutcome::Canceled { generation });
        }

        let raw_t = active.progress(scheduler.now());
        if raw_t >= 1.0 {
            let generation = active.request.generation;
            *camera = active.request.end;
            let _ = active.handle.finish(TransitionStatus::Completed);
            self.active = None;
            return Ok(TickOutcome::Completed { generation });
        }

        let eased_t = self.easing.evaluate(raw_t);
        let request = &active.request;
        *camera = interpolate_pose(&request.start, &request.end, eased_t)?;
        active.frame = scheduler.request_frame();
        Ok(TickOutcome::Running(InterpolationContext::new(raw_t, eased_t)))
    }

    /// Stop the active transition without reaching its end pose.
    ///
    /// Releases the frame registration and fires the completion signal as
    /// canceled. Returns the canceled generation, or `None` if nothing was
    /// running.
    pub fn cancel<S: FrameScheduler>(
        &mut self,
        scheduler: &mut S,
    ) -> Option<u64> {
        let active = self.active.take()?;
        scheduler.cancel_frame(active.frame);
        let _ = active.handle.finish(TransitionStatus::Canceled);
        log::trace!("transition gen {} canceled", active.request.generation);
        Some(active.request.generation)
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(EasingFunction::default())
    }
}

impl std::fmt::Debug for TransitionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionController")
            .field("easing", &self.easing)
            .field("active_generation", &self.active_generation())
            .finish()
    }
}
