//! Animation session: the Idle / Animating / Previewing state machine.
//!
//! A session owns the live camera, the live scene state, and the single
//! [`TransitionController`] allowed to write to them. It is an explicit
//! context object: hosts create one per scene and pass views in; nothing is
//! global, so independent sessions can run side by side.
//!
//! Every new transition and every cancel bumps the generation counter. A
//! completion is honored only while its generation is still current, so a
//! superseded transition can never clobber the pose of a later one.

use std::time::Duration;

use super::controller::{TickOutcome, TransitionController};
use super::preview::{PreviewLoop, PreviewPhase};
use super::scene_transition::SceneTransition;
use super::scheduler::{FrameScheduler, FrameToken};
use super::transition::{TransitionHandle, TransitionRequest, TransitionStatus};
use crate::camera::CameraPose;
use crate::error::{PoseEndpoint, VistaError};
use crate::options::Options;
use crate::scene::SceneState;
use crate::views::{View, ViewId};

/// Top-level mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
    /// Nothing is moving.
    #[default]
    Idle,
    /// A single requested transition is in flight.
    Animating,
    /// The preview loop is cycling through keyframes.
    Previewing,
}

/// Bookkeeping owned by the state machine. Read-only outside it.
#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    mode: AnimationMode,
    current_generation: u64,
    last_reached_view: Option<ViewId>,
    pending: Option<TransitionHandle>,
}

impl AnimationState {
    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    /// Generation of the most recent transition request or cancel.
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.current_generation
    }

    /// Last view a transition actually arrived at.
    #[must_use]
    pub fn last_reached_view(&self) -> Option<&ViewId> {
        self.last_reached_view.as_ref()
    }

    /// Handle of the transition currently awaited, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&TransitionHandle> {
        self.pending.as_ref()
    }
}

/// Notifications produced by a session, drained by [`AnimationSession::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationEvent {
    /// A transition toward a view began.
    TransitionStarted {
        /// Target view.
        view: ViewId,
        /// Generation of the new transition.
        generation: u64,
    },
    /// A transition arrived and its generation was still current.
    TransitionCompleted {
        /// View reached.
        view: ViewId,
        /// Generation of the finished transition.
        generation: u64,
    },
    /// A transition was superseded or canceled before arriving.
    TransitionCanceled {
        /// Generation of the canceled transition.
        generation: u64,
    },
    /// The preview loop started.
    PreviewStarted {
        /// Keyframe index of the first transition.
        start_index: usize,
    },
    /// The preview loop moved on to a keyframe.
    PreviewAdvanced {
        /// Keyframe index.
        index: usize,
        /// Keyframe view.
        view: ViewId,
    },
    /// The preview loop wrapped from the last keyframe to the first.
    PreviewPassCompleted {
        /// Passes completed so far.
        passes: u64,
    },
    /// The preview loop stopped.
    PreviewStopped,
}

/// An animation context: live camera, scene state, and the state machine
/// that moves them between views.
pub struct AnimationSession<S: FrameScheduler> {
    scheduler: S,
    options: Options,
    camera: CameraPose,
    scene: SceneState,
    controller: TransitionController,
    scene_transition: Option<SceneTransition>,
    target_view: Option<ViewId>,
    state: AnimationState,
    preview: Option<PreviewLoop>,
    /// Frame registered while the preview holds at a keyframe.
    hold_frame: Option<FrameToken>,
    events: Vec<AnimationEvent>,
}

impl<S: FrameScheduler> AnimationSession<S> {
    /// Idle session at the default camera pose with an empty scene.
    pub fn new(scheduler: S, options: Options) -> Self {
        let controller = TransitionController::new(options.transition.easing);
        Self {
            scheduler,
            options,
            camera: CameraPose::default(),
            scene: SceneState::default(),
            controller,
            scene_transition: None,
            target_view: None,
            state: AnimationState::default(),
            preview: None,
            hold_frame: None,
            events: Vec::new(),
        }
    }

    /// Start from the given camera pose.
    #[must_use]
    pub fn with_camera(mut self, camera: CameraPose) -> Self {
        self.camera = camera;
        self
    }

    /// Start from the given scene state.
    #[must_use]
    pub fn with_scene(mut self, scene: SceneState) -> Self {
        self.scene = scene;
        self
    }

    // -- Accessors --

    /// Live camera pose.
    #[must_use]
    pub fn camera(&self) -> &CameraPose {
        &self.camera
    }

    /// Live scene state.
    #[must_use]
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// State machine bookkeeping.
    #[must_use]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> AnimationMode {
        self.state.mode
    }

    /// Running preview loop, if any.
    #[must_use]
    pub fn preview(&self) -> Option<&PreviewLoop> {
        self.preview.as_ref()
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options. The easing change applies from the next tick.
    pub fn set_options(&mut self, options: Options) {
        self.controller.set_easing(options.transition.easing);
        self.options = options;
    }

    /// The injected scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the injected scheduler (e.g. to step a synthetic
    /// clock).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Place the camera directly, as user orbit input does. Anything in
    /// flight is canceled first so the controller is never fighting the
    /// user for the camera.
    pub fn set_camera(&mut self, camera: CameraPose) {
        self.cancel();
        self.camera = camera;
    }

    // -- Public operations --

    /// Transition to `view` over its configured duration.
    ///
    /// Views without a camera pose are a silent no-op (`Ok(None)`). While
    /// previewing, the preview loop is exited first. A transition already
    /// heading to the same view is left running and its handle returned.
    pub fn request_transition(
        &mut self,
        view: &View,
    ) -> Result<Option<TransitionHandle>, VistaError> {
        let duration = self.options.transition.duration_for(view);
        self.retarget(view, duration)
    }

    /// Transition to the view with `id` in `views`. Unknown ids are a silent
    /// no-op.
    pub fn request_transition_to(
        &mut self,
        views: &[View],
        id: &ViewId,
    ) -> Result<Option<TransitionHandle>, VistaError> {
        let Some(view) = views.iter().find(|v| &v.id == id) else {
            log::debug!("transition to unknown view {id} ignored");
            return Ok(None);
        };
        self.request_transition(view)
    }

    /// Arrive at `view` immediately: a zero-duration transition.
    pub fn jump_to(
        &mut self,
        view: &View,
    ) -> Result<Option<TransitionHandle>, VistaError> {
        self.retarget(view, Duration::ZERO)
    }

    /// Start the looping preview over `views`.
    ///
    /// Returns `Ok(false)` without changing anything when fewer than two
    /// views have a camera pose. Resumes after the last view reached.
    pub fn start_preview(
        &mut self,
        views: &[View],
    ) -> Result<bool, VistaError> {
        let Some(preview) =
            PreviewLoop::new(views, self.state.last_reached_view.as_ref())
        else {
            log::debug!("preview needs at least two views with a camera pose");
            return Ok(false);
        };

        self.camera.validate(PoseEndpoint::Start)?;
        match self.state.mode {
            AnimationMode::Previewing => self.exit_preview(),
            AnimationMode::Animating => self.cancel_in_flight(),
            AnimationMode::Idle => {}
        }

        let index = preview.index();
        let view = preview.current().clone();
        log::info!(
            "preview started over {} keyframes at index {index}",
            preview.keyframes().len()
        );
        self.preview = Some(preview);
        self.state.mode = AnimationMode::Previewing;
        self.events.push(AnimationEvent::PreviewStarted { start_index: index });
        self.preview_step(&view, index)?;
        Ok(true)
    }

    /// Stop the preview loop, canceling its in-flight transition. Returns
    /// `false` if no preview was running.
    pub fn stop_preview(&mut self) -> bool {
        if self.state.mode != AnimationMode::Previewing {
            return false;
        }
        self.exit_preview();
        true
    }

    /// Cancel whatever is in flight (transition or preview) and go idle.
    /// The camera stays at its last committed pose.
    pub fn cancel(&mut self) {
        match self.state.mode {
            AnimationMode::Previewing => self.exit_preview(),
            AnimationMode::Animating => {
                self.cancel_in_flight();
                self.state.mode = AnimationMode::Idle;
            }
            AnimationMode::Idle => {}
        }
    }

    /// Advance to the scheduler's current time. Call once per display
    /// refresh. Returns the events produced since the previous tick.
    ///
    /// An interpolation error leaves the camera at its last committed pose.
    pub fn tick(&mut self) -> Result<Vec<AnimationEvent>, VistaError> {
        match self.controller.tick(&mut self.scheduler, &mut self.camera)? {
            TickOutcome::Idle => {}
            TickOutcome::Running(ctx) => {
                if let Some(scene_transition) = &self.scene_transition {
                    scene_transition.apply(&ctx, &mut self.scene);
                }
            }
            TickOutcome::Completed { generation } => {
                self.on_completed(generation);
            }
            TickOutcome::Canceled { generation } => {
                self.on_handle_canceled(generation);
            }
        }
        self.advance_preview()?;
        Ok(std::mem::take(&mut self.events))
    }

    // -- Internals --

    fn retarget(
        &mut self,
        view: &View,
        duration: Duration,
    ) -> Result<Option<TransitionHandle>, VistaError> {
        let Some(end) = view.camera else {
            log::debug!(
                "view {} has no camera pose; transition ignored",
                view.id
            );
            return Ok(None);
        };
        self.camera.validate(PoseEndpoint::Start)?;
        end.validate(PoseEndpoint::End)?;

        if self.state.mode == AnimationMode::Animating
            && self.target_view.as_ref() == Some(&view.id)
        {
            if let Some(pending) = &self.state.pending {
                return Ok(Some(pending.clone()));
            }
        }
        if self.state.mode == AnimationMode::Previewing {
            self.exit_preview();
        }

        let handle = self.start_transition(view, end, duration)?;
        self.state.mode = AnimationMode::Animating;
        self.settle_immediate(&handle);
        Ok(Some(handle))
    }

    fn start_transition(
        &mut self,
        view: &View,
        end: CameraPose,
        duration: Duration,
    ) -> Result<TransitionHandle, VistaError> {
        let generation = self.state.current_generation + 1;
        let superseded = self.controller.active_generation();
        let request = TransitionRequest {
            start: self.camera,
            end,
            duration,
            generation,
            view: Some(view.id.clone()),
        };
        let handle =
            self.controller
                .begin(&mut self.scheduler, request, &mut self.camera)?;

        if let Some(old) = superseded {
            self.events
                .push(AnimationEvent::TransitionCanceled { generation: old });
        }
        self.state.current_generation = generation;
        match &view.scene {
            // Ramps pick up from whatever opacity the old plan reached
            Some(target) => {
                self.scene_transition =
                    Some(SceneTransition::new(&self.scene, target));
            }
            None => self.drop_scene_transition(),
        }
        self.target_view = Some(view.id.clone());
        self.state.pending = Some(handle.clone());

        log::debug!(
            "transition gen {generation} to view {} over {duration:?}",
            view.id
        );
        self.events.push(AnimationEvent::TransitionStarted {
            view: view.id.clone(),
            generation,
        });
        Ok(handle)
    }

    /// Zero-duration transitions finish inside `begin`; route them through
    /// the normal completion path.
    fn settle_immediate(&mut self, handle: &TransitionHandle) {
        if handle.status() == TransitionStatus::Completed {
            self.on_completed(handle.generation());
        }
    }

    fn on_completed(&mut self, generation: u64) {
        if generation != self.state.current_generation {
            log::trace!(
                "dropping stale completion of gen {generation} (current {})",
                self.state.current_generation
            );
            return;
        }

        if let Some(scene_transition) = self.scene_transition.take() {
            scene_transition.finish(&mut self.scene);
        }
        self.state.pending = None;
        let Some(reached) = self.target_view.take() else {
            return;
        };
        self.state.last_reached_view = Some(reached.clone());
        if self.state.mode == AnimationMode::Animating {
            self.state.mode = AnimationMode::Idle;
        }
        self.events.push(AnimationEvent::TransitionCompleted {
            view: reached,
            generation,
        });

        let now = self.scheduler.now();
        let holding = match self.preview.as_mut() {
            Some(preview) => {
                let held =
                    self.options.transition.duration_for(preview.current());
                let until = now + self.options.preview.hold_after(held);
                preview.reached(generation, until)
            }
            None => false,
        };
        if holding {
            self.keep_hold_alive();
        }
    }

    /// Nothing else asks for frames during a hold, so the session does.
    fn keep_hold_alive(&mut self) {
        self.hold_frame = Some(self.scheduler.request_frame());
    }

    /// Abandon the scene plan of a superseded transition, snapping any
    /// half-finished fades to an endpoint.
    fn drop_scene_transition(&mut self) {
        if let Some(scene_transition) = self.scene_transition.take() {
            scene_transition.settle(&mut self.scene);
        }
    }

    fn on_handle_canceled(&mut self, generation: u64) {
        self.events
            .push(AnimationEvent::TransitionCanceled { generation });
        if generation != self.state.current_generation {
            return;
        }
        self.state.current_generation += 1;
        self.drop_scene_transition();
        self.target_view = None;
        self.state.pending = None;
        match self.state.mode {
            // The loop cannot continue without its transition
            AnimationMode::Previewing => self.exit_preview(),
            AnimationMode::Animating => self.state.mode = AnimationMode::Idle,
            AnimationMode::Idle => {}
        }
    }

    fn advance_preview(&mut self) -> Result<(), VistaError> {
        let now = self.scheduler.now();
        let Some(preview) = self.preview.as_mut() else {
            return Ok(());
        };
        if !preview.hold_elapsed(now) {
            if matches!(preview.phase(), PreviewPhase::Holding { .. }) {
                self.keep_hold_alive();
            }
            return Ok(());
        }

        if preview.advance() {
            let passes = preview.passes();
            log::debug!("preview pass {passes} completed");
            self.events
                .push(AnimationEvent::PreviewPassCompleted { passes });
        }
        let index = preview.index();
        let view = preview.current().clone();
        self.preview_step(&view, index)
    }

    fn preview_step(
        &mut self,
        view: &View,
        index: usize,
    ) -> Result<(), VistaError> {
        let Some(end) = view.camera else {
            return Ok(());
        };
        let duration = self.options.transition.duration_for(view);
        let handle = match self.start_transition(view, end, duration) {
            Ok(handle) => handle,
            Err(e) => {
                log::warn!("preview stopped at keyframe {index}: {e}");
                self.exit_preview();
                return Err(e);
            }
        };
        // The controller's own registration replaced the hold frame
        self.hold_frame = None;
        if let Some(preview) = self.preview.as_mut() {
            preview.transitioning(handle.generation());
        }
        self.events.push(AnimationEvent::PreviewAdvanced {
            index,
            view: view.id.clone(),
        });
        self.settle_immediate(&handle);
        Ok(())
    }

    fn exit_preview(&mut self) {
        self.preview = None;
        if let Some(token) = self.hold_frame.take() {
            self.scheduler.cancel_frame(token);
        }
        self.cancel_in_flight();
        self.state.mode = AnimationMode::Idle;
        self.events.push(AnimationEvent::PreviewStopped);
        log::info!("preview stopped");
    }

    fn cancel_in_flight(&mut self) {
        self.state.current_generation += 1;
        if let Some(old) = self.controller.cancel(&mut self.scheduler) {
            self.events
                .push(AnimationEvent::TransitionCanceled { generation: old });
        }
        self.drop_scene_transition();
        self.target_view = None;
        self.state.pending = None;
    }
}

impl<S: FrameScheduler> std::fmt::Debug for AnimationSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSession")
            .field("mode", &self.state.mode)
            .field("generation", &self.state.current_generation)
            .field("camera", &self.camera)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::animation::scheduler::ManualScheduler;
    use crate::scene::SceneSnapshot;

    fn view(id: &str, x: f32, y: f32, z: f32, zoom: f32, ms: u32) -> View {
        View::new(id, id, CameraPose::new(Vec3::new(x, y, z), zoom))
            .with_duration_ms(ms)
    }

    fn abc(ms: u32) -> Vec<View> {
        vec![
            view("a", 0.0, 0.0, 10.0, 1.0, ms),
            view("b", 10.0, 0.0, 0.0, 2.0, ms),
            view("c", 0.0, 10.0, 1.0, 1.0, ms),
        ]
    }

    fn reached(s: &AnimationSession<ManualScheduler>) -> Option<&str> {
        s.state().last_reached_view().map(ViewId::as_str)
    }

    fn session() -> AnimationSession<ManualScheduler> {
        AnimationSession::new(ManualScheduler::new(), Options::default())
    }

    /// Step the clock in 16ms frames for `ms`, ticking each frame.
    fn run_for(
        s: &mut AnimationSession<ManualScheduler>,
        ms: u64,
    ) -> Vec<AnimationEvent> {
        let mut events = Vec::new();
        let mut elapsed = 0;
        while elapsed < ms {
            let step = 16.min(ms - elapsed);
            s.scheduler_mut().advance_ms(step);
            events.extend(s.tick().unwrap());
            elapsed += step;
        }
        events
    }

    /// Advance to an exact offset and tick once.
    fn tick_at(
        s: &mut AnimationSession<ManualScheduler>,
        ms: u64,
    ) -> Vec<AnimationEvent> {
        s.scheduler_mut().set_time(Duration::from_millis(ms));
        s.tick().unwrap()
    }

    #[test]
    fn idle_to_animating_to_idle() {
        let views = abc(2000);
        let mut s = session().with_camera(views[0].camera.unwrap());
        let handle = s.request_transition(&views[1]).unwrap().unwrap();
        assert_eq!(s.mode(), AnimationMode::Animating);
        assert_eq!(handle.generation(), 1);

        let events = tick_at(&mut s, 1000);
        assert_eq!(
            events,
            [AnimationEvent::TransitionStarted {
                view: "b".into(),
                generation: 1
            }]
        );
        assert!((s.camera().zoom - 1.5).abs() < 1e-6);
        assert!((s.camera().radius() - 10.0).abs() < 1e-4);

        let events = tick_at(&mut s, 2000);
        assert_eq!(
            events,
            [AnimationEvent::TransitionCompleted {
                view: "b".into(),
                generation: 1
            }]
        );
        assert_eq!(s.mode(), AnimationMode::Idle);
        assert_eq!(*s.camera(), views[1].camera.unwrap());
        assert_eq!(reached(&s), Some("b"));
        assert!(s.state().pending().is_none());
        assert_eq!(handle.status(), TransitionStatus::Completed);
    }

    #[test]
    fn retarget_ends_exactly_at_latest_request() {
        let views = abc(2000);
        let mut s = session().with_camera(views[0].camera.unwrap());
        let first = s.request_transition(&views[1]).unwrap().unwrap();
        let _ = run_for(&mut s, 300);
        let second = s.request_transition(&views[2]).unwrap().unwrap();

        assert_eq!(first.status(), TransitionStatus::Canceled);
        assert_eq!(s.mode(), AnimationMode::Animating);
        assert_eq!(s.state().current_generation(), 2);

        let events = run_for(&mut s, 2500);
        assert!(events
            .contains(&AnimationEvent::TransitionCanceled { generation: 1 }));
        assert!(!events.contains(&AnimationEvent::TransitionCompleted {
            view: "b".into(),
            generation: 1
        }));
        assert_eq!(*s.camera(), views[2].camera.unwrap());
        assert_eq!(second.status(), TransitionStatus::Completed);
        assert_eq!(reached(&s), Some("c"));
        assert_eq!(s.mode(), AnimationMode::Idle);
    }

    #[test]
    fn stale_completion_is_dropped() {
        let views = abc(2000);
        let mut s = session().with_camera(views[0].camera.unwrap());
        let _ = s.request_transition(&views[1]).unwrap();
        let _ = s.request_transition(&views[2]).unwrap();

        s.on_completed(1);
        assert_eq!(s.mode(), AnimationMode::Animating);
        assert!(s.state().last_reached_view().is_none());
        assert!(s.state().pending().is_some());
    }

    #[test]
    fn pose_less_and_unknown_views_are_ignored() {
        let mut views = abc(2000);
        views[1].camera = None;
        let mut s = session();
        assert!(s.request_transition(&views[1]).unwrap().is_none());
        assert!(s
            .request_transition_to(&views, &"nope".into())
            .unwrap()
            .is_none());
        assert_eq!(s.mode(), AnimationMode::Idle);
        assert_eq!(s.state().current_generation(), 0);
    }

    #[test]
    fn degenerate_camera_is_reported_and_state_kept() {
        let views = abc(2000);
        let mut s = session().with_camera(CameraPose::new(Vec3::ZERO, 1.0));
        let err = s.request_transition(&views[0]).unwrap_err();
        assert!(matches!(err, VistaError::DegeneratePose(PoseEndpoint::Start)));
        assert_eq!(s.mode(), AnimationMode::Idle);
        assert_eq!(s.state().current_generation(), 0);
    }

    #[test]
    fn same_target_keeps_running_transition() {
        let views = abc(2000);
        let mut s = session();
        let first = s.request_transition(&views[0]).unwrap().unwrap();
        let again = s.request_transition(&views[0]).unwrap().unwrap();
        assert_eq!(first.generation(), again.generation());
        assert_eq!(first.status(), TransitionStatus::Pending);
    }

    #[test]
    fn jump_completes_immediately() {
        let views = abc(2000);
        let mut s = session();
        let handle = s.jump_to(&views[1]).unwrap().unwrap();
        assert_eq!(handle.status(), TransitionStatus::Completed);
        assert_eq!(s.mode(), AnimationMode::Idle);
        assert_eq!(*s.camera(), views[1].camera.unwrap());
        assert_eq!(s.scheduler().frames_requested(), 0);
    }

    #[test]
    fn handle_cancel_returns_to_idle() {
        let views = abc(2000);
        let mut s = session();
        let handle = s.request_transition(&views[0]).unwrap().unwrap();
        let _ = run_for(&mut s, 100);
        handle.cancel();
        let events = run_for(&mut s, 16);
        assert_eq!(
            events,
            [AnimationEvent::TransitionCanceled { generation: 1 }]
        );
        assert_eq!(s.mode(), AnimationMode::Idle);
        assert!(s.state().current_generation() > 1);
        // Canceling again is harmless
        handle.cancel();
        s.cancel();
        assert_eq!(s.mode(), AnimationMode::Idle);
    }

    #[test]
    fn full_transition_fades_and_slides() {
        let start = SceneSnapshot::with_visible(["tet"]).with_cutplane(0.0);
        let target = SceneSnapshot::with_visible(["cube"]).with_cutplane(1.0);
        let views = vec![
            view("a", 0.0, 0.0, 10.0, 1.0, 2000).with_scene(target.clone())
        ];
        let mut s = session()
            .with_camera(CameraPose::new(Vec3::X * 10.0, 1.0))
            .with_scene(SceneState::from_snapshot(&start));

        let _ = s.request_transition(&views[0]).unwrap();
        let _ = tick_at(&mut s, 1000);
        assert_eq!(s.scene().opacity_of(&"cube".into()), 0.5);
        assert_eq!(s.scene().opacity_of(&"tet".into()), 0.5);
        assert_eq!(s.scene().cutplane, Some(0.5));

        let _ = tick_at(&mut s, 2000);
        assert_eq!(*s.scene(), SceneState::from_snapshot(&target));
    }

    #[test]
    fn preview_pass_timing() {
        let views = abc(1000);
        let mut s = session().with_camera(views[0].camera.unwrap());
        assert!(s.start_preview(&views).unwrap());
        assert_eq!(s.mode(), AnimationMode::Previewing);

        // A reached at 1000, held 500; B at 2500, held; C at 4000, held
        let _ = tick_at(&mut s, 1000);
        assert_eq!(reached(&s), Some("a"));
        let events = tick_at(&mut s, 1499);
        assert!(events.is_empty());
        let events = tick_at(&mut s, 1500);
        assert!(events.contains(&AnimationEvent::PreviewAdvanced {
            index: 1,
            view: "b".into()
        }));
        let _ = tick_at(&mut s, 2500);
        let _ = tick_at(&mut s, 3000);
        let _ = tick_at(&mut s, 4000);
        assert_eq!(reached(&s), Some("c"));

        let events = tick_at(&mut s, 4500);
        assert!(events
            .contains(&AnimationEvent::PreviewPassCompleted { passes: 1 }));
        assert!(events.contains(&AnimationEvent::PreviewAdvanced {
            index: 0,
            view: "a".into()
        }));
        assert_eq!(s.mode(), AnimationMode::Previewing);
    }

    #[test]
    fn preview_resumes_after_last_reached() {
        let views = abc(1000);
        let mut s = session();
        assert!(s.start_preview(&views).unwrap());
        assert_eq!(s.preview().map(PreviewLoop::index), Some(0));

        let _ = tick_at(&mut s, 1000); // a reached
        let _ = tick_at(&mut s, 1500); // toward b
        let _ = tick_at(&mut s, 2500); // b reached, holding
        assert!(s.stop_preview());
        assert_eq!(s.mode(), AnimationMode::Idle);
        assert!(s.preview().is_none());

        assert!(s.start_preview(&views).unwrap());
        assert_eq!(s.preview().map(PreviewLoop::index), Some(2));
    }

    #[test]
    fn stop_mid_transition_skips_hold_and_keeps_last_reached() {
        let views = abc(1000);
        let mut s = session();
        assert!(s.start_preview(&views).unwrap());
        let _ = tick_at(&mut s, 400);
        assert!(s.stop_preview());
        let events = s.tick().unwrap();
        assert!(events
            .contains(&AnimationEvent::TransitionCanceled { generation: 1 }));
        assert!(events.contains(&AnimationEvent::PreviewStopped));
        assert!(s.state().last_reached_view().is_none());
        assert_eq!(s.scheduler().pending_frame(), None);
        assert!(!s.stop_preview());
    }

    #[test]
    fn request_during_preview_exits_loop() {
        let views = abc(1000);
        let mut s = session();
        assert!(s.start_preview(&views).unwrap());
        let _ = tick_at(&mut s, 200);
        let handle = s.request_transition(&views[2]).unwrap().unwrap();
        assert_eq!(s.mode(), AnimationMode::Animating);
        assert!(s.preview().is_none());

        let _ = tick_at(&mut s, 1200);
        assert_eq!(handle.status(), TransitionStatus::Completed);
        assert_eq!(s.mode(), AnimationMode::Idle);
        assert_eq!(*s.camera(), views[2].camera.unwrap());
    }

    #[test]
    fn preview_needs_two_posed_views() {
        let mut views = abc(1000);
        views[1].camera = None;
        views[2].camera = None;
        let mut s = session();
        assert!(!s.start_preview(&views).unwrap());
        assert_eq!(s.mode(), AnimationMode::Idle);
    }

    #[test]
    fn frame_driven_host_keeps_looping_through_holds() {
        let views = abc(1000);
        let mut s = session();
        assert!(s.start_preview(&views).unwrap());

        // The host only ticks when a frame was asked for
        let mut events = Vec::new();
        for _ in 0..320 {
            s.scheduler_mut().advance_ms(16);
            if s.scheduler_mut().take_frame_request() {
                events.extend(s.tick().unwrap());
            }
        }
        assert!(events.contains(&AnimationEvent::TransitionCompleted {
            view: "c".into(),
            generation: 3
        }));
        assert!(events.contains(&AnimationEvent::PreviewPassCompleted {
            passes: 1
        }));
        assert_eq!(s.mode(), AnimationMode::Previewing);
    }

    #[test]
    fn hold_frame_is_canceled_on_stop() {
        let views = abc(1000);
        let mut s = session();
        assert!(s.start_preview(&views).unwrap());
        let _ = tick_at(&mut s, 1000); // a reached, holding
        assert!(s.scheduler().pending_frame().is_some());
        let _ = tick_at(&mut s, 1200);
        assert!(s.scheduler().pending_frame().is_some());

        let canceled = s.scheduler().frames_canceled();
        assert!(s.stop_preview());
        assert_eq!(s.scheduler().pending_frame(), None);
        assert_eq!(s.scheduler().frames_canceled(), canceled + 1);
    }

    #[test]
    fn retarget_mid_fade_settles_opacity() {
        let start = SceneSnapshot::with_visible(["tet"]);
        let target = SceneSnapshot::with_visible(["cube"]);
        let views = abc(1000);
        let faded = views[1].clone().with_scene(target);
        let mut s = session()
            .with_camera(views[0].camera.unwrap())
            .with_scene(SceneState::from_snapshot(&start));

        let _ = s.request_transition(&faded).unwrap();
        let _ = tick_at(&mut s, 300);
        let tet = s.scene().opacity_of(&"tet".into());
        assert!(tet > 0.5 && tet < 1.0);

        // Pose-only view: the fade is abandoned, not frozen
        let _ = s.request_transition(&views[2]).unwrap();
        assert_eq!(*s.scene(), SceneState::from_snapshot(&start));
        let _ = tick_at(&mut s, 1300);
        assert_eq!(*s.scene(), SceneState::from_snapshot(&start));
        assert_eq!(*s.camera(), views[2].camera.unwrap());
    }
}
