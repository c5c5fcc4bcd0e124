//! Animation system for smooth camera-view transitions.
//!
//! The pieces layer bottom-up: a [`scheduler::FrameScheduler`] supplies time
//! and frame registrations, a [`controller::TransitionController`] drives one
//! pose interpolation, [`scene_transition::SceneTransition`] carries the
//! auxiliary scene state along with it, and [`session::AnimationSession`]
//! sequences everything through the Idle / Animating / Previewing state
//! machine.

pub mod controller;
pub mod interpolation;
pub mod preview;
pub mod scene_transition;
pub mod scheduler;
pub mod session;
pub mod transition;

pub use controller::{TickOutcome, TransitionController};
pub use interpolation::InterpolationContext;
pub use preview::{PreviewLoop, PreviewPhase};
pub use scene_transition::SceneTransition;
pub use scheduler::{
    FrameScheduler, FrameToken, ManualScheduler, SystemScheduler,
};
pub use session::{
    AnimationEvent, AnimationMode, AnimationSession, AnimationState,
};
pub use transition::{TransitionHandle, TransitionRequest, TransitionStatus};
