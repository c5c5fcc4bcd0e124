// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (default thresholds)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera-view animation engine.
//!
//! Vista moves an orbit camera between saved views along an arc around a
//! fixed look-at origin, carrying auxiliary scene state (instance fades, a
//! section plane, stepped sliders) alongside it. It also loops through views
//! as a preview and exports them as stills or as one animated vector
//! document.
//!
//! # Key entry points
//!
//! - [`animation::AnimationSession`] - the Idle / Animating / Previewing
//!   state machine owning the live camera
//! - [`camera::interpolate_pose`] - radius-preserving arc interpolation
//! - [`export::Exporter`] - batch and animated export
//! - [`options::Options`] - runtime configuration (transition timing,
//!   preview holds, export framing)
//! - [`views::ViewList`] - the saved views, with JSON persistence
//!
//! # Architecture
//!
//! Nothing runs on its own thread. A host calls
//! [`AnimationSession::tick`](animation::AnimationSession::tick) once per
//! display refresh; time and frame registrations come from an injected
//! [`FrameScheduler`](animation::FrameScheduler), so the same code runs
//! against a wall clock or a synthetic one. Every transition carries a
//! generation id, and only the most recent generation may complete.

pub mod animation;
pub mod camera;
pub mod error;
pub mod export;
pub mod options;
pub mod scene;
pub mod util;
pub mod views;

pub use error::VistaError;
