//! Frame scheduling capability injected into the animation session.
//!
//! Transitions advance once per display refresh. The session never talks to
//! a window or a `requestAnimationFrame` primitive directly; it asks its
//! scheduler for the current time and registers interest in the next frame.
//! Hosts with a real display use [`SystemScheduler`]; tests and offline
//! tools use [`ManualScheduler`] and step a synthetic clock.

use std::time::Duration;

use web_time::Instant;

/// Registration returned by [`FrameScheduler::request_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Raw token value.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Source of frame time and next-frame registrations.
///
/// At most one registration is pending at a time: requesting a frame while
/// one is pending replaces it.
pub trait FrameScheduler {
    /// Time elapsed on this scheduler's clock.
    fn now(&self) -> Duration;

    /// Register interest in the next frame.
    fn request_frame(&mut self) -> FrameToken;

    /// Drop a registration. Unknown or already-consumed tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Shared bookkeeping for the single pending registration.
#[derive(Debug, Default)]
struct PendingFrame {
    next_token: u64,
    pending: Option<FrameToken>,
}

impl PendingFrame {
    fn request(&mut self) -> FrameToken {
        self.next_token += 1;
        let token = FrameToken(self.next_token);
        self.pending = Some(token);
        token
    }

    fn cancel(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }
}

// ---------------------------------------------------------------------------
// SystemScheduler
// ---------------------------------------------------------------------------

/// Wall-clock scheduler for hosts with a display loop.
///
/// The host polls [`take_frame_request`](Self::take_frame_request) after
/// each tick and, if it returns `true`, asks its window for another redraw.
#[derive(Debug)]
pub struct SystemScheduler {
    epoch: Instant,
    frames: PendingFrame,
}

impl SystemScheduler {
    /// Scheduler whose clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            frames: PendingFrame::default(),
        }
    }

    /// Consume the pending registration, returning whether one existed.
    pub fn take_frame_request(&mut self) -> bool {
        self.frames.pending.take().is_some()
    }
}

impl Default for SystemScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for SystemScheduler {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn request_frame(&mut self) -> FrameToken {
        self.frames.request()
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.frames.cancel(token);
    }
}

// ---------------------------------------------------------------------------
// ManualScheduler
// ---------------------------------------------------------------------------

/// Synthetic-clock scheduler for headless runs and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    frames: PendingFrame,
    requested: u64,
    canceled: u64,
}

impl ManualScheduler {
    /// Scheduler at time zero with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Move the clock forward by `ms` milliseconds.
    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Set the clock to an absolute time. Never moves backwards.
    pub fn set_time(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }

    /// The currently pending registration, if any.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.frames.pending
    }

    /// Consume the pending registration, returning whether one existed.
    /// Lets tests drive the session the way a display loop would.
    pub fn take_frame_request(&mut self) -> bool {
        self.frames.pending.take().is_some()
    }

    /// Total registrations made so far.
    #[must_use]
    pub fn frames_requested(&self) -> u64 {
        self.requested
    }

    /// Total cancellations of a pending registration so far.
    #[must_use]
    pub fn frames_canceled(&self) -> u64 {
        self.canceled
    }
}

impl FrameScheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn request_frame(&mut self) -> FrameToken {
        self.requested += 1;
        self.frames.request()
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.frames.pending == Some(token) {
            self.canceled += 1;
        }
        self.frames.cancel(token);
    }
}
