//! Copy-to-clipboard feedback.

use std::time::{Duration, Instant};

/// How long the "copied" indicator stays on.
pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_millis(2000);

/// Tracks when something was last copied.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyFeedback {
    copied_at: Option<Instant>,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a copy at `now`. Copying again restarts the window.
    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    /// Whether the indicator is shown at `now`.
    pub fn is_showing(&self, now: Instant) -> bool {
        match self.copied_at {
            Some(at) => now.saturating_duration_since(at) < COPY_FEEDBACK_WINDOW,
            None => false,
        }
    }
}
