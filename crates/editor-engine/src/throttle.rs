//! Trailing-edge throttle for render-request emission.
//!
//! The preview backend only ever needs the latest picture, so bursts of
//! scheduling calls are coalesced: a cold window emits immediately, a warm
//! window keeps only the most recent payload and releases it at the window
//! boundary. Intermediate payloads are dropped, not queued.

use std::time::Duration;

use tokio::time::Instant;

/// Minimum spacing between emissions: one 60 Hz display frame (1000/60 ms).
pub const RENDER_THROTTLE_WINDOW: Duration = Duration::from_nanos(16_666_667);

/// A deadline-armed/idle state machine holding "pending payload or none".
///
/// All mutators take an explicit `now` so the timing seam stays
/// deterministic; the async driver owns the actual timer and re-arms it
/// from [`TrailingThrottle::deadline`] on every pass (re-arm, never stack).
#[derive(Debug)]
pub struct TrailingThrottle<T> {
    window: Duration,
    last_emit: Option<Instant>,
    pending: Option<T>,
}

impl<T> TrailingThrottle<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_emit: None,
            pending: None,
        }
    }

    /// Offer a payload at `now`.
    ///
    /// Returns the payload when the window is cold (emit immediately);
    /// otherwise stores it as the pending trailing payload, replacing any
    /// previous one.
    pub fn offer(&mut self, value: T, now: Instant) -> Option<T> {
        match self.last_emit {
            Some(last) if now < last + self.window => {
                self.pending = Some(value);
                None
            }
            _ => {
                // A stale pending payload is superseded by this fresher one.
                self.pending = None;
                self.last_emit = Some(now);
                Some(value)
            }
        }
    }

    /// The trailing-edge deadline, if a payload is pending.
    pub fn deadline(&self) -> Option<Instant> {
        match (&self.pending, self.last_emit) {
            (Some(_), Some(last)) => Some(last + self.window),
            _ => None,
        }
    }

    /// Release the pending payload if its deadline has passed.
    pub fn flush_due(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.last_emit = Some(now);
        self.pending.take()
    }

    /// Put back a payload that could not be delivered after emission, so a
    /// later flush retries it. An already pending payload is newer and is
    /// kept instead.
    pub fn restore(&mut self, value: T) {
        if self.pending.is_none() {
            self.pending = Some(value);
        }
    }

    /// Drop the pending payload without emitting it.
    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
