//! Render scheduling for the live preview.
//!
//! The scheduler owns the playback clock state (current time, hover-preview
//! time, playing flag) and turns every change of the selected time or the
//! project configuration into at most one render request per throttle
//! window. While real-time playback runs, the playback backend presents
//! frames itself and time-driven requests are suppressed.

use tokio::time::Instant;

use reelcut_common::timecode::{frame_for_time, time_for_frame};
use reelcut_project_model::ProjectConfiguration;

use crate::throttle::{TrailingThrottle, RENDER_THROTTLE_WINDOW};

/// A request for one rendered preview frame.
///
/// Transient: one logical "latest intent" per scheduling tick; intermediate
/// requests within a throttle window are dropped, never queued.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub frame_number: u32,
    pub project: ProjectConfiguration,
}

/// Playback clock plus throttled render-request emission.
#[derive(Debug)]
pub struct RenderScheduler {
    /// Authoritative timeline position in seconds.
    time_secs: f64,

    /// Hover-preview time; overrides `time_secs` while the pointer hovers
    /// the timeline, cleared the instant it leaves or a seek begins.
    preview_time_secs: Option<f64>,

    /// True while the playback backend presents frames itself.
    playing: bool,

    project: ProjectConfiguration,
    throttle: TrailingThrottle<RenderRequest>,
}

impl RenderScheduler {
    /// Create a scheduler at time zero, paused.
    pub fn new(project: ProjectConfiguration) -> Self {
        Self {
            time_secs: 0.0,
            preview_time_secs: None,
            playing: false,
            project,
            throttle: TrailingThrottle::new(RENDER_THROTTLE_WINDOW),
        }
    }

    /// The time the preview should show: hover-preview when set, otherwise
    /// the authoritative playback time.
    pub fn selected_time(&self) -> f64 {
        self.preview_time_secs.unwrap_or(self.time_secs)
    }

    pub fn time_secs(&self) -> f64 {
        self.time_secs
    }

    pub fn preview_time_secs(&self) -> Option<f64> {
        self.preview_time_secs
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn project(&self) -> &ProjectConfiguration {
        &self.project
    }

    /// Playback or scrub time changed.
    ///
    /// While playing this still records the time (the playhead indicator
    /// follows it) but schedules nothing.
    pub fn notify_time_changed(&mut self, secs: f64, now: Instant) -> Option<RenderRequest> {
        self.time_secs = secs.max(0.0);
        self.schedule(now)
    }

    /// The hover-preview time changed. `None` means the pointer left the
    /// timeline (or a drag-to-seek began); the authoritative time takes
    /// over and the preview is rescheduled accordingly.
    pub fn set_preview_time(&mut self, preview: Option<f64>, now: Instant) -> Option<RenderRequest> {
        if self.preview_time_secs == preview {
            return None;
        }
        self.preview_time_secs = preview;
        self.schedule(now)
    }

    /// Any project field changed (deep change); reschedule with the last
    /// known time.
    pub fn notify_project_changed(
        &mut self,
        project: ProjectConfiguration,
        now: Instant,
    ) -> Option<RenderRequest> {
        self.project = project;
        self.schedule(now)
    }

    /// Periodic position event from the playback backend. Playback is
    /// driving the picture directly, so any pending render intent is stale
    /// and is dropped.
    pub fn on_position_event(&mut self, playhead_position: u32) {
        self.throttle.clear_pending();
        self.time_secs = time_for_frame(playhead_position);
    }

    /// Toggle playback. Entering playback drops any pending intent (the
    /// backend presents frames itself); the first time change after
    /// leaving playback resumes scheduling.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        if playing {
            self.throttle.clear_pending();
        }
    }

    /// The trailing-edge deadline for the async driver, if a request is
    /// pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.throttle.deadline()
    }

    /// Release the pending request if its deadline has passed.
    pub fn flush_due(&mut self, now: Instant) -> Option<RenderRequest> {
        self.throttle.flush_due(now)
    }

    /// Put an emitted request back as pending intent, e.g. when the backend
    /// channel had no room for it; the next flush retries it unless a newer
    /// request supersedes it first.
    pub fn requeue(&mut self, request: RenderRequest) {
        self.throttle.restore(request);
    }

    fn schedule(&mut self, now: Instant) -> Option<RenderRequest> {
        // Gates project changes as well as time changes: while playback runs
        // the backend owns the picture, and the first change after it stops
        // reschedules with the latest project.
        if self.playing {
            return None;
        }
        let request = RenderRequest {
            frame_number: frame_for_time(self.selected_time()),
            project: self.project.clone(),
        };
        self.throttle.offer(request, now)
    }
}
