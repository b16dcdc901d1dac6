//! Export job tracking: a state machine over a streamed progress sequence.
//!
//! One render-to-file command runs at a time; its progress channel feeds
//! [`ExportSession::apply_event`] and the command's own completion (not a
//! stream event) resolves the session.

use std::path::PathBuf;

use reelcut_common::error::{ReelcutError, ReelcutResult};

/// UI-facing status of the current export.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportStatus {
    Idle,
    InProgress {
        /// Frames rendered so far, as last reported by the backend.
        progress: u32,
        /// Estimated total frames; 0 until the backend reports it.
        total_frames: u32,
    },
    Finished {
        /// The destination passed to [`ExportSession::start`].
        path: PathBuf,
    },
}

/// Progress messages streamed by the backend during render-to-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportProgressEvent {
    FrameRendered { current_frame: u32 },
    EstimatedTotalFrames { total_frames: u32 },
}

/// Tracks one export at a time. The dialog-visibility flag is layered
/// independently of the state machine.
#[derive(Debug, Default)]
pub struct ExportSession {
    status: ExportStatus,
    destination: Option<PathBuf>,
    dialog_open: bool,
}

impl Default for ExportStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &ExportStatus {
        &self.status
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn set_dialog_open(&mut self, open: bool) {
        self.dialog_open = open;
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self.status, ExportStatus::InProgress { .. })
    }

    /// Begin a new export. Valid from `Idle` or `Finished` (re-export);
    /// starting while one is in progress is an invalid transition and is
    /// reported, never silently queued.
    pub fn start(&mut self, destination: PathBuf) -> ReelcutResult<()> {
        if self.is_in_progress() {
            tracing::warn!("export requested while one is already in progress");
            return Err(ReelcutError::export("an export is already in progress"));
        }

        tracing::info!(destination = %destination.display(), "Starting export");
        self.destination = Some(destination);
        self.status = ExportStatus::InProgress {
            progress: 0,
            total_frames: 0,
        };
        Ok(())
    }

    /// Apply one streamed progress event. Events arriving outside an
    /// active export (late stragglers after completion) are dropped.
    pub fn apply_event(&mut self, event: ExportProgressEvent) {
        let ExportStatus::InProgress {
            progress,
            total_frames,
        } = &mut self.status
        else {
            tracing::debug!(?event, "progress event outside an active export; dropped");
            return;
        };

        match event {
            ExportProgressEvent::FrameRendered { current_frame } => {
                // Last-write-wins; monotonicity is the backend's business.
                *progress = current_frame;
                if *total_frames > 0 && current_frame > *total_frames {
                    tracing::debug!(
                        current_frame,
                        total_frames = *total_frames,
                        "backend over-reported progress; clamped for display only"
                    );
                }
            }
            ExportProgressEvent::EstimatedTotalFrames { total_frames: total } => {
                *total_frames = total;
            }
        }
    }

    /// The render-to-file command fulfilled.
    pub fn complete(&mut self) -> ReelcutResult<()> {
        if !self.is_in_progress() {
            return Err(ReelcutError::export("completion without an active export"));
        }
        let path = self
            .destination
            .take()
            .ok_or_else(|| ReelcutError::export("active export has no destination"))?;

        tracing::info!(path = %path.display(), "Export finished");
        self.status = ExportStatus::Finished { path };
        Ok(())
    }

    /// The render-to-file command failed. The session never stays in
    /// `InProgress`; it returns to `Idle` with the error surfaced to the
    /// caller's UI layer.
    pub fn fail(&mut self, error: &ReelcutError) {
        tracing::error!(%error, "Export failed");
        self.destination = None;
        self.status = ExportStatus::Idle;
    }

    /// Display fraction in `[0, 1]`; guards divide-by-zero before the
    /// total estimate arrives, and clamps an over-reporting backend.
    pub fn fraction(&self) -> f64 {
        match &self.status {
            ExportStatus::Idle => 0.0,
            ExportStatus::InProgress {
                progress,
                total_frames,
            } => (*progress as f64 / (*total_frames).max(1) as f64).min(1.0),
            ExportStatus::Finished { .. } => 1.0,
        }
    }
}
