//! Editor session orchestration.
//!
//! `EditorSession` owns the shared project/video identity and wires the
//! render scheduler and export tracker to the backend command channel.
//! Pointer and timeline input arrives through its methods; playback
//! position events are forwarded into the scheduler; the trailing edge of
//! the render throttle is driven by [`EditorSession::pump_render`].

use std::path::PathBuf;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use reelcut_common::config::EditorDefaults;
use reelcut_common::error::{ReelcutError, ReelcutResult};
use reelcut_common::timecode::time_for_frame;
use reelcut_project_model::{CropRect, ProjectConfiguration};

use crate::backend::{BackendCommand, PlaybackEvent};
use crate::export::ExportSession;
use crate::scheduler::{RenderRequest, RenderScheduler};

/// Capacity of the export progress side-channel.
const PROGRESS_CHANNEL_CAPACITY: usize = 64;

/// One editing session over one recording.
///
/// A session is only constructable with a video id; identity is validated
/// upstream and its absence here is an invariant violation, not a runtime
/// error to recover from.
pub struct EditorSession {
    video_id: String,
    project: ProjectConfiguration,
    scheduler: RenderScheduler,
    export: ExportSession,
    defaults: EditorDefaults,
    backend: mpsc::Sender<BackendCommand>,
}

impl EditorSession {
    pub fn new(
        video_id: impl Into<String>,
        project: ProjectConfiguration,
        backend: mpsc::Sender<BackendCommand>,
    ) -> Self {
        Self::with_defaults(video_id, project, backend, EditorDefaults::default())
    }

    /// Open a session with explicit editor defaults (from [`AppConfig`]).
    ///
    /// [`AppConfig`]: reelcut_common::config::AppConfig
    pub fn with_defaults(
        video_id: impl Into<String>,
        project: ProjectConfiguration,
        backend: mpsc::Sender<BackendCommand>,
        defaults: EditorDefaults,
    ) -> Self {
        let video_id = video_id.into();
        tracing::info!(video_id = %video_id, "Opening editor session");
        Self {
            video_id,
            scheduler: RenderScheduler::new(project.clone()),
            project,
            export: ExportSession::new(),
            defaults,
            backend,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn project(&self) -> &ProjectConfiguration {
        &self.project
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn export(&self) -> &ExportSession {
        &self.export
    }

    pub fn export_mut(&mut self) -> &mut ExportSession {
        &mut self.export
    }

    pub fn defaults(&self) -> &EditorDefaults {
        &self.defaults
    }

    /// Seek while paused; also the first thing a timeline drag-to-seek
    /// does, which is why it clears any hover-preview time.
    pub fn seek(&mut self, frame_number: u32) {
        let now = Instant::now();
        if let Some(request) = self.scheduler.set_preview_time(None, now) {
            self.send_request(request);
        }
        if let Some(request) = self
            .scheduler
            .notify_time_changed(time_for_frame(frame_number), now)
        {
            self.send_request(request);
        }
        self.send_fire_and_forget(BackendCommand::SetPlayhead {
            video_id: self.video_id.clone(),
            frame_number,
        });
    }

    /// Playback or scrub time changed.
    pub fn set_time(&mut self, secs: f64) {
        if let Some(request) = self.scheduler.notify_time_changed(secs, Instant::now()) {
            self.send_request(request);
        }
    }

    /// Timeline hover-preview time changed (`None` when the pointer
    /// leaves the timeline).
    pub fn set_preview_time(&mut self, preview: Option<f64>) {
        if let Some(request) = self.scheduler.set_preview_time(preview, Instant::now()) {
            self.send_request(request);
        }
    }

    /// Replace the whole project configuration (deep change from any
    /// editor control).
    pub fn update_project(&mut self, project: ProjectConfiguration) {
        self.project = project.clone();
        if let Some(request) = self
            .scheduler
            .notify_project_changed(project, Instant::now())
        {
            self.send_request(request);
        }
    }

    /// Confirm a crop draft: write it into `background.crop` and
    /// reschedule the preview. The draft itself lives in a `CropEditor`
    /// owned by the dialog; cancelling the dialog simply never calls this.
    pub fn apply_crop(&mut self, rect: CropRect) {
        let mut project = self.project.clone();
        project.background.crop = Some(rect);
        self.update_project(project);
    }

    /// Periodic position event from the playback backend.
    pub fn handle_playback_event(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::Position { playhead_position } => {
                self.scheduler.on_position_event(playhead_position);
            }
        }
    }

    /// Start or stop real-time playback. The flag flips optimistically and
    /// reverts if the backend call fails, surfacing the error.
    pub async fn set_playing(&mut self, playing: bool) -> ReelcutResult<()> {
        if playing == self.scheduler.is_playing() {
            return Ok(());
        }
        self.scheduler.set_playing(playing);

        let (reply_tx, reply_rx) = oneshot::channel();
        let command = if playing {
            BackendCommand::StartPlayback {
                video_id: self.video_id.clone(),
                project: self.project.clone(),
                reply: reply_tx,
            }
        } else {
            BackendCommand::StopPlayback {
                video_id: self.video_id.clone(),
                reply: reply_tx,
            }
        };

        let result = match self.backend.send(command).await {
            Ok(()) => match reply_rx.await {
                Ok(result) => result,
                Err(_) => Err(ReelcutError::backend_gone("playback reply dropped")),
            },
            Err(_) => Err(ReelcutError::backend_gone("backend command channel closed")),
        };

        if let Err(ref error) = result {
            tracing::warn!(%error, playing, "playback toggle failed; reverting");
            self.scheduler.set_playing(!playing);
        }
        result
    }

    /// Run one export to completion: issue a single render-to-file command
    /// with a progress side-channel and fold the streamed events into the
    /// export state as they arrive. Starting while an export is already in
    /// progress is rejected before anything reaches the backend.
    pub async fn run_export(&mut self, path: PathBuf) -> ReelcutResult<PathBuf> {
        self.export.start(path.clone())?;
        if self.defaults.auto_open_export_dialog {
            self.export.set_dialog_open(true);
        }

        let (progress_tx, mut progress_rx) = mpsc::channel(PROGRESS_CHANNEL_CAPACITY);
        let (reply_tx, mut reply_rx) = oneshot::channel();

        let command = BackendCommand::RenderToFile {
            path: path.clone(),
            video_id: self.video_id.clone(),
            project: self.project.clone(),
            progress: progress_tx,
            reply: reply_tx,
        };
        if self.backend.send(command).await.is_err() {
            let error = ReelcutError::backend_gone("backend command channel closed");
            self.export.fail(&error);
            return Err(error);
        }

        loop {
            tokio::select! {
                Some(event) = progress_rx.recv() => {
                    self.export.apply_event(event);
                }
                result = &mut reply_rx => {
                    // Fold in progress that raced the completion.
                    while let Ok(event) = progress_rx.try_recv() {
                        self.export.apply_event(event);
                    }
                    return match result {
                        Ok(Ok(())) => {
                            self.export.complete()?;
                            Ok(path)
                        }
                        Ok(Err(error)) => {
                            self.export.fail(&error);
                            Err(error)
                        }
                        Err(_) => {
                            let error =
                                ReelcutError::backend_gone("render-to-file reply dropped");
                            self.export.fail(&error);
                            Err(error)
                        }
                    };
                }
            }
        }
    }

    /// Deadline of the pending render request, if any, for callers that
    /// drive their own timer.
    pub fn next_render_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Emit the pending render request if its deadline has passed.
    pub fn flush_due_render(&mut self, now: Instant) {
        if let Some(request) = self.scheduler.flush_due(now) {
            self.send_request(request);
        }
    }

    /// Drive the trailing edge of the render throttle once: sleep until
    /// the pending deadline and emit the coalesced request. Returns
    /// whether a request was emitted; returns `false` immediately when
    /// nothing is pending. Each call re-reads the deadline, so re-entrant
    /// scheduling re-arms the timer instead of stacking timers.
    pub async fn pump_render(&mut self) -> bool {
        let Some(deadline) = self.scheduler.deadline() else {
            return false;
        };
        tokio::time::sleep_until(deadline).await;

        let now = Instant::now();
        match self.scheduler.flush_due(now) {
            Some(request) => {
                self.send_request(request);
                true
            }
            None => false,
        }
    }

    /// A full channel must not lose the trailing request, so it goes back
    /// into the scheduler as pending intent and the next window retries it.
    fn send_request(&mut self, request: RenderRequest) {
        match self.backend.try_send(BackendCommand::RequestFrame(request)) {
            Ok(()) => {}
            Err(TrySendError::Full(BackendCommand::RequestFrame(request))) => {
                tracing::warn!("backend channel full; deferring render request to the next window");
                self.scheduler.requeue(request);
            }
            Err(error) => {
                tracing::warn!(%error, "dropping render request; channel unavailable");
            }
        }
    }

    fn send_fire_and_forget(&self, command: BackendCommand) {
        if let Err(error) = self.backend.try_send(command) {
            tracing::warn!(%error, "dropping backend command; channel unavailable");
        }
    }
}
