//! Command/event boundary to the rendering and playback backend.
//!
//! The engine never calls into the backend directly: it sends commands
//! over an mpsc channel and receives events back on dedicated streams.
//! Awaited calls carry a oneshot reply; fire-and-forget calls carry none.
//! A test stands in for the backend by draining the command receiver.

use std::path::PathBuf;

use tokio::sync::{mpsc, oneshot};

use reelcut_common::error::ReelcutResult;
use reelcut_project_model::ProjectConfiguration;

use crate::export::ExportProgressEvent;
use crate::scheduler::RenderRequest;

/// Reply channel for awaited backend calls.
pub type BackendReply = oneshot::Sender<ReelcutResult<()>>;

/// Commands the editor session issues to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    /// Fire-and-forget: present the given frame on the preview surface.
    RequestFrame(RenderRequest),

    /// Awaited: begin real-time playback.
    StartPlayback {
        video_id: String,
        project: ProjectConfiguration,
        reply: BackendReply,
    },

    /// Awaited: stop real-time playback.
    StopPlayback {
        video_id: String,
        reply: BackendReply,
    },

    /// Fire-and-forget: move the playhead.
    SetPlayhead { video_id: String, frame_number: u32 },

    /// Awaited, with a side-channel progress stream: render the project to
    /// a file. Progress events arrive on `progress`; the command's own
    /// fulfillment arrives on `reply`.
    RenderToFile {
        path: PathBuf,
        video_id: String,
        project: ProjectConfiguration,
        progress: mpsc::Sender<ExportProgressEvent>,
        reply: BackendReply,
    },
}

/// Events the playback backend emits while presenting frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Periodic playhead position, in frame units.
    Position { playhead_position: u32 },
}
