//! Reelcut Editor Engine
//!
//! Interaction logic behind the recording editor:
//! - Throttled render scheduling for the live preview
//! - Interactive crop-rectangle editing
//! - Export job tracking over a streamed progress channel
//! - The session orchestrator and its backend command boundary

pub mod backend;
pub mod crop;
pub mod export;
pub mod scheduler;
pub mod session;
pub mod throttle;

pub use backend::{BackendCommand, BackendReply, PlaybackEvent};
pub use crop::{CropEditor, DragTarget, Handle, XSide, YSide};
pub use export::{ExportProgressEvent, ExportSession, ExportStatus};
pub use scheduler::{RenderRequest, RenderScheduler};
pub use session::EditorSession;
pub use throttle::{TrailingThrottle, RENDER_THROTTLE_WINDOW};
