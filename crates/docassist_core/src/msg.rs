use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::JobId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a question from the input box.
    QuestionSubmitted { text: String, at: DateTime<Utc> },
    /// User clicked retry on the failed assistant message at `message_index`.
    RetryRequested { message_index: usize },
    /// The answering service resolved the outstanding exchange. `Err` carries
    /// a human-readable transport description.
    AnswerArrived {
        result: Result<String, String>,
        at: DateTime<Utc>,
    },
    /// User picked a document file to add to the knowledge base.
    FileChosen { path: PathBuf },
    /// User submitted a document URL to add to the knowledge base.
    UrlSubmitted { url: String },
    /// An ingestion upload resolved. `Ok`/`Err` carry the server-provided or
    /// locally synthesized status text.
    UploadFinished {
        job_id: JobId,
        result: Result<String, String>,
    },
    /// The message view reported its scroll distance from the bottom.
    ViewportMoved { distance_from_bottom: u32 },
    /// User clicked the jump-to-latest affordance.
    JumpToLatestClicked,
    /// User dismissed the visible notification.
    NotificationDismissed,
    /// The auto-dismiss timer armed for notification `seq` fired.
    NotificationTimerElapsed { seq: u64 },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
