use std::path::PathBuf;

use crate::JobId;

/// Side effects requested by `update`; executed by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the question to the answering service.
    AskQuestion { question: String },
    /// Upload the file at `path` for ingestion job `job_id`.
    UploadFile { job_id: JobId, path: PathBuf },
    /// Submit `url` for ingestion job `job_id`.
    UploadUrl { job_id: JobId, url: String },
    /// Scroll the message view to its bottom.
    ScrollToBottom,
    /// Arm the auto-dismiss timer for the notification with sequence `seq`.
    ScheduleNotificationDismiss { seq: u64 },
}
