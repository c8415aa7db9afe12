use chrono::{DateTime, Utc};

use crate::conversation::{MessageId, Role};
use crate::state::{JobId, JobSource, JobStatus, RequestPhase, Severity};

/// Render-ready projection of the application state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: RequestPhase,
    pub messages: Vec<MessageRowView>,
    pub jobs: Vec<JobRowView>,
    pub notification: Option<NotificationView>,
    /// True when the user scrolled away and the manual jump-to-latest
    /// affordance should be shown instead of auto-scrolling.
    pub show_jump_to_latest: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRowView {
    pub id: MessageId,
    pub content: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub failed: bool,
    pub retryable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub source: JobSource,
    pub status: JobStatus,
    pub status_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub severity: Severity,
    pub message: String,
}
