//! Docassist core: pure state machine and view-model helpers.
mod conversation;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use conversation::{Conversation, Message, MessageId, Role, SearchView, FAILURE_NOTICE};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, IngestionJob, JobId, JobSource, JobStatus, Notification, RequestPhase, Severity,
    NOTIFICATION_TIMEOUT, SCROLL_AWAY_THRESHOLD,
};
pub use update::update;
pub use view_model::{AppViewModel, JobRowView, MessageRowView, NotificationView};
