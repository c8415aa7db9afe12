use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::conversation::{Conversation, Message, MessageId, Role};
use crate::view_model::{AppViewModel, JobRowView, MessageRowView, NotificationView};

pub type JobId = u64;

/// Scroll distance (in viewport units) past which automatic follow stops.
pub const SCROLL_AWAY_THRESHOLD: u32 = 100;

/// How long a notification stays visible unless dismissed earlier.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(6);

/// Gate for the question/answer exchange. At most one request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Sending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSource {
    File { name: String },
    Url { url: String },
}

impl JobSource {
    pub fn source_ref(&self) -> &str {
        match self {
            JobSource::File { name } => name,
            JobSource::Url { url } => url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Succeeded,
    Failed,
}

/// One document-ingestion job. Lives independently of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionJob {
    pub id: JobId,
    pub source: JobSource,
    pub status: JobStatus,
    pub status_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// The single transient status message. A new publish overwrites any visible
/// one; the sequence number lets stale dismiss timers be told apart from the
/// current notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub(crate) seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    conversation: Conversation,
    phase: RequestPhase,
    jobs: BTreeMap<JobId, IngestionJob>,
    next_job_id: JobId,
    next_message_id: u64,
    notification: Option<Notification>,
    notification_seq: u64,
    distance_from_bottom: u32,
    scrolled_away: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    /// True while automatic scroll-to-bottom should follow new messages.
    pub fn follows_bottom(&self) -> bool {
        !self.scrolled_away
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            messages: self
                .conversation
                .messages()
                .iter()
                .enumerate()
                .map(|(index, message)| MessageRowView {
                    id: message.id,
                    content: message.content.clone(),
                    role: message.role,
                    created_at: message.created_at,
                    failed: message.failed,
                    retryable: self.conversation.is_retryable(index),
                })
                .collect(),
            jobs: self
                .jobs
                .values()
                .map(|job| JobRowView {
                    job_id: job.id,
                    source: job.source.clone(),
                    status: job.status,
                    status_message: job.status_message.clone(),
                })
                .collect(),
            notification: self.notification.as_ref().map(|n| NotificationView {
                severity: n.severity,
                message: n.message.clone(),
            }),
            show_jump_to_latest: self.scrolled_away,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn begin_exchange(&mut self) {
        self.phase = RequestPhase::Sending;
        self.dirty = true;
    }

    pub(crate) fn end_exchange(&mut self) {
        self.phase = RequestPhase::Idle;
        self.dirty = true;
    }

    pub(crate) fn append_message(
        &mut self,
        role: Role,
        content: String,
        created_at: DateTime<Utc>,
        failed: bool,
    ) {
        self.next_message_id += 1;
        self.conversation.append(Message {
            id: MessageId(self.next_message_id),
            content,
            role,
            created_at,
            failed,
        });
        self.dirty = true;
    }

    pub(crate) fn truncate_conversation(&mut self, upto_index: usize) {
        self.conversation.truncate_through(upto_index);
        self.dirty = true;
    }

    pub(crate) fn create_job(&mut self, source: JobSource) -> JobId {
        self.next_job_id += 1;
        let id = self.next_job_id;
        self.jobs.insert(
            id,
            IngestionJob {
                id,
                source,
                status: JobStatus::Pending,
                status_message: String::new(),
            },
        );
        self.dirty = true;
        id
    }

    /// Settles a pending job. Returns false when the id is unknown or the
    /// job already left `Pending`; the status never changes twice.
    pub(crate) fn settle_job(&mut self, id: JobId, status: JobStatus, message: String) -> bool {
        debug_assert_ne!(status, JobStatus::Pending);
        let Some(job) = self.jobs.get_mut(&id) else {
            return false;
        };
        if job.status != JobStatus::Pending {
            return false;
        }
        job.status = status;
        job.status_message = message;
        self.dirty = true;
        true
    }

    pub fn job(&self, id: JobId) -> Option<&IngestionJob> {
        self.jobs.get(&id)
    }

    /// Overwrites the notification slot and returns the new sequence number.
    pub(crate) fn publish_notification(&mut self, severity: Severity, message: String) -> u64 {
        self.notification_seq += 1;
        self.notification = Some(Notification {
            severity,
            message,
            seq: self.notification_seq,
        });
        self.dirty = true;
        self.notification_seq
    }

    pub(crate) fn dismiss_notification(&mut self) {
        if self.notification.take().is_some() {
            self.dirty = true;
        }
    }

    /// Dismisses only when `seq` still names the visible notification, so a
    /// timer armed for an overwritten notification cannot hide its successor.
    pub(crate) fn dismiss_notification_if_seq(&mut self, seq: u64) {
        if self.notification.as_ref().is_some_and(|n| n.seq == seq) {
            self.notification = None;
            self.dirty = true;
        }
    }

    pub(crate) fn set_viewport_distance(&mut self, distance_from_bottom: u32) {
        self.distance_from_bottom = distance_from_bottom;
        let scrolled_away = distance_from_bottom >= SCROLL_AWAY_THRESHOLD;
        if scrolled_away != self.scrolled_away {
            self.scrolled_away = scrolled_away;
            self.dirty = true;
        }
    }
}
