use chrono::{DateTime, Utc};

/// Inline content of the assistant message appended when an exchange fails.
pub const FAILURE_NOTICE: &str = "Sorry, there was an error processing your request.";

/// Opaque, monotonically increasing message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub(crate) u64);

impl MessageId {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub failed: bool,
}

/// Ordered message history. Append-only except for the explicit truncation
/// performed by retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub(crate) fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Keeps the prefix through `upto_index` inclusive; everything after it
    /// is discarded. Callers must pass an in-bounds index.
    pub(crate) fn truncate_through(&mut self, upto_index: usize) {
        debug_assert!(upto_index < self.messages.len());
        self.messages.truncate(upto_index + 1);
    }

    /// Returns true when `index` names a retryable failure: an assistant
    /// message flagged `failed` directly after the user message that
    /// produced it.
    pub fn is_retryable(&self, index: usize) -> bool {
        let Some(message) = self.messages.get(index) else {
            return false;
        };
        if message.role != Role::Assistant || !message.failed {
            return false;
        }
        index
            .checked_sub(1)
            .and_then(|prev| self.messages.get(prev))
            .is_some_and(|prev| prev.role == Role::User)
    }

    /// Case-insensitive substring filter over message content. The returned
    /// view borrows the history and can be iterated any number of times; an
    /// empty (or whitespace-only) query yields every message in order.
    pub fn search<'a>(&'a self, query: &str) -> SearchView<'a> {
        SearchView {
            messages: &self.messages,
            needle: query.trim().to_lowercase(),
        }
    }
}

/// Restartable, read-only filtered view produced by [`Conversation::search`].
#[derive(Debug, Clone)]
pub struct SearchView<'a> {
    messages: &'a [Message],
    needle: String,
}

impl<'a> SearchView<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Message> + '_ {
        self.messages
            .iter()
            .filter(move |message| {
                self.needle.is_empty() || message.content.to_lowercase().contains(&self.needle)
            })
    }
}
