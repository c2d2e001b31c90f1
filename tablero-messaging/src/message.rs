//! Message and conversation models.

use tablero_model::FlatRecord;
use tablero_types::{EntityId, Timestamp};

/// A direct message between two workspace members.
///
/// Member ids are plain strings: they live inside the message payload and
/// the store does not resolve or validate them.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: EntityId,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Message {
    /// Builds a message from a stored record.
    ///
    /// Lenient on purpose: missing payload fields become empty strings and
    /// an absent read flag reads as unread, so one malformed row cannot
    /// poison a whole mailbox query.
    #[must_use]
    pub fn from_record(record: &FlatRecord) -> Self {
        Self {
            id: record.id,
            sender_id: record.get_str("sender_id").unwrap_or_default().to_string(),
            recipient_id: record
                .get_str("recipient_id")
                .unwrap_or_default()
                .to_string(),
            content: record.get_str("content").unwrap_or_default().to_string(),
            read: record.get_bool("read").unwrap_or(false),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// One entry in a member's conversation list.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    /// The other member in the exchange.
    pub counterpart_id: String,
    /// The most recent message in either direction.
    pub last_message: Message,
    /// Messages from the counterpart that the member has not read.
    pub unread_count: u32,
}
