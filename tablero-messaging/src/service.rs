//! Messaging operations over the record store.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::json;
use tablero_store::{
    ListOptions, RecordSet, RecordStore, StorageBackend, StoreConfig, kinds,
};
use tablero_types::EntityId;
use tracing::{debug, warn};

use crate::config::MessagingConfig;
use crate::error::{MessagingError, MessagingResult};
use crate::message::{Conversation, Message};

/// Most messages returned by a single mailbox query.
pub const MAILBOX_LIMIT: usize = 500;

/// Most messages fetched per direction when loading one conversation.
pub const CONVERSATION_DIRECTION_LIMIT: usize = 250;

const FIELD_SENDER: &str = "sender_id";
const FIELD_RECIPIENT: &str = "recipient_id";
const FIELD_READ: &str = "read";
const FIELD_CREATED: &str = "created_at";

/// Sends, lists and read-tracks direct messages between workspace members.
#[derive(Clone)]
pub struct MessageService {
    messages: RecordSet,
}

impl MessageService {
    pub fn new(backend: Arc<dyn StorageBackend>, config: MessagingConfig) -> Self {
        let store = RecordStore::new(backend, StoreConfig {
            table: config.table,
        });
        Self {
            messages: store.records(kinds::MESSAGE),
        }
    }

    /// Messages received by `member`, newest first, capped at
    /// [`MAILBOX_LIMIT`].
    pub async fn inbox(&self, member: &str) -> MessagingResult<Vec<Message>> {
        self.mailbox(FIELD_RECIPIENT, member).await
    }

    /// Messages sent by `member`, newest first, capped at [`MAILBOX_LIMIT`].
    pub async fn sent(&self, member: &str) -> MessagingResult<Vec<Message>> {
        self.mailbox(FIELD_SENDER, member).await
    }

    async fn mailbox(&self, field: &str, member: &str) -> MessagingResult<Vec<Message>> {
        let options = ListOptions::default()
            .filter(field, json!(member))
            .ordered_by(FIELD_CREATED, false)
            .limit(MAILBOX_LIMIT);
        let records = self.messages.list(options).await?;
        Ok(records.iter().map(Message::from_record).collect())
    }

    /// The full exchange between two members, oldest first.
    ///
    /// Both directions are fetched concurrently, each capped at
    /// [`CONVERSATION_DIRECTION_LIMIT`] newest messages, then merged into
    /// one chronological thread.
    pub async fn conversation(
        &self,
        member: &str,
        counterpart: &str,
    ) -> MessagingResult<Vec<Message>> {
        let (outgoing, incoming) = tokio::try_join!(
            self.directed(member, counterpart),
            self.directed(counterpart, member),
        )?;
        let mut thread: Vec<Message> = outgoing
            .iter()
            .chain(incoming.iter())
            .map(Message::from_record)
            .collect();
        thread.sort_by_key(|m| m.created_at);
        Ok(thread)
    }

    async fn directed(
        &self,
        sender: &str,
        recipient: &str,
    ) -> Result<Vec<tablero_model::FlatRecord>, tablero_store::StoreError> {
        let options = ListOptions::default()
            .filter(FIELD_SENDER, json!(sender))
            .filter(FIELD_RECIPIENT, json!(recipient))
            .ordered_by(FIELD_CREATED, false)
            .limit(CONVERSATION_DIRECTION_LIMIT);
        self.messages.list(options).await
    }

    /// Sends a message. Content is trimmed and must not end up empty;
    /// sender and recipient ids must both be non-blank. New messages start
    /// unread.
    pub async fn send(
        &self,
        sender: &str,
        recipient: &str,
        content: &str,
    ) -> MessagingResult<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(MessagingError::EmptyContent);
        }
        if sender.trim().is_empty() || recipient.trim().is_empty() {
            return Err(MessagingError::MissingParticipant);
        }
        debug!(sender, recipient, "sending message");
        let record = self
            .messages
            .create(json!({
                FIELD_SENDER: sender,
                FIELD_RECIPIENT: recipient,
                "content": content,
                FIELD_READ: false,
            }))
            .await?;
        Ok(Message::from_record(&record))
    }

    /// Marks one message as read. Marking an already-read message is a
    /// harmless no-op write.
    pub async fn mark_as_read(&self, id: &EntityId) -> MessagingResult<Message> {
        let record = self
            .messages
            .update(id, json!({ FIELD_READ: true }))
            .await?;
        Ok(Message::from_record(&record))
    }

    /// Marks every unread message from `counterpart` to `member` as read.
    ///
    /// The per-message writes run concurrently and are not transactional:
    /// all of them are attempted even when some fail, and the first error
    /// is reported after the batch settles. Messages already marked by the
    /// time their write lands stay read.
    pub async fn mark_conversation_as_read(
        &self,
        member: &str,
        counterpart: &str,
    ) -> MessagingResult<()> {
        let options = ListOptions::default()
            .filter(FIELD_SENDER, json!(counterpart))
            .filter(FIELD_RECIPIENT, json!(member))
            .ordered_by(FIELD_CREATED, false)
            .limit(MAILBOX_LIMIT);
        let unread: Vec<EntityId> = self
            .messages
            .list(options)
            .await?
            .iter()
            .filter(|r| !r.get_bool(FIELD_READ).unwrap_or(false))
            .map(|r| r.id)
            .collect();
        if unread.is_empty() {
            return Ok(());
        }
        debug!(member, counterpart, count = unread.len(), "marking conversation read");
        let results = join_all(
            unread
                .iter()
                .map(|id| self.messages.update(id, json!({ FIELD_READ: true }))),
        )
        .await;
        for result in results {
            result?;
        }
        Ok(())
    }

    /// Number of unread messages in `member`'s inbox. Counted over at most
    /// [`MAILBOX_LIMIT`] fetched rows, so it is an approximation for very
    /// full inboxes. A message with no read flag counts as unread.
    ///
    /// Never fails: storage errors are logged and reported as zero, so a
    /// badge counter cannot take down the view rendering it.
    pub async fn unread_count(&self, member: &str) -> u32 {
        match self.inbox(member).await {
            Ok(messages) => messages.iter().filter(|m| !m.read).count() as u32,
            Err(err) => {
                warn!(member, %err, "unread count query failed, reporting zero");
                0
            }
        }
    }

    /// The member's conversation list: one entry per counterpart, newest
    /// exchange first, with the latest message and the member's unread
    /// count for that counterpart.
    ///
    /// Built from the inbox and sent mailboxes, so each side is subject to
    /// [`MAILBOX_LIMIT`]; counterparts whose entire exchange falls outside
    /// both caps do not appear.
    pub async fn conversations(&self, member: &str) -> MessagingResult<Vec<Conversation>> {
        let (received, sent) = tokio::try_join!(self.inbox(member), self.sent(member))?;

        let mut all: Vec<Message> = received.into_iter().chain(sent).collect();
        // Stable sort keeps the received-before-sent tiebreak deterministic.
        all.sort_by_key(|m| std::cmp::Reverse(m.created_at));

        let mut conversations: Vec<Conversation> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for message in all {
            let counterpart = if message.sender_id == member {
                message.recipient_id.clone()
            } else {
                message.sender_id.clone()
            };
            let unread = u32::from(message.recipient_id == member && !message.read);
            match index.get(&counterpart) {
                Some(&i) => conversations[i].unread_count += unread,
                None => {
                    index.insert(counterpart.clone(), conversations.len());
                    conversations.push(Conversation {
                        counterpart_id: counterpart,
                        last_message: message,
                        unread_count: unread,
                    });
                }
            }
        }
        Ok(conversations)
    }
}
