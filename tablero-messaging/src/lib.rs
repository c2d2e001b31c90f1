//! Direct messaging between workspace members.
//!
//! Messages are ordinary records in the polymorphic store: sender,
//! recipient, content and a read flag live in the payload, id and
//! timestamps come from the storage service. This crate layers mailbox
//! queries, conversation threading and read tracking on top of
//! [`tablero_store`].

mod config;
mod error;
mod message;
mod service;

pub use config::{DEFAULT_TABLE, MessagingConfig, TABLE_ENV_VAR};
pub use error::{MessagingError, MessagingResult};
pub use message::{Conversation, Message};
pub use service::{CONVERSATION_DIRECTION_LIMIT, MAILBOX_LIMIT, MessageService};
