use tablero_store::StoreError;
use thiserror::Error;

pub type MessagingResult<T> = Result<T, MessagingError>;

#[derive(Debug, Error)]
pub enum MessagingError {
    /// Message content was empty or whitespace-only.
    #[error("message content must not be empty")]
    EmptyContent,

    /// Sender or recipient id was blank.
    #[error("sender and recipient must both be given")]
    MissingParticipant,

    #[error(transparent)]
    Store(#[from] StoreError),
}
