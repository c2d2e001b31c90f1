//! Messaging configuration.

/// Environment variable overriding the message table name.
pub const TABLE_ENV_VAR: &str = "TABLERO_MESSAGES_TABLE";

/// Default table, shared with the rest of the record store.
pub const DEFAULT_TABLE: &str = tablero_store::DEFAULT_TABLE;

/// Configuration for a [`MessageService`](crate::MessageService).
#[derive(Debug, Clone)]
pub struct MessagingConfig {
    /// Table holding message records.
    pub table: String,
}

impl MessagingConfig {
    /// Reads the table name from the environment, falling back to the
    /// shared default when the variable is unset or empty.
    #[must_use]
    pub fn from_env() -> Self {
        let table = std::env::var(TABLE_ENV_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        Self { table }
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
        }
    }
}
