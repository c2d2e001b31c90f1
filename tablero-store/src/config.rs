//! Store configuration.

/// Default physical table holding all record types.
pub const DEFAULT_TABLE: &str = "entidades";

/// Configuration for a [`RecordStore`](crate::RecordStore).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Name of the physical table holding all record types.
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
        }
    }
}
