//! Storage backend abstraction.
//!
//! Defines the contract the record store expects from the external storage
//! service: filtered selects over one table, row mutation with
//! backend-assigned ids and timestamps, and a change-feed subscription
//! scoped by table and record type. Swapping the hosted service for the
//! in-memory reference backend is a constructor argument, not a code
//! change.

use async_trait::async_trait;
use serde_json::Value;
use tablero_model::RawRecord;
use tablero_types::EntityId;
use tokio::sync::mpsc;

use crate::error::StoreResult;

/// Ordering clause for a select.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: String,
    pub ascending: bool,
}

/// A filtered select over the record table.
///
/// Filters compose conjunctively. Payload equality filters are applied
/// literally by the backend; deciding to skip empty filter values is the
/// semantic layer's job, not the backend's.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    /// Restrict to one record type.
    pub record_type: Option<String>,
    /// Restrict to an explicit id set.
    pub ids: Option<Vec<EntityId>>,
    /// Payload field equality filters (`field = value`).
    pub eq: Vec<(String, Value)>,
    /// Case-insensitive substring match on a payload field.
    pub pattern: Option<(String, String)>,
    pub order: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    /// Starts a query restricted to one record type.
    #[must_use]
    pub fn for_type(record_type: impl Into<String>) -> Self {
        Self {
            record_type: Some(record_type.into()),
            ..Self::default()
        }
    }

    /// Restricts the query to an explicit id set.
    #[must_use]
    pub fn with_ids(mut self, ids: Vec<EntityId>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Adds a payload field equality filter.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: Value) -> Self {
        self.eq.push((field.into(), value));
        self
    }

    /// Adds a case-insensitive substring filter on a payload field.
    #[must_use]
    pub fn matching(mut self, field: impl Into<String>, term: impl Into<String>) -> Self {
        self.pattern = Some((field.into(), term.into()));
        self
    }

    /// Orders results by the named field.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(OrderBy {
            field: field.into(),
            ascending,
        });
        self
    }

    /// Caps the number of returned rows.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The kind of change delivered on a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// A raw change notification as emitted by the backend.
#[derive(Debug, Clone)]
pub struct RawChange {
    pub kind: ChangeKind,
    /// The row after the change. Absent for deletes.
    pub row: Option<RawRecord>,
    /// The row before the change. Absent for inserts.
    pub previous: Option<RawRecord>,
}

/// A live feed of raw change notifications for one table and record type.
///
/// Dropping the feed releases the underlying channel.
#[derive(Debug)]
pub struct ChangeFeed {
    rx: mpsc::Receiver<RawChange>,
}

impl ChangeFeed {
    /// Wraps a backend notification channel.
    #[must_use]
    pub fn new(rx: mpsc::Receiver<RawChange>) -> Self {
        Self { rx }
    }

    /// Receives the next notification.
    /// Returns `None` when the backend closed the feed.
    pub async fn recv(&mut self) -> Option<RawChange> {
        self.rx.recv().await
    }
}

/// The external storage service consumed by the record store.
///
/// The service is assumed to provide per-statement atomicity for each call;
/// nothing here spans calls. All timeout and retry policy belongs to the
/// implementation behind this trait.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Runs a filtered select, returning matching rows.
    async fn select(&self, table: &str, query: &SelectQuery) -> StoreResult<Vec<RawRecord>>;

    /// Fetches exactly one row. Fails with `NotFound` on zero matches and
    /// with a query error when more than one row matches.
    async fn fetch_one(&self, table: &str, query: &SelectQuery) -> StoreResult<RawRecord>;

    /// Inserts a new row under the given record type, assigning id and
    /// timestamps. Returns the stored row.
    async fn insert(
        &self,
        table: &str,
        record_type: &str,
        payload: Value,
    ) -> StoreResult<RawRecord>;

    /// Replaces the payload of an existing row and bumps `updated_at`.
    /// Fails with `NotFound` when the row does not exist.
    async fn update_payload(
        &self,
        table: &str,
        id: &EntityId,
        payload: Value,
    ) -> StoreResult<RawRecord>;

    /// Deletes the row matching id and record type. Deleting an absent row
    /// is not an error.
    async fn delete(&self, table: &str, record_type: &str, id: &EntityId) -> StoreResult<()>;

    /// Opens a change feed scoped to one table and record type. The type
    /// filter is applied by the backend, not the subscriber; every call
    /// opens an independent channel.
    async fn subscribe(&self, table: &str, record_type: &str) -> StoreResult<ChangeFeed>;
}
