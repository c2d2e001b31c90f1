//! Typed CRUD over the polymorphic record table.

use std::sync::Arc;

use serde_json::{Map, Value};
use tablero_model::FlatRecord;
use tablero_types::EntityId;
use tracing::debug;

use crate::backend::{SelectQuery, StorageBackend};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::subscription::{ChangeEvent, Subscription};

/// Payload field used by [`RecordSet::search`].
pub const SEARCH_FIELD: &str = "nombre";

/// Default ordering field for [`RecordSet::list`].
pub const DEFAULT_ORDER_FIELD: &str = "nombre";

/// Entry point to the record store: hands out per-type [`RecordSet`]s over
/// one backend and one physical table.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn StorageBackend>,
    config: StoreConfig,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn StorageBackend>, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    /// Returns the CRUD handle for one record type.
    #[must_use]
    pub fn records(&self, record_type: impl Into<String>) -> RecordSet {
        RecordSet {
            backend: self.backend.clone(),
            table: self.config.table.clone(),
            record_type: record_type.into(),
        }
    }

    /// The backend this store talks to.
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// The physical table holding all record types.
    pub fn table(&self) -> &str {
        &self.config.table
    }
}

/// Options for [`RecordSet::list`].
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Field to order by. Payload fields order as text, even when their
    /// values look numeric; `created_at`/`updated_at` order chronologically.
    pub order_by: String,
    pub ascending: bool,
    /// Exact-match payload filters. Entries whose value is null or an
    /// empty string are ignored rather than matched.
    pub filters: Map<String, Value>,
    pub limit: Option<usize>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            order_by: DEFAULT_ORDER_FIELD.to_string(),
            ascending: true,
            filters: Map::new(),
            limit: None,
        }
    }
}

impl ListOptions {
    /// Sets the ordering field and direction.
    #[must_use]
    pub fn ordered_by(mut self, field: impl Into<String>, ascending: bool) -> Self {
        self.order_by = field.into();
        self.ascending = ascending;
        self
    }

    /// Adds an exact-match payload filter.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filters.insert(field.into(), value);
        self
    }

    /// Caps the number of returned records.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// CRUD, search and change subscription for one record type.
///
/// Every operation is an asynchronous request to the storage service;
/// nothing is cached. Cloning is cheap and shares the backend.
#[derive(Clone)]
pub struct RecordSet {
    backend: Arc<dyn StorageBackend>,
    table: String,
    record_type: String,
}

impl RecordSet {
    /// The record type this set is bound to.
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Lists records of the bound type, filtered and ordered.
    ///
    /// Filter entries with null or empty-string values are ignored, not
    /// matched.
    pub async fn list(&self, options: ListOptions) -> StoreResult<Vec<FlatRecord>> {
        let mut query = SelectQuery::for_type(&self.record_type)
            .order_by(&options.order_by, options.ascending);
        for (field, value) in options.filters {
            if value.is_null() || value.as_str().is_some_and(str::is_empty) {
                continue;
            }
            query = query.eq(field, value);
        }
        if let Some(limit) = options.limit {
            query = query.limit(limit);
        }
        let rows = self.backend.select(&self.table, &query).await?;
        Ok(rows.into_iter().map(FlatRecord::flatten).collect())
    }

    /// Fetches the single record matching both id and the bound type.
    pub async fn get(&self, id: &EntityId) -> StoreResult<FlatRecord> {
        let query = SelectQuery::for_type(&self.record_type).with_ids(vec![*id]);
        let row = self.backend.fetch_one(&self.table, &query).await?;
        Ok(FlatRecord::flatten(row))
    }

    /// Creates a record under the bound type. The backend assigns id and
    /// timestamps; the created record is returned flattened.
    pub async fn create(&self, payload: Value) -> StoreResult<FlatRecord> {
        if !payload.is_object() {
            return Err(StoreError::InvalidData(
                "payload must be a JSON object".to_string(),
            ));
        }
        debug!(record_type = %self.record_type, "creating record");
        let row = self
            .backend
            .insert(&self.table, &self.record_type, payload)
            .await?;
        Ok(FlatRecord::flatten(row))
    }

    /// Read-modify-write update: fetches the current payload, shallow-merges
    /// `updates` over it (update keys win, absent keys are preserved) and
    /// writes the merged payload back.
    ///
    /// The fetch and the write are two separate statements; two concurrent
    /// updates to the same record race, and the later write wins wholesale.
    /// The storage contract has no version column to check against, so this
    /// layer does not attempt a compare-and-swap.
    pub async fn update(&self, id: &EntityId, updates: Value) -> StoreResult<FlatRecord> {
        let Value::Object(updates) = updates else {
            return Err(StoreError::InvalidData(
                "updates must be a JSON object".to_string(),
            ));
        };
        let current = self.get(id).await?;
        let mut merged = match current.raw.payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in updates {
            merged.insert(key, value);
        }
        let row = self
            .backend
            .update_payload(&self.table, id, Value::Object(merged))
            .await?;
        Ok(FlatRecord::flatten(row))
    }

    /// Deletes the record scoped to id and the bound type. Removing an
    /// absent id is not an error.
    pub async fn remove(&self, id: &EntityId) -> StoreResult<()> {
        debug!(record_type = %self.record_type, %id, "removing record");
        self.backend.delete(&self.table, &self.record_type, id).await
    }

    /// Case-insensitive substring search on the fixed name field.
    pub async fn search(&self, term: &str) -> StoreResult<Vec<FlatRecord>> {
        let query = SelectQuery::for_type(&self.record_type)
            .matching(SEARCH_FIELD, term)
            .order_by(DEFAULT_ORDER_FIELD, true);
        let rows = self.backend.select(&self.table, &query).await?;
        Ok(rows.into_iter().map(FlatRecord::flatten).collect())
    }

    /// Opens a live change feed scoped to the bound type and hands each
    /// flattened [`ChangeEvent`] to `callback`.
    ///
    /// Every call opens an independent channel. The returned handle must be
    /// released when the view goes away; `unsubscribe` is idempotent and
    /// also runs on drop.
    pub async fn subscribe<F>(&self, callback: F) -> StoreResult<Subscription>
    where
        F: Fn(ChangeEvent) + Send + Sync + 'static,
    {
        let feed = self
            .backend
            .subscribe(&self.table, &self.record_type)
            .await?;
        debug!(record_type = %self.record_type, "opened change subscription");
        Ok(Subscription::spawn(feed, callback))
    }
}
