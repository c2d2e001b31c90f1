//! In-memory reference backend.
//!
//! Implements the full [`StorageBackend`] contract against process-local
//! state, for tests and for running the dashboard before a remote service
//! is configured. Mirrors the remote service's observable behavior:
//! backend-assigned v7 ids, strictly increasing creation stamps, text
//! ordering for payload fields, and per-type change feeds.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tablero_model::RawRecord;
use tablero_types::{EntityId, Timestamp};
use tokio::sync::mpsc;
use tracing::debug;

use crate::backend::{ChangeFeed, ChangeKind, RawChange, SelectQuery, StorageBackend};
use crate::error::{StoreError, StoreResult};

/// Buffered notifications per change feed. When a slow consumer fills its
/// channel, new notifications are dropped rather than blocking writers.
const FEED_BUFFER: usize = 64;

struct Watcher {
    table: String,
    record_type: String,
    tx: mpsc::Sender<RawChange>,
}

/// Process-local storage backend.
#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<HashMap<String, Vec<RawRecord>>>,
    watchers: Mutex<Vec<Watcher>>,
    offline: AtomicBool,
    clock: Mutex<i64>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates losing the connection to the storage service.
    /// While offline every operation fails with `Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of live change-feed channels. Closed feeds are pruned.
    pub fn subscriber_count(&self) -> usize {
        let mut watchers = self.watchers.lock().unwrap();
        watchers.retain(|w| !w.tx.is_closed());
        watchers.len()
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("backend offline".to_string()));
        }
        Ok(())
    }

    /// Issues a strictly increasing creation stamp so ordering by creation
    /// time is total even for rows inserted within the same millisecond.
    fn next_timestamp(&self) -> Timestamp {
        let mut clock = self.clock.lock().unwrap();
        let now = Timestamp::now().as_millis();
        *clock = now.max(*clock + 1);
        Timestamp::from_millis(*clock)
    }

    fn publish(&self, table: &str, record_type: &str, change: RawChange) {
        let mut watchers = self.watchers.lock().unwrap();
        watchers.retain(|w| !w.tx.is_closed());
        for watcher in watchers
            .iter()
            .filter(|w| w.table == table && w.record_type == record_type)
        {
            let _ = watcher.tx.try_send(change.clone());
        }
    }
}

fn matches(row: &RawRecord, query: &SelectQuery) -> bool {
    if let Some(record_type) = &query.record_type
        && row.record_type != *record_type
    {
        return false;
    }
    if let Some(ids) = &query.ids
        && !ids.contains(&row.id)
    {
        return false;
    }
    for (field, value) in &query.eq {
        if row.payload.get(field) != Some(value) {
            return false;
        }
    }
    if let Some((field, term)) = &query.pattern {
        let haystack = field_text(row, field).to_lowercase();
        if !haystack.contains(&term.to_lowercase()) {
            return false;
        }
    }
    true
}

/// Textual form of a payload field, as the remote service compares it:
/// strings as-is, everything else via its JSON rendering, missing or null
/// as the empty string.
fn field_text(row: &RawRecord, field: &str) -> String {
    match row.payload.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum OrderKey {
    Time(i64),
    Text(String),
}

/// Metadata timestamps order chronologically; payload fields order as
/// text, even when their values look numeric.
fn order_key(row: &RawRecord, field: &str) -> OrderKey {
    match field {
        "created_at" => OrderKey::Time(row.created_at.as_millis()),
        "updated_at" => OrderKey::Time(row.updated_at.as_millis()),
        _ => OrderKey::Text(field_text(row, field)),
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn select(&self, table: &str, query: &SelectQuery) -> StoreResult<Vec<RawRecord>> {
        self.check_online()?;
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<RawRecord> = tables
            .get(table)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter(|row| matches(row, query))
            .cloned()
            .collect();
        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = order_key(a, &order.field).cmp(&order_key(b, &order.field));
                if order.ascending { ord } else { ord.reverse() }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn fetch_one(&self, table: &str, query: &SelectQuery) -> StoreResult<RawRecord> {
        self.check_online()?;
        let tables = self.tables.lock().unwrap();
        let mut found: Vec<&RawRecord> = tables
            .get(table)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter(|row| matches(row, query))
            .collect();
        match found.len() {
            0 => Err(StoreError::NotFound(format!(
                "no row in '{table}' matched the query"
            ))),
            1 => Ok(found.remove(0).clone()),
            n => Err(StoreError::Query(format!(
                "expected one row in '{table}', matched {n}"
            ))),
        }
    }

    async fn insert(
        &self,
        table: &str,
        record_type: &str,
        payload: Value,
    ) -> StoreResult<RawRecord> {
        self.check_online()?;
        let stamp = self.next_timestamp();
        let row = RawRecord {
            id: EntityId::new(),
            record_type: record_type.to_string(),
            payload,
            created_at: stamp,
            updated_at: stamp,
        };
        {
            let mut tables = self.tables.lock().unwrap();
            tables.entry(table.to_string()).or_default().push(row.clone());
        }
        debug!(%table, record_type, id = %row.id, "inserted row");
        self.publish(
            table,
            record_type,
            RawChange {
                kind: ChangeKind::Created,
                row: Some(row.clone()),
                previous: None,
            },
        );
        Ok(row)
    }

    async fn update_payload(
        &self,
        table: &str,
        id: &EntityId,
        payload: Value,
    ) -> StoreResult<RawRecord> {
        self.check_online()?;
        let (previous, updated) = {
            let mut tables = self.tables.lock().unwrap();
            let rows = tables.entry(table.to_string()).or_default();
            let Some(row) = rows.iter_mut().find(|row| row.id == *id) else {
                return Err(StoreError::NotFound(format!(
                    "no row '{id}' in '{table}'"
                )));
            };
            let previous = row.clone();
            row.payload = payload;
            row.updated_at = self.next_timestamp();
            (previous, row.clone())
        };
        debug!(%table, id = %id, "updated row");
        let record_type = updated.record_type.clone();
        self.publish(
            table,
            &record_type,
            RawChange {
                kind: ChangeKind::Updated,
                row: Some(updated.clone()),
                previous: Some(previous),
            },
        );
        Ok(updated)
    }

    async fn delete(&self, table: &str, record_type: &str, id: &EntityId) -> StoreResult<()> {
        self.check_online()?;
        let removed = {
            let mut tables = self.tables.lock().unwrap();
            let rows = tables.entry(table.to_string()).or_default();
            let position = rows
                .iter()
                .position(|row| row.id == *id && row.record_type == record_type);
            position.map(|i| rows.remove(i))
        };
        if let Some(row) = removed {
            debug!(%table, record_type, id = %id, "deleted row");
            self.publish(
                table,
                record_type,
                RawChange {
                    kind: ChangeKind::Deleted,
                    row: None,
                    previous: Some(row),
                },
            );
        }
        Ok(())
    }

    async fn subscribe(&self, table: &str, record_type: &str) -> StoreResult<ChangeFeed> {
        self.check_online()?;
        let (tx, rx) = mpsc::channel(FEED_BUFFER);
        self.watchers.lock().unwrap().push(Watcher {
            table: table.to_string(),
            record_type: record_type.to_string(),
            tx,
        });
        Ok(ChangeFeed::new(rx))
    }
}
