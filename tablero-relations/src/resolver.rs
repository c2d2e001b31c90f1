use tablero_model::FlatRecord;
use tablero_store::{RecordStore, SelectQuery, StoreResult};
use tablero_types::EntityId;
use tracing::debug;

/// Resolves payload id references into full records.
#[derive(Clone)]
pub struct RelationResolver {
    store: RecordStore,
}

impl RelationResolver {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Fetches the records of one type matching an explicit id set.
    ///
    /// An empty id set short-circuits to an empty result without touching
    /// the backend. Ids with no matching record are silently absent from
    /// the result; order follows the backend, not the input.
    pub async fn entities_by_ids(
        &self,
        record_type: &str,
        ids: &[EntityId],
    ) -> StoreResult<Vec<FlatRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!(record_type, count = ids.len(), "resolving related records");
        let query = SelectQuery::for_type(record_type).with_ids(ids.to_vec());
        let rows = self
            .store
            .backend()
            .select(self.store.table(), &query)
            .await?;
        Ok(rows.into_iter().map(FlatRecord::flatten).collect())
    }

    /// Fetches a single optionally-referenced record.
    ///
    /// `None` in means `None` out, and a dangling reference resolves to
    /// `None` rather than an error. Other storage failures propagate.
    pub async fn entity_by_id(
        &self,
        record_type: &str,
        id: Option<&EntityId>,
    ) -> StoreResult<Option<FlatRecord>> {
        let Some(id) = id else {
            return Ok(None);
        };
        match self.store.records(record_type).get(id).await {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
