use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tablero_types::{EntityId, Timestamp};

use crate::RawRecord;

/// Top-level names owned by record metadata.
///
/// Callers must not use these as payload field names: [`FlatRecord::to_value`]
/// overlays payload keys over the reserved ones in construction order, so a
/// colliding payload key silently wins. Documented constraint, not enforced.
pub const RESERVED_KEYS: [&str; 4] = ["id", "type", "created_at", "updated_at"];

/// The flattened external view of a [`RawRecord`].
///
/// Payload fields sit in `fields` and are presented to callers at the top
/// level next to record metadata. The original row is retained in `raw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub id: EntityId,
    pub record_type: String,
    /// Payload fields, top level. Empty when the payload is not a JSON object.
    pub fields: Map<String, Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// The original row as delivered by the backend.
    pub raw: RawRecord,
}

impl FlatRecord {
    /// Flattens a stored row into its external view.
    #[must_use]
    pub fn flatten(raw: RawRecord) -> Self {
        let fields = match &raw.payload {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        Self {
            id: raw.id,
            record_type: raw.record_type.clone(),
            fields,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            raw,
        }
    }

    /// Returns a payload field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a payload field as a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_str())
    }

    /// Returns a payload field as a boolean.
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.fields.get(field).and_then(|v| v.as_bool())
    }

    /// Returns a payload field as a number.
    pub fn get_number(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(|v| v.as_f64())
    }

    /// Serializes the flattened view as one merged JSON document.
    ///
    /// Metadata goes in first, then payload fields in construction order —
    /// a payload key named like a reserved key overwrites it (see
    /// [`RESERVED_KEYS`]).
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut merged = Map::new();
        merged.insert("id".to_string(), json!(self.id));
        merged.insert("type".to_string(), json!(self.record_type));
        merged.insert("created_at".to_string(), json!(self.created_at));
        merged.insert("updated_at".to_string(), json!(self.updated_at));
        for (key, value) in &self.fields {
            merged.insert(key.clone(), value.clone());
        }
        Value::Object(merged)
    }
}
