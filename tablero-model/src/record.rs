use serde::{Deserialize, Serialize};
use tablero_types::{EntityId, Timestamp};

/// A stored row of the polymorphic entity table.
///
/// All dashboard data flows through this type. One physical table holds
/// every logical record kind, distinguished by `record_type`; the
/// `payload` field holds arbitrary JSON whose structure is specific to the
/// type. New record types need no schema change.
///
/// There is no cross-type integrity: relations are plain id strings
/// embedded in a payload and resolved manually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: EntityId,
    pub record_type: String,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RawRecord {
    /// Extract a string value from `payload` using a JSON pointer (e.g., "/nombre").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.payload.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `payload` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.payload.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `payload` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.payload.pointer(pointer).and_then(|v| v.as_f64())
    }
}
