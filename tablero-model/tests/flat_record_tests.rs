use pretty_assertions::assert_eq;
use serde_json::json;
use tablero_model::{FlatRecord, RESERVED_KEYS, RawRecord};
use tablero_types::{EntityId, Timestamp};

fn make_raw(payload: serde_json::Value) -> RawRecord {
    RawRecord {
        id: EntityId::new(),
        record_type: "proyecto".to_string(),
        payload,
        created_at: Timestamp::from_millis(1000),
        updated_at: Timestamp::from_millis(2000),
    }
}

// ── Flattening ────────────────────────────────────────────────────

#[test]
fn flatten_lifts_payload_fields() {
    let raw = make_raw(json!({"nombre": "Alpha", "activo": true}));
    let flat = FlatRecord::flatten(raw.clone());

    assert_eq!(flat.id, raw.id);
    assert_eq!(flat.record_type, "proyecto");
    assert_eq!(flat.get_str("nombre"), Some("Alpha"));
    assert_eq!(flat.get_bool("activo"), Some(true));
    assert_eq!(flat.created_at, raw.created_at);
    assert_eq!(flat.updated_at, raw.updated_at);
}

#[test]
fn flatten_keeps_the_original_row() {
    let raw = make_raw(json!({"nombre": "Alpha"}));
    let flat = FlatRecord::flatten(raw.clone());
    assert_eq!(flat.raw, raw);
}

#[test]
fn flatten_non_object_payload_yields_no_fields() {
    let flat = FlatRecord::flatten(make_raw(json!("just a string")));
    assert!(flat.fields.is_empty());

    let flat = FlatRecord::flatten(make_raw(json!(null)));
    assert!(flat.fields.is_empty());

    let flat = FlatRecord::flatten(make_raw(json!([1, 2])));
    assert!(flat.fields.is_empty());
}

#[test]
fn flatten_empty_object_yields_no_fields() {
    let flat = FlatRecord::flatten(make_raw(json!({})));
    assert!(flat.fields.is_empty());
}

// ── Field accessors ───────────────────────────────────────────────

#[test]
fn typed_accessors_filter_by_type() {
    let flat = FlatRecord::flatten(make_raw(json!({
        "nombre": "Alpha",
        "activo": true,
        "presupuesto": 12.5
    })));
    assert_eq!(flat.get_str("nombre"), Some("Alpha"));
    assert_eq!(flat.get_str("activo"), None);
    assert_eq!(flat.get_bool("activo"), Some(true));
    assert_eq!(flat.get_bool("presupuesto"), None);
    assert_eq!(flat.get_number("presupuesto"), Some(12.5));
    assert_eq!(flat.get_number("nombre"), None);
}

#[test]
fn get_returns_raw_value() {
    let flat = FlatRecord::flatten(make_raw(json!({"etiquetas": ["a", "b"]})));
    assert_eq!(flat.get("etiquetas"), Some(&json!(["a", "b"])));
    assert_eq!(flat.get("missing"), None);
}

// ── Merged JSON view ──────────────────────────────────────────────

#[test]
fn to_value_merges_metadata_and_payload() {
    let raw = make_raw(json!({"nombre": "Alpha"}));
    let id = raw.id;
    let merged = FlatRecord::flatten(raw).to_value();

    assert_eq!(merged["id"], json!(id));
    assert_eq!(merged["type"], json!("proyecto"));
    assert_eq!(merged["created_at"], json!(1000));
    assert_eq!(merged["updated_at"], json!(2000));
    assert_eq!(merged["nombre"], json!("Alpha"));
}

#[test]
fn to_value_payload_key_shadows_reserved_key() {
    // Documented hazard: a payload field named like a reserved key wins.
    let merged = FlatRecord::flatten(make_raw(json!({"type": "impostor"}))).to_value();
    assert_eq!(merged["type"], json!("impostor"));
}

#[test]
fn reserved_keys_cover_the_metadata() {
    for key in ["id", "type", "created_at", "updated_at"] {
        assert!(RESERVED_KEYS.contains(&key));
    }
}

// ── Serialization ─────────────────────────────────────────────────

#[test]
fn flat_record_serde_roundtrip() {
    let flat = FlatRecord::flatten(make_raw(json!({"nombre": "Alpha"})));
    let json_str = serde_json::to_string(&flat).unwrap();
    let parsed: FlatRecord = serde_json::from_str(&json_str).unwrap();
    assert_eq!(parsed, flat);
}
