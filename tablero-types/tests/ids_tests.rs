use std::collections::HashSet;
use std::str::FromStr;
use tablero_types::EntityId;

// ── EntityId ──────────────────────────────────────────────────────

#[test]
fn entity_id_new_is_unique() {
    let a = EntityId::new();
    let b = EntityId::new();
    assert_ne!(a, b);
}

#[test]
fn entity_id_from_uuid_roundtrip() {
    let uuid = uuid::Uuid::now_v7();
    let id = EntityId::from_uuid(uuid);
    assert_eq!(id.as_uuid(), uuid);
}

#[test]
fn entity_id_display_and_parse() {
    let id = EntityId::new();
    let s = id.to_string();
    let parsed = EntityId::parse(&s).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn entity_id_from_str() {
    let id = EntityId::new();
    let s = id.to_string();
    let parsed: EntityId = EntityId::from_str(&s).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn entity_id_parse_invalid() {
    assert!(EntityId::parse("not-a-uuid").is_err());
}

#[test]
fn entity_id_from_str_invalid() {
    assert!(EntityId::from_str("garbage").is_err());
}

#[test]
fn entity_id_default_is_unique() {
    let a = EntityId::default();
    let b = EntityId::default();
    assert_ne!(a, b);
}

#[test]
fn entity_id_hash_and_eq() {
    let id = EntityId::new();
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(id); // duplicate
    assert_eq!(set.len(), 1);
}

#[test]
fn entity_id_serialization_is_transparent() {
    let id = EntityId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
    let parsed: EntityId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn entity_id_debug_contains_uuid() {
    let id = EntityId::new();
    let debug = format!("{:?}", id);
    assert!(debug.contains("EntityId"));
}
