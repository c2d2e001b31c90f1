use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use tablero_relations::RelationResolver;
use tablero_store::{MemoryBackend, RecordStore, StoreConfig, StoreError, kinds};
use tablero_types::EntityId;

fn resolver() -> (Arc<MemoryBackend>, RecordStore, RelationResolver) {
    let backend = Arc::new(MemoryBackend::new());
    let store = RecordStore::new(backend.clone(), StoreConfig::default());
    let resolver = RelationResolver::new(store.clone());
    (backend, store, resolver)
}

// ── Bulk resolution ─────────────────────────────────────────────

#[tokio::test]
async fn entities_by_ids_fetches_matching_records() {
    let (_backend, store, resolver) = resolver();
    let members = store.records(kinds::MEMBER);
    let ana = members.create(json!({"nombre": "Ana"})).await.unwrap();
    let bruno = members.create(json!({"nombre": "Bruno"})).await.unwrap();
    members.create(json!({"nombre": "Carla"})).await.unwrap();

    let found = resolver
        .entities_by_ids(kinds::MEMBER, &[ana.id, bruno.id])
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    let ids: Vec<_> = found.iter().map(|r| r.id).collect();
    assert!(ids.contains(&ana.id));
    assert!(ids.contains(&bruno.id));
}

#[tokio::test]
async fn entities_by_ids_skips_dangling_references() {
    let (_backend, store, resolver) = resolver();
    let ana = store
        .records(kinds::MEMBER)
        .create(json!({"nombre": "Ana"}))
        .await
        .unwrap();

    let found = resolver
        .entities_by_ids(kinds::MEMBER, &[ana.id, EntityId::new()])
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, ana.id);
}

#[tokio::test]
async fn entities_by_ids_respects_record_type() {
    let (_backend, store, resolver) = resolver();
    let acme = store
        .records(kinds::CLIENT)
        .create(json!({"nombre": "Acme"}))
        .await
        .unwrap();

    let found = resolver
        .entities_by_ids(kinds::MEMBER, &[acme.id])
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn empty_id_set_never_touches_the_backend() {
    let (backend, _store, resolver) = resolver();
    // An offline backend proves the short-circuit: any call would fail
    backend.set_offline(true);

    let found = resolver.entities_by_ids(kinds::MEMBER, &[]).await.unwrap();
    assert!(found.is_empty());
}

// ── Single resolution ───────────────────────────────────────────

#[tokio::test]
async fn entity_by_id_resolves_an_existing_reference() {
    let (_backend, store, resolver) = resolver();
    let acme = store
        .records(kinds::CLIENT)
        .create(json!({"nombre": "Acme"}))
        .await
        .unwrap();

    let found = resolver
        .entity_by_id(kinds::CLIENT, Some(&acme.id))
        .await
        .unwrap();
    assert_eq!(found.unwrap().get_str("nombre"), Some("Acme"));
}

#[tokio::test]
async fn entity_by_id_none_in_none_out() {
    let (backend, _store, resolver) = resolver();
    backend.set_offline(true);

    let found = resolver.entity_by_id(kinds::CLIENT, None).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn entity_by_id_dangling_reference_is_none() {
    let (_backend, _store, resolver) = resolver();
    let found = resolver
        .entity_by_id(kinds::CLIENT, Some(&EntityId::new()))
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn entity_by_id_propagates_other_failures() {
    let (backend, _store, resolver) = resolver();
    backend.set_offline(true);

    let err = resolver
        .entity_by_id(kinds::CLIENT, Some(&EntityId::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}
