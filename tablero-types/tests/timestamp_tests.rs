use tablero_types::Timestamp;

// ── Construction ──────────────────────────────────────────────────

#[test]
fn from_millis_roundtrip() {
    let ts = Timestamp::from_millis(123_456_789);
    assert_eq!(ts.as_millis(), 123_456_789);
}

#[test]
fn now_is_after_2020() {
    // 2020-01-01 in epoch millis
    assert!(Timestamp::now().as_millis() > 1_577_836_800_000);
}

#[test]
fn default_is_now_ish() {
    let before = Timestamp::now();
    let ts = Timestamp::default();
    let after = Timestamp::now();
    assert!(before <= ts && ts <= after);
}

// ── Ordering ──────────────────────────────────────────────────────

#[test]
fn timestamps_order_chronologically() {
    let early = Timestamp::from_millis(1000);
    let late = Timestamp::from_millis(2000);
    assert!(early < late);
    assert_eq!(early.max(late), late);
}

#[test]
fn equal_millis_are_equal() {
    assert_eq!(Timestamp::from_millis(5), Timestamp::from_millis(5));
}

// ── Serialization ─────────────────────────────────────────────────

#[test]
fn serializes_as_bare_number() {
    let ts = Timestamp::from_millis(42);
    assert_eq!(serde_json::to_string(&ts).unwrap(), "42");
}

#[test]
fn deserializes_from_bare_number() {
    let ts: Timestamp = serde_json::from_str("1700000000000").unwrap();
    assert_eq!(ts.as_millis(), 1_700_000_000_000);
}

#[test]
fn display_is_millis() {
    let ts = Timestamp::from_millis(987);
    assert_eq!(ts.to_string(), "987");
}
