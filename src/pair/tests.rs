use super::PairKey;

#[test]
fn test_pair_key_is_order_independent() {
    let pairs = [
        ("alice", "bob"),
        ("bob", "alice"),
        ("carol", "carol"),
        ("", "zed"),
        ("Zoe", "adam"),
    ];
    for (a, b) in pairs {
        assert_eq!(PairKey::new(a, b), PairKey::new(b, a), "{a} / {b}");
    }
}

#[test]
fn test_pair_key_display_is_sorted() {
    assert_eq!(PairKey::new("bob", "alice").to_string(), "alice-bob");
    assert_eq!(PairKey::new("alice", "bob").members(), ("alice", "bob"));
}

#[test]
fn test_topic_is_derived_from_pair() {
    let key = PairKey::new("bob", "alice");
    assert_eq!(key.topic(), "private:5:alice|bob");
    assert_eq!(key.topic(), PairKey::new("alice", "bob").topic());
}

#[test]
fn test_distinct_pairs_have_distinct_topics() {
    assert_ne!(
        PairKey::new("alice", "bob").topic(),
        PairKey::new("carol", "dave").topic()
    );
}

#[test]
fn test_hyphenated_identities_get_distinct_topics() {
    let left = PairKey::new("a", "b-c");
    let right = PairKey::new("a-b", "c");
    assert_ne!(left, right);
    assert_ne!(left.topic(), right.topic());
    // Storage names keep the plain `low-high` form.
    assert_eq!(left.to_string(), right.to_string());
}
