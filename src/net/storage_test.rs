use super::*;

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert!(store.get(ACCESS_TOKEN_KEY).is_none());

    store.set(ACCESS_TOKEN_KEY, "tok");
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok"));
    assert!(store.contains(ACCESS_TOKEN_KEY));

    store.remove(ACCESS_TOKEN_KEY);
    assert!(!store.contains(ACCESS_TOKEN_KEY));
}

#[test]
fn memory_store_remove_missing_key_is_noop() {
    let store = MemoryStore::with_entries([(USER_INFO_KEY, "{}")]);
    store.remove(ACCESS_TOKEN_KEY);
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_store_clear_drops_everything() {
    let store = MemoryStore::with_entries([("a", "1"), ("b", "2")]);
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn memory_store_set_overwrites() {
    let store = MemoryStore::new();
    store.set("k", "one");
    store.set("k", "two");
    assert_eq!(store.get("k").as_deref(), Some("two"));
    assert_eq!(store.len(), 1);
}
