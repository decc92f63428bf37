use std::sync::Arc;
use summabot::core::models::{Mode, UserId};
use summabot::core::session::SessionStore;

#[test]
fn test_defaults_without_session() {
    let store = SessionStore::new();
    let user = UserId(1);
    assert_eq!(store.mode(user), Mode::Standard);
    assert!(!store.is_collecting(user));
    assert_eq!(store.append(user, "hello"), None);
    assert!(store.snapshot(user).is_none());
}

#[test]
fn test_set_mode_leaves_buffer_alone() {
    let store = SessionStore::new();
    let user = UserId(1);
    store.start_collecting(user);
    store.append(user, "one");

    store.set_mode(user, Mode::Detailed);
    store.set_mode(user, Mode::Detailed);

    let session = store.snapshot(user).unwrap();
    assert_eq!(session.mode, Mode::Detailed);
    assert!(session.collecting);
    assert_eq!(session.messages, vec!["one"]);
}

#[test]
fn test_start_collecting_discards_previous_buffer() {
    let store = SessionStore::new();
    let user = UserId(2);
    store.set_mode(user, Mode::Short);
    store.start_collecting(user);
    store.append(user, "stale");

    store.start_collecting(user);

    let session = store.snapshot(user).unwrap();
    assert!(session.collecting);
    assert!(session.messages.is_empty());
    assert_eq!(session.mode, Mode::Short);
}

#[test]
fn test_take_batch_is_exactly_once() {
    let store = SessionStore::new();
    let user = UserId(3);
    store.set_mode(user, Mode::Short);
    store.start_collecting(user);
    assert_eq!(store.append(user, "first"), Some(1));
    assert_eq!(store.append(user, "second"), Some(2));

    let batch = store.take_batch(user).unwrap();
    assert_eq!(batch.mode, Mode::Short);
    assert_eq!(batch.joined(), "first\nsecond");

    assert!(store.take_batch(user).is_none());
    assert!(!store.is_collecting(user));
    assert_eq!(store.buffered(user), 0);
}

#[test]
fn test_take_batch_on_empty_buffer_keeps_collecting() {
    let store = SessionStore::new();
    let user = UserId(4);
    store.start_collecting(user);
    assert!(store.take_batch(user).is_none());
    assert!(store.is_collecting(user));
}

#[test]
fn test_clear_resets_everything() {
    let store = SessionStore::new();
    let user = UserId(5);
    store.set_mode(user, Mode::Detailed);
    store.start_collecting(user);
    store.append(user, "x");

    store.clear(user);

    let session = store.snapshot(user).unwrap();
    assert_eq!(session.mode, Mode::Standard);
    assert!(!session.collecting);
    assert!(session.messages.is_empty());
}

#[test]
fn test_concurrent_appends_are_not_lost() {
    let store = Arc::new(SessionStore::new());
    let user = UserId(6);
    store.start_collecting(user);

    let handles: Vec<_> = (0..100)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.append(user, &format!("msg {i}")))
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap().is_some());
    }

    let batch = store.take_batch(user).unwrap();
    assert_eq!(batch.messages.len(), 100);
    for i in 0..100 {
        assert!(batch.messages.contains(&format!("msg {i}")));
    }
}

#[test]
fn test_flush_during_appends_never_splits_a_message() {
    let store = Arc::new(SessionStore::new());
    let user = UserId(7);
    store.start_collecting(user);

    let writer = {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            (0..200)
                .filter(|i| store.append(user, &format!("m{i}")).is_some())
                .count()
        })
    };
    let flushed = store.take_batch(user).map_or(0, |b| b.messages.len());
    let appended = writer.join().unwrap();
    let remaining = store.take_batch(user).map_or(0, |b| b.messages.len());

    // Every accepted append ends up in exactly one batch.
    assert_eq!(flushed + remaining, appended);
}
