//! Concurrent access and the read/edit race.
//!
//! A reader that misses the cache reads the store and then fills the cache.
//! If an edit lands in between (store update + invalidation), the fill would
//! put the pre-edit value back. With fencing on (the default) that fill is
//! refused; with fencing off the stale entry survives, which is the
//! documented limitation of the unfenced mode.

use std::sync::Arc;
use std::thread;

use news_proxy::{
    CacheConfig, Caller, ContentStore, FacadeConfig, InMemoryContentStore, NewsFacade, Role,
};

use crate::support::PausingStore;

fn admin() -> Caller {
    Caller::new("root", Role::Admin)
}

/// Park a reader between its store read and its cache fill, land an edit,
/// then let the reader finish. Returns the reader's result and the result
/// of a fresh read afterwards.
fn race_read_against_edit(config: FacadeConfig) -> (String, String, NewsFacade<PausingStore>) {
    let (store, control) = PausingStore::new(InMemoryContentStore::new());
    let facade = Arc::new(NewsFacade::with_config(store, config));
    assert!(facade.add_message("Title", "Content", &admin()).is_success());

    let reader = {
        let facade = Arc::clone(&facade);
        thread::spawn(move || facade.read_message(1, &Caller::guest("reader")).message())
    };

    control.wait_until_paused();
    assert!(facade
        .edit_message(1, "Updated content", &admin())
        .is_success());
    control.resume();

    let raced = reader.join().unwrap();
    let after = facade.read_message(1, &admin()).message();

    let facade = Arc::try_unwrap(facade).ok().expect("reader thread has finished");
    (raced, after, facade)
}

// ============================================================================
// Test 1: fencing refuses the overtaken fill
// ============================================================================

#[test]
fn fenced_read_does_not_resurrect_pre_edit_value() {
    let (raced, after, facade) = race_read_against_edit(FacadeConfig::default());

    // The racing read was linearized before the edit.
    assert_eq!(raced, "Title: Content");
    // Its result never made it into the cache.
    assert_eq!(after, "Title: Updated content");
    assert_eq!(facade.cache().stats().rejected, 1);
}

// ============================================================================
// Test 2: without fencing the stale entry is observable
// ============================================================================

#[test]
fn unfenced_read_can_leave_stale_entry() {
    let (raced, after, facade) =
        race_read_against_edit(FacadeConfig::with_cache(CacheConfig::unfenced()));

    assert_eq!(raced, "Title: Content");
    // Known limitation of the unfenced mode: the next read is stale until
    // the id is invalidated again.
    assert_eq!(after, "Title: Content");
    assert_eq!(facade.cache().stats().rejected, 0);

    facade.edit_message(1, "Updated content", &admin());
    assert_eq!(
        facade.read_message(1, &admin()).message(),
        "Title: Updated content"
    );
}

// ============================================================================
// Test 3: many readers and writers, cache agrees with the store at the end
// ============================================================================

#[test]
fn concurrent_readers_and_writers_end_coherent() {
    let store = InMemoryContentStore::new();
    let facade = Arc::new(NewsFacade::new(store.clone()));
    for n in 0..4 {
        facade.add_message(&format!("title-{n}"), "v0", &admin());
    }

    let mut handles = Vec::new();
    for worker in 0..8u64 {
        let facade = Arc::clone(&facade);
        handles.push(thread::spawn(move || {
            let caller = Caller::new(format!("worker-{worker}"), Role::Admin);
            for round in 0..200u64 {
                let id = 1 + (worker + round) % 4;
                if worker % 2 == 0 {
                    facade.edit_message(id, &format!("v{worker}-{round}"), &caller);
                } else {
                    facade.read_message(id, &caller);
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    for id in 1..=4 {
        let record = store.read(id).unwrap();
        let expected = format!("{}: {}", record.title, record.content);
        assert_eq!(facade.read_message(id, &admin()).message(), expected);
    }
}

// ============================================================================
// Test 4: concurrent duplicate fills are harmless
// ============================================================================

#[test]
fn concurrent_cold_reads_agree() {
    let facade = Arc::new(NewsFacade::new(InMemoryContentStore::new()));
    facade.add_message("Title", "Content", &admin());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let facade = Arc::clone(&facade);
            thread::spawn(move || facade.read_message(1, &Caller::guest("reader")))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().message(), "Title: Content");
    }
    assert_eq!(facade.cache().len(), 1);
}
