//! Session-over-store integration tests.
//!
//! Exercises the core session orchestrator against the real local blob
//! store and the in-memory double, the same wiring the CLI uses.

use std::sync::Arc;

use kelime_core::catalog::{Catalog, CatalogWord};
use kelime_core::model::{CefrLevel, ProgressRecord, WordClass};
use kelime_core::session::Session;
use kelime_core::store::WordChange;
use kelime_store::{LocalStore, MemoryStore};

fn make_catalog(n: usize, group_size: usize) -> Catalog {
    let words = (1..=n)
        .map(|i| CatalogWord {
            english: format!("a{i}"),
            turkish: format!("t{i}"),
            class: WordClass::Noun,
            level: CefrLevel::A1,
        })
        .collect();
    Catalog::from_words(words, group_size)
}

#[tokio::test]
async fn guest_progress_survives_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = make_catalog(6, 2);

    {
        let store = Arc::new(LocalStore::new(dir.path()));
        let mut session = Session::hydrate(catalog.clone(), store).await.unwrap();
        session.learn("a1").await.unwrap();
        session.learn("a2").await.unwrap();
    }

    // A fresh session (new sitting) hydrates the promoted state.
    let store = Arc::new(LocalStore::new(dir.path()));
    let session = Session::hydrate(catalog, store).await.unwrap();
    assert_eq!(session.state().active_group, 2);
    assert!(session.state().learned_words.contains("a1"));
    assert_eq!(session.current_card().unwrap().english, "a3");
}

#[tokio::test]
async fn memory_store_sees_per_word_changes() {
    let catalog = make_catalog(4, 2);
    let store = Arc::new(MemoryStore::new());
    let mut session = Session::hydrate(catalog, store.clone()).await.unwrap();

    session.learn("a1").await.unwrap();
    match store.last_change() {
        Some(WordChange::Learned(doc)) => {
            assert_eq!(doc.word, "a1");
            assert_eq!(doc.translation, "t1");
            assert_eq!(doc.group, 1);
        }
        other => panic!("expected a learned-word change, got {other:?}"),
    }

    session.unlearn("a1").await.unwrap();
    assert_eq!(
        store.last_change(),
        Some(WordChange::Unlearned {
            english: "a1".into()
        })
    );
    assert!(store.record().learned_words.is_empty());
}

#[tokio::test]
async fn injected_failure_degrades_but_does_not_roll_back() {
    let catalog = make_catalog(4, 2);
    let store = Arc::new(MemoryStore::with_record(ProgressRecord::default()));
    let mut session = Session::hydrate(catalog, store.clone()).await.unwrap();

    store.set_fail_persists(true);
    let err = session.learn("a1").await.unwrap_err();
    assert!(err.is_degraded_only());
    assert!(session.is_degraded());
    assert!(session.state().learned_words.contains("a1"));

    // The store never saw the mutation; no retry happened.
    assert_eq!(store.persist_count(), 0);
    assert!(store.record().learned_words.is_empty());
}
