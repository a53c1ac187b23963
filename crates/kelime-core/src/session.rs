//! Session orchestration over a catalog and one progress store.
//!
//! A session hydrates once, applies the pure transitions from
//! [`crate::engine`] in memory, and persists after every mutation. The
//! persistence attempt for a mutation always resolves before the next
//! card can be computed, so a per-word write is never in flight while a
//! newer card is already showing.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::engine::{self, NextWordOutcome};
use crate::error::EngineError;
use crate::model::{LearnedWordDoc, LearnerState, RecentWord, WordEntry};
use crate::store::{ProgressStore, WordChange};

/// What the presentation layer should show next.
#[derive(Debug, Clone, PartialEq)]
pub enum NextCard {
    /// Show this word.
    Word(WordEntry),
    /// The active group was exhausted; a new group begins.
    GroupAdvanced { group: u32 },
    /// Every word of the final group is learned.
    Completed,
    /// The scan guard fired; keep showing the current card.
    Stalled,
}

/// Snapshot of overall progress for display.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummary {
    pub active_group: u32,
    pub group_count: u32,
    pub learned_in_group: usize,
    pub group_len: usize,
    pub total_learned: usize,
    pub total_words: usize,
    pub completed: bool,
}

/// A live learning session.
///
/// Sessions never share state: login, logout, and guest-mode toggles are
/// modeled as dropping the session and hydrating a new one.
pub struct Session {
    id: Uuid,
    catalog: Catalog,
    state: LearnerState,
    store: Arc<dyn ProgressStore>,
    degraded: bool,
}

impl Session {
    /// Hydrate a fresh session from the store.
    pub async fn hydrate(
        catalog: Catalog,
        store: Arc<dyn ProgressStore>,
    ) -> Result<Self, EngineError> {
        let record = store.hydrate().await?;
        let state = LearnerState::from_record(record, &catalog);
        let id = Uuid::new_v4();
        tracing::debug!(
            session = %id,
            backend = store.name(),
            group = state.active_group,
            learned = state.learned_words.len(),
            "session hydrated"
        );
        Ok(Self {
            id,
            catalog,
            state,
            store,
            degraded: false,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &LearnerState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// `true` once any persist has failed; the in-memory state may have
    /// diverged from the store.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The card currently facing the learner, if any.
    pub fn current_card(&self) -> Option<&WordEntry> {
        if self.state.all_words_learned {
            return None;
        }
        engine::current_group_words(&self.state, &self.catalog).get(self.state.current_word_index)
    }

    /// Recently learned words, newest first.
    pub fn recently_learned(&self) -> &[RecentWord] {
        &self.state.recently_learned
    }

    /// Advance to the next card.
    ///
    /// Pure transition; the word index is derived state and is never
    /// persisted.
    pub fn next_card(&mut self) -> Result<NextCard, EngineError> {
        if self.catalog.is_empty() {
            return Err(EngineError::CatalogEmpty);
        }
        let (state, outcome) = engine::next_word(&self.state, &self.catalog);
        self.state = state;
        Ok(match outcome {
            NextWordOutcome::Word(index) => {
                let word = engine::current_group_words(&self.state, &self.catalog)[index].clone();
                NextCard::Word(word)
            }
            NextWordOutcome::GroupAdvanced => NextCard::GroupAdvanced {
                group: self.state.active_group,
            },
            NextWordOutcome::Completed => NextCard::Completed,
            NextWordOutcome::Stalled => NextCard::Stalled,
        })
    }

    /// Mark a word learned, then persist the summary and the per-word
    /// record.
    ///
    /// On persistence failure the in-memory mutation is kept, the session
    /// is flagged degraded, and the error is returned; there is no retry
    /// and no rollback.
    pub async fn learn(&mut self, english: &str) -> Result<(), EngineError> {
        if self.catalog.is_empty() {
            return Err(EngineError::CatalogEmpty);
        }
        let word = self
            .catalog
            .find(english)
            .ok_or_else(|| EngineError::UnknownWord(english.to_string()))?
            .clone();

        let now = Utc::now();
        self.state = engine::mark_learned(&self.state, &self.catalog, &word, now);

        let change = WordChange::Learned(LearnedWordDoc {
            word: word.english.clone(),
            translation: word.turkish.clone(),
            learned_at: now,
            group: word.group,
        });
        self.persist(Some(&change)).await
    }

    /// Remove a word from the learned set, then persist the summary and
    /// delete the per-word record. Never demotes the active group.
    pub async fn unlearn(&mut self, english: &str) -> Result<(), EngineError> {
        let word = self
            .catalog
            .find(english)
            .ok_or_else(|| EngineError::UnknownWord(english.to_string()))?;
        let change = WordChange::Unlearned {
            english: word.english.clone(),
        };

        self.state = engine::unlearn(&self.state, english);
        self.persist(Some(&change)).await
    }

    /// Overall progress for display.
    pub fn progress(&self) -> ProgressSummary {
        let group_words = engine::current_group_words(&self.state, &self.catalog);
        let learned_in_group = group_words
            .iter()
            .filter(|w| self.state.learned_words.contains(&w.english))
            .count();

        ProgressSummary {
            active_group: self.state.active_group,
            group_count: self.catalog.group_count(),
            learned_in_group,
            group_len: group_words.len(),
            total_learned: self.state.learned_words.len(),
            total_words: self.catalog.len(),
            completed: self.state.all_words_learned,
        }
    }

    async fn persist(&mut self, change: Option<&WordChange>) -> Result<(), EngineError> {
        let record = self.state.to_record();
        if let Err(e) = self.store.persist(&record, change).await {
            self.degraded = true;
            tracing::warn!(
                session = %self.id,
                backend = self.store.name(),
                error = %e,
                "persist failed; keeping in-memory state"
            );
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogWord;
    use crate::model::{CefrLevel, ProgressRecord, WordClass};
    use crate::store::StoreError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Store stub that records persists and can be told to fail.
    struct StubStore {
        seed: ProgressRecord,
        persists: Mutex<Vec<(ProgressRecord, Option<WordChange>)>>,
        hydrate_count: AtomicU32,
        fail: AtomicBool,
    }

    impl StubStore {
        fn new(seed: ProgressRecord) -> Self {
            Self {
                seed,
                persists: Mutex::new(Vec::new()),
                hydrate_count: AtomicU32::new(0),
                fail: AtomicBool::new(false),
            }
        }

        fn last_persist(&self) -> Option<(ProgressRecord, Option<WordChange>)> {
            self.persists.lock().unwrap().last().cloned()
        }

        fn persist_count(&self) -> usize {
            self.persists.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ProgressStore for StubStore {
        fn name(&self) -> &str {
            "stub"
        }

        async fn hydrate(&self) -> Result<ProgressRecord, StoreError> {
            self.hydrate_count.fetch_add(1, Ordering::Relaxed);
            Ok(self.seed.clone())
        }

        async fn persist(
            &self,
            record: &ProgressRecord,
            change: Option<&WordChange>,
        ) -> Result<(), StoreError> {
            if self.fail.load(Ordering::Relaxed) {
                return Err(StoreError::Network("connection reset".into()));
            }
            self.persists
                .lock()
                .unwrap()
                .push((record.clone(), change.cloned()));
            Ok(())
        }
    }

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
    async fn hydrate_uses_the_store_record() {
        let seed = ProgressRecord {
            active_group: 2,
            learned_words: vec!["a1".into(), "a2".into()],
            recently_learned: vec![],
        };
        let store = Arc::new(StubStore::new(seed));
        let session = Session::hydrate(make_catalog(6, 2), store.clone())
            .await
            .unwrap();

        assert_eq!(store.hydrate_count.load(Ordering::Relaxed), 1);
        assert_eq!(session.state().active_group, 2);
        assert_eq!(session.current_card().unwrap().english, "a3");
    }

    #[tokio::test]
    async fn learn_persists_summary_and_word_doc() {
        let store = Arc::new(StubStore::new(ProgressRecord::default()));
        let mut session = Session::hydrate(make_catalog(6, 2), store.clone())
            .await
            .unwrap();

        session.learn("a1").await.unwrap();

        let (record, change) = store.last_persist().unwrap();
        assert_eq!(record.learned_words, vec!["a1"]);
        assert_eq!(record.recently_learned[0].english, "a1");
        match change {
            Some(WordChange::Learned(doc)) => {
                assert_eq!(doc.word, "a1");
                assert_eq!(doc.translation, "t1");
                assert_eq!(doc.group, 1);
            }
            other => panic!("expected a learned-word change, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn learn_resolves_persistence_before_the_next_card() {
        let store = Arc::new(StubStore::new(ProgressRecord::default()));
        let mut session = Session::hydrate(make_catalog(4, 2), store.clone())
            .await
            .unwrap();

        session.learn("a1").await.unwrap();
        assert_eq!(store.persist_count(), 1);

        let next = session.next_card().unwrap();
        assert_eq!(store.persist_count(), 1);
        match next {
            NextCard::Word(word) => assert_eq!(word.english, "a2"),
            other => panic!("expected a word, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn learn_unknown_word_fails_without_persisting() {
        let store = Arc::new(StubStore::new(ProgressRecord::default()));
        let mut session = Session::hydrate(make_catalog(4, 2), store.clone())
            .await
            .unwrap();

        let err = session.learn("zzz").await.unwrap_err();
        assert!(matches!(err, EngineError::UnknownWord(_)));
        assert_eq!(store.persist_count(), 0);
        assert!(!session.state().learned_words.contains("zzz"));
    }

    #[tokio::test]
    async fn persist_failure_keeps_the_mutation_and_flags_degraded() {
        let store = Arc::new(StubStore::new(ProgressRecord::default()));
        let mut session = Session::hydrate(make_catalog(4, 2), store.clone())
            .await
            .unwrap();
        store.fail.store(true, Ordering::Relaxed);

        let err = session.learn("a1").await.unwrap_err();
        assert!(err.is_degraded_only());
        assert!(session.is_degraded());
        // No rollback: the word stays learned in memory.
        assert!(session.state().learned_words.contains("a1"));
        assert_eq!(session.recently_learned()[0].english, "a1");
    }

    #[tokio::test]
    async fn unlearn_sends_a_delete_change() {
        let store = Arc::new(StubStore::new(ProgressRecord {
            active_group: 1,
            learned_words: vec!["a1".into()],
            recently_learned: vec![],
        }));
        let mut session = Session::hydrate(make_catalog(4, 2), store.clone())
            .await
            .unwrap();

        session.unlearn("a1").await.unwrap();

        let (record, change) = store.last_persist().unwrap();
        assert!(record.learned_words.is_empty());
        assert_eq!(
            change,
            Some(WordChange::Unlearned {
                english: "a1".into()
            })
        );
    }

    #[tokio::test]
    async fn empty_catalog_yields_catalog_empty() {
        let store = Arc::new(StubStore::new(ProgressRecord::default()));
        let mut session = Session::hydrate(make_catalog(0, 300), store).await.unwrap();

        assert!(matches!(
            session.next_card().unwrap_err(),
            EngineError::CatalogEmpty
        ));
        assert!(matches!(
            session.learn("a1").await.unwrap_err(),
            EngineError::CatalogEmpty
        ));
    }

    #[tokio::test]
    async fn current_card_is_none_once_completed() {
        let store = Arc::new(StubStore::new(ProgressRecord::default()));
        let mut session = Session::hydrate(make_catalog(2, 2), store).await.unwrap();

        session.learn("a1").await.unwrap();
        session.learn("a2").await.unwrap();

        assert!(session.state().all_words_learned);
        assert!(session.current_card().is_none());
        assert_eq!(session.next_card().unwrap(), NextCard::Completed);
    }

    #[tokio::test]
    async fn progress_summary_counts_the_active_group() {
        let store = Arc::new(StubStore::new(ProgressRecord::default()));
        let mut session = Session::hydrate(make_catalog(6, 2), store).await.unwrap();

        session.learn("a1").await.unwrap();
        let p = session.progress();
        assert_eq!(p.active_group, 1);
        assert_eq!(p.learned_in_group, 1);
        assert_eq!(p.group_len, 2);
        assert_eq!(p.group_count, 3);
        assert_eq!(p.total_learned, 1);
        assert_eq!(p.total_words, 6);
        assert!(!p.completed);
    }
}
