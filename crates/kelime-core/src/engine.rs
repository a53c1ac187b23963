//! Pure learner-state transitions.
//!
//! Every function here is side-effect free: callers supply timestamps and
//! perform persistence separately, which keeps the transition logic
//! directly testable. The session layer in [`crate::session`] wires these
//! transitions to a progress store.

use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::model::{LearnerState, RecentWord, WordEntry, RECENT_LEARNED_CAP};

/// Outcome of a [`next_word`] transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextWordOutcome {
    /// The index (within the current group) of the next word to show.
    Word(usize),
    /// The active group was exhausted; state advanced to the next group
    /// with the index reset to 0.
    GroupAdvanced,
    /// The final group is exhausted; no further word is served.
    Completed,
    /// The bounded scan found no unlearned word even though the group did
    /// not look exhausted. The index is left unchanged and resolution is
    /// deferred to the next recomputation.
    Stalled,
}

/// All catalog entries in the state's active group, in catalog order.
pub fn current_group_words<'a>(state: &LearnerState, catalog: &'a Catalog) -> &'a [WordEntry] {
    catalog.group_words(state.active_group)
}

/// Advance to the next unlearned word in the active group.
///
/// When the group is exhausted the state moves to the next group (index
/// 0), or to the terminal completed state when no next group exists.
/// Otherwise the scan starts just past the current index and wraps, bounded
/// by the group length.
pub fn next_word(state: &LearnerState, catalog: &Catalog) -> (LearnerState, NextWordOutcome) {
    let mut next = state.clone();
    if next.all_words_learned {
        return (next, NextWordOutcome::Completed);
    }

    let group_words = catalog.group_words(next.active_group);
    let any_unlearned = group_words
        .iter()
        .any(|w| !next.learned_words.contains(&w.english));

    if !any_unlearned {
        if next.active_group + 1 <= catalog.group_count() {
            next.active_group += 1;
            next.current_word_index = 0;
            return (next, NextWordOutcome::GroupAdvanced);
        }
        next.all_words_learned = true;
        return (next, NextWordOutcome::Completed);
    }

    let len = group_words.len();
    let mut index = (next.current_word_index + 1) % len;
    let mut attempts = 0;
    while attempts < len && next.learned_words.contains(&group_words[index].english) {
        index = (index + 1) % len;
        attempts += 1;
    }

    if next.learned_words.contains(&group_words[index].english) {
        // Inconsistent state: the emptiness check and the scan disagree.
        // Keep the index; the next mark or recomputation resolves it.
        tracing::warn!(
            group = next.active_group,
            "scan found no unlearned word in a non-exhausted group"
        );
        return (next, NextWordOutcome::Stalled);
    }

    next.current_word_index = index;
    (next, NextWordOutcome::Word(index))
}

/// Mark a word learned and apply any resulting group promotion.
///
/// Idempotent on the learned set; the recently-learned list is
/// regenerated either way (existing entry removed, new entry prepended,
/// truncated to [`RECENT_LEARNED_CAP`]). When the active group becomes
/// fully learned the state advances to the next non-empty group with the
/// index at its first unlearned position, or reaches the terminal
/// completed state when the active group was the last.
pub fn mark_learned(
    state: &LearnerState,
    catalog: &Catalog,
    word: &WordEntry,
    now: DateTime<Utc>,
) -> LearnerState {
    let mut next = state.clone();
    next.learned_words.insert(word.english.clone());

    next.recently_learned.retain(|r| r.english != word.english);
    next.recently_learned.insert(
        0,
        RecentWord {
            english: word.english.clone(),
            turkish: word.turkish.clone(),
            learned_at: now,
        },
    );
    next.recently_learned.truncate(RECENT_LEARNED_CAP);

    let group_words = catalog.group_words(next.active_group);
    let group_complete = !group_words.is_empty()
        && group_words
            .iter()
            .all(|w| next.learned_words.contains(&w.english));

    if group_complete {
        let next_group = next.active_group + 1;
        let next_group_words = catalog.group_words(next_group);
        if next_group <= catalog.group_count() && !next_group_words.is_empty() {
            next.active_group = next_group;
            next.current_word_index = next_group_words
                .iter()
                .position(|w| !next.learned_words.contains(&w.english))
                .unwrap_or(0);
        } else {
            next.all_words_learned = true;
        }
    }

    next
}

/// Remove a word from the learned set and the recently-learned list.
///
/// Group promotion is never reversed, even when this un-completes an
/// earlier group; the completion flag likewise stays set until an
/// external reset.
pub fn unlearn(state: &LearnerState, english: &str) -> LearnerState {
    let mut next = state.clone();
    next.learned_words.remove(english);
    next.recently_learned.retain(|r| r.english != english);
    next
}
