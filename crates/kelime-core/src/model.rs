//! Core data model types for kelime.
//!
//! These are the fundamental types the entire kelime system uses to
//! represent vocabulary entries, learner progress, and the shapes the
//! progress stores put on the wire.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Maximum number of entries kept in the recently-learned list.
pub const RECENT_LEARNED_CAP: usize = 5;

/// Default number of words per group.
pub const DEFAULT_GROUP_SIZE: usize = 300;

/// A single vocabulary entry with its assigned group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    /// The English word, the unique key progress is tracked under.
    pub english: String,
    /// The Turkish translation.
    pub turkish: String,
    /// Part of speech.
    #[serde(rename = "type")]
    pub class: WordClass,
    /// CEFR difficulty level.
    pub level: CefrLevel,
    /// 1-indexed group, assigned at catalog load time.
    pub group: u32,
}

/// Part-of-speech tag carried by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordClass {
    #[serde(rename = "n.")]
    Noun,
    #[serde(rename = "v.")]
    Verb,
    #[serde(rename = "adj.")]
    Adjective,
    #[serde(rename = "adv.")]
    Adverb,
    #[serde(rename = "interj.")]
    Interjection,
    #[serde(rename = "prep.")]
    Preposition,
    #[serde(rename = "conj.")]
    Conjunction,
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordClass::Noun => write!(f, "n."),
            WordClass::Verb => write!(f, "v."),
            WordClass::Adjective => write!(f, "adj."),
            WordClass::Adverb => write!(f, "adv."),
            WordClass::Interjection => write!(f, "interj."),
            WordClass::Preposition => write!(f, "prep."),
            WordClass::Conjunction => write!(f, "conj."),
        }
    }
}

impl FromStr for WordClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n." => Ok(WordClass::Noun),
            "v." => Ok(WordClass::Verb),
            "adj." => Ok(WordClass::Adjective),
            "adv." => Ok(WordClass::Adverb),
            "interj." => Ok(WordClass::Interjection),
            "prep." => Ok(WordClass::Preposition),
            "conj." => Ok(WordClass::Conjunction),
            other => Err(format!("unknown word class: {other}")),
        }
    }
}

/// CEFR proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        };
        write!(f, "{s}")
    }
}

impl FromStr for CefrLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            other => Err(format!("unknown CEFR level: {other}")),
        }
    }
}

/// An entry in the recently-learned list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentWord {
    pub english: String,
    pub turkish: String,
    /// When the word was marked learned.
    pub learned_at: DateTime<Utc>,
}

/// The persisted progress summary: the exact shape both backends store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// 1-indexed group the learner is working through.
    #[serde(default = "default_active_group")]
    pub active_group: u32,
    /// English keys of every learned word.
    #[serde(default)]
    pub learned_words: Vec<String>,
    /// Most recently learned words, newest first.
    #[serde(default)]
    pub recently_learned: Vec<RecentWord>,
}

fn default_active_group() -> u32 {
    1
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            active_group: 1,
            learned_words: Vec::new(),
            recently_learned: Vec::new(),
        }
    }
}

/// The per-word document written for authenticated sessions, keyed by the
/// English word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnedWordDoc {
    pub word: String,
    pub translation: String,
    pub learned_at: DateTime<Utc>,
    pub group: u32,
}

/// In-memory learner progress for one session.
///
/// `current_word_index` and `all_words_learned` are derived at hydration
/// and never persisted; both backends store only a [`ProgressRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct LearnerState {
    /// 1-indexed group currently being studied. Never decreases.
    pub active_group: u32,
    /// English keys of every learned word.
    pub learned_words: HashSet<String>,
    /// Most recently learned words, newest first, at most
    /// [`RECENT_LEARNED_CAP`] entries.
    pub recently_learned: Vec<RecentWord>,
    /// Position within the current group's word list (not the catalog).
    pub current_word_index: usize,
    /// Terminal flag: every word of the final group is learned.
    pub all_words_learned: bool,
}

impl LearnerState {
    /// Build the in-memory state from a persisted record.
    ///
    /// The active group is clamped into the catalog's group range (records
    /// may predate a catalog change), learned keys that no longer exist in
    /// the catalog are dropped, and the recently-learned list is forced
    /// back inside its invariants. The word index is derived as the first
    /// unlearned position in the active group, or 0 when none is found.
    pub fn from_record(record: ProgressRecord, catalog: &Catalog) -> Self {
        let group_count = catalog.group_count();
        let active_group = record.active_group.clamp(1, group_count.max(1));

        let learned_words: HashSet<String> = record
            .learned_words
            .into_iter()
            .filter(|w| catalog.find(w).is_some())
            .collect();

        let mut recently_learned = record.recently_learned;
        recently_learned.retain(|r| learned_words.contains(&r.english));
        recently_learned.truncate(RECENT_LEARNED_CAP);

        let group_words = catalog.group_words(active_group);
        let current_word_index = group_words
            .iter()
            .position(|w| !learned_words.contains(&w.english))
            .unwrap_or(0);
        let all_words_learned = active_group == group_count
            && !group_words.is_empty()
            && group_words.iter().all(|w| learned_words.contains(&w.english));

        Self {
            active_group,
            learned_words,
            recently_learned,
            current_word_index,
            all_words_learned,
        }
    }

    /// Collapse back to the persisted shape.
    ///
    /// Learned words are sorted so the summary document is deterministic.
    pub fn to_record(&self) -> ProgressRecord {
        let mut learned_words: Vec<String> = self.learned_words.iter().cloned().collect();
        learned_words.sort();

        ProgressRecord {
            active_group: self.active_group,
            learned_words,
            recently_learned: self.recently_learned.clone(),
        }
    }
}
