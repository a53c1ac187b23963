//! Word catalog loading, partitioning, and validation.
//!
//! The catalog is a static JSON document of `{english, turkish, type,
//! level}` records. Groups are assigned once at load time by slicing the
//! list into fixed-size blocks in catalog order; the catalog is read-only
//! for the lifetime of the process.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{CefrLevel, WordClass, WordEntry};

/// Top-level shape of the catalog JSON file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    words: Vec<CatalogWord>,
}

/// A catalog record before group assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogWord {
    pub english: String,
    pub turkish: String,
    #[serde(rename = "type")]
    pub class: WordClass,
    pub level: CefrLevel,
}

/// The immutable, grouped word list.
///
/// Groups are contiguous: group `g` covers catalog indices
/// `[(g-1)*G, g*G)`, so every entry's group is `floor(index / G) + 1`.
#[derive(Debug, Clone)]
pub struct Catalog {
    words: Vec<WordEntry>,
    index: HashMap<String, usize>,
    group_size: usize,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: &Path, group_size: usize) -> Result<Catalog> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
        Self::parse_str(&content, path, group_size)
    }

    /// Parse a JSON string into a catalog (useful for testing).
    pub fn parse_str(content: &str, source_path: &Path, group_size: usize) -> Result<Catalog> {
        let parsed: CatalogFile = serde_json::from_str(content)
            .with_context(|| format!("failed to parse catalog: {}", source_path.display()))?;
        Ok(Self::from_words(parsed.words, group_size))
    }

    /// Partition a word list into fixed-size groups, in list order.
    ///
    /// Pure and deterministic; safe to memoize for the process lifetime.
    /// A `group_size` of 0 is treated as 1.
    pub fn from_words(words: Vec<CatalogWord>, group_size: usize) -> Catalog {
        let group_size = group_size.max(1);

        let words: Vec<WordEntry> = words
            .into_iter()
            .enumerate()
            .map(|(i, w)| WordEntry {
                english: w.english,
                turkish: w.turkish,
                class: w.class,
                level: w.level,
                group: (i / group_size) as u32 + 1,
            })
            .collect();

        // First occurrence wins; duplicates are reported by validation.
        let mut index = HashMap::with_capacity(words.len());
        for (i, w) in words.iter().enumerate() {
            index.entry(w.english.clone()).or_insert(i);
        }

        Catalog {
            words,
            index,
            group_size,
        }
    }

    /// Number of words in the catalog.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The configured group size.
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Total group count: `ceil(len / group_size)`.
    pub fn group_count(&self) -> u32 {
        self.words.len().div_ceil(self.group_size) as u32
    }

    /// All entries, in catalog order.
    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    /// All entries of one group, in catalog order.
    ///
    /// Out-of-range groups (including 0) yield an empty slice, never a
    /// panic.
    pub fn group_words(&self, group: u32) -> &[WordEntry] {
        if group == 0 {
            return &[];
        }
        let start = (group as usize - 1) * self.group_size;
        if start >= self.words.len() {
            return &[];
        }
        let end = (start + self.group_size).min(self.words.len());
        &self.words[start..end]
    }

    /// Look up an entry by its English key.
    pub fn find(&self, english: &str) -> Option<&WordEntry> {
        self.index.get(english).map(|&i| &self.words[i])
    }
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The English key the warning refers to (if applicable).
    pub english: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common data issues.
///
/// Warnings are advisory; a catalog with warnings still loads.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen = std::collections::HashSet::new();
    for word in catalog.words() {
        if !seen.insert(word.english.as_str()) {
            warnings.push(ValidationWarning {
                english: Some(word.english.clone()),
                message: format!("duplicate english key: {}", word.english),
            });
        }
    }

    for word in catalog.words() {
        if word.english.trim().is_empty() {
            warnings.push(ValidationWarning {
                english: None,
                message: "entry with empty english key".into(),
            });
        }
        if word.turkish.trim().is_empty() {
            warnings.push(ValidationWarning {
                english: Some(word.english.clone()),
                message: format!("missing translation for: {}", word.english),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_JSON: &str = r#"{
        "words": [
            { "english": "house", "turkish": "ev", "type": "n.", "level": "A1" },
            { "english": "run", "turkish": "koşmak", "type": "v.", "level": "A1" },
            { "english": "beautiful", "turkish": "güzel", "type": "adj.", "level": "A2" }
        ]
    }"#;

    fn word(i: usize) -> CatalogWord {
        CatalogWord {
            english: format!("word{i}"),
            turkish: format!("kelime{i}"),
            class: WordClass::Noun,
            level: CefrLevel::A1,
        }
    }

    #[test]
    fn parse_valid_json() {
        let catalog = Catalog::parse_str(VALID_JSON, &PathBuf::from("test.json"), 2).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.group_count(), 2);
        assert_eq!(catalog.words()[0].english, "house");
        assert_eq!(catalog.words()[0].group, 1);
        assert_eq!(catalog.words()[2].group, 2);
    }

    #[test]
    fn parse_missing_words_field() {
        let catalog = Catalog::parse_str("{}", &PathBuf::from("test.json"), 300).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.group_count(), 0);
    }

    #[test]
    fn parse_malformed_json() {
        let result = Catalog::parse_str("not json {", &PathBuf::from("bad.json"), 300);
        assert!(result.is_err());
    }

    #[test]
    fn parse_unknown_word_class_is_an_error() {
        let json = r#"{ "words": [
            { "english": "x", "turkish": "y", "type": "noun", "level": "A1" }
        ]}"#;
        assert!(Catalog::parse_str(json, &PathBuf::from("bad.json"), 300).is_err());
    }

    #[test]
    fn partition_assigns_groups() {
        for (count, group_size) in [(0usize, 3usize), (1, 3), (5, 3), (6, 3), (7, 3), (300, 300)] {
            let catalog = Catalog::from_words((0..count).map(word).collect(), group_size);
            for (i, entry) in catalog.words().iter().enumerate() {
                assert_eq!(entry.group, (i / group_size) as u32 + 1);
            }
            assert_eq!(catalog.group_count(), count.div_ceil(group_size) as u32);
        }
    }

    #[test]
    fn group_words_slices_in_order() {
        let catalog = Catalog::from_words((0..7).map(word).collect(), 3);
        assert_eq!(catalog.group_count(), 3);

        let g2: Vec<&str> = catalog.group_words(2).iter().map(|w| w.english.as_str()).collect();
        assert_eq!(g2, vec!["word3", "word4", "word5"]);
        assert_eq!(catalog.group_words(3).len(), 1);
    }

    #[test]
    fn group_words_out_of_range_is_empty() {
        let catalog = Catalog::from_words((0..4).map(word).collect(), 2);
        assert!(catalog.group_words(0).is_empty());
        assert!(catalog.group_words(3).is_empty());
        assert!(catalog.group_words(99).is_empty());
    }

    #[test]
    fn empty_catalog_lookups_are_empty() {
        let catalog = Catalog::from_words(vec![], 300);
        assert!(catalog.group_words(1).is_empty());
        assert!(catalog.find("anything").is_none());
    }

    #[test]
    fn find_by_english_key() {
        let catalog = Catalog::from_words((0..10).map(word).collect(), 4);
        let entry = catalog.find("word6").unwrap();
        assert_eq!(entry.turkish, "kelime6");
        assert_eq!(entry.group, 2);
        assert!(catalog.find("word10").is_none());
    }

    #[test]
    fn zero_group_size_is_treated_as_one() {
        let catalog = Catalog::from_words((0..3).map(word).collect(), 0);
        assert_eq!(catalog.group_count(), 3);
        assert_eq!(catalog.group_words(2).len(), 1);
    }

    #[test]
    fn validate_duplicates_and_missing_translations() {
        let mut words: Vec<CatalogWord> = (0..3).map(word).collect();
        words.push(CatalogWord {
            english: "word0".into(),
            turkish: "tekrar".into(),
            class: WordClass::Noun,
            level: CefrLevel::A1,
        });
        words.push(CatalogWord {
            english: "blank".into(),
            turkish: "  ".into(),
            class: WordClass::Noun,
            level: CefrLevel::A1,
        });

        let catalog = Catalog::from_words(words, 300);
        let warnings = validate_catalog(&catalog);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("missing translation for: blank")));
    }

    #[test]
    fn validate_clean_catalog_has_no_warnings() {
        let catalog = Catalog::from_words((0..5).map(word).collect(), 2);
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, VALID_JSON).unwrap();

        let catalog = Catalog::load(&path, 300).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(Catalog::load(&dir.path().join("missing.json"), 300).is_err());
    }
}
