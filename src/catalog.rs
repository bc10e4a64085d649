use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SAMPLE_DATA: &str = include_str!("../assets/vocabulary-sample.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse vocabulary file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("vocabulary file contains no days")]
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Unique within its day only; the same id reappears on other days.
    pub id: u32,
    pub word: String,
    pub pos: String,
    pub meaning: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Day {
    pub day: u32,
    pub words: Vec<Word>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub total_words: u32,
}

/// The read-only word list the whole app studies from. Days are kept in
/// file order and are expected to be sorted by day number.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub metadata: Metadata,
    pub days: Vec<Day>,
}

impl Catalog {
    pub fn from_str(data: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(data)?;
        if catalog.days.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path)?;
        Self::from_str(&data)
    }

    /// The embedded sample vocabulary used when no file is supplied.
    pub fn bundled() -> Self {
        Self::from_str(SAMPLE_DATA).unwrap_or_default()
    }

    pub fn day(&self, day: u32) -> Option<&Day> {
        self.days.iter().find(|d| d.day == day)
    }

    pub fn max_day(&self) -> u32 {
        self.days.iter().map(|d| d.day).max().unwrap_or(0)
    }

    pub fn total_words(&self) -> u32 {
        self.metadata.total_words
    }

    /// All words whose day falls inside `[start, end]`, tagged with their
    /// day number, in catalog order.
    pub fn words_in_range(&self, start: u32, end: u32) -> Vec<(u32, Word)> {
        self.days
            .iter()
            .filter(|d| d.day >= start && d.day <= end)
            .flat_map(|d| d.words.iter().map(move |w| (d.day, w.clone())))
            .collect()
    }

    /// Case-insensitive substring match against spelling and meaning.
    pub fn word_matches(word: &Word, query: &str) -> bool {
        let needle = query.to_lowercase();
        word.word.to_lowercase().contains(&needle)
            || word.meaning.to_lowercase().contains(&needle)
    }
}

/// Identifies one word across the whole catalog. Word ids repeat between
/// days, so the day number is part of the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct WordKey {
    pub day: u32,
    pub id: u32,
}

impl WordKey {
    pub fn new(day: u32, id: u32) -> Self {
        Self { day, id }
    }

    /// Key format used in the persisted progress maps.
    pub fn storage_key(&self) -> String {
        format!("{}-{}", self.day, self.id)
    }
}
