use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Name of the reserved fallback identity. Always exists, never listed as
/// creatable, never deletable.
pub const DEFAULT_USER: &str = "default";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    Wrong,
    Correct,
    Mastered,
}

/// Derived per-day progress. Never set directly by the user; the engine
/// recomputes it from word statuses (plus the daily-mode override).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub start: u32,
    pub end: u32,
}

impl DayRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_ordered(&self) -> bool {
        self.start >= 1 && self.start <= self.end
    }
}

impl Default for DayRange {
    fn default() -> Self {
        Self { start: 1, end: 100 }
    }
}

/// One user's persisted progress. Every field carries a serde default so
/// records written by older builds load without error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub completed_days: u32,
    #[serde(default)]
    pub studied_words: u32,
    #[serde(default)]
    pub mastered_words: u32,
    /// `"day-{n}"` -> derived day status.
    #[serde(default)]
    pub days_progress: BTreeMap<String, DayStatus>,
    /// `"{day}-{id}"` -> current word status. At most one entry per word.
    #[serde(default)]
    pub word_status: BTreeMap<String, WordStatus>,
    #[serde(default = "default_day_number")]
    pub last_day_number: u32,
    #[serde(default)]
    pub last_typing_range: DayRange,
    #[serde(default)]
    pub last_matching_range: DayRange,
    #[serde(default)]
    pub last_studied_at: Option<DateTime<Utc>>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_day_number() -> u32 {
    1
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            completed_days: 0,
            studied_words: 0,
            mastered_words: 0,
            days_progress: BTreeMap::new(),
            word_status: BTreeMap::new(),
            last_day_number: 1,
            last_typing_range: DayRange::default(),
            last_matching_range: DayRange::default(),
            last_studied_at: None,
        }
    }
}

impl ProgressData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    pub fn day_key(day: u32) -> String {
        format!("day-{day}")
    }
}

/// Known user names plus the currently active one. The reserved default
/// identity is implicit and never appears in `users`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRegistryData {
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default = "default_active_user")]
    pub active: String,
}

fn default_active_user() -> String {
    DEFAULT_USER.to_string()
}

impl Default for UserRegistryData {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            active: DEFAULT_USER.to_string(),
        }
    }
}
