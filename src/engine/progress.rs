use chrono::Utc;

use crate::catalog::{Catalog, WordKey};
use crate::store::schema::{DayStatus, ProgressData, WordStatus};

/// Result of a status command, for the caller's re-render decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusChange {
    /// A new status was assigned (replacing any prior one).
    Set(WordStatus),
    /// The existing status was toggled off / removed.
    Cleared,
    /// The word's day is not in the catalog; nothing was touched.
    Ignored,
}

/// The progress state machine. Pure logic over one user's `ProgressData`;
/// the catalog is consulted for day membership when re-deriving day
/// statuses. Persistence stays with the caller (write-through after every
/// mutating call).
pub struct ProgressEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> ProgressEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Assign a status with toggle-off semantics: setting the current
    /// status again clears it instead. Keeps `studied_words` (first
    /// assignment only), `mastered_words`, the word's derived day status,
    /// and `completed_days` consistent in the same step.
    pub fn set_status(
        &self,
        progress: &mut ProgressData,
        key: WordKey,
        new_status: WordStatus,
    ) -> StatusChange {
        if self.catalog.day(key.day).is_none() {
            return StatusChange::Ignored;
        }

        let storage = key.storage_key();
        let old = progress.word_status.get(&storage).copied();

        if old == Some(new_status) {
            return self.clear_entry(progress, key);
        }

        // Decrement before overwrite so mastered_words never double-counts
        if old == Some(WordStatus::Mastered) {
            progress.mastered_words = progress.mastered_words.saturating_sub(1);
        }
        if old.is_none() {
            progress.studied_words += 1;
        }
        progress.word_status.insert(storage, new_status);
        if new_status == WordStatus::Mastered {
            progress.mastered_words += 1;
        }

        self.refresh_day(progress, key.day);
        progress.last_studied_at = Some(Utc::now());
        StatusChange::Set(new_status)
    }

    /// Remove a word's status entirely (never-studied state). No-op when
    /// there is no entry or the day is unknown.
    pub fn remove_status(&self, progress: &mut ProgressData, key: WordKey) -> StatusChange {
        if self.catalog.day(key.day).is_none() {
            return StatusChange::Ignored;
        }
        if !progress.word_status.contains_key(&key.storage_key()) {
            return StatusChange::Ignored;
        }
        self.clear_entry(progress, key)
    }

    fn clear_entry(&self, progress: &mut ProgressData, key: WordKey) -> StatusChange {
        let storage = key.storage_key();
        if progress.word_status.remove(&storage) == Some(WordStatus::Mastered) {
            progress.mastered_words = progress.mastered_words.saturating_sub(1);
        }
        self.refresh_day(progress, key.day);
        progress.last_studied_at = Some(Utc::now());
        StatusChange::Cleared
    }

    /// Pure derivation of a day's status from its words' statuses.
    /// Unknown days read as `NotStarted`.
    pub fn day_status(&self, progress: &ProgressData, day: u32) -> DayStatus {
        let Some(day_data) = self.catalog.day(day) else {
            return DayStatus::NotStarted;
        };

        let mut studied = 0usize;
        let mut mastered = 0usize;
        for word in &day_data.words {
            match progress.word_status.get(&WordKey::new(day, word.id).storage_key()) {
                Some(WordStatus::Mastered) => {
                    studied += 1;
                    mastered += 1;
                }
                Some(_) => studied += 1,
                None => {}
            }
        }

        if studied == 0 {
            DayStatus::NotStarted
        } else if mastered == day_data.words.len() && !day_data.words.is_empty() {
            DayStatus::Completed
        } else {
            DayStatus::InProgress
        }
    }

    /// Mark a day completed regardless of its word statuses. This is the
    /// daily-mode path: finishing the sequential pass always completes the
    /// day, even when the derived rule would call it in-progress. A later
    /// status change on that day re-derives and can demote it.
    pub fn complete_day_override(&self, progress: &mut ProgressData, day: u32) {
        if self.catalog.day(day).is_none() {
            return;
        }
        progress
            .days_progress
            .insert(ProgressData::day_key(day), DayStatus::Completed);
        Self::recount_completed_days(progress);
    }

    fn refresh_day(&self, progress: &mut ProgressData, day: u32) {
        if self.catalog.day(day).is_none() {
            return;
        }
        let status = self.day_status(progress, day);
        progress.days_progress.insert(ProgressData::day_key(day), status);
        Self::recount_completed_days(progress);
    }

    fn recount_completed_days(progress: &mut ProgressData) {
        progress.completed_days = progress
            .days_progress
            .values()
            .filter(|s| **s == DayStatus::Completed)
            .count() as u32;
    }
}
