use crate::catalog::{Catalog, Word, WordKey};
use crate::engine::progress::ProgressEngine;
use crate::store::schema::{ProgressData, WordStatus};

/// Highest day number the daily pass cycles through, independent of how
/// many days the catalog actually has.
pub const DAY_CYCLE_MAX: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DailyOutcome {
    /// The meaning was uncovered; grading is now possible.
    Revealed,
    /// A grade was recorded for the current word.
    Graded(WordStatus),
    /// The last word of the day has been passed.
    DayFinished,
}

/// Sequential reveal-and-self-grade pass over one day's words. Grading
/// records Correct/Wrong only — Mastered is reachable solely through the
/// list view's three-way buttons.
pub struct DailySession {
    pub day: u32,
    words: Vec<Word>,
    pub index: usize,
    pub meaning_revealed: bool,
}

impl DailySession {
    /// Start a pass over `day`. A day missing from the catalog or with no
    /// words yields an already-exhausted session.
    pub fn new(catalog: &Catalog, day: u32) -> Self {
        let words = catalog.day(day).map(|d| d.words.clone()).unwrap_or_default();
        Self {
            day,
            words,
            index: 0,
            meaning_revealed: false,
        }
    }

    pub fn current(&self) -> Option<&Word> {
        self.words.get(self.index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.words.len()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn reveal(&mut self) -> bool {
        if self.is_exhausted() || self.meaning_revealed {
            return false;
        }
        self.meaning_revealed = true;
        true
    }

    /// Grade the current word. A grade press with the meaning still hidden
    /// reveals it instead, so the user always sees the answer before
    /// committing.
    pub fn grade(
        &mut self,
        engine: &ProgressEngine,
        progress: &mut ProgressData,
        is_correct: bool,
    ) -> DailyOutcome {
        if self.is_exhausted() {
            return DailyOutcome::DayFinished;
        }
        if !self.meaning_revealed {
            self.meaning_revealed = true;
            return DailyOutcome::Revealed;
        }

        let word = &self.words[self.index];
        let status = if is_correct {
            WordStatus::Correct
        } else {
            WordStatus::Wrong
        };
        engine.set_status(progress, WordKey::new(self.day, word.id), status);
        DailyOutcome::Graded(status)
    }

    /// Move past the current word. Returns `DayFinished` once the list is
    /// exhausted; the caller then applies the completion override and
    /// rolls to the next day.
    pub fn advance(&mut self) -> Option<DailyOutcome> {
        self.index += 1;
        self.meaning_revealed = false;
        if self.is_exhausted() {
            Some(DailyOutcome::DayFinished)
        } else {
            None
        }
    }

    /// Next day number, wrapping within `[1, DAY_CYCLE_MAX]`.
    pub fn next_day_number(day: u32) -> u32 {
        if day >= DAY_CYCLE_MAX { 1 } else { day + 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema::DayStatus;

    #[test]
    fn grade_before_reveal_only_reveals() {
        let catalog = Catalog::bundled();
        let engine = ProgressEngine::new(&catalog);
        let mut progress = ProgressData::default();
        let mut session = DailySession::new(&catalog, 1);

        assert!(!session.meaning_revealed);
        assert_eq!(session.grade(&engine, &mut progress, true), DailyOutcome::Revealed);
        assert!(session.meaning_revealed);
        // Nothing was recorded by the reveal
        assert!(progress.word_status.is_empty());

        assert_eq!(
            session.grade(&engine, &mut progress, true),
            DailyOutcome::Graded(WordStatus::Correct)
        );
        assert_eq!(progress.word_status["1-1"], WordStatus::Correct);
    }

    #[test]
    fn grading_never_sets_mastered() {
        let catalog = Catalog::bundled();
        let engine = ProgressEngine::new(&catalog);
        let mut progress = ProgressData::default();
        let mut session = DailySession::new(&catalog, 1);

        while !session.is_exhausted() {
            session.reveal();
            session.grade(&engine, &mut progress, true);
            session.advance();
        }
        assert!(progress.word_status.values().all(|s| *s == WordStatus::Correct));
        assert_eq!(progress.mastered_words, 0);
    }

    #[test]
    fn advance_resets_reveal_and_reports_finish() {
        let catalog = Catalog::bundled();
        let mut session = DailySession::new(&catalog, 3);
        let total = session.word_count();
        assert_eq!(total, 8);

        for i in 0..total {
            session.reveal();
            let finished = session.advance();
            assert!(!session.meaning_revealed);
            if i + 1 == total {
                assert_eq!(finished, Some(DailyOutcome::DayFinished));
            } else {
                assert_eq!(finished, None);
            }
        }
        assert!(session.is_exhausted());
    }

    #[test]
    fn missing_day_is_already_exhausted() {
        let catalog = Catalog::bundled();
        let mut session = DailySession::new(&catalog, 42);
        assert!(session.is_exhausted());
        assert!(session.current().is_none());
        assert!(!session.reveal());

        let engine = ProgressEngine::new(&catalog);
        let mut progress = ProgressData::default();
        assert_eq!(
            session.grade(&engine, &mut progress, true),
            DailyOutcome::DayFinished
        );
    }

    #[test]
    fn day_numbers_wrap_circularly() {
        assert_eq!(DailySession::next_day_number(1), 2);
        assert_eq!(DailySession::next_day_number(99), 100);
        assert_eq!(DailySession::next_day_number(100), 1);
    }

    #[test]
    fn finishing_with_override_completes_despite_wrong_grades() {
        let catalog = Catalog::bundled();
        let engine = ProgressEngine::new(&catalog);
        let mut progress = ProgressData::default();
        let mut session = DailySession::new(&catalog, 2);

        while !session.is_exhausted() {
            session.reveal();
            session.grade(&engine, &mut progress, false);
            session.advance();
        }
        // The sequential pass completes the day even though no word is mastered
        engine.complete_day_override(&mut progress, session.day);
        assert_eq!(progress.days_progress["day-2"], DayStatus::Completed);
        assert_eq!(progress.completed_days, 1);
    }
}
