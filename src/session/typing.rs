use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::catalog::{Catalog, Word};
use crate::store::schema::DayRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty input, or a submit that can do nothing right now.
    Ignored,
    /// Answer matched; input is locked and an auto-advance is due.
    Correct,
    /// Answer did not match; retry / hint / reveal become available.
    Incorrect,
    /// The word was already resolved — the submit means "next".
    AdvanceRequested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NextWord,
    /// The pool has been traversed once: final figures, then the counters
    /// and timer reset and traversal restarts at index 0 (same order).
    PoolFinished {
        correct: u32,
        total: u32,
        accuracy: u32,
    },
}

/// Typed-recall drill over a shuffled day-range pool. Answers are matched
/// by trimmed, case-insensitive exact comparison against the spelling.
pub struct TypingSession {
    pool: Vec<(u32, Word)>,
    pub index: usize,
    pub correct_count: u32,
    pub total_count: u32,
    started_at: Instant,
    pub answered: bool,
    pub is_correct: bool,
    pub hint_revealed: bool,
    pub answer_revealed: bool,
}

impl TypingSession {
    /// Build a session from the inclusive day range. Returns None when the
    /// range yields no words (advisory at the caller, no state change).
    pub fn from_range(catalog: &Catalog, range: DayRange, rng: &mut SmallRng) -> Option<Self> {
        let mut pool = catalog.words_in_range(range.start, range.end);
        if pool.is_empty() {
            return None;
        }
        pool.shuffle(rng);
        Some(Self {
            pool,
            index: 0,
            correct_count: 0,
            total_count: 0,
            started_at: Instant::now(),
            answered: false,
            is_correct: false,
            hint_revealed: false,
            answer_revealed: false,
        })
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn current(&self) -> &Word {
        &self.pool[self.index].1
    }

    pub fn current_day(&self) -> u32 {
        self.pool[self.index].0
    }

    pub fn submit(&mut self, input: &str) -> SubmitOutcome {
        // A resolved word treats a further submit as "next"
        if (self.answered && self.is_correct) || self.answer_revealed {
            return SubmitOutcome::AdvanceRequested;
        }

        let answer = input.trim().to_lowercase();
        if answer.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let target = self.current().word.trim().to_lowercase();
        self.answered = true;
        self.total_count += 1;
        if answer == target {
            self.is_correct = true;
            self.correct_count += 1;
            SubmitOutcome::Correct
        } else {
            self.is_correct = false;
            SubmitOutcome::Incorrect
        }
    }

    /// Unlock another attempt after a wrong answer.
    pub fn retry(&mut self) {
        if self.answered && !self.is_correct {
            self.answered = false;
            self.hint_revealed = false;
            self.answer_revealed = false;
        }
    }

    /// First letter of the answer, uppercased. Only available after a
    /// wrong answer; a second call is a no-op.
    pub fn hint(&mut self) -> Option<String> {
        if !self.answered || self.is_correct || self.hint_revealed {
            return None;
        }
        self.hint_revealed = true;
        self.current()
            .word
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
    }

    /// Full spelling; locks the word so the only way forward is advance.
    /// Idempotent after the first call.
    pub fn reveal_answer(&mut self) -> Option<&str> {
        if !self.answered || self.is_correct || self.answer_revealed {
            return None;
        }
        self.answer_revealed = true;
        Some(&self.pool[self.index].1.word)
    }

    pub fn advance(&mut self) -> AdvanceOutcome {
        self.index += 1;
        self.answered = false;
        self.is_correct = false;
        self.hint_revealed = false;
        self.answer_revealed = false;

        if self.index >= self.pool.len() {
            let outcome = AdvanceOutcome::PoolFinished {
                correct: self.correct_count,
                total: self.total_count,
                accuracy: self.accuracy(),
            };
            self.index = 0;
            self.correct_count = 0;
            self.total_count = 0;
            self.started_at = Instant::now();
            outcome
        } else {
            AdvanceOutcome::NextWord
        }
    }

    /// Answers per minute, rounded. Zero until the first answer lands.
    pub fn wpm(&self) -> u32 {
        let minutes = self.started_at.elapsed().as_secs_f64() / 60.0;
        if minutes <= 0.0 || self.total_count == 0 {
            return 0;
        }
        (self.total_count as f64 / minutes).round() as u32
    }

    pub fn accuracy(&self) -> u32 {
        if self.total_count == 0 {
            return 0;
        }
        ((self.correct_count as f64 / self.total_count as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn session(start: u32, end: u32) -> Option<TypingSession> {
        let catalog = Catalog::bundled();
        let mut rng = SmallRng::seed_from_u64(7);
        TypingSession::from_range(&catalog, DayRange::new(start, end), &mut rng)
    }

    /// Walk the shuffled pool once, submitting the given input whenever a
    /// target word comes up and skipping everything else. Stops after the
    /// last target so the pass never wraps.
    fn submit_targets(session: &mut TypingSession, targets: &[(&str, &str)]) {
        let mut remaining = targets.len();
        for _ in 0..session.pool_len() {
            let word = session.current().word.clone();
            if let Some((_, input)) = targets.iter().find(|(t, _)| *t == word) {
                session.submit(input);
                remaining -= 1;
                if remaining == 0 {
                    return;
                }
            }
            session.advance();
        }
        panic!("targets not all in pool");
    }

    #[test]
    fn range_pool_is_exactly_the_days_words() {
        let session = session(2, 2).unwrap();
        assert_eq!(session.pool_len(), 8);
        for i in 0..session.pool_len() {
            assert_eq!(session.pool[i].0, 2);
        }
    }

    #[test]
    fn out_of_catalog_range_yields_no_session() {
        assert!(session(50, 60).is_none());
    }

    #[test]
    fn comparison_is_trimmed_and_case_insensitive() {
        let mut s = session(1, 1).unwrap();
        let word = s.current().word.clone();

        let sloppy = format!("  {}  ", word.to_uppercase());
        assert_eq!(s.submit(&sloppy), SubmitOutcome::Correct);
        assert_eq!(s.correct_count, 1);
        assert_eq!(s.total_count, 1);
    }

    #[test]
    fn empty_input_is_ignored() {
        let mut s = session(1, 1).unwrap();
        assert_eq!(s.submit("   "), SubmitOutcome::Ignored);
        assert_eq!(s.total_count, 0);
        assert!(!s.answered);
    }

    #[test]
    fn accuracy_counts_wrong_attempts_in_total_only() {
        let mut s = session(1, 3).unwrap();

        submit_targets(
            &mut s,
            &[
                ("abandon", "abandon"),
                ("benefit", "Benefit"),
                ("candidate", "wrong"),
            ],
        );

        assert_eq!(s.correct_count, 2);
        assert_eq!(s.total_count, 3);
        assert_eq!(s.accuracy(), 67);
    }

    #[test]
    fn submit_after_correct_requests_advance() {
        let mut s = session(1, 1).unwrap();
        let word = s.current().word.clone();
        s.submit(&word);
        assert_eq!(s.submit(&word), SubmitOutcome::AdvanceRequested);
        // Counters unchanged by the second press
        assert_eq!(s.total_count, 1);
    }

    #[test]
    fn hint_and_answer_reveals_are_gated_and_idempotent() {
        let mut s = session(1, 1).unwrap();

        // Nothing before an answer
        assert!(s.hint().is_none());
        assert!(s.reveal_answer().is_none());

        s.submit("definitely-wrong");
        let expected_hint = s.current().word.chars().next().unwrap().to_uppercase().to_string();
        assert_eq!(s.hint(), Some(expected_hint));
        assert!(s.hint().is_none());

        let answer = s.reveal_answer().map(str::to_string);
        assert_eq!(answer.as_deref(), Some(s.current().word.as_str()));
        assert!(s.reveal_answer().is_none());

        // Revealed answer locks the word; submit now means advance
        assert_eq!(s.submit("anything"), SubmitOutcome::AdvanceRequested);
    }

    #[test]
    fn retry_resets_reveal_state_for_another_attempt() {
        let mut s = session(1, 1).unwrap();
        let word = s.current().word.clone();

        s.submit("nope");
        s.hint();
        s.retry();
        assert!(!s.answered);
        assert!(!s.hint_revealed);

        assert_eq!(s.submit(&word), SubmitOutcome::Correct);
        assert_eq!(s.total_count, 2);
        assert_eq!(s.correct_count, 1);
    }

    #[test]
    fn exhausting_pool_reports_and_restarts_without_reshuffle() {
        let mut s = session(1, 1).unwrap();
        let order: Vec<String> = s.pool.iter().map(|(_, w)| w.word.clone()).collect();

        for i in 0..s.pool_len() {
            let word = s.current().word.clone();
            s.submit(&word);
            let outcome = s.advance();
            if i + 1 == s.pool_len() {
                assert_eq!(
                    outcome,
                    AdvanceOutcome::PoolFinished {
                        correct: 8,
                        total: 8,
                        accuracy: 100
                    }
                );
            } else {
                assert_eq!(outcome, AdvanceOutcome::NextWord);
            }
        }

        // Back at the start, counters cleared, same pool order
        assert_eq!(s.index, 0);
        assert_eq!(s.correct_count, 0);
        assert_eq!(s.total_count, 0);
        let order_after: Vec<String> = s.pool.iter().map(|(_, w)| w.word.clone()).collect();
        assert_eq!(order, order_after);
    }

    #[test]
    fn shuffle_is_a_permutation_of_the_range() {
        let catalog = Catalog::bundled();
        let mut rng = SmallRng::seed_from_u64(1234);
        let s = TypingSession::from_range(&catalog, DayRange::new(1, 3), &mut rng).unwrap();
        assert_eq!(s.pool_len(), 24);

        let mut spellings: Vec<&str> = s.pool.iter().map(|(_, w)| w.word.as_str()).collect();
        spellings.sort_unstable();
        let mut expected: Vec<String> = catalog
            .words_in_range(1, 3)
            .into_iter()
            .map(|(_, w)| w.word)
            .collect();
        expected.sort_unstable();
        assert_eq!(spellings, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
