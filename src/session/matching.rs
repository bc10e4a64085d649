use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::catalog::Catalog;
use crate::store::schema::DayRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace {
    Word,
    Meaning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    Idle,
    Selected,
    Matched,
}

#[derive(Clone, Debug)]
pub struct Card {
    pub word_id: u32,
    pub face: CardFace,
    pub content: String,
    pub state: CardState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

/// Position of a card on the board.
pub type CardPos = (Column, usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Card already matched or already selected.
    Ignored,
    /// First card of a pair is now selected.
    Selected,
    /// Second selection completed a pair.
    Matched { complete: bool },
    /// Second selection did not pair; both cards stay highlighted until
    /// the caller's flash timer unselects them.
    Mismatch { first: CardPos, second: CardPos },
}

/// Pair-matching board: spellings on the left, meanings on the right,
/// each column independently shuffled. A pair matches iff the faces
/// differ and the word ids are equal.
pub struct MatchingSession {
    pub left: Vec<Card>,
    pub right: Vec<Card>,
    selected: Vec<CardPos>,
    pub score: u32,
    pub matched_pairs: usize,
    pool_size: usize,
}

impl MatchingSession {
    /// Build a board from the day range: shuffle the range's words, keep
    /// at most `board_size`, then shuffle each column independently.
    /// Returns None for an empty range (advisory, no state change).
    pub fn from_range(
        catalog: &Catalog,
        range: DayRange,
        board_size: usize,
        rng: &mut SmallRng,
    ) -> Option<Self> {
        let mut pool = catalog.words_in_range(range.start, range.end);
        if pool.is_empty() {
            return None;
        }
        pool.shuffle(rng);
        pool.truncate(board_size);

        let mut left: Vec<Card> = pool
            .iter()
            .map(|(_, w)| Card {
                word_id: w.id,
                face: CardFace::Word,
                content: w.word.clone(),
                state: CardState::Idle,
            })
            .collect();
        let mut right: Vec<Card> = pool
            .iter()
            .map(|(_, w)| Card {
                word_id: w.id,
                face: CardFace::Meaning,
                content: w.meaning.clone(),
                state: CardState::Idle,
            })
            .collect();
        left.shuffle(rng);
        right.shuffle(rng);

        Some(Self {
            left,
            right,
            selected: Vec::new(),
            score: 0,
            matched_pairs: 0,
            pool_size: pool.len(),
        })
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.pool_size
    }

    fn card(&self, pos: CardPos) -> &Card {
        match pos.0 {
            Column::Left => &self.left[pos.1],
            Column::Right => &self.right[pos.1],
        }
    }

    fn card_mut(&mut self, pos: CardPos) -> &mut Card {
        match pos.0 {
            Column::Left => &mut self.left[pos.1],
            Column::Right => &mut self.right[pos.1],
        }
    }

    pub fn select(&mut self, pos: CardPos) -> SelectOutcome {
        if self.card(pos).state != CardState::Idle {
            return SelectOutcome::Ignored;
        }

        self.card_mut(pos).state = CardState::Selected;
        self.selected.push(pos);
        if self.selected.len() < 2 {
            return SelectOutcome::Selected;
        }

        // The buffer always empties after a pair resolves
        let (Some(second), Some(first)) = (self.selected.pop(), self.selected.pop()) else {
            return SelectOutcome::Ignored;
        };

        let a = self.card(first);
        let b = self.card(second);
        if a.face != b.face && a.word_id == b.word_id {
            self.card_mut(first).state = CardState::Matched;
            self.card_mut(second).state = CardState::Matched;
            self.score += 10;
            self.matched_pairs += 1;
            SelectOutcome::Matched {
                complete: self.is_complete(),
            }
        } else {
            SelectOutcome::Mismatch { first, second }
        }
    }

    /// Clear a mismatch highlight once the flash delay elapses. Reads the
    /// live state: a card that was matched or cleared in the meantime is
    /// left alone.
    pub fn unselect(&mut self, pos: CardPos) {
        let card = self.card_mut(pos);
        if card.state == CardState::Selected {
            card.state = CardState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn board(start: u32, end: u32, size: usize) -> MatchingSession {
        let catalog = Catalog::bundled();
        let mut rng = SmallRng::seed_from_u64(99);
        MatchingSession::from_range(&catalog, DayRange::new(start, end), size, &mut rng).unwrap()
    }

    fn find_pair(session: &MatchingSession, word_id: u32) -> (CardPos, CardPos) {
        let left = session
            .left
            .iter()
            .position(|c| c.word_id == word_id)
            .map(|i| (Column::Left, i))
            .unwrap();
        let right = session
            .right
            .iter()
            .position(|c| c.word_id == word_id)
            .map(|i| (Column::Right, i))
            .unwrap();
        (left, right)
    }

    #[test]
    fn board_truncates_to_size_limit() {
        let session = board(1, 3, 10);
        assert_eq!(session.pool_size(), 10);
        assert_eq!(session.left.len(), 10);
        assert_eq!(session.right.len(), 10);
    }

    #[test]
    fn small_range_keeps_every_word() {
        let session = board(1, 1, 10);
        assert_eq!(session.pool_size(), 8);
    }

    #[test]
    fn empty_range_yields_no_session() {
        let catalog = Catalog::bundled();
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(MatchingSession::from_range(&catalog, DayRange::new(50, 60), 10, &mut rng).is_none());
    }

    #[test]
    fn columns_carry_one_face_each() {
        let session = board(1, 2, 10);
        assert!(session.left.iter().all(|c| c.face == CardFace::Word));
        assert!(session.right.iter().all(|c| c.face == CardFace::Meaning));
    }

    #[test]
    fn matching_pair_scores_and_locks() {
        // Single-day board: ids are unique within a day
        let mut session = board(1, 1, 10);
        let (left, right) = find_pair(&session, 3);

        assert_eq!(session.select(left), SelectOutcome::Selected);
        assert_eq!(session.select(right), SelectOutcome::Matched { complete: false });
        assert_eq!(session.score, 10);
        assert_eq!(session.matched_pairs, 1);
        assert_eq!(session.card(left).state, CardState::Matched);
        assert_eq!(session.card(right).state, CardState::Matched);

        // Matched cards are immune to further selection
        assert_eq!(session.select(left), SelectOutcome::Ignored);
    }

    #[test]
    fn same_face_never_matches_even_with_equal_ids() {
        // Days 1 and 2 both carry word id 1, so the left column holds two
        // cards with the same id
        let mut session = board(1, 2, 16);
        let positions: Vec<usize> = session
            .left
            .iter()
            .enumerate()
            .filter(|(_, c)| c.word_id == 1)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions.len(), 2);

        assert_eq!(session.select((Column::Left, positions[0])), SelectOutcome::Selected);
        let outcome = session.select((Column::Left, positions[1]));
        assert!(matches!(outcome, SelectOutcome::Mismatch { .. }));
        assert_eq!(session.matched_pairs, 0);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn reselecting_a_selected_card_is_ignored() {
        let mut session = board(1, 1, 10);
        assert_eq!(session.select((Column::Left, 0)), SelectOutcome::Selected);
        assert_eq!(session.select((Column::Left, 0)), SelectOutcome::Ignored);
        // Still only one selection pending
        assert_eq!(session.selected.len(), 1);
    }

    #[test]
    fn mismatch_keeps_highlight_until_unselect() {
        let mut session = board(1, 1, 10);
        let (left_a, right_a) = find_pair(&session, 1);
        let (_, right_b) = find_pair(&session, 2);

        assert_eq!(session.select(left_a), SelectOutcome::Selected);
        let outcome = session.select(right_b);
        assert_eq!(
            outcome,
            SelectOutcome::Mismatch {
                first: left_a,
                second: right_b
            }
        );

        // Buffer cleared; cards stay highlighted for the flash window
        assert!(session.selected.is_empty());
        assert_eq!(session.card(left_a).state, CardState::Selected);
        assert_eq!(session.card(right_b).state, CardState::Selected);

        session.unselect(left_a);
        session.unselect(right_b);
        assert_eq!(session.card(left_a).state, CardState::Idle);
        assert_eq!(session.card(right_b).state, CardState::Idle);

        // A proper match still works afterwards
        assert_eq!(session.select(left_a), SelectOutcome::Selected);
        assert_eq!(session.select(right_a), SelectOutcome::Matched { complete: false });
    }

    #[test]
    fn unselect_leaves_matched_cards_alone() {
        let mut session = board(1, 1, 10);
        let (left, right) = find_pair(&session, 5);
        session.select(left);
        session.select(right);

        // A stale flash timer firing on a matched card changes nothing
        session.unselect(left);
        assert_eq!(session.card(left).state, CardState::Matched);
    }

    #[test]
    fn matching_every_pair_completes_the_game() {
        let mut session = board(1, 1, 10);
        let ids: Vec<u32> = session.left.iter().map(|c| c.word_id).collect();

        for (i, id) in ids.iter().enumerate() {
            let (left, right) = find_pair(&session, *id);
            session.select(left);
            let outcome = session.select(right);
            let expect_complete = i + 1 == ids.len();
            assert_eq!(
                outcome,
                SelectOutcome::Matched {
                    complete: expect_complete
                }
            );
        }
        assert!(session.is_complete());
        assert_eq!(session.score, 10 * session.pool_size() as u32);
    }
}
