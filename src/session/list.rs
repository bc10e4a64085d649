use crate::catalog::{Catalog, Word, WordKey};
use crate::engine::progress::{ProgressEngine, StatusChange};
use crate::store::schema::{ProgressData, WordStatus};

/// Filter applied to the browse view. An empty query matches everything;
/// a non-empty query matches case-insensitively against spelling and
/// meaning. `day` narrows to one day, None shows the whole catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub day: Option<u32>,
    pub query: String,
}

#[derive(Clone, Debug)]
pub struct ListRow {
    pub day: u32,
    pub word: Word,
    pub status: Option<WordStatus>,
}

/// Browse-and-grade view over the catalog. Rows are a filtered snapshot;
/// grading routes through the engine so the three-way toggle semantics
/// and counters stay consistent with the other modes.
pub struct ListSession {
    pub filter: ListFilter,
    pub selected: usize,
}

impl ListSession {
    pub fn new() -> Self {
        Self {
            filter: ListFilter::default(),
            selected: 0,
        }
    }

    /// Materialize the rows for the current filter, in catalog order.
    pub fn rows(&self, catalog: &Catalog, progress: &ProgressData) -> Vec<ListRow> {
        let query = self.filter.query.trim();
        catalog
            .days
            .iter()
            .filter(|d| self.filter.day.is_none_or(|day| d.day == day))
            .flat_map(|d| d.words.iter().map(move |w| (d.day, w)))
            .filter(|(_, w)| query.is_empty() || Catalog::word_matches(w, query))
            .map(|(day, word)| ListRow {
                day,
                word: word.clone(),
                status: progress
                    .word_status
                    .get(&WordKey::new(day, word.id).storage_key())
                    .copied(),
            })
            .collect()
    }

    /// Apply one of the three-way grade buttons to a row. Pressing the
    /// button for the row's current status clears it.
    pub fn grade(
        &self,
        engine: &ProgressEngine,
        progress: &mut ProgressData,
        row: &ListRow,
        status: WordStatus,
    ) -> StatusChange {
        engine.set_status(progress, WordKey::new(row.day, row.word.id), status)
    }

    pub fn set_query(&mut self, query: String) {
        self.filter.query = query;
        self.selected = 0;
    }

    /// Cycle the day filter: all days -> day 1 -> ... -> last day -> all.
    pub fn cycle_day_filter(&mut self, catalog: &Catalog) {
        self.filter.day = match self.filter.day {
            None => catalog.days.first().map(|d| d.day),
            Some(day) => catalog
                .days
                .iter()
                .map(|d| d.day)
                .find(|d| *d > day),
        };
        self.selected = 0;
    }

    /// Keep the cursor inside the row count after a filter change.
    pub fn clamp_selection(&mut self, row_count: usize) {
        if row_count == 0 {
            self.selected = 0;
        } else if self.selected >= row_count {
            self.selected = row_count - 1;
        }
    }
}

impl Default for ListSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_rows_cover_the_catalog() {
        let catalog = Catalog::bundled();
        let progress = ProgressData::default();
        let session = ListSession::new();

        let rows = session.rows(&catalog, &progress);
        assert_eq!(rows.len(), catalog.total_words() as usize);
        assert!(rows.iter().all(|r| r.status.is_none()));
    }

    #[test]
    fn day_filter_narrows_to_one_day() {
        let catalog = Catalog::bundled();
        let progress = ProgressData::default();
        let mut session = ListSession::new();
        session.filter.day = Some(2);

        let rows = session.rows(&catalog, &progress);
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|r| r.day == 2));
    }

    #[test]
    fn query_matches_spelling_and_meaning_case_insensitively() {
        let catalog = Catalog::bundled();
        let progress = ProgressData::default();
        let mut session = ListSession::new();

        session.set_query("ABANDON".to_string());
        let rows = session.rows(&catalog, &progress);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].word.word, "abandon");

        // Substring of a meaning, not of any spelling
        session.set_query("포기".to_string());
        let rows = session.rows(&catalog, &progress);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.word.meaning.contains("포기")));
    }

    #[test]
    fn query_and_day_filters_compose() {
        let catalog = Catalog::bundled();
        let progress = ProgressData::default();
        let mut session = ListSession::new();
        session.filter.day = Some(1);
        session.set_query("a".to_string());
        session.filter.day = Some(1);

        let rows = session.rows(&catalog, &progress);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.day == 1));
    }

    #[test]
    fn rows_carry_the_current_status() {
        let catalog = Catalog::bundled();
        let engine = ProgressEngine::new(&catalog);
        let mut progress = ProgressData::default();
        let session = ListSession::new();

        let rows = session.rows(&catalog, &progress);
        session.grade(&engine, &mut progress, &rows[0], WordStatus::Mastered);

        let rows = session.rows(&catalog, &progress);
        assert_eq!(rows[0].status, Some(WordStatus::Mastered));
        assert_eq!(progress.mastered_words, 1);
    }

    #[test]
    fn grading_same_status_toggles_it_off() {
        let catalog = Catalog::bundled();
        let engine = ProgressEngine::new(&catalog);
        let mut progress = ProgressData::default();
        let session = ListSession::new();

        let rows = session.rows(&catalog, &progress);
        session.grade(&engine, &mut progress, &rows[0], WordStatus::Correct);
        let change = session.grade(&engine, &mut progress, &rows[0], WordStatus::Correct);
        assert_eq!(change, StatusChange::Cleared);

        let rows = session.rows(&catalog, &progress);
        assert_eq!(rows[0].status, None);
    }

    #[test]
    fn day_filter_cycles_through_days_and_back_to_all() {
        let catalog = Catalog::bundled();
        let mut session = ListSession::new();

        assert_eq!(session.filter.day, None);
        session.cycle_day_filter(&catalog);
        assert_eq!(session.filter.day, Some(1));
        session.cycle_day_filter(&catalog);
        assert_eq!(session.filter.day, Some(2));
        session.cycle_day_filter(&catalog);
        assert_eq!(session.filter.day, Some(3));
        session.cycle_day_filter(&catalog);
        assert_eq!(session.filter.day, None);
    }

    #[test]
    fn selection_clamps_to_row_count() {
        let mut session = ListSession::new();
        session.selected = 20;
        session.clamp_selection(8);
        assert_eq!(session.selected, 7);
        session.clamp_selection(0);
        assert_eq!(session.selected, 0);
    }
}
