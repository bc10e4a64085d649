use crate::catalog::Catalog;
use crate::store::schema::{DayStatus, ProgressData};

/// Aggregate view for the stats screen: the persisted counters plus the
/// rates and per-day statuses derived from them.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub completed_days: u32,
    pub studied_words: u32,
    pub mastered_words: u32,
    /// `round(mastered / studied * 100)`; 0 when nothing studied.
    pub mastery_rate: u32,
    /// `round(|word_status| / total_words * 100)` — share of the whole
    /// catalog that has ever been graded.
    pub coverage: u32,
    /// One entry per catalog day, in catalog order.
    pub days: Vec<(u32, DayStatus)>,
}

impl Summary {
    pub fn compute(catalog: &Catalog, progress: &ProgressData) -> Self {
        let days: Vec<(u32, DayStatus)> = catalog
            .days
            .iter()
            .map(|d| {
                let status = progress
                    .days_progress
                    .get(&ProgressData::day_key(d.day))
                    .copied()
                    .unwrap_or(DayStatus::NotStarted);
                (d.day, status)
            })
            .collect();

        let mastery_rate = if progress.studied_words > 0 {
            ((progress.mastered_words as f64 / progress.studied_words as f64) * 100.0).round()
                as u32
        } else {
            0
        };

        let total = catalog.total_words();
        let coverage = if total > 0 {
            ((progress.word_status.len() as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            completed_days: progress.completed_days,
            studied_words: progress.studied_words,
            mastered_words: progress.mastered_words,
            mastery_rate,
            coverage,
            days,
        }
    }
}
