pub mod daily;
pub mod list;
pub mod matching;
pub mod typing;

/// Advisory conditions surfaced to the user without mutating any state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionNotice {
    /// A day range (or the whole catalog slice) produced zero words.
    EmptyRange { start: u32, end: u32 },
    /// The daily mode landed on a day with no catalog words.
    EmptyDay(u32),
    /// A range was given with start > end.
    UnorderedRange { start: u32, end: u32 },
}

impl SessionNotice {
    pub fn message(&self) -> String {
        match self {
            SessionNotice::EmptyRange { start, end } => {
                format!("No words in days {start}-{end}")
            }
            SessionNotice::EmptyDay(day) => format!("Day {day} has no words"),
            SessionNotice::UnorderedRange { start, end } => {
                format!("Invalid range: {start}-{end}")
            }
        }
    }
}
