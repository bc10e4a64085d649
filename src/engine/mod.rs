pub mod progress;
pub mod stats;
