pub mod config;
pub mod grading;
pub mod input;
pub mod ledger;
pub mod models;
pub mod report;

pub use grading::{letter_for_total, LetterGrade};
pub use ledger::GradeLedger;
pub use models::{CohortSummary, GradeRecord, Weights};
