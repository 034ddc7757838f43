use std::fmt;

use serde::Serialize;

use crate::models::GradeRecord;

/// Readings below this count fall back to full credit.
pub const READINGS_REQUIRED: usize = 16;
/// Number of lowest reading scores dropped once enough exist.
pub const READINGS_DROPPED: usize = 15;
pub const AMNESTY_SCORE: f64 = 100.0;
pub const PASSING_FINAL: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LetterGrade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    D,
    F,
    NotWithinRange,
}

impl LetterGrade {
    /// Best to worst, sentinel last.
    pub const ALL: [LetterGrade; 12] = [
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::D,
        LetterGrade::F,
        LetterGrade::NotWithinRange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
            LetterGrade::NotWithinRange => "Not Within Range",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a weighted total through the grade bins. Upper edges are
/// exclusive except `[98, 100]`; anything above 100 (or NaN) is the
/// `NotWithinRange` sentinel.
pub fn letter_for_total(total: f64) -> LetterGrade {
    match total {
        t if t < 60.0 => LetterGrade::F,
        t if t < 70.0 => LetterGrade::D,
        t if t < 72.0 => LetterGrade::CMinus,
        t if t < 78.0 => LetterGrade::C,
        t if t < 80.0 => LetterGrade::CPlus,
        t if t < 82.0 => LetterGrade::BMinus,
        t if t < 88.0 => LetterGrade::B,
        t if t < 90.0 => LetterGrade::BPlus,
        t if t < 92.0 => LetterGrade::AMinus,
        t if t < 98.0 => LetterGrade::A,
        t if t <= 100.0 => LetterGrade::APlus,
        _ => LetterGrade::NotWithinRange,
    }
}

fn mean_or_amnesty(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return AMNESTY_SCORE;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

impl GradeRecord {
    /// Average of readings after dropping the lowest 15; full credit
    /// until at least 16 readings exist.
    pub fn unweighted_readings_score(&self) -> f64 {
        let readings = self.readings();
        if readings.len() < READINGS_REQUIRED {
            return AMNESTY_SCORE;
        }
        let mut sorted = readings.to_vec();
        sorted.sort_by(f64::total_cmp);
        let kept = &sorted[READINGS_DROPPED..];
        kept.iter().sum::<f64>() / kept.len() as f64
    }

    pub fn unweighted_labs_score(&self) -> f64 {
        mean_or_amnesty(self.labs())
    }

    pub fn unweighted_exercises_score(&self) -> f64 {
        mean_or_amnesty(self.exercises())
    }

    pub fn unweighted_projects_score(&self) -> f64 {
        mean_or_amnesty(self.projects())
    }

    /// True when the final strictly beats the midterm.
    pub fn final_replaces_midterm(&self) -> bool {
        self.final_exam() > self.midterm()
    }

    pub fn final_is_passing(&self) -> bool {
        self.final_exam() >= PASSING_FINAL
    }

    /// Weighted total over every category. When the final replaces the
    /// midterm, the final score fills both exam slots. Not clamped.
    pub fn total_score(&self) -> f64 {
        let w = self.weights();
        let exam_for_midterm_slot = if self.final_replaces_midterm() {
            self.final_exam()
        } else {
            self.midterm()
        };

        self.participation() * w.participation
            + self.unweighted_readings_score() * w.readings
            + self.unweighted_labs_score() * w.labs
            + self.unweighted_exercises_score() * w.exercises
            + self.unweighted_projects_score() * w.projects
            + self.final_exam() * w.final_exam
            + exam_for_midterm_slot * w.midterm
    }

    /// A failed final is an F whatever the total.
    pub fn letter_grade(&self) -> LetterGrade {
        if !self.final_is_passing() {
            return LetterGrade::F;
        }
        letter_for_total(self.total_score())
    }
}
