use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::grading::LetterGrade;
use crate::models::{CohortSummary, GradeRecord, LetterCount, RecordSummary};

/// A cohort of borrowed grade records. Statistics are computed on demand
/// from each record's current total.
#[derive(Debug, Default)]
pub struct GradeLedger<'a> {
    records: Vec<&'a GradeRecord>,
}

impl<'a> GradeLedger<'a> {
    pub fn new() -> Self {
        GradeLedger {
            records: Vec::new(),
        }
    }

    pub fn insert(&mut self, record: &'a GradeRecord) {
        debug!(student = record.name(), "inserting record into ledger");
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &'a GradeRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn highest(&self) -> Option<&'a GradeRecord> {
        self.first_by(Ordering::Greater)
    }

    pub fn lowest(&self) -> Option<&'a GradeRecord> {
        self.first_by(Ordering::Less)
    }

    /// The record at index `n / 2` after a stable ascending sort by total,
    /// i.e. the upper-middle record for an even cohort.
    pub fn median(&self) -> Option<&'a GradeRecord> {
        if self.records.is_empty() {
            return None;
        }
        let mut sorted = self.snapshot();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        sorted.get(sorted.len() / 2).map(|(_, record)| *record)
    }

    /// Mean of all totals; 0.0 for an empty cohort.
    pub fn average(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.records.iter().map(|r| r.total_score()).sum();
        sum / self.records.len() as f64
    }

    pub fn summary(&self) -> CohortSummary {
        let mut counts: HashMap<LetterGrade, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.letter_grade()).or_insert(0) += 1;
        }

        let distribution = LetterGrade::ALL
            .iter()
            .filter_map(|letter| {
                counts.get(letter).map(|count| LetterCount {
                    letter: letter.to_string(),
                    count: *count,
                })
            })
            .collect();

        CohortSummary {
            count: self.records.len(),
            highest: self.highest().map(summarize),
            median: self.median().map(summarize),
            lowest: self.lowest().map(summarize),
            average: self.average(),
            distribution,
        }
    }

    fn snapshot(&self) -> Vec<(f64, &'a GradeRecord)> {
        self.records
            .iter()
            .map(|record| (record.total_score(), *record))
            .collect()
    }

    // Linear scan; a candidate only wins when it compares strictly
    // `wanted` against the current pick, so ties keep the first seen.
    fn first_by(&self, wanted: Ordering) -> Option<&'a GradeRecord> {
        let mut best: Option<(f64, &'a GradeRecord)> = None;
        for (total, record) in self.snapshot() {
            match best {
                Some((best_total, _)) if total.total_cmp(&best_total) != wanted => {}
                _ => best = Some((total, record)),
            }
        }
        best.map(|(_, record)| record)
    }
}

impl<'a> FromIterator<&'a GradeRecord> for GradeLedger<'a> {
    fn from_iter<I: IntoIterator<Item = &'a GradeRecord>>(iter: I) -> Self {
        let mut ledger = GradeLedger::new();
        for record in iter {
            ledger.insert(record);
        }
        ledger
    }
}

fn summarize(record: &GradeRecord) -> RecordSummary {
    RecordSummary {
        name: record.name().to_string(),
        student_id: record.student_id().to_string(),
        total: record.total_score(),
        letter: record.letter_grade().to_string(),
    }
}
