//! Reading grade records from record files and CSV rosters.
//!
//! A record file holds one student, one item per line, in this order:
//! name, student id, projects, exercises, labs, readings, participation,
//! midterm, final. Lists are comma-separated on a single line.
//!
//! Only the format is checked here. Scores are never range-checked.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{GradeRecord, Weights};

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("missing {field} (expected on line {line})")]
    MissingLine { field: &'static str, line: usize },
    #[error("line {line}: `{token}` is not a number ({field})")]
    BadNumber {
        field: &'static str,
        line: usize,
        token: String,
    },
    #[error("expected 7 weights, found {0}")]
    WeightCount(usize),
    #[error("`{0}` is not a valid weight")]
    BadWeight(String),
}

impl FromStr for Weights {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|token| {
                let token = token.trim();
                token
                    .parse::<f64>()
                    .map_err(|_| InputError::BadWeight(token.to_string()))
            })
            .collect::<Result<Vec<f64>, InputError>>()?;

        let array: [f64; 7] = values
            .as_slice()
            .try_into()
            .map_err(|_| InputError::WeightCount(values.len()))?;
        Ok(Weights::from(array))
    }
}

fn parse_score(field: &'static str, line: usize, token: &str) -> Result<f64, InputError> {
    let token = token.trim();
    token.parse::<f64>().map_err(|_| InputError::BadNumber {
        field,
        line,
        token: token.to_string(),
    })
}

/// Parses a separated list of scores. An empty or blank string is an
/// empty list.
pub fn parse_scores(
    field: &'static str,
    line: usize,
    text: &str,
    separator: char,
) -> Result<Vec<f64>, InputError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(separator)
        .map(|token| parse_score(field, line, token))
        .collect()
}

struct Lines<'t> {
    inner: std::str::Lines<'t>,
    line: usize,
}

impl<'t> Lines<'t> {
    fn take(&mut self, field: &'static str) -> Result<(usize, &'t str), InputError> {
        self.line += 1;
        self.inner
            .next()
            .map(|text| (self.line, text.trim_end_matches('\r')))
            .ok_or(InputError::MissingLine {
                field,
                line: self.line,
            })
    }

    fn list(&mut self, field: &'static str) -> Result<Vec<f64>, InputError> {
        let (line, text) = self.take(field)?;
        parse_scores(field, line, text, ',')
    }

    fn scalar(&mut self, field: &'static str) -> Result<f64, InputError> {
        let (line, text) = self.take(field)?;
        parse_score(field, line, text)
    }
}

/// Parses the text of a record file into a `GradeRecord` with the given
/// weights.
pub fn parse_record(text: &str, weights: Weights) -> Result<GradeRecord, InputError> {
    let mut lines = Lines {
        inner: text.lines(),
        line: 0,
    };

    let (_, name) = lines.take("name")?;
    let (_, student_id) = lines.take("student id")?;
    let mut record = GradeRecord::new(name.trim(), student_id.trim(), weights);

    for score in lines.list("projects")? {
        record.add_project(score);
    }
    for score in lines.list("exercises")? {
        record.add_exercise(score);
    }
    for score in lines.list("labs")? {
        record.add_lab(score);
    }
    for score in lines.list("readings")? {
        record.add_reading(score);
    }
    record.set_participation(lines.scalar("participation")?);
    record.set_midterm(lines.scalar("midterm")?);
    record.set_final_exam(lines.scalar("final exam")?);

    Ok(record)
}

pub fn read_record(path: &Path, weights: Weights) -> anyhow::Result<GradeRecord> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read record file {}", path.display()))?;
    let record = parse_record(&text, weights)
        .with_context(|| format!("invalid record file {}", path.display()))?;
    debug!(path = %path.display(), student = record.name(), "parsed record file");
    Ok(record)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    student_id: String,
    participation: f64,
    midterm: f64,
    final_exam: f64,
    #[serde(default)]
    readings: String,
    #[serde(default)]
    labs: String,
    #[serde(default)]
    exercises: String,
    #[serde(default)]
    projects: String,
}

impl RosterRow {
    fn into_record(self, line: usize, weights: Weights) -> Result<GradeRecord, InputError> {
        let mut record = GradeRecord::new(self.name, self.student_id, weights);
        record.set_participation(self.participation);
        record.set_midterm(self.midterm);
        record.set_final_exam(self.final_exam);
        for score in parse_scores("readings", line, &self.readings, ';')? {
            record.add_reading(score);
        }
        for score in parse_scores("labs", line, &self.labs, ';')? {
            record.add_lab(score);
        }
        for score in parse_scores("exercises", line, &self.exercises, ';')? {
            record.add_exercise(score);
        }
        for score in parse_scores("projects", line, &self.projects, ';')? {
            record.add_project(score);
        }
        Ok(record)
    }
}

/// Reads a CSV roster. List columns hold `;`-separated scores.
pub fn parse_roster<R: std::io::Read>(
    reader: R,
    weights: Weights,
) -> anyhow::Result<Vec<GradeRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, result) in reader.deserialize::<RosterRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = result.with_context(|| format!("invalid roster row on line {line}"))?;
        records.push(row.into_record(line, weights)?);
    }

    Ok(records)
}

pub fn read_roster(path: &Path, weights: Weights) -> anyhow::Result<Vec<GradeRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open roster {}", path.display()))?;
    let records = parse_roster(file, weights)?;
    info!(path = %path.display(), count = records.len(), "loaded roster");
    Ok(records)
}
