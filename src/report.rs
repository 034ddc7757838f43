use std::fmt::Write;

use chrono::NaiveDate;

use crate::ledger::GradeLedger;
use crate::models::{GradeRecord, RecordSummary};

fn format_scores(scores: &[f64]) -> String {
    if scores.is_empty() {
        return "none".to_string();
    }
    scores
        .iter()
        .map(|score| score.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe(entry: Option<&RecordSummary>) -> String {
    match entry {
        Some(entry) => format!(
            "{} (Letter: {}, Total: {:.2})",
            entry.name, entry.letter, entry.total
        ),
        None => "—".to_string(),
    }
}

pub fn render_student(record: &GradeRecord) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "## {} ({})", record.name(), record.student_id());
    let _ = writeln!(output);
    let _ = writeln!(output, "### Raw Scores");
    let _ = writeln!(output, "- Participation: {:.2}", record.participation());
    let _ = writeln!(
        output,
        "- Readings: {:.2} [{}]",
        record.unweighted_readings_score(),
        format_scores(record.readings())
    );
    let _ = writeln!(
        output,
        "- Labs: {:.2} [{}]",
        record.unweighted_labs_score(),
        format_scores(record.labs())
    );
    let _ = writeln!(
        output,
        "- Exercises: {:.2} [{}]",
        record.unweighted_exercises_score(),
        format_scores(record.exercises())
    );
    let _ = writeln!(
        output,
        "- Projects: {:.2} [{}]",
        record.unweighted_projects_score(),
        format_scores(record.projects())
    );
    let _ = writeln!(output, "- Midterm: {:.2}", record.midterm());
    let _ = writeln!(output, "- Final Exam: {:.2}", record.final_exam());

    let _ = writeln!(output);
    let _ = writeln!(output, "### Summary");
    if record.final_replaces_midterm() {
        let _ = writeln!(output, "- Final exam replaces the midterm");
    }
    if !record.final_is_passing() {
        let _ = writeln!(output, "- Final exam below passing");
    }
    let _ = writeln!(
        output,
        "- Total: {:.2}  Letter: {}",
        record.total_score(),
        record.letter_grade()
    );

    output
}

pub fn build_report(title: &str, generated_on: NaiveDate, ledger: &GradeLedger) -> String {
    let summary = ledger.summary();
    let mut output = String::new();

    let _ = writeln!(output, "# {}", title);
    let _ = writeln!(
        output,
        "Generated on {} for {} students",
        generated_on, summary.count
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Students");

    if ledger.is_empty() {
        let _ = writeln!(output, "No records yet.");
    } else {
        for record in ledger.iter() {
            let _ = writeln!(
                output,
                "- {} | Letter: {} | Total: {:.2}",
                record.name(),
                record.letter_grade(),
                record.total_score()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Stats");
    let _ = writeln!(output, "- Max: {}", describe(summary.highest.as_ref()));
    let _ = writeln!(output, "- Median: {}", describe(summary.median.as_ref()));
    let average = if ledger.is_empty() {
        "—".to_string()
    } else {
        format!("{:.2}", summary.average)
    };
    let _ = writeln!(output, "- Avg: {}", average);
    let _ = writeln!(output, "- Min: {}", describe(summary.lowest.as_ref()));

    if !summary.distribution.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Letter Distribution");
        for entry in summary.distribution.iter() {
            let _ = writeln!(output, "- {}: {}", entry.letter, entry.count);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weights;

    fn sample(name: &str, participation: f64, final_exam: f64) -> GradeRecord {
        let mut record = GradeRecord::new(
            name,
            "G0001",
            Weights::from([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        );
        record.set_participation(participation);
        record.set_final_exam(final_exam);
        record
    }

    fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
    }

    #[test]
    fn empty_cohort_report() {
        let ledger = GradeLedger::new();
        let report = build_report("Gradebook", report_date(), &ledger);

        assert!(report.starts_with("# Gradebook\nGenerated on 2026-02-02 for 0 students"));
        assert!(report.contains("No records yet."));
        assert!(report.contains("- Max: —"));
        assert!(report.contains("- Avg: —"));
        assert!(!report.contains("## Letter Distribution"));
    }

    #[test]
    fn cohort_report_lists_students_and_stats() {
        let records = vec![
            sample("Avery Lee", 91.0, 80.0),
            sample("Jules Moreno", 65.0, 70.0),
            sample("Kiara Patel", 99.0, 40.0),
        ];
        let ledger: GradeLedger = records.iter().collect();
        let report = build_report("CS 211", report_date(), &ledger);

        assert!(report.contains("- Avery Lee | Letter: A- | Total: 91.00"));
        assert!(report.contains("- Kiara Patel | Letter: F | Total: 99.00"));
        assert!(report.contains("- Max: Kiara Patel (Letter: F, Total: 99.00)"));
        assert!(report.contains("- Median: Avery Lee (Letter: A-, Total: 91.00)"));
        assert!(report.contains("- Avg: 85.00"));
        assert!(report.contains("- Min: Jules Moreno (Letter: D, Total: 65.00)"));
        assert!(report.contains("- F: 1"));
    }

    #[test]
    fn student_report_shows_categories() {
        let mut record = sample("Avery Lee", 100.0, 93.0);
        record.set_midterm(89.5);
        record.add_lab(90.0);
        record.add_lab(85.5);

        let report = render_student(&record);
        assert!(report.starts_with("## Avery Lee (G0001)"));
        assert!(report.contains("- Labs: 87.75 [90, 85.5]"));
        assert!(report.contains("- Readings: 100.00 [none]"));
        assert!(report.contains("- Final exam replaces the midterm"));
        assert!(report.contains("- Total: 100.00  Letter: A+"));
    }
}
