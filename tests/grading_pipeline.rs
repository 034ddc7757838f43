use std::env;
use std::fs;

use chrono::NaiveDate;
use gradebook::config::{resolve_weights, DEFAULT_WEIGHTS};
use gradebook::input::{read_record, read_roster};
use gradebook::report::build_report;
use gradebook::{GradeLedger, LetterGrade, Weights};

fn temp_path(name: &str) -> std::path::PathBuf {
    env::temp_dir().join(name)
}

#[test]
fn test_record_file_to_report() {
    let path = temp_path("gradebook_pipeline_jane.txt");
    fs::write(
        &path,
        "Jane Doe\nG01234567\n97, 100, 95\n100, 92.5, 88\n90, 85.5, 100, 98\n96.0, 85.1, 100.0\n100\n89.5\n93.0\n",
    )
    .unwrap();

    let weights = resolve_weights(None, None).unwrap();
    let jane = read_record(&path, weights).expect("Failed to read record");
    fs::remove_file(&path).ok();

    assert!(jane.final_replaces_midterm());
    assert!(jane.final_is_passing());
    let expected = 100.0 * 0.05
        + 100.0 * 0.05
        + 93.375 * 0.15
        + (280.5 / 3.0) * 0.09
        + (292.0 / 3.0) * 0.21
        + 93.0 * 0.2
        + 93.0 * 0.25;
    assert!((jane.total_score() - expected).abs() < 1e-9);
    assert_eq!(jane.letter_grade(), LetterGrade::A);

    let ledger: GradeLedger = std::iter::once(&jane).collect();
    let report = build_report(
        "CS 211",
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        &ledger,
    );
    assert!(report.contains("- Jane Doe | Letter: A |"));
    assert!(report.contains("- A: 1"));
}

#[test]
fn test_roster_statistics() {
    let path = temp_path("gradebook_pipeline_roster.csv");
    fs::write(
        &path,
        "name,student_id,participation,midterm,final_exam,readings,labs,exercises,projects\n\
         Avery Lee,G1,100,80,50,,,,\n\
         Jules Moreno,G2,100,60,70,,,,\n\
         Kiara Patel,G3,100,90,95,,,,\n\
         Rui Santos,G4,100,100,100,,,,\n",
    )
    .unwrap();

    let weights = Weights::from([0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.5]);
    let records = read_roster(&path, weights).expect("Failed to read roster");
    fs::remove_file(&path).ok();

    // totals: 65, 70, 95, 100
    let ledger: GradeLedger = records.iter().collect();
    assert_eq!(ledger.len(), 4);
    assert_eq!(ledger.highest().map(|r| r.name()), Some("Rui Santos"));
    assert_eq!(ledger.lowest().map(|r| r.name()), Some("Avery Lee"));
    assert_eq!(ledger.median().map(|r| r.name()), Some("Kiara Patel"));
    assert!((ledger.average() - 82.5).abs() < 1e-9);

    // a failing final overrides the total
    assert_eq!(records[0].letter_grade(), LetterGrade::F);
    assert_eq!(records[1].letter_grade(), LetterGrade::CMinus);
}

#[test]
fn test_default_weights_sum_to_one() {
    let sum: f64 = DEFAULT_WEIGHTS.iter().sum();
    assert!((sum - 1.0).abs() < 1e-9);
}
