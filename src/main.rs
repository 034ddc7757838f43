use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{ArgGroup, Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gradebook::models::{GradeRecord, Weights};
use gradebook::{config, input, report, GradeLedger};

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(about = "Weighted course grades and cohort statistics", long_about = None)]
struct Cli {
    /// Course weights: participation,readings,labs,exercises,projects,midterm,final
    #[arg(long, global = true)]
    weights: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("source")
        .args(["csv", "file"])
        .required(true)
        .multiple(false)
))]
struct CohortSource {
    /// CSV roster with one student per row
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Record files, one student each
    #[arg(long, num_args = 1..)]
    file: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a single student from a record file (or stdin)
    Student { path: Option<PathBuf> },
    /// Print cohort statistics
    Cohort {
        #[command(flatten)]
        source: CohortSource,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Generate a markdown cohort report
    Report {
        #[command(flatten)]
        source: CohortSource,
        #[arg(long, default_value = "Gradebook")]
        title: String,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn load_cohort(source: &CohortSource, weights: Weights) -> anyhow::Result<Vec<GradeRecord>> {
    if let Some(csv) = &source.csv {
        return input::read_roster(csv, weights);
    }
    source
        .file
        .iter()
        .map(|path| input::read_record(path, weights))
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let env_weights = config::weights_from_env();
    let weights = config::resolve_weights(cli.weights.as_deref(), env_weights.as_deref())?;

    match cli.command {
        Commands::Student { path } => {
            let record = match path {
                Some(path) => input::read_record(&path, weights)?,
                None => {
                    let mut text = String::new();
                    std::io::stdin()
                        .read_to_string(&mut text)
                        .context("failed to read record from stdin")?;
                    input::parse_record(&text, weights).context("invalid record on stdin")?
                }
            };
            print!("{}", report::render_student(&record));
        }
        Commands::Cohort { source, json } => {
            let records = load_cohort(&source, weights)?;
            let ledger: GradeLedger = records.iter().collect();
            let summary = ledger.summary();

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            if ledger.is_empty() {
                println!("No records found.");
                return Ok(());
            }

            println!("Cohort of {} students:", summary.count);
            for (label, entry) in [
                ("Max", &summary.highest),
                ("Median", &summary.median),
                ("Min", &summary.lowest),
            ] {
                if let Some(entry) = entry {
                    println!(
                        "- {label}: {} ({}) total {:.2}, letter {}",
                        entry.name, entry.student_id, entry.total, entry.letter
                    );
                }
            }
            println!("- Avg: {:.2}", summary.average);
        }
        Commands::Report { source, title, out } => {
            let records = load_cohort(&source, weights)?;
            let ledger: GradeLedger = records.iter().collect();
            let report = report::build_report(&title, Utc::now().date_naive(), &ledger);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            info!(path = %out.display(), students = ledger.len(), "report written");
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
