use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use grade_tracker::config::Settings;
use grade_tracker::models::{Gradebook, ScaleEntry};
use grade_tracker::report::{self, format_percentage};
use grade_tracker::{seed, snapshot, summary};

#[derive(Parser)]
#[command(name = "grade-tracker")]
#[command(about = "Course grades, letter grades, and GPA from a gradebook snapshot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print each course's grade and the overall GPA
    Summary {
        #[arg(long, env = "GRADE_TRACKER_SNAPSHOT", default_value = "gradebook.json")]
        snapshot: PathBuf,
        /// Emit the full summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, env = "GRADE_TRACKER_SNAPSHOT", default_value = "gradebook.json")]
        snapshot: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Import grade items from a CSV file into a snapshot
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, env = "GRADE_TRACKER_SNAPSHOT", default_value = "gradebook.json")]
        snapshot: PathBuf,
        /// Where to write the merged snapshot (defaults to overwriting --snapshot)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the grading scale applied to courses without one
    DefaultScale,
    /// Write a realistic sample snapshot
    Seed {
        #[arg(long, default_value = "gradebook.json")]
        out: PathBuf,
    },
}

fn default_scale(settings: &Settings) -> anyhow::Result<Vec<ScaleEntry>> {
    settings
        .default_scale()
        .context("failed to load the configured default grading scale")
}

fn load_gradebook(path: &std::path::Path, settings: &Settings) -> anyhow::Result<Gradebook> {
    let raw = snapshot::load_snapshot(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    let gradebook = snapshot::validate(&raw, &default_scale(settings)?)
        .with_context(|| format!("invalid snapshot {}", path.display()))?;
    Ok(gradebook)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = Settings::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_filter)
                .with_context(|| format!("invalid log filter `{}`", settings.log_filter))?,
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Summary { snapshot, json } => {
            let gradebook = load_gradebook(&snapshot, &settings)?;
            let summary = summary::evaluate_gradebook(&gradebook);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            if summary.courses.is_empty() {
                println!("No courses found in {}.", snapshot.display());
                return Ok(());
            }

            println!("Course grades:");
            for course in &summary.courses {
                println!(
                    "- {} {} ({} credits): {} {}",
                    course.number,
                    course.name,
                    course.credit_hours,
                    format_percentage(course.final_percentage),
                    course.letter_grade.as_deref().unwrap_or("-")
                );
            }
            println!(
                "Overall GPA {:.2} across {} counted credits",
                summary.gpa, summary.counted_credits
            );
        }
        Commands::Report { snapshot, out } => {
            let gradebook = load_gradebook(&snapshot, &settings)?;
            let summary = summary::evaluate_gradebook(&gradebook);
            let report = report::build_report(&summary, Utc::now());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(courses = summary.courses.len(), "report generated");
            println!("Report written to {}.", out.display());
        }
        Commands::Import {
            csv,
            snapshot: snapshot_path,
            out,
        } => {
            let mut raw = snapshot::load_snapshot(&snapshot_path)
                .with_context(|| format!("failed to load snapshot {}", snapshot_path.display()))?;
            let inserted = snapshot::import_items_csv(&mut raw, &csv)
                .with_context(|| format!("failed to import {}", csv.display()))?;
            snapshot::validate(&raw, &default_scale(&settings)?)
                .context("imported items left the snapshot invalid")?;

            let out = out.unwrap_or(snapshot_path);
            snapshot::write_snapshot(&out, &raw)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Inserted {inserted} grade items from {}.", csv.display());
        }
        Commands::DefaultScale => {
            println!("{}", serde_json::to_string_pretty(&default_scale(&settings)?)?);
        }
        Commands::Seed { out } => {
            snapshot::write_snapshot(&out, &seed::sample_snapshot())
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Sample snapshot written to {}.", out.display());
        }
    }

    Ok(())
}
