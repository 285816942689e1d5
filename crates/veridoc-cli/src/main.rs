use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use veridoc_core::Snapshot;
use veridoc_ledger::detect;
use veridoc_validate::validate;

mod display;

#[derive(Parser)]
#[command(name = "veridoc", version, about = "Integrity tooling for AI-extracted document snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a snapshot and print the issue list.
    Validate {
        /// Snapshot JSON file.
        file: PathBuf,
    },
    /// Compare two snapshots and report any regression.
    Diff {
        /// Baseline snapshot JSON file.
        baseline: PathBuf,
        /// Candidate snapshot JSON file.
        candidate: PathBuf,
    },
    /// Validate and, if nothing blocks, write the snapshot as pretty JSON.
    Export {
        /// Snapshot JSON file.
        file: PathBuf,
        /// Output path; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let raw = fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&raw)?;
    Ok(snapshot)
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { file } => {
            let snapshot = load_snapshot(&file)?;
            let result = validate(&snapshot);
            display::print_validation(&result);
            if result.has_blockers() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Diff {
            baseline,
            candidate,
        } => {
            let baseline = load_snapshot(&baseline)?;
            let candidate = load_snapshot(&candidate)?;
            let report = detect(&baseline, &candidate);
            display::print_regression(&report);
            if report.is_regression() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Export { file, out } => {
            let snapshot = load_snapshot(&file)?;
            let result = validate(&snapshot);
            if result.has_blockers() {
                // Hard contract: blockers refuse export, they do not warn.
                eprintln!("export refused: snapshot contains Very Low Confidence fields");
                for issue in result.blockers() {
                    eprintln!("  - {}", issue.message);
                }
                return Ok(ExitCode::FAILURE);
            }
            let json = serde_json::to_string_pretty(&snapshot)?;
            match out {
                Some(path) => {
                    fs::write(&path, json)?;
                    tracing::info!(path = %path.display(), "snapshot exported");
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
