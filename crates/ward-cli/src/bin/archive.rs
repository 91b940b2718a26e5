//! ward-archive: move files into the project quarantine instead of
//! deleting them permanently.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use ward_archive::{ArchiveMover, MoveOutcome, MoveSummary, TargetKind, ARCHIVE_DIR_NAME};
use ward_core::{find_project_root, project_root_override};

#[derive(Parser)]
#[command(
    name = "ward-archive",
    version,
    about = "Move files into .deleted/ preserving their project-relative paths"
)]
struct Cli {
    /// Paths to archive, processed in order.
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                err.exit()
            }
            _ => {
                let _ = err.print();
                std::process::exit(1);
            }
        },
    };

    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let root = find_project_root(&cwd, project_root_override())
        .context("cannot archive without a project root")?;
    let mover = ArchiveMover::new(&root);

    println!("Project root: {}", root.display());
    println!();

    let mut summary = MoveSummary::default();
    for target in &cli.paths {
        match mover.move_target(target, &cwd).await {
            Ok(outcome) => {
                report_outcome(target, &outcome);
                summary.record(&outcome);
            }
            Err(err) => {
                eprintln!("Warning: failed to move {}: {err}", target.display());
                summary.record_failure();
            }
        }
    }

    println!();
    println!(
        "Completed: {} moved, {} skipped",
        summary.moved, summary.skipped
    );
    Ok(())
}

fn report_outcome(target: &Path, outcome: &MoveOutcome) {
    match outcome {
        MoveOutcome::Moved { kind, relative } => {
            let label = match kind {
                TargetKind::Directory => "directory",
                TargetKind::File => "file",
            };
            println!(
                "Moved {label}: {rel} -> {ARCHIVE_DIR_NAME}/{rel}",
                rel = relative.display()
            );
        }
        MoveOutcome::SkippedMissing => {
            eprintln!(
                "Warning: path does not exist, skipping: {}",
                target.display()
            );
        }
        MoveOutcome::SkippedOutsideRoot => {
            eprintln!(
                "Warning: path is outside the project root, skipping: {}",
                target.display()
            );
        }
    }
}
