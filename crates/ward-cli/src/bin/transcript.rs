//! ward-transcript: render a line-delimited session log as plain text.

use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use ward_transcript::{parse_line, render_entry, TRANSCRIPT_FOOTER, TRANSCRIPT_HEADER};

#[derive(Parser)]
#[command(
    name = "ward-transcript",
    version,
    about = "Render a session transcript log as text"
)]
struct Cli {
    /// Path to the line-delimited JSON transcript.
    path: PathBuf,
}

#[tokio::main]
async fn main() {
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

    if !cli.path.exists() {
        eprintln!("File not found: {}", cli.path.display());
        std::process::exit(1);
    }

    let file = match tokio::fs::File::open(&cli.path).await {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Error: cannot open {}: {err}", cli.path.display());
            std::process::exit(1);
        }
    };

    println!("{TRANSCRIPT_HEADER}");

    // One record in memory at a time; a bad line never aborts the pass.
    let mut lines = BufReader::new(file).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_line(&line) {
                    Ok(entry) => {
                        for rendered in render_entry(&entry) {
                            println!("{rendered}");
                        }
                    }
                    Err(err) => tracing::warn!("skipping unparsable transcript line: {err}"),
                }
            }
            Ok(None) => break,
            Err(err) => {
                eprintln!("Error: failed reading {}: {err}", cli.path.display());
                std::process::exit(1);
            }
        }
    }

    println!();
    println!("{TRANSCRIPT_FOOTER}");
}
