//! CLI tool to replay a recorded push-channel transcript.
//!
//! Usage:
//!   dash-replay <transcript.jsonl>
//!   dash-replay <transcript.jsonl> -o <activity.log>
//!
//! The transcript holds one push frame per line. The rendered activity log
//! goes to stdout unless an output file is given; a summary goes to stderr.
//!
//! Exit codes: 0 job completed, 2 job failed or never finished, 1 I/O error.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tasdeed_dashboard::{DashboardConfig, Outcome, ReplaySeed, replay};
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "dash-replay", about = "Replay a push-channel transcript through the dashboard")]
struct Args {
    /// Transcript file, one JSON push frame per line.
    transcript: PathBuf,

    /// Write the activity log here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File name to report as uploaded.
    #[arg(long, default_value = "transcript.xlsx")]
    file_name: String,

    /// Output directory to report; blank shows the default.
    #[arg(long, default_value = "")]
    output_dir: String,

    #[arg(long, default_value = "replay")]
    task_id: String,

    /// Total accounts announced by the upload response.
    #[arg(long)]
    total: Option<u64>,
}

fn write_log(path: Option<&Path>, text: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, format!("{}\n", text))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.is_empty() {
                writeln!(stdout)?;
            }
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let transcript = match fs::read_to_string(&args.transcript) {
        Ok(content) => content,
        Err(e) => {
            error!("error reading transcript '{}': {}", args.transcript.display(), e);
            eprintln!("Error reading transcript '{}': {}", args.transcript.display(), e);
            process::exit(1);
        }
    };

    let seed = ReplaySeed {
        task_id: args.task_id,
        file_name: args.file_name,
        output_dir: args.output_dir,
        total_accounts: args.total,
    };
    let config = DashboardConfig::default();
    let report = replay(&seed, &transcript, &config.default_output_dir);

    if let Err(e) = write_log(args.output.as_deref(), &report.dashboard.log().render()) {
        eprintln!("Error writing activity log: {}", e);
        process::exit(1);
    }

    let stats = report.dashboard.stats();
    let outcome = match report.dashboard.outcome() {
        Some(Outcome::Succeeded) => "completed",
        Some(Outcome::Failed) => "failed",
        None => "unfinished",
    };
    eprintln!(
        "Replayed {} frames ({} skipped, {} after end): {} | Success: {}, Failed: {}, Total: {}",
        report.applied,
        report.skipped.len(),
        report.trailing,
        outcome,
        stats.success,
        stats.failed,
        stats.total
    );

    if report.dashboard.outcome() != Some(Outcome::Succeeded) {
        process::exit(2);
    }
}
