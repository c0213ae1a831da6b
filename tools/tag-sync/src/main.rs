use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tag_sync::git::GitRepo;
use tag_sync::version::DEFAULT_PATTERN;
use tag_sync::{sync_tag, SyncOptions, SyncOutcome};
use tracing_subscriber::EnvFilter;

/// Create the git tag matching the version recorded in a metadata file.
///
/// The tag name is `v` plus the captured version string. If the tag
/// already exists the run is a no-op; anything else that goes wrong
/// (missing file, unmatched pattern, git failures) aborts with a
/// non-zero exit.
#[derive(Parser, Debug)]
#[command(name = "tag-sync", author, version, about, long_about = None)]
struct Args {
    /// File carrying the version line
    #[arg(short, long)]
    file: PathBuf,

    /// Regex with one capture group that extracts the version
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Repository to tag
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    /// Tag this revision instead of HEAD
    #[arg(long)]
    commit: Option<String>,

    /// Report without creating anything
    #[arg(long)]
    dry_run: bool,

    /// Push a newly created tag to origin
    #[arg(long)]
    push: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    match run(&args) {
        Ok(outcome) => {
            match outcome {
                SyncOutcome::Created { tag, commit } => {
                    println!("Created tag {tag} at {commit}");
                }
                SyncOutcome::AlreadyExists { tag } => {
                    println!("Tag {tag} already exists; nothing to do");
                }
                SyncOutcome::WouldCreate { tag, commit } => {
                    println!("Would create tag {tag} at {commit}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("tag-sync: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<SyncOutcome> {
    let repo = GitRepo::open(&args.repo)?;
    let options = SyncOptions {
        dry_run: args.dry_run,
        push: args.push,
        commit: args.commit.clone(),
    };
    Ok(sync_tag(&repo, &args.file, &args.pattern, &options)?)
}
