use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use poi2kc3::aggregate::{aggregate_to_file, DuplicatePolicy};
use poi2kc3::normalize::normalize_file;
use poi2kc3::{DEFAULT_AGGREGATED_PATH, DEFAULT_NORMALIZED_PATH, DEFAULT_POI_DIR};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "poi2kc3")]
#[command(version, about = "Merge per-cell POI files and convert them to the kc3kai layout")]
#[command(long_about = "Merge per-cell POI files and convert them to the kc3kai layout\n\n\
    Per-cell files are named <area>_<cell>.json. The aggregated document is\n\
    written as compact JSON, the normalized one indented with tabs.\n\n\
    Merge ./poi into ./poi/final.json:\n  \
    poi2kc3 aggregate\n\n\
    Convert ./poi/final.json into ./kc3kai.json:\n  \
    poi2kc3 normalize\n\n\
    Both steps in sequence:\n  \
    poi2kc3 all")]
struct Cli {
    /// Verbose output for debugging (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge every <area>_<cell>.json file under a directory into one document
    Aggregate {
        /// Directory scanned recursively for per-cell files
        #[arg(short, long, default_value = DEFAULT_POI_DIR)]
        dir: PathBuf,

        /// Aggregated JSON output path
        #[arg(short, long, default_value = DEFAULT_AGGREGATED_PATH)]
        output: PathBuf,

        /// Fail when two files encode the same cell instead of keeping the last one
        #[arg(long)]
        reject_duplicates: bool,
    },

    /// Convert an aggregated document into the kc3kai world layout
    Normalize {
        /// Aggregated JSON input path
        #[arg(short, long, default_value = DEFAULT_AGGREGATED_PATH)]
        input: PathBuf,

        /// Normalized JSON output path
        #[arg(short, long, default_value = DEFAULT_NORMALIZED_PATH)]
        output: PathBuf,
    },

    /// Run aggregate then normalize
    All {
        /// Directory scanned recursively for per-cell files
        #[arg(short, long, default_value = DEFAULT_POI_DIR)]
        dir: PathBuf,

        /// Aggregated JSON path written between the two steps
        #[arg(long, default_value = DEFAULT_AGGREGATED_PATH)]
        intermediate: PathBuf,

        /// Normalized JSON output path
        #[arg(short, long, default_value = DEFAULT_NORMALIZED_PATH)]
        output: PathBuf,

        /// Fail when two files encode the same cell instead of keeping the last one
        #[arg(long)]
        reject_duplicates: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Aggregate {
            dir,
            output,
            reject_duplicates,
        } => run_aggregate(&dir, &output, duplicate_policy(reject_duplicates)),
        Command::Normalize { input, output } => run_normalize(&input, &output),
        Command::All {
            dir,
            intermediate,
            output,
            reject_duplicates,
        } => {
            run_aggregate(&dir, &intermediate, duplicate_policy(reject_duplicates))?;
            run_normalize(&intermediate, &output)
        }
    }
}

/// Initialize tracing, honouring RUST_LOG when it is set
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();

    debug!("Verbosity level: {}", verbose);
}

fn duplicate_policy(reject_duplicates: bool) -> DuplicatePolicy {
    if reject_duplicates {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::Overwrite
    }
}

fn run_aggregate(dir: &Path, output: &Path, policy: DuplicatePolicy) -> Result<()> {
    info!("Aggregating {} into {}", dir.display(), output.display());

    let aggregation = aggregate_to_file(dir, output, policy)
        .with_context(|| format!("Failed to aggregate POI files under: {}", dir.display()))?;

    info!(
        "Merged {} file(s) into {} cell(s), {} overwritten",
        aggregation.files_read,
        aggregation.document.len(),
        aggregation.overwritten.len()
    );
    Ok(())
}

fn run_normalize(input: &Path, output: &Path) -> Result<()> {
    info!("Normalizing {} into {}", input.display(), output.display());

    normalize_file(input, output)
        .with_context(|| format!("Failed to normalize aggregated file: {}", input.display()))?;

    Ok(())
}
