//! shelfgen - Generate large reading-library backups for load testing
//!
//! This tool generates a library of books with consistent chapters, reading
//! progress, history and categories, encodes it as a protobuf backup, and
//! writes a raw `.bin` and a gzip `.gz` copy.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use shelfgen_core::generator::NOW_MILLIS_RANGE;
use shelfgen_core::output::{self, DEFAULT_BOOK_COUNT, DEFAULT_COMPRESSION_LEVEL, DEFAULT_FILE_STEM};
use shelfgen_core::{GeneratorConfig, LibraryGenerator, OutputConfig, ReadingStatus, RunReport};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Generate a synthetic reading-library backup
#[derive(Parser, Debug)]
#[command(name = "shelfgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Number of books to generate (invalid or missing values fall back to 10500)
    count: Option<String>,

    /// Output directory for the backup artifacts
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Seed for the random source (random if omitted, and logged)
    #[arg(long, env = "SHELFGEN_SEED")]
    seed: Option<u64>,

    /// Reference time in epoch milliseconds (defaults to now)
    #[arg(long, value_parser = clap::value_parser!(i64).range(NOW_MILLIS_RANGE))]
    now_ms: Option<i64>,

    /// File name prefix of the artifacts
    #[arg(long, default_value = DEFAULT_FILE_STEM)]
    stem: String,

    /// gzip level of the compressed artifact
    #[arg(
        long,
        default_value_t = DEFAULT_COMPRESSION_LEVEL,
        value_parser = clap::value_parser!(u32).range(0..=9)
    )]
    level: u32,

    /// Give every book this reading status instead of drawing one
    #[arg(long, value_enum)]
    status: Option<StatusArg>,

    /// Read both artifacts back and check them after writing
    #[arg(long)]
    verify: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Reading status accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    /// Currently reading
    Reading,
    /// Finished
    Completed,
    /// Paused
    OnHold,
    /// Not started
    PlanToRead,
    /// Abandoned
    Dropped,
}

impl From<StatusArg> for ReadingStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Reading => ReadingStatus::Reading,
            StatusArg::Completed => ReadingStatus::Completed,
            StatusArg::OnHold => ReadingStatus::OnHold,
            StatusArg::PlanToRead => ReadingStatus::PlanToRead,
            StatusArg::Dropped => ReadingStatus::Dropped,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress is logged at INFO, so that is the floor
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    let report = execute(&cli)?;
    print_report(&report);

    Ok(())
}

/// Generate, write and optionally verify the artifacts
fn execute(cli: &Cli) -> Result<RunReport> {
    let book_count = resolve_book_count(cli.count.as_deref());
    let seed = cli.seed.unwrap_or_else(rand::random);
    let now_millis = match cli.now_ms {
        Some(now) => now,
        None => current_millis()?,
    };
    info!("Using seed {} at reference time {}", seed, now_millis);

    let generator_config = GeneratorConfig::new()
        .seed(seed)
        .now_millis(now_millis)
        .pinned_status(cli.status.map(ReadingStatus::from));
    let mut generator = LibraryGenerator::with_config(generator_config);

    let output_config = OutputConfig::new()
        .output_dir(&cli.output)
        .book_count(book_count)
        .compression_level(cli.level)
        .file_stem(&cli.stem);

    let report = output::run(&mut generator, &output_config)
        .with_context(|| format!("Failed to write backup to {}", cli.output.display()))?;

    if cli.verify {
        let summary = output::verify(&report.paths).context("Backup verification failed")?;
        anyhow::ensure!(
            summary.books == book_count && summary.categories == 10,
            "Decoded backup holds {} books and {} categories, expected {} and 10",
            summary.books,
            summary.categories,
            book_count
        );
        info!(
            "Verified {} books, {} chapters, {} history entries",
            summary.books, summary.chapters, summary.histories
        );
    }

    Ok(report)
}

/// Parse the positional book count, falling back to the default with a warning
fn resolve_book_count(arg: Option<&str>) -> usize {
    match arg.map(|raw| (raw, raw.trim().parse::<usize>())) {
        None => {
            warn!("No book count given, using default: {}", DEFAULT_BOOK_COUNT);
            DEFAULT_BOOK_COUNT
        }
        Some((_, Ok(count))) if count > 0 => count,
        Some((raw, _)) => {
            warn!("Invalid book count: {}, using default: {}", raw, DEFAULT_BOOK_COUNT);
            DEFAULT_BOOK_COUNT
        }
    }
}

fn current_millis() -> Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the Unix epoch")?;
    i64::try_from(elapsed.as_millis()).context("System clock is out of range")
}

fn print_report(report: &RunReport) {
    let rule = "=".repeat(50);
    println!();
    println!("{}", rule);
    println!("BACKUP GENERATED SUCCESSFULLY!");
    println!("{}", rule);
    println!("{}", report);
    println!("{}", rule);
    println!();
    println!("Restore the .gz file through the compressed backup path (it is gunzipped first).");
    println!("Restore the .bin file only through a path that reads raw backup bytes.");
}
