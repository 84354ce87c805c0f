//! sortsuite: sort a numeric or CSV dataset with bubble, insertion or merge sort.
//!
//! The sort runs on a worker thread. Progress values travel back over a
//! channel and the bar is drawn here on the main thread.

use clap::{Args, Parser, Subcommand};
use sortsuite::dataset::{self, Table};
use sortsuite::prelude::*;
use std::error::Error;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const BAR_WIDTH: usize = 40;
const RULE_WIDTH: usize = 50;

#[derive(Parser)]
#[command(name = "sortsuite", about = "Sort a dataset with bubble, insertion or merge sort", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort a text file of numbers (comma or whitespace separated, blank lines ignored)
    Numbers {
        /// Dataset file
        path: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Sort the rows of a CSV file with a header row by one column
    Table {
        /// CSV file
        path: PathBuf,
        /// Column to sort by
        #[arg(long, short)]
        column: String,
        /// Load only the first N rows
        #[arg(long)]
        limit: Option<usize>,
        /// Compare text cells case-insensitively
        #[arg(long)]
        ignore_case: bool,
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Sorting algorithm: bubble, insertion or merge
    #[arg(long, short, default_value = "merge")]
    algorithm: Algorithm,
    /// Sort in descending order
    #[arg(long, short)]
    descending: bool,
    /// Write every sorted record to this file, one per line
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Do not draw the progress bar
    #[arg(long)]
    no_progress: bool,
    /// Records shown at each end of the result preview
    #[arg(long, default_value_t = 10)]
    preview: usize,
}

impl RunArgs {
    fn direction(&self) -> Direction {
        if self.descending {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sortsuite=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Numbers { path, run } => {
            let numbers = dataset::load_numbers(&path)?;
            info!(path = %path.display(), records = numbers.len(), "dataset loaded");
            execute(numbers, Identity, &run)
        }
        Commands::Table {
            path,
            column,
            limit,
            ignore_case,
            run,
        } => {
            let table = Table::load(&path, limit)?;
            info!(path = %path.display(), records = table.len(), columns = table.headers().len(), "dataset loaded");

            let mut column = table.column(&column)?;
            if ignore_case {
                column = column.ignore_case();
            }
            execute(table.into_rows(), column, &run)
        }
    }
}

fn execute<R, K>(records: Vec<R>, key: K, args: &RunArgs) -> Result<(), Box<dyn Error>>
where
    R: Clone + Display + Send + 'static,
    K: KeyExtractor<R> + Send + 'static,
{
    let algorithm = args.algorithm;
    let direction = args.direction();
    let show_progress = !args.no_progress;
    let token = CancelToken::new();

    if io::stdin().is_terminal() {
        eprintln!("Press Enter to cancel.");
        let token = token.clone();
        thread::spawn(move || {
            let mut line = String::new();
            if io::stdin().read_line(&mut line).is_ok() {
                token.cancel();
            }
        });
    }

    info!(%algorithm, %direction, records = records.len(), "sort started");
    let started = Instant::now();

    let (tx, rx) = mpsc::channel();
    let worker_token = token.clone();
    let worker = thread::spawn(move || {
        let sink = move |percent: f64| {
            // The receiver only goes away if the main thread is already unwinding.
            let _ = tx.send(percent);
        };
        let mut controls = Controls::none().with_cancel(&worker_token);
        if show_progress {
            controls = controls.with_progress(&sink);
        }
        let outcome = algorithm.sort(&records, &key, direction, &controls);
        (outcome, key)
    });

    let mut bar = ProgressBar::default();
    for percent in rx {
        bar.draw(percent);
    }
    bar.finish();

    let (outcome, key) = worker.join().map_err(|_| "sort worker panicked")?;
    let elapsed = started.elapsed();

    let sorted = match outcome {
        SortOutcome::Completed(sorted) => sorted,
        SortOutcome::Cancelled => {
            warn!(%algorithm, elapsed_ms = elapsed.as_millis() as u64, "sort cancelled");
            println!("Sort cancelled; no output produced.");
            return Ok(());
        }
    };

    let verified = is_ordered(&sorted, &key, direction);
    info!(%algorithm, elapsed_ms = elapsed.as_millis() as u64, verified, "sort completed");
    print_summary(&sorted, algorithm, direction, elapsed, verified, args.preview);

    if let Some(path) = &args.output {
        write_records(path, &sorted)?;
        info!(path = %path.display(), records = sorted.len(), "results saved");
        println!("Saved to {}", path.display());
    }
    Ok(())
}

fn print_summary<R: Display>(
    sorted: &[R],
    algorithm: Algorithm,
    direction: Direction,
    elapsed: Duration,
    verified: bool,
    preview: usize,
) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("SORTING COMPLETE - {} sort ({direction})", algorithm.name().to_uppercase());
    println!("{rule}");

    match hidden_records(sorted.len(), preview) {
        None => sorted.iter().for_each(|record| println!("{record}")),
        Some(hidden) => {
            sorted[..preview].iter().for_each(|record| println!("{record}"));
            println!("... ({hidden} more) ...");
            sorted[sorted.len() - preview..]
                .iter()
                .for_each(|record| println!("{record}"));
        }
    }

    println!("{rule}");
    println!("Time taken: {:.6} seconds", elapsed.as_secs_f64());
    println!("Total elements sorted: {}", sorted.len());
    println!("Verification: {}", if verified { "CORRECT" } else { "FAILED" });
    println!("{rule}");
}

/// Number of records elided between the head and tail of the preview, or
/// `None` when everything fits.
fn hidden_records(len: usize, preview: usize) -> Option<usize> {
    len.checked_sub(preview.saturating_mul(2)).filter(|&hidden| hidden > 0)
}

fn write_records<R: Display>(path: &Path, records: &[R]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for record in records {
        writeln!(out, "{record}")?;
    }
    out.flush()
}

/// Text progress bar on stderr, redrawn only when the shown value changes.
#[derive(Default)]
struct ProgressBar {
    shown: Option<u32>,
}

impl ProgressBar {
    fn draw(&mut self, percent: f64) {
        // Tenths of a percent, the resolution of the label.
        let tenths = (percent.clamp(0.0, 100.0) * 10.0).round() as u32;
        if self.shown == Some(tenths) {
            return;
        }
        self.shown = Some(tenths);

        let filled = BAR_WIDTH * tenths as usize / 1000;
        let bar = format!("{}{}", "█".repeat(filled), "-".repeat(BAR_WIDTH - filled));
        let mut err = io::stderr().lock();
        let _ = write!(err, "\rProgress: |{bar}| {:.1}%", tenths as f64 / 10.0);
        let _ = err.flush();
    }

    fn finish(&self) {
        if self.shown.is_some() {
            eprintln!();
        }
    }
}
