//! valmon - validator metrics viewer.
//!
//! Loads `metrics.json` once (file or URL), then either writes a CSV / HTML
//! report and exits or runs the interactive table.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use valmon_core::export::{write_csv, write_html};
use valmon_core::provider::{HttpOptions, load_or_empty, provider_for};
use valmon_core::rows::project_rows;
use valmon_core::tui::App;

/// Redraw interval; only the header clock changes between events.
const TICK_RATE: Duration = Duration::from_secs(1);

/// Validator metrics viewer.
#[derive(Parser)]
#[command(
    name = "valmon",
    about = "Sortable, paginated validator metrics table with per-row details",
    version = valmon_core::VERSION
)]
struct Args {
    /// Path or http(s) URL of the metrics document.
    #[arg(default_value = "metrics.json", env = "VALMON_SOURCE")]
    source: String,

    /// HTTP timeout in seconds. No timeout when omitted.
    #[arg(long, env = "VALMON_TIMEOUT")]
    timeout: Option<u64>,

    /// Write a static HTML table to PATH and exit.
    #[arg(long, value_name = "PATH", env = "VALMON_HTML")]
    html: Option<PathBuf>,

    /// Write the CSV report to PATH and exit.
    #[arg(long, value_name = "PATH", env = "VALMON_CSV")]
    csv: Option<PathBuf>,

    /// Write logs to PATH. The interactive view logs nowhere without it.
    #[arg(long, value_name = "PATH", env = "VALMON_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn exporting(&self) -> bool {
        self.html.is_some() || self.csv.is_some()
    }
}

fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    for target in ["valmon", "valmon_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Installs the subscriber. Reports go to stderr; the interactive view owns
/// the terminal, so it only logs when a file is given.
fn init_logging(args: &Args) -> std::io::Result<()> {
    let filter = build_filter(log_level(args.verbose, args.quiet));

    if let Some(path) = &args.log_file {
        let file = File::options().create(true).append(true).open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.exporting() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("valmon: cannot open log file: {}", e);
        process::exit(1);
    }

    info!("valmon {} starting", valmon_core::VERSION);

    let options = HttpOptions {
        timeout: args.timeout.map(Duration::from_secs),
    };
    let provider = provider_for(&args.source, options);
    let (document, load_error) = load_or_empty(provider.as_ref());

    if args.exporting() {
        if let Some(e) = &load_error {
            eprintln!("valmon: cannot load {}: {}", provider.label(), e);
            process::exit(1);
        }
        if let Some(path) = &args.csv
            && let Err(e) = write_csv(&document, path)
        {
            error!(path = %path.display(), error = %e, "CSV export failed");
            eprintln!("valmon: cannot write {}: {}", path.display(), e);
            process::exit(1);
        }
        if let Some(path) = &args.html
            && let Err(e) = write_html(&project_rows(&document), "Validators", path)
        {
            error!(path = %path.display(), error = %e, "HTML export failed");
            eprintln!("valmon: cannot write {}: {}", path.display(), e);
            process::exit(1);
        }
        return;
    }

    let app = App::new(
        document,
        load_error.map(|e| e.to_string()),
        provider.label().to_string(),
    );
    if let Err(e) = app.run(TICK_RATE) {
        error!(error = %e, "terminal error");
        eprintln!("valmon: terminal error: {}", e);
        process::exit(1);
    }
}
