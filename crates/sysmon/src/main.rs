//! sysmon - point-in-time resource monitor.
//!
//! Usage:
//!   sysmon              # TUI refreshing every second
//!   sysmon 5            # TUI refreshing every 5 seconds
//!   sysmon --limit 20   # show the 20 busiest processes
//!   sysmon --once       # print one poll as JSON and exit

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::File;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

#[cfg(target_os = "linux")]
use sysmon_core::collector::RealFs;
#[cfg(not(target_os = "linux"))]
use sysmon_core::collector::MockFs;
use sysmon_core::collector::{CounterPaths, FileSystem};
use sysmon_core::metrics::MetricsFacade;
use sysmon_core::tui::App;

/// Point-in-time resource monitor.
#[derive(Parser)]
#[command(name = "sysmon", about = "System resource monitor", version)]
struct Args {
    /// Update interval in seconds.
    #[arg(value_name = "INTERVAL", default_value = "1")]
    interval: u64,

    /// Path to /proc filesystem.
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Maximum number of process rows (0 shows as many as fit).
    #[arg(short, long, default_value = "0")]
    limit: usize,

    /// Poll twice, one interval apart, print the second result as JSON and exit.
    #[arg(long)]
    once: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Write logs to this file. Without it the TUI logs nothing.
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,
}

/// Initializes the tracing subscriber.
///
/// Logs go to `--log-file` when given, else to stderr in `--once` mode.
/// The TUI owns the terminal, so it gets no subscriber otherwise.
fn init_logging(args: &Args) -> Result<(), String> {
    let level = if args.quiet {
        Level::ERROR
    } else {
        match args.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["sysmon", "sysmon_core"] {
        let directive = format!("{}={}", target, level)
            .parse()
            .map_err(|e| format!("invalid log directive: {}", e))?;
        filter = filter.add_directive(directive);
    }

    if let Some(ref path) = args.log_file {
        let file = File::create(path)
            .map_err(|e| format!("cannot open log file '{}': {}", path, e))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.once {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

/// Polls twice so the CPU rate covers one interval, then prints JSON.
fn print_once<F: FileSystem>(mut facade: MetricsFacade<F>, args: &Args) -> Result<(), String> {
    facade.poll().map_err(|e| e.to_string())?;
    thread::sleep(Duration::from_secs(args.interval));
    let mut result = facade.poll().map_err(|e| e.to_string())?;

    if args.limit > 0 {
        result.processes.truncate(args.limit);
    }
    let json = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn run<F: FileSystem>(facade: MetricsFacade<F>, args: &Args) -> Result<(), String> {
    if args.once {
        return print_once(facade, args);
    }

    let row_limit = (args.limit > 0).then_some(args.limit);
    let tick_rate = Duration::from_secs(args.interval.max(1));
    info!(
        "starting TUI, interval {:?}, proc root {}",
        tick_rate, args.proc_path
    );
    App::new(facade, row_limit)
        .run(tick_rate)
        .map_err(|e| format!("error running TUI: {}", e))
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let paths = CounterPaths::with_proc_root(&args.proc_path);
    debug!("counter paths: {:?}", paths);

    #[cfg(target_os = "linux")]
    let facade = MetricsFacade::from_fs(RealFs::new(), paths);
    #[cfg(not(target_os = "linux"))]
    let facade = MetricsFacade::from_fs(MockFs::typical_system(), paths);

    if let Err(e) = run(facade, &args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
