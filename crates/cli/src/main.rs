//! Shared cache simulator CLI.
//!
//! This binary replays a memory/branch trace against the cache model. It performs:
//! 1. **Configuration:** Loads an optional JSON config and applies command-line overrides.
//! 2. **Replay:** Parses the trace and drives the cache and branch predictor.
//! 3. **Reporting:** Prints the fixed-format statistics, or JSON with `--json`.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use llcsim_core::config::{BranchPredictor, Config, ReplacementPolicy};
use llcsim_core::sim::{Replay, load_trace};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Shared last-level cache simulator",
    long_about = "Replay a memory/branch trace against a set-associative cache.\n\nTrace lines: `<core> R <addr>`, `<core> W <addr>`, `<core> B <pc> <T|N>` (hex addresses).\n\nExamples:\n  sim run -t traces/mix.trc\n  sim run -t traces/mix.trc --policy swp --ways 16 --swp-core0-ways 12\n  sim run -t traces/mix.trc -c configs/llc.json --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace and print statistics.
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Trace file to replay.
    #[arg(short, long)]
    trace: PathBuf,

    /// JSON configuration file; flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replacement policy.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Cache size in bytes.
    #[arg(long)]
    size: Option<usize>,

    /// Associativity.
    #[arg(long)]
    ways: Option<usize>,

    /// Line size in bytes.
    #[arg(long)]
    line: Option<usize>,

    /// Ways per set reserved for core 0 under way partitioning.
    #[arg(long)]
    swp_core0_ways: Option<usize>,

    /// Branch predictor.
    #[arg(long, value_enum)]
    predictor: Option<PredictorArg>,

    /// Prefix of the cache report lines.
    #[arg(long, default_value = "LLC")]
    label: String,

    /// Print statistics as JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Lru,
    Random,
    Swp,
    Dwp,
}

impl From<PolicyArg> for ReplacementPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Lru => Self::Lru,
            PolicyArg::Random => Self::Random,
            PolicyArg::Swp => Self::StaticWayPartition,
            PolicyArg::Dwp => Self::DynamicWayPartition,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PredictorArg {
    Taken,
    Gshare,
}

impl From<PredictorArg> for BranchPredictor {
    fn from(arg: PredictorArg) -> Self {
        match arg {
            PredictorArg::Taken => Self::AlwaysTaken,
            PredictorArg::Gshare => Self::GShare,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => cmd_run(&args),
    }
}

/// Installs the `tracing` subscriber, honouring `RUST_LOG` when set.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merges the JSON config (or defaults) with command-line overrides.
fn build_config(args: &RunArgs) -> Config {
    let mut config = match &args.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| {
            eprintln!("Error: {}: {}", path.display(), e);
            process::exit(1);
        }),
        None => Config::default(),
    };

    let cache = &mut config.cache;
    if let Some(policy) = args.policy {
        cache.policy = policy.into();
    }
    if let Some(size) = args.size {
        cache.size_bytes = size;
    }
    if let Some(ways) = args.ways {
        cache.ways = ways;
        if args.swp_core0_ways.is_none() && args.config.is_none() {
            cache.swp_core0_ways = ways / 2;
        }
    }
    if let Some(line) = args.line {
        cache.line_bytes = line;
    }
    if let Some(quota) = args.swp_core0_ways {
        cache.swp_core0_ways = quota;
    }
    if let Some(predictor) = args.predictor {
        config.predictor.policy = predictor.into();
    }
    config
}

/// Loads the trace, replays it, and prints the statistics.
///
/// Exits the process with code 1 on configuration or trace errors.
fn cmd_run(args: &RunArgs) {
    init_tracing(args.verbose);
    let config = build_config(args);

    let mut replay = Replay::new(&config).unwrap_or_else(|e| {
        eprintln!("Error: invalid cache configuration: {}", e);
        process::exit(1);
    });
    let events = load_trace(&args.trace).unwrap_or_else(|e| {
        eprintln!("Error: {}: {}", args.trace.display(), e);
        process::exit(1);
    });

    info!(
        trace = %args.trace.display(),
        events = events.len(),
        policy = ?config.cache.policy,
        "replaying trace"
    );
    replay.run(&events);

    if args.json {
        let summary = json!({
            "cache": replay.cache_stats(),
            "predictor": replay.branch_stats(),
            "cycles": replay.clock(),
            "writebacks": replay.writebacks(),
            "skipped": replay.skipped(),
        });
        println!("{summary:#}");
    } else {
        replay.cache_stats().print(&args.label);
        print!("{}", replay.branch_stats().report("BPRED"));
    }
}
