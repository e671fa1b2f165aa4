use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use fibkit::{Algorithm, Limits};

#[derive(Parser)]
#[command(name = "fibkit", version, about = "Compute and benchmark Fibonacci numbers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(Subcommand)]
pub enum Command {
    /// compute a single Fibonacci number
    Compute(Compute),

    /// run every algorithm for the same index and compare
    Bench(Bench),

    /// print a shell completion script
    Completions {
        /// target shell
        shell: Shell,
    },
}

#[derive(Args)]
pub struct Compute {
    /// index of the Fibonacci number
    #[arg(allow_negative_numbers = true)]
    pub n: i64,

    /// algorithm to use (iterative, recursive, recursive_memo)
    #[arg(short, long, default_value_t = Algorithm::Iterative)]
    pub algorithm: Algorithm,

    /// wrap results that do not fit in 64 bits instead of failing
    #[arg(long)]
    pub wrap: bool,

    /// print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct Bench {
    /// index of the Fibonacci number
    #[arg(allow_negative_numbers = true)]
    pub n: i64,

    /// print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LimitArgs {
    /// largest accepted index
    #[arg(long, global = true)]
    pub max_index: Option<i64>,

    /// largest accepted index for the naive recursive algorithm
    #[arg(long, global = true)]
    pub max_recursive_index: Option<i64>,

    /// largest index the benchmark runs the naive recursive algorithm for
    #[arg(long, global = true)]
    pub recursive_cutoff: Option<i64>,
}

impl LimitArgs {
    pub fn to_limits(&self) -> Limits {
        let defaults = Limits::default();
        Limits {
            max_index: self.max_index.unwrap_or(defaults.max_index),
            max_recursive_index: self.max_recursive_index.unwrap_or(defaults.max_recursive_index),
            benchmark_recursive_cutoff: self.recursive_cutoff.unwrap_or(defaults.benchmark_recursive_cutoff),
        }
    }
}

pub fn level_filter(level: &str) -> log::LevelFilter {
    match level {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Info,
    }
}
