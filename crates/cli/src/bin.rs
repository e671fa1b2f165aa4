use std::io::Write;

use clap::{CommandFactory, Parser};
use eyre::{Result, eyre};
use fibkit::{BenchmarkReport, Calculator, Computation, OverflowPolicy};
use log::{debug, warn};
use owo_colors::OwoColorize;

use crate::args::{Bench, Cli, Command, Compute};
mod args;

fn main() -> Result<()> {
    let args = Cli::parse();
    pretty_env_logger::formatted_builder().filter_level(args::level_filter(&args.log_level)).init();

    let limits = args.limits.to_limits();
    debug!("limits: {limits:?}");

    match args.command {
        Command::Compute(Compute { n, algorithm, wrap, json }) => {
            let overflow = if wrap { OverflowPolicy::Wrap } else { OverflowPolicy::Fail };
            let mut calc = Calculator::new().with_limits(limits).with_overflow_policy(overflow);
            let computation = calc.compute(n, algorithm)?;
            match json {
                true => print_json(&computation),
                false => print_computation(&computation),
            }
        }
        Command::Bench(Bench { n, json }) => {
            let mut calc = Calculator::new().with_limits(limits);
            let report = calc.benchmark(n)?;
            match json {
                true => print_json(&report)?,
                false => print_report(&report)?,
            }

            if !report.is_consistent() {
                return Err(eyre!("algorithms disagree on F({n})"));
            }
            Ok(())
        }
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "fibkit", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let mut out = anstream::stdout();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn print_computation(computation: &Computation) -> Result<()> {
    let Computation { n, result, algorithm, elapsed } = computation;
    anstream::println!(
        "F({n}) = {} {}",
        result.bold(),
        format!("({algorithm}, {:.3}ms)", elapsed.as_secs_f64() * 1000.0).dimmed()
    );
    Ok(())
}

fn print_report(report: &BenchmarkReport) -> Result<()> {
    anstream::println!("{}", format!("benchmark for F({})", report.n).bold());
    anstream::println!("{}", "-".repeat(56));
    for entry in &report.results {
        match (entry.result, entry.elapsed) {
            (Some(result), Some(elapsed)) => anstream::println!(
                "{:20} | {:>10.3}ms | result: {}",
                entry.algorithm.to_string(),
                elapsed.as_secs_f64() * 1000.0,
                result.green()
            ),
            _ => {
                let error = entry.error.as_deref().unwrap_or("unknown error");
                warn!("{} failed: {error}", entry.algorithm);
                anstream::println!("{:20} | {}", entry.algorithm.to_string(), format!("error: {error}").red())
            }
        }
    }
    anstream::println!("{}", "-".repeat(56));

    match report.is_consistent() {
        true => anstream::println!("{}", "all algorithms agree".green()),
        false => anstream::println!("{}", "algorithms disagree".red().bold()),
    }
    Ok(())
}
