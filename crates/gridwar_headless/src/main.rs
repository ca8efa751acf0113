//! Headless gridwar match runner.
//!
//! Runs matches between registered agents without graphics. The `match`
//! subcommand prints exactly one single-line JSON result record on
//! stdout; all logging goes to stderr so stdout stays machine-readable.
//!
//! # Usage
//!
//! ```bash
//! # One match: map, cycle limit, ruleset, conflict policy, two agents
//! gridwar_headless match duel8 5000 v2 alternate heuristic passive
//!
//! # Sweep two agents across maps and seeds
//! gridwar_headless batch --map duel8 --map skirmish16 --count 20 heuristic passive
//!
//! # List what is registered
//! gridwar_headless maps
//! gridwar_headless agents
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gridwar_headless::{
    batch::{run_batch, BatchConfig},
    error::SetupError,
    map::MapSpec,
    match_runner::{run_match, MatchConfig},
    registry,
};

#[derive(Parser)]
#[command(name = "gridwar_headless")]
#[command(about = "Headless gridwar match runner for benchmarking and CI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one headless match and print a single-line JSON result record
    #[command(name = "match")]
    RunMatch {
        /// Map identifier (built-in name or a .ron file path)
        map: String,

        /// Maximum cycles before the match is called a draw
        max_cycles: u64,

        /// Ruleset identifier (v1 or v2)
        ruleset: String,

        /// Conflict-resolution policy identifier (alternate or cancel)
        conflict_policy: String,

        /// Agent identifier for side 0
        agent1: String,

        /// Agent identifier for side 1
        agent2: String,

        /// Spawn-perturbation seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Run a batch of matches and aggregate win rates
    Batch {
        /// Map identifiers to sweep (repeatable)
        #[arg(short, long, default_value = "skirmish16")]
        map: Vec<String>,

        /// Matches per map
        #[arg(short, long, default_value = "10")]
        count: u32,

        /// Starting seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Ruleset identifier
        #[arg(long, default_value = "v2")]
        ruleset: String,

        /// Conflict-resolution policy identifier
        #[arg(long, default_value = "alternate")]
        conflict_policy: String,

        /// Maximum cycles per match
        #[arg(long, default_value = "5000")]
        max_cycles: u64,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// Agent identifier for side 0
        agent1: String,

        /// Agent identifier for side 1
        agent2: String,
    },

    /// List built-in maps
    Maps,

    /// List registered agents
    Agents,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging goes to stderr; stdout carries only result records.
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::RunMatch {
            map,
            max_cycles,
            ruleset,
            conflict_policy,
            agent1,
            agent2,
            seed,
        } => cmd_match(
            &map,
            max_cycles,
            &ruleset,
            &conflict_policy,
            agent1,
            agent2,
            seed,
        ),
        Commands::Batch {
            map,
            count,
            seed,
            ruleset,
            conflict_policy,
            max_cycles,
            output,
            agent1,
            agent2,
        } => cmd_batch(BatchConfig {
            maps: map,
            games_per_map: count,
            seed_start: seed,
            ruleset,
            conflict_policy,
            agents: [agent1, agent2],
            max_cycles,
            output_dir: output,
        }),
        Commands::Maps => {
            for id in MapSpec::BUILTIN_IDS {
                // Built-in ids always resolve.
                if let Some(map) = MapSpec::builtin(id) {
                    println!(
                        "{id}  {size}x{size}  resources {res}",
                        size = map.size,
                        res = map.starting_resources
                    );
                }
            }
            ExitCode::SUCCESS
        }
        Commands::Agents => {
            for id in registry::agent_ids() {
                println!("{id}");
            }
            ExitCode::SUCCESS
        }
    }
}

/// Run one match and print its record.
fn cmd_match(
    map: &str,
    max_cycles: u64,
    ruleset: &str,
    conflict_policy: &str,
    agent1: String,
    agent2: String,
    seed: u64,
) -> ExitCode {
    let config = match resolve_match_config(
        map,
        max_cycles,
        ruleset,
        conflict_policy,
        agent1,
        agent2,
        seed,
    ) {
        Ok(config) => config,
        Err(err) => return setup_failure(&err),
    };

    match run_match(&config) {
        Ok(record) => match serde_json::to_string(&record) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("FATAL: failed to encode result record: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => setup_failure(&err),
    }
}

/// Run a batch and print a summary.
fn cmd_batch(config: BatchConfig) -> ExitCode {
    let results = match run_batch(&config) {
        Ok(results) => results,
        Err(err) => return setup_failure(&err),
    };

    let results_path = config.output_dir.join("batch_results.json");
    if let Err(err) = results.save(&results_path) {
        eprintln!("FATAL: failed to save results: {err}");
        return ExitCode::FAILURE;
    }

    eprintln!("\n{}", "=".repeat(50));
    eprintln!("BATCH COMPLETE");
    eprintln!("{}", "=".repeat(50));
    eprintln!("Games played: {}", results.summary.games);
    if !results.errors.is_empty() {
        eprintln!("Games FAILED: {}", results.errors.len());
    }
    eprintln!("Duration: {:.1}s", results.duration_seconds);
    eprintln!(
        "{}: {:.1}%  |  {}: {:.1}%  |  draws: {}",
        config.agents[0],
        results.summary.win_rates[0] * 100.0,
        config.agents[1],
        results.summary.win_rates[1] * 100.0,
        results.summary.draws
    );
    eprintln!("Mean cycles: {:.0}", results.summary.mean_cycles);
    eprintln!("Results saved to: {}", results_path.display());
    ExitCode::SUCCESS
}

fn resolve_match_config(
    map: &str,
    max_cycles: u64,
    ruleset: &str,
    conflict_policy: &str,
    agent1: String,
    agent2: String,
    seed: u64,
) -> Result<MatchConfig, SetupError> {
    Ok(MatchConfig {
        map: MapSpec::resolve(map)?,
        max_cycles,
        ruleset: registry::parse_ruleset(ruleset)?,
        conflict_policy: registry::parse_conflict_policy(conflict_policy)?,
        agents: [agent1, agent2],
        seed,
    })
}

/// Setup errors are fatal and never produce a result record.
fn setup_failure(err: &SetupError) -> ExitCode {
    tracing::error!(%err, "setup failed");
    eprintln!("Setup error: {err}");
    ExitCode::FAILURE
}
