//! Batch match runner for agent benchmarking.
//!
//! Runs many matches in parallel using rayon and aggregates win rates,
//! the way the original evaluation harness swept a bot across maps and
//! benchmark opponents.

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SetupError;
use crate::map::MapSpec;
use crate::match_runner::{run_match, MatchConfig, MatchRecord, DRAW};
use crate::registry;

/// Configuration for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Map identifiers to sweep.
    pub maps: Vec<String>,
    /// Matches per map (seeds `seed_start..seed_start + games_per_map`).
    pub games_per_map: u32,
    /// First seed.
    pub seed_start: u64,
    /// Ruleset identifier.
    pub ruleset: String,
    /// Conflict policy identifier.
    pub conflict_policy: String,
    /// Agent identifiers per side index.
    pub agents: [String; 2],
    /// Cycle limit per match.
    pub max_cycles: u64,
    /// Where results are written.
    pub output_dir: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            maps: vec!["skirmish16".to_string()],
            games_per_map: 10,
            seed_start: 0,
            ruleset: "v2".to_string(),
            conflict_policy: "alternate".to_string(),
            agents: ["heuristic".to_string(), "passive".to_string()],
            max_cycles: 5000,
            output_dir: PathBuf::from("results"),
        }
    }
}

/// One completed match within a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchGame {
    /// Map identifier.
    pub map: String,
    /// Seed used.
    pub seed: u64,
    /// The match record.
    pub record: MatchRecord,
}

/// A match that failed to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    /// Map identifier.
    pub map: String,
    /// Seed used.
    pub seed: u64,
    /// Error message.
    pub message: String,
}

/// Aggregate outcome counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Completed matches.
    pub games: u32,
    /// Wins per side index.
    pub wins: [u32; 2],
    /// Draws.
    pub draws: u32,
    /// Win rate per side index.
    pub win_rates: [f64; 2],
    /// Mean cycles per match.
    pub mean_cycles: f64,
}

/// Results from a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// Configuration used.
    pub config: BatchConfig,
    /// Individual game results.
    pub games: Vec<BatchGame>,
    /// Aggregate summary.
    pub summary: BatchSummary,
    /// Total runtime in seconds.
    pub duration_seconds: f64,
    /// Matches that failed.
    pub errors: Vec<BatchError>,
}

impl BatchResults {
    /// Save results to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Load results from a JSON file.
    pub fn load(path: &std::path::Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(std::io::Error::other)
    }
}

/// Run a batch. Identifier resolution happens once up front so a typo
/// fails fast instead of surfacing per match.
pub fn run_batch(config: &BatchConfig) -> Result<BatchResults, SetupError> {
    let start = Instant::now();

    let ruleset = registry::parse_ruleset(&config.ruleset)?;
    let conflict_policy = registry::parse_conflict_policy(&config.conflict_policy)?;
    for id in &config.agents {
        registry::build_agent(id, ruleset.table())?;
    }
    let maps: Vec<MapSpec> = config
        .maps
        .iter()
        .map(|id| MapSpec::resolve(id))
        .collect::<Result<_, _>>()?;

    let tasks: Vec<(&MapSpec, u64)> = maps
        .iter()
        .flat_map(|map| {
            (0..u64::from(config.games_per_map)).map(move |i| (map, config.seed_start + i))
        })
        .collect();

    info!(
        maps = maps.len(),
        games = tasks.len(),
        agent1 = %config.agents[0],
        agent2 = %config.agents[1],
        "batch started"
    );

    let outcomes: Vec<Result<BatchGame, BatchError>> = tasks
        .par_iter()
        .map(|&(map, seed)| {
            let match_config = MatchConfig {
                map: map.clone(),
                max_cycles: config.max_cycles,
                ruleset,
                conflict_policy,
                agents: config.agents.clone(),
                seed,
            };
            match run_match(&match_config) {
                Ok(record) => Ok(BatchGame {
                    map: map.name.clone(),
                    seed,
                    record,
                }),
                Err(err) => Err(BatchError {
                    map: map.name.clone(),
                    seed,
                    message: err.to_string(),
                }),
            }
        })
        .collect();

    let mut games = Vec::new();
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(game) => games.push(game),
            Err(err) => {
                warn!(map = %err.map, seed = err.seed, message = %err.message, "match failed");
                errors.push(err);
            }
        }
    }

    let summary = summarize(&games);
    Ok(BatchResults {
        config: config.clone(),
        games,
        summary,
        duration_seconds: start.elapsed().as_secs_f64(),
        errors,
    })
}

fn summarize(games: &[BatchGame]) -> BatchSummary {
    let mut summary = BatchSummary {
        games: games.len() as u32,
        ..BatchSummary::default()
    };
    let mut total_cycles = 0u64;
    for game in games {
        total_cycles += game.record.cycles;
        match game.record.winner {
            0 => summary.wins[0] += 1,
            1 => summary.wins[1] += 1,
            DRAW => summary.draws += 1,
            other => warn!(winner = other, "unexpected winner index"),
        }
    }
    if !games.is_empty() {
        let n = games.len() as f64;
        summary.win_rates = [f64::from(summary.wins[0]) / n, f64::from(summary.wins[1]) / n];
        summary.mean_cycles = total_cycles as f64 / n;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_aggregates_deterministic_outcomes() {
        let config = BatchConfig {
            maps: vec!["duel8".to_string()],
            games_per_map: 2,
            max_cycles: 3000,
            ..BatchConfig::default()
        };
        let results = run_batch(&config).unwrap();
        assert_eq!(results.games.len(), 2);
        assert!(results.errors.is_empty());
        assert_eq!(results.summary.games, 2);
        // The heuristic agent routs a passive opponent on a cramped map.
        assert_eq!(results.summary.wins[0], 2);
        assert!(results.summary.win_rates[0] > 0.99);
    }

    #[test]
    fn unknown_map_fails_the_whole_batch() {
        let config = BatchConfig {
            maps: vec!["atlantis".to_string()],
            ..BatchConfig::default()
        };
        assert!(matches!(
            run_batch(&config),
            Err(SetupError::Map(crate::map::MapError::Unknown(_)))
        ));
    }

    #[test]
    fn summary_counts_draws() {
        let games = vec![
            BatchGame {
                map: "duel8".to_string(),
                seed: 0,
                record: MatchRecord {
                    winner: DRAW,
                    cycles: 100,
                    game_over: false,
                },
            },
            BatchGame {
                map: "duel8".to_string(),
                seed: 1,
                record: MatchRecord {
                    winner: 1,
                    cycles: 50,
                    game_over: true,
                },
            },
        ];
        let summary = summarize(&games);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.wins, [0, 1]);
        assert!((summary.mean_cycles - 75.0).abs() < f64::EPSILON);
    }
}
