// Configuration module for reading Agent.toml
// This module provides OOP-style configuration management for the agent

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub search: SearchConfig,
    pub heuristic: HeuristicConfig,
    pub game: GameRulesConfig,
    pub debug: DebugConfig,
}

/// Timing constants
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    /// Wall-clock budget for one top-level search call, in milliseconds
    pub budget_ms: u64,
}

/// Search shape constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Ascending depth limits for iterative deepening. Odd limits stop
    /// the search after the maximizing player's reply.
    pub depth_limits: Vec<u8>,
    /// Enables cached best-child-first move ordering
    pub move_ordering: bool,
}

/// Evaluation constants
///
/// These are tuned for the 20-wide wrapping board; none of them is a
/// structural requirement of the search.
#[derive(Debug, Deserialize, Clone)]
pub struct HeuristicConfig {
    pub board_width: i32,
    pub weight_score_diff: f64,
    pub weight_proximity: f64,
    pub distance_epsilon: f64,
    pub proximity_threshold: i32,
    pub greed_margin: i32,
    pub greed_penalty: f64,
}

/// Board geometry used by the reference successor provider
#[derive(Debug, Deserialize, Clone)]
pub struct GameRulesConfig {
    pub board_width: i32,
    pub board_height: i32,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Agent.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Agent.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Agent.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Agent.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig { budget_ms: 55 },
            search: SearchConfig {
                depth_limits: vec![1, 3, 5, 7, 9, 11, 13, 15, 17, 19],
                move_ordering: true,
            },
            heuristic: HeuristicConfig {
                board_width: 20,
                weight_score_diff: 1.0,
                weight_proximity: 0.01,
                distance_epsilon: 0.01,
                proximity_threshold: 3,
                greed_margin: 5,
                greed_penalty: 100_000.0,
            },
            game: GameRulesConfig {
                board_width: 20,
                board_height: 20,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "derby_decisions.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Agent.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
