// Debug logging module for per-turn decision records
//
// Each decision is written as one JSON line so games can be inspected
// after the fact. Logging failures are reported through the log and
// never interrupt play.

use log::error;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;

use crate::search::SearchOutcome;
use crate::types::GameState;

/// Represents a single decision log entry
#[derive(Debug, Serialize)]
struct DecisionEntry<'a> {
    turn: i32,
    action: &'a str,
    value: f64,
    depth: u8,
    search_time_ms: u64,
    state: &'a GameState,
    timestamp: String,
}

/// Writes decision records to a JSONL file when enabled
pub struct DecisionLogger {
    file: Option<File>,
}

impl DecisionLogger {
    /// Creates a new decision logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DecisionLogger { file: None };
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("decision logging enabled: {}", log_file_path);
                DecisionLogger { file: Some(file) }
            }
            Err(e) => {
                error!(
                    "failed to create decision log file '{}': {}",
                    log_file_path, e
                );
                DecisionLogger { file: None }
            }
        }
    }

    /// Creates a disabled decision logger (no-op)
    pub fn disabled() -> Self {
        DecisionLogger { file: None }
    }

    /// Appends one decision record
    pub fn log_decision(&mut self, turn: i32, state: &GameState, outcome: SearchOutcome) {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return,
        };

        let entry = DecisionEntry {
            turn,
            action: outcome.action.as_str(),
            value: outcome.value,
            depth: outcome.depth,
            search_time_ms: outcome.elapsed.as_millis() as u64,
            state,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        match serde_json::to_string(&entry) {
            Ok(line) => {
                if let Err(e) = writeln!(file, "{}", line) {
                    error!("failed to write decision log entry: {}", e);
                } else if let Err(e) = file.flush() {
                    error!("failed to flush decision log: {}", e);
                }
            }
            Err(e) => {
                error!("failed to serialize decision log entry: {}", e);
            }
        }
    }
}
