// Player controllers
//
// Two implementations of the runner-facing turn loop: a pass-through
// stub that only watches for the end-of-game signal, and the
// search-driven minimax agent.

use std::time::Duration;

use log::{info, warn};
use serde_json::Value;

use crate::config::Config;
use crate::debug_logger::DecisionLogger;
use crate::game_tree::{Node, SuccessorProvider};
use crate::protocol::{Message, MoveReply, ProtocolError, Transport};
use crate::search::{Searcher, PLAYER_MAX};

/// A controller owns one side's turn loop over the runner boundary
pub trait PlayerController {
    fn player_loop(&mut self, transport: &mut dyn Transport) -> Result<(), ProtocolError>;
}

/// Passive controller: drains messages until the game ends
pub struct HumanController;

impl PlayerController for HumanController {
    fn player_loop(&mut self, transport: &mut dyn Transport) -> Result<(), ProtocolError> {
        loop {
            if let Message::Turn(turn) = transport.receive()? {
                if turn.game_over {
                    return Ok(());
                }
            }
        }
    }
}

/// Search-driven controller: one fresh root and one time-bounded search
/// per turn message
pub struct MinimaxController<P> {
    config: Config,
    provider: P,
    logger: DecisionLogger,
    model: Option<Value>,
    turn: i32,
}

impl<P: SuccessorProvider> MinimaxController<P> {
    pub fn new(config: Config, provider: P) -> Self {
        let logger = DecisionLogger::new(config.debug.enabled, &config.debug.log_file_path);
        MinimaxController {
            config,
            provider,
            logger,
            model: None,
            turn: 0,
        }
    }

    /// Keeps the runner's opaque setup payload around for the game
    fn initialize_model(&mut self, initial_data: Value) {
        info!("received setup message");
        self.model = Some(initial_data);
    }

    /// The runner's setup payload, once received
    pub fn model(&self) -> Option<&Value> {
        self.model.as_ref()
    }
}

impl<P: SuccessorProvider> PlayerController for MinimaxController<P> {
    fn player_loop(&mut self, transport: &mut dyn Transport) -> Result<(), ProtocolError> {
        loop {
            match transport.receive()? {
                Message::Setup(initial_data) => self.initialize_model(initial_data),
                Message::Turn(turn) => {
                    if turn.game_over {
                        info!("game over after {} turns", self.turn);
                        return Ok(());
                    }
                    let state = match turn.state {
                        Some(state) => state,
                        None => {
                            warn!("turn message without a state, ignoring");
                            continue;
                        }
                    };

                    self.turn += 1;
                    let root = Node::root(state, PLAYER_MAX);
                    let searcher = Searcher::new(
                        &self.provider,
                        &self.config.search,
                        &self.config.heuristic,
                    );
                    let budget = Duration::from_millis(self.config.timing.budget_ms);
                    let outcome = searcher.search_best_move(&root, budget);

                    info!(
                        "turn {}: chose {} (value {:.3}, depth {}, time {}ms)",
                        self.turn,
                        outcome.action.as_str(),
                        outcome.value,
                        outcome.depth,
                        outcome.elapsed.as_millis()
                    );
                    self.logger.log_decision(self.turn, &root.state, outcome);

                    transport.send(&MoveReply {
                        action: outcome.action.as_str().to_string(),
                        search_time: Some(outcome.elapsed.as_secs_f64() * 1000.0),
                    })?;
                }
            }
        }
    }
}
