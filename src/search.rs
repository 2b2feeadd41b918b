// Time-bounded adversarial search
//
// Iterative-deepening minimax with alpha-beta pruning. Player 0
// maximizes, player 1 minimizes. Each top-level call owns a fresh
// SearchContext: the move-ordering cache, the path-key buffer, and the
// wall-clock deadline all live and die with one turn.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::{HeuristicConfig, SearchConfig};
use crate::game_tree::{Node, SuccessorProvider};
use crate::heuristic;
use crate::types::Action;

/// Index of the maximizing player
pub const PLAYER_MAX: usize = 0;

/// Byte marking the root of every path key
const PATH_ROOT: u8 = b'n';

/// Per-path move-ordering hints
///
/// Maps the action-code path from the root to the child index that won
/// there in a shallower deepening pass, so deeper passes try the likely
/// best move first and prune harder. Never survives a turn.
#[derive(Debug, Default)]
pub struct MoveOrderingCache {
    entries: HashMap<Vec<u8>, usize>,
}

impl MoveOrderingCache {
    pub fn new() -> Self {
        MoveOrderingCache {
            entries: HashMap::new(),
        }
    }

    /// Best child index recorded for this path, defaulting to 0
    ///
    /// The default is recorded on first read so repeated reads within
    /// one search agree.
    pub fn best_child(&mut self, key: &[u8]) -> usize {
        match self.entries.get(key) {
            Some(&index) => index,
            None => {
                self.entries.insert(key.to_vec(), 0);
                0
            }
        }
    }

    /// Overwrites the recorded best child for this path
    pub fn record(&mut self, key: &[u8], child_index: usize) {
        self.entries.insert(key.to_vec(), child_index);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mutable state owned by exactly one top-level search call
pub struct SearchContext {
    pub cache: MoveOrderingCache,
    path: Vec<u8>,
    start: Instant,
    budget: Duration,
}

impl SearchContext {
    pub fn new(budget: Duration) -> Self {
        SearchContext {
            cache: MoveOrderingCache::new(),
            path: vec![PATH_ROOT],
            start: Instant::now(),
            budget,
        }
    }

    fn out_of_time(&self) -> bool {
        self.start.elapsed() > self.budget
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// What a finished search hands back to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub action: Action,
    pub value: f64,
    /// Deepest depth limit the driver launched before the budget ran out
    pub depth: u8,
    pub elapsed: Duration,
}

/// The search engine, generic over the game core's child generation
pub struct Searcher<'a, P> {
    provider: &'a P,
    search: &'a SearchConfig,
    heuristic: &'a HeuristicConfig,
}

impl<'a, P: SuccessorProvider> Searcher<'a, P> {
    pub fn new(provider: &'a P, search: &'a SearchConfig, heuristic: &'a HeuristicConfig) -> Self {
        Searcher {
            provider,
            search,
            heuristic,
        }
    }

    /// Iterative-deepening driver for one turn
    ///
    /// Runs alpha-beta at each configured depth limit in order, keeps the
    /// best (action, value) pair across passes, and stops launching new
    /// limits once the budget has elapsed. The first limit always
    /// completes, so this always returns an action.
    pub fn search_best_move(&self, root: &Node, budget: Duration) -> SearchOutcome {
        let mut ctx = SearchContext::new(budget);
        ctx.cache.clear();

        let mut best_value = f64::NEG_INFINITY;
        let mut best_action = Action::Stay;
        let mut deepest = 0;

        for &limit in &self.search.depth_limits {
            let (action, value) =
                self.alpha_beta(&mut ctx, root, 0, limit, f64::NEG_INFINITY, f64::INFINITY);
            deepest = limit;

            // A pass cut off at the root comes back with no action; the
            // recorded pair only moves together.
            if value > best_value {
                if let Some(action) = action {
                    best_value = value;
                    best_action = action;
                }
            }
            debug!(
                "depth {}: {} ({:.3}), cache entries {}",
                limit,
                best_action.as_str(),
                best_value,
                ctx.cache.len()
            );

            if ctx.out_of_time() {
                break;
            }
        }

        SearchOutcome {
            action: best_action,
            value: best_value,
            depth: deepest,
            elapsed: ctx.elapsed(),
        }
    }

    /// Bounded-depth alpha-beta over the two-ply-alternating tree
    ///
    /// At the depth limit, past the deadline, or on a childless node the
    /// node's incoming action and heuristic value come back unchanged;
    /// otherwise the best child action for the mover, with the winning
    /// child index recorded for this path.
    pub fn alpha_beta(
        &self,
        ctx: &mut SearchContext,
        node: &Node,
        depth: u8,
        limit: u8,
        mut alpha: f64,
        mut beta: f64,
    ) -> (Option<Action>, f64) {
        if depth == limit || ctx.out_of_time() {
            return (node.action, heuristic::evaluate(&node.state, self.heuristic));
        }

        let children = self.provider.compute_and_get_children(node);
        if children.is_empty() {
            return (node.action, heuristic::evaluate(&node.state, self.heuristic));
        }

        let order = self.child_order(ctx, children.len());
        let maximizing = node.player == PLAYER_MAX;
        let mut best_value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_action = node.action;
        let mut best_index = 0;

        for &index in &order {
            let child = &children[index];
            ctx.path.push(child.action.map(|a| a.code()).unwrap_or(PATH_ROOT));
            let (_, value) = self.alpha_beta(ctx, child, depth + 1, limit, alpha, beta);
            ctx.path.pop();

            let improved = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improved {
                best_value = value;
                best_action = child.action;
                best_index = index;
            }

            if maximizing {
                if value > alpha {
                    alpha = value;
                }
            } else if value < beta {
                beta = value;
            }
            if beta <= alpha {
                break;
            }
        }

        if self.search.move_ordering {
            ctx.cache.record(&ctx.path, best_index);
        }
        (best_action, best_value)
    }

    /// Exploration order for a node's children
    ///
    /// Cached best child first, the rest in generation order. A lone
    /// child is returned as-is without touching the cache.
    fn child_order(&self, ctx: &mut SearchContext, child_count: usize) -> Vec<usize> {
        if child_count == 1 || !self.search.move_ordering {
            return (0..child_count).collect();
        }

        let preferred = ctx.cache.best_child(&ctx.path);
        let mut order = Vec::with_capacity(child_count);
        if preferred < child_count {
            order.push(preferred);
        }
        order.extend((0..child_count).filter(|&i| i != preferred));
        order
    }
}
