//! Search Engine Tests
//!
//! Pruning soundness against a plain minimax reference, depth-1
//! behavior, the wall-clock budget, and the move-ordering cache.

use std::collections::BTreeMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fishing_derby_bot::config::{Config, GameRulesConfig, HeuristicConfig, SearchConfig};
use fishing_derby_bot::game_tree::{GridProvider, Node, SuccessorProvider};
use fishing_derby_bot::heuristic::evaluate;
use fishing_derby_bot::search::{MoveOrderingCache, SearchContext, Searcher, PLAYER_MAX};
use fishing_derby_bot::types::{Action, Coord, Fish, GameState};

const EPS: f64 = 1e-12;
const LONG_BUDGET: Duration = Duration::from_secs(5);

fn heuristic_params() -> HeuristicConfig {
    Config::default_hardcoded().heuristic
}

fn grid_provider() -> GridProvider {
    GridProvider::new(&GameRulesConfig {
        board_width: 20,
        board_height: 20,
    })
}

fn search_config(depth_limits: Vec<u8>, move_ordering: bool) -> SearchConfig {
    SearchConfig {
        depth_limits,
        move_ordering,
    }
}

fn fixed_state() -> GameState {
    let mut fish = BTreeMap::new();
    fish.insert(
        1,
        Fish {
            pos: Coord { x: 9, y: 10 },
            value: 10,
        },
    );
    fish.insert(
        2,
        Fish {
            pos: Coord { x: 1, y: 4 },
            value: 3,
        },
    );
    fish.insert(
        3,
        Fish {
            pos: Coord { x: 14, y: 16 },
            value: 7,
        },
    );
    GameState {
        hooks: [Coord { x: 5, y: 10 }, Coord { x: 15, y: 10 }],
        scores: [0, 0],
        fish,
    }
}

fn random_state(rng: &mut StdRng) -> GameState {
    let mut fish = BTreeMap::new();
    for id in 0..4 {
        fish.insert(
            id,
            Fish {
                pos: Coord {
                    x: rng.random_range(0..20),
                    y: rng.random_range(0..20),
                },
                value: rng.random_range(1..=12),
            },
        );
    }
    let hook0 = Coord {
        x: rng.random_range(0..20),
        y: rng.random_range(0..20),
    };
    let hook1 = Coord {
        x: (hook0.x + 10) % 20,
        y: hook0.y,
    };
    GameState {
        hooks: [hook0, hook1],
        scores: [rng.random_range(0..30), rng.random_range(0..30)],
        fish,
    }
}

/// Reference minimax with no pruning and no ordering
fn plain_minimax<P: SuccessorProvider>(
    provider: &P,
    node: &Node,
    depth: u8,
    limit: u8,
    params: &HeuristicConfig,
) -> f64 {
    if depth == limit {
        return evaluate(&node.state, params);
    }
    let children = provider.compute_and_get_children(node);
    if children.is_empty() {
        return evaluate(&node.state, params);
    }
    let values = children
        .iter()
        .map(|child| plain_minimax(provider, child, depth + 1, limit, params));
    if node.player == PLAYER_MAX {
        values.fold(f64::NEG_INFINITY, f64::max)
    } else {
        values.fold(f64::INFINITY, f64::min)
    }
}

#[test]
fn test_alpha_beta_matches_plain_minimax() {
    let provider = grid_provider();
    let params = heuristic_params();
    let config = search_config(vec![1, 3, 5], true);
    let searcher = Searcher::new(&provider, &config, &params);

    let mut rng = StdRng::seed_from_u64(0xF15);
    for _ in 0..6 {
        let root = Node::root(random_state(&mut rng), PLAYER_MAX);
        for &limit in &[2, 3, 4] {
            let expected = plain_minimax(&provider, &root, 0, limit, &params);
            let mut ctx = SearchContext::new(LONG_BUDGET);
            let (_, value) = searcher.alpha_beta(
                &mut ctx,
                &root,
                0,
                limit,
                f64::NEG_INFINITY,
                f64::INFINITY,
            );
            assert!(
                (value - expected).abs() < EPS,
                "pruning changed the minimax value at limit {}: {} vs {}",
                limit,
                value,
                expected
            );
        }
    }
}

#[test]
fn test_depth_one_picks_heuristic_best_child() {
    let provider = grid_provider();
    let params = heuristic_params();
    let config = search_config(vec![1], true);
    let searcher = Searcher::new(&provider, &config, &params);

    let root = Node::root(fixed_state(), PLAYER_MAX);
    let children = provider.compute_and_get_children(&root);
    let best_child = children
        .iter()
        .max_by(|a, b| {
            evaluate(&a.state, &params)
                .partial_cmp(&evaluate(&b.state, &params))
                .expect("heuristic values are finite")
        })
        .expect("root has children");

    let outcome = searcher.search_best_move(&root, LONG_BUDGET);
    assert_eq!(outcome.action, best_child.action.expect("child has an action"));
    assert_eq!(outcome.depth, 1);
}

#[test]
fn test_short_budget_still_returns_a_valid_action() {
    let provider = grid_provider();
    let params = heuristic_params();
    let config = search_config(vec![1, 3, 5, 7, 9, 11, 13, 15, 17, 19], true);
    let searcher = Searcher::new(&provider, &config, &params);

    let root = Node::root(fixed_state(), PLAYER_MAX);
    let outcome = searcher.search_best_move(&root, Duration::from_millis(1));

    assert!(outcome.depth >= 1, "the first limit must always complete");
    assert!(
        outcome.elapsed < Duration::from_millis(50),
        "overrun must stay small, took {:?}",
        outcome.elapsed
    );
    let legal: Vec<Action> = provider
        .compute_and_get_children(&root)
        .iter()
        .filter_map(|c| c.action)
        .collect();
    assert!(legal.contains(&outcome.action));
}

#[test]
fn test_move_ordering_cache_never_changes_the_result() {
    let provider = grid_provider();
    let params = heuristic_params();
    let root = Node::root(fixed_state(), PLAYER_MAX);

    let with_cache = search_config(vec![1, 3, 5], true);
    let without_cache = search_config(vec![1, 3, 5], false);

    let ordered = Searcher::new(&provider, &with_cache, &params).search_best_move(&root, LONG_BUDGET);
    let unordered =
        Searcher::new(&provider, &without_cache, &params).search_best_move(&root, LONG_BUDGET);

    assert_eq!(ordered.action, unordered.action);
    assert!((ordered.value - unordered.value).abs() < EPS);
}

/// Provider that offers exactly one move everywhere
struct SingleChildProvider;

impl SuccessorProvider for SingleChildProvider {
    fn compute_and_get_children(&self, node: &Node) -> Vec<Node> {
        let mut state = node.state.clone();
        state.hooks[node.player] = Action::Left.apply(&state.hooks[node.player]);
        vec![Node {
            state,
            action: Some(Action::Left),
            player: 1 - node.player,
        }]
    }
}

#[test]
fn test_single_child_bypasses_the_ordering_cache() {
    let params = heuristic_params();
    let config = search_config(vec![1], true);
    let provider = SingleChildProvider;
    let searcher = Searcher::new(&provider, &config, &params);

    let root = Node::root(fixed_state(), PLAYER_MAX);
    let mut ctx = SearchContext::new(LONG_BUDGET);
    // An out-of-range hint must be harmless: a lone child is explored
    // directly, without an ordering lookup.
    ctx.cache.record(b"n", 7);

    let (action, _) =
        searcher.alpha_beta(&mut ctx, &root, 0, 1, f64::NEG_INFINITY, f64::INFINITY);
    assert_eq!(action, Some(Action::Left));
}

#[test]
fn test_cache_defaults_record_and_clear() {
    let mut cache = MoveOrderingCache::new();
    assert!(cache.is_empty());

    // First read records the default so later reads agree
    assert_eq!(cache.best_child(b"nl"), 0);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.best_child(b"nl"), 0);

    cache.record(b"nl", 3);
    assert_eq!(cache.best_child(b"nl"), 3);

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.best_child(b"nl"), 0);
}

#[test]
fn test_deeper_search_spots_the_two_step_fish() {
    // The only fish sits two moves to the right; depth 3 must walk
    // toward it.
    let mut fish = BTreeMap::new();
    fish.insert(
        1,
        Fish {
            pos: Coord { x: 7, y: 10 },
            value: 9,
        },
    );
    let state = GameState {
        hooks: [Coord { x: 5, y: 10 }, Coord { x: 15, y: 3 }],
        scores: [0, 0],
        fish,
    };

    let provider = grid_provider();
    let params = heuristic_params();
    let config = search_config(vec![1, 3], true);
    let searcher = Searcher::new(&provider, &config, &params);

    let outcome = searcher.search_best_move(&Node::root(state, PLAYER_MAX), LONG_BUDGET);
    assert_eq!(outcome.action, Action::Right);
}
