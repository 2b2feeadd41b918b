// Board evaluation for states the search cannot expand further
//
// Two terms: the realized score differential, and a proximity sum that
// pulls the hook toward valuable fish. A large penalty stops the agent
// from banking a cheap fish while a much better one sits within reach.

use crate::config::HeuristicConfig;
use crate::types::{Coord, GameState};

/// Hook-to-fish distance on the wrapping board
///
/// Horizontal component is the shortest of the direct distance and the
/// two wrapped distances; vertical component is the plain difference.
pub fn wrapped_distance(hook: Coord, fish: Coord, board_width: i32) -> i32 {
    let horizontal = (hook.x - fish.x)
        .abs()
        .min((hook.x + board_width - fish.x).abs())
        .min((hook.x - board_width - fish.x).abs());
    let vertical = (hook.y - fish.y).abs();
    horizontal + vertical
}

/// Estimates how favorable `state` is for player 0
///
/// Deterministic, side-effect free, and only as good as the weights in
/// the config.
pub fn evaluate(state: &GameState, params: &HeuristicConfig) -> f64 {
    let f1 = f64::from(state.scores[0] - state.scores[1]);
    let hook = state.hooks[0];

    let mut f2 = 0.0;
    let mut best_value_close = 0;
    let mut caught_fish_value: Option<i32> = None;

    for fish in state.fish.values() {
        let dist = wrapped_distance(hook, fish.pos, params.board_width);

        if dist > 0 && dist < params.proximity_threshold && fish.value > best_value_close {
            best_value_close = fish.value;
        }
        if dist == 0 {
            caught_fish_value = Some(fish.value);
        }

        f2 += f64::from(fish.value) / (f64::from(dist) + params.distance_epsilon);
    }

    // Catching now while a clearly better fish is in reach is a blunder
    if let Some(caught) = caught_fish_value {
        if best_value_close > caught + params.greed_margin {
            f2 -= params.greed_penalty;
        }
    }

    params.weight_score_diff * f1 + params.weight_proximity * f2
}
