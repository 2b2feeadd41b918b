// Fishing derby domain types
//
// The game runner owns the real simulation; these types mirror the slice
// of its state the search engine reads: both hooks, both scores, and the
// active fish.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

/// An active fish: where it is and what catching it is worth
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy)]
pub struct Fish {
    pub pos: Coord,
    pub value: i32,
}

/// Represents the five possible hook moves
///
/// The discriminant order is the stable action index used for move
/// ordering and cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Stay,
    Left,
    Right,
    Up,
    Down,
}

impl Action {
    /// Returns all possible actions in stable index order
    pub fn all() -> [Action; 5] {
        [
            Action::Stay,
            Action::Left,
            Action::Right,
            Action::Up,
            Action::Down,
        ]
    }

    /// Converts action to its symbolic name for the turn protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Stay => "stay",
            Action::Left => "left",
            Action::Right => "right",
            Action::Up => "up",
            Action::Down => "down",
        }
    }

    /// One-character code used in search path keys
    ///
    /// These are the first characters of the symbolic names and must stay
    /// pairwise distinct.
    pub fn code(&self) -> u8 {
        self.as_str().as_bytes()[0]
    }

    /// Stable index of this action
    pub fn index(&self) -> usize {
        match self {
            Action::Stay => 0,
            Action::Left => 1,
            Action::Right => 2,
            Action::Up => 3,
            Action::Down => 4,
        }
    }

    /// Calculates the next coordinate when moving in this direction
    ///
    /// Raw one-cell step; board wrapping and bounds are the successor
    /// provider's concern.
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Action::Stay => *coord,
            Action::Left => Coord { x: coord.x - 1, y: coord.y },
            Action::Right => Coord { x: coord.x + 1, y: coord.y },
            Action::Up => Coord { x: coord.x, y: coord.y + 1 },
            Action::Down => Coord { x: coord.x, y: coord.y - 1 },
        }
    }
}

/// Immutable snapshot of the board as seen by the search engine
///
/// Index 0 is always our player (the maximizer), index 1 the opponent.
/// Fish live in a BTreeMap so iteration order is deterministic.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GameState {
    pub hooks: [Coord; 2],
    pub scores: [i32; 2],
    #[serde(default)]
    pub fish: BTreeMap<u32, Fish>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_codes_are_pairwise_distinct() {
        let codes: Vec<u8> = Action::all().iter().map(|a| a.code()).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b, "path-key codes must be distinct");
            }
        }
    }

    #[test]
    fn test_action_index_matches_all_order() {
        for (i, action) in Action::all().iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_apply_moves_one_cell() {
        let origin = Coord { x: 4, y: 7 };
        assert_eq!(Action::Stay.apply(&origin), origin);
        assert_eq!(Action::Left.apply(&origin), Coord { x: 3, y: 7 });
        assert_eq!(Action::Right.apply(&origin), Coord { x: 5, y: 7 });
        assert_eq!(Action::Up.apply(&origin), Coord { x: 4, y: 8 });
        assert_eq!(Action::Down.apply(&origin), Coord { x: 4, y: 6 });
    }
}
