// Search-tree nodes and the successor-provider boundary
//
// Child generation, legality, and terminal detection belong to the game
// core that ships with the runner; the search engine only consumes the
// SuccessorProvider interface. GridProvider is a deterministic stand-in
// that covers hook movement so the binary and the integration tests can
// run end to end.

use crate::config::GameRulesConfig;
use crate::types::{Action, Coord, GameState};

/// A search-tree vertex: the state, the action that led here from the
/// parent (None at the root), and the index of the player to move next.
#[derive(Debug, Clone)]
pub struct Node {
    pub state: GameState,
    pub action: Option<Action>,
    pub player: usize,
}

impl Node {
    /// Fresh root built from an incoming turn message
    pub fn root(state: GameState, player: usize) -> Self {
        Node {
            state,
            action: None,
            player,
        }
    }
}

/// Interface to the external game core: enumerate the legal successor
/// states of a node for the player whose turn it is, each tagged with
/// the action that produced it.
pub trait SuccessorProvider {
    fn compute_and_get_children(&self, node: &Node) -> Vec<Node>;
}

/// Reference successor provider over the wrapping board
///
/// Hooks move one cell per action: horizontal moves wrap around the
/// board, vertical moves off the board are illegal, and a cell occupied
/// by the other hook is blocked. Landing on a fish banks its value for
/// the mover and removes it. Fish drift and line physics stay with the
/// real game core.
pub struct GridProvider {
    width: i32,
    height: i32,
}

impl GridProvider {
    pub fn new(rules: &GameRulesConfig) -> Self {
        GridProvider {
            width: rules.board_width,
            height: rules.board_height,
        }
    }

    /// Destination cell for one action, or None when the move is illegal
    fn destination(&self, hook: Coord, action: Action) -> Option<Coord> {
        let stepped = action.apply(&hook);
        if stepped.y < 0 || stepped.y >= self.height {
            return None;
        }
        Some(Coord {
            x: stepped.x.rem_euclid(self.width),
            y: stepped.y,
        })
    }
}

impl SuccessorProvider for GridProvider {
    fn compute_and_get_children(&self, node: &Node) -> Vec<Node> {
        let mover = node.player;
        let opponent_hook = node.state.hooks[1 - mover];
        let mut children = Vec::with_capacity(Action::all().len());

        for &action in Action::all().iter() {
            let next = match self.destination(node.state.hooks[mover], action) {
                Some(cell) => cell,
                None => continue,
            };
            if next == opponent_hook {
                continue;
            }

            let mut state = node.state.clone();
            state.hooks[mover] = next;
            let caught = state
                .fish
                .iter()
                .find(|(_, fish)| fish.pos == next)
                .map(|(&id, _)| id);
            if let Some(id) = caught {
                if let Some(fish) = state.fish.remove(&id) {
                    state.scores[mover] += fish.value;
                }
            }

            children.push(Node {
                state,
                action: Some(action),
                player: 1 - mover,
            });
        }

        children
    }
}
