use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use super::agent::Agent;
use crate::error::SearchError;
use crate::game::{Board, Mark, Move};

/// An agent that selects uniformly at random from the empty cells.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic agent for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<Move, SearchError> {
        let index = board
            .empty_indices()
            .choose(&mut self.rng)
            .ok_or(SearchError::NoLegalMoves)?;
        Move::place(board, index, mark).map_err(|_| SearchError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
