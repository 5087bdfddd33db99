use crate::error::SearchError;
use crate::game::{Board, Mark, Move};

/// Universal interface for automated players.
pub trait Agent {
    /// Choose a move for `mark` on `board`. The board is never mutated;
    /// the caller applies the returned move.
    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<Move, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
