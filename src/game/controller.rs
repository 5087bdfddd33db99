use tracing::info;

use super::{Board, Move, Player, Status};
use crate::ai::{Agent, MinimaxAgent};
use crate::error::MatchError;

/// Runs one match: owns the live board and both players, alternates turns
/// starting with player one, and stops as soon as a line is completed or
/// the board fills.
#[derive(Debug)]
pub struct MatchController {
    board: Board,
    players: [Player; 2],
    current: usize,
    status: Status,
    history: Vec<Move>,
    engine: MinimaxAgent,
}

impl MatchController {
    pub fn new(board: Board, players: [Player; 2], engine: MinimaxAgent) -> Result<Self, MatchError> {
        if players[0].mark() == players[1].mark() {
            return Err(MatchError::DuplicateMark(players[0].mark().as_char()));
        }
        let status = board.status();
        Ok(MatchController {
            board,
            players,
            current: 0,
            status,
            history: Vec::new(),
            engine,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Moves played so far, oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn winner(&self) -> Option<&Player> {
        match self.status {
            Status::Win(mark) => self.players.iter().find(|p| p.mark() == mark),
            _ => None,
        }
    }

    /// Apply a human move at `index`. Rejects out-of-range and occupied cells.
    pub fn play_human(&mut self, index: usize) -> Result<Status, MatchError> {
        self.ensure_in_progress()?;
        if !self.current_player().is_human() {
            return Err(MatchError::NotHumanTurn);
        }
        let mv = Move::place(&self.board, index, self.current_player().mark())?;
        Ok(self.commit(mv))
    }

    /// Let the built-in search engine move for the current player.
    pub fn play_automated(&mut self) -> Result<Status, MatchError> {
        self.ensure_in_progress()?;
        let mark = self.current_player().mark();
        let mv = self.engine.select_move(&self.board, mark)?;
        self.apply(mv)
    }

    /// Let `agent` move for the current player.
    pub fn play_agent(&mut self, agent: &mut dyn Agent) -> Result<Status, MatchError> {
        self.ensure_in_progress()?;
        let mark = self.current_player().mark();
        let mv = agent.select_move(&self.board, mark)?;
        self.apply(mv)
    }

    /// Take back the last move, restoring the board and the turn.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        self.board = mv.before().clone();
        self.current = 1 - self.current;
        self.status = self.board.status();
        info!(index = mv.index(), "move undone");
        Some(mv)
    }

    fn ensure_in_progress(&self) -> Result<(), MatchError> {
        if self.is_over() {
            Err(MatchError::GameOver)
        } else {
            Ok(())
        }
    }

    fn apply(&mut self, mv: Move) -> Result<Status, MatchError> {
        if mv.before() != &self.board || mv.mark() != self.current_player().mark() {
            return Err(MatchError::ForeignMove);
        }
        Ok(self.commit(mv))
    }

    fn commit(&mut self, mv: Move) -> Status {
        self.board = mv.after().clone();
        info!(
            player = self.current_player().name(),
            mark = %mv.mark().as_char(),
            index = mv.index(),
            "move applied"
        );
        self.history.push(mv);
        self.status = self.board.status();
        self.current = 1 - self.current;

        if self.status.is_terminal() {
            info!(status = ?self.status, moves = self.history.len(), "match over");
        }
        self.status
    }
}
