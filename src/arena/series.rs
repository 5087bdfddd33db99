use tracing::debug;

use super::metrics::{MatchRecord, SeriesMetrics};
use crate::ai::{Agent, MinimaxAgent};
use crate::error::MatchError;
use crate::game::{Board, Mark, MatchController, Player, PlayerKind, Status};

/// Play one automated match on a `side`×`side` board. `x` moves first.
pub fn play_match(
    side: usize,
    x: &mut dyn Agent,
    o: &mut dyn Agent,
) -> Result<MatchRecord, MatchError> {
    let board = Board::square(side)?;
    let players = [
        Player::new(x.name(), PlayerKind::Automated, Mark::X),
        Player::new(o.name(), PlayerKind::Automated, Mark::O),
    ];
    let mut game = MatchController::new(board, players, MinimaxAgent::default())?;

    while !game.is_over() {
        match game.current_player().mark() {
            Mark::X => game.play_agent(x)?,
            Mark::O => game.play_agent(o)?,
        };
    }

    let winner = match game.status() {
        Status::Win(mark) => Some(mark),
        _ => None,
    };
    Ok(MatchRecord {
        game: 0,
        x_slot: 0,
        x_agent: x.name().to_string(),
        o_agent: o.name().to_string(),
        winner,
        moves: game.history().len(),
        board: game.board().to_string(),
    })
}

/// Play `games` matches between `a` (slot 0) and `b` (slot 1).
///
/// With `alternate` set, the agents swap marks every game so neither
/// always moves first.
pub fn play_series(
    side: usize,
    games: usize,
    a: &mut dyn Agent,
    b: &mut dyn Agent,
    alternate: bool,
) -> Result<SeriesMetrics, MatchError> {
    // Reject a bad size up front, even for an empty series
    Board::square(side)?;

    let mut metrics = SeriesMetrics::new();
    for game in 0..games {
        let swapped = alternate && game % 2 == 1;
        let mut record = if swapped {
            play_match(side, b, a)?
        } else {
            play_match(side, a, b)?
        };
        record.game = game;
        record.x_slot = usize::from(swapped);
        debug!(
            game,
            winner = ?record.winner_slot(),
            moves = record.moves,
            "series game finished"
        );
        metrics.record(record);
    }
    Ok(metrics)
}
