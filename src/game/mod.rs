//! Core game logic: the N×N board with its line views and evaluator,
//! moves, players, and the match controller.

mod board;
mod controller;
mod evaluate;
mod moves;
mod player;

pub use board::{Board, Cell, LineKind, LineView, Status, MAX_SIDE};
pub use controller::MatchController;
pub use moves::Move;
pub use player::{Mark, Player, PlayerKind, PlayerRoster};
