//! Automated players: the alpha-beta search engine and a random baseline.

mod agent;
pub mod minimax;
mod random;

pub use agent::Agent;
pub use minimax::{
    alpha_beta, best_move, depth_cap, effective_depth, generate_moves, search, MinimaxAgent,
    SearchOutcome,
};
pub use random::RandomAgent;
