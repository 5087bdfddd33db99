//! # Grid Tic-Tac-Toe
//!
//! Tic-tac-toe on any N×N board (N up to 114) where a side wins by filling
//! a whole row, column or diagonal. Automated players search with
//! depth-limited alpha-beta minimax over a line-based evaluation.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, evaluation, moves, players, match controller
//! - [`ai`] — Agent trait, minimax search engine, random baseline
//! - [`arena`] — Automated matches and series with result tallies
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
