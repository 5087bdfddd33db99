use tracing::debug;

use crate::error::SearchError;
use crate::game::{Board, Mark, Move, Status};

use super::agent::Agent;

/// Result of a single best-move search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Move,
    /// Score of `best` from the acting side's perspective
    pub score: f64,
    /// Depth limit the search ran with
    pub depth: usize,
    /// Board positions visited, root candidates included
    pub nodes: u64,
}

/// One move per empty cell, in ascending index order.
pub fn generate_moves(board: &Board, mark: Mark) -> Vec<Move> {
    board
        .empty_indices()
        .filter_map(|index| Move::place(board, index, mark).ok())
        .collect()
}

/// Pick the move that maximizes `mark`'s prospects.
pub fn best_move(board: &Board, mark: Mark, depth_limit: usize) -> Result<Move, SearchError> {
    search(board, mark, depth_limit).map(|outcome| outcome.best)
}

/// Score every candidate with alpha-beta and keep the strictly best one.
///
/// A candidate that wins on the spot is returned without searching the rest.
/// Ties keep the earliest candidate. A `depth_limit` of 0 searches one ply.
/// A board that is already won or full has no legal moves.
pub fn search(board: &Board, mark: Mark, depth_limit: usize) -> Result<SearchOutcome, SearchError> {
    if board.status().is_terminal() {
        return Err(SearchError::NoLegalMoves);
    }
    let depth = depth_limit.max(1);
    let candidates = generate_moves(board, mark);
    if candidates.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }

    let mut nodes = 0u64;
    let mut best: Option<(Move, f64)> = None;

    for candidate in candidates {
        nodes += 1;
        if candidate.after().status() == Status::Win(mark) {
            let score = candidate.after().win_score();
            return Ok(SearchOutcome {
                best: candidate,
                score,
                depth,
                nodes,
            });
        }

        let value = alpha_beta_counted(
            candidate.after(),
            depth - 1,
            f64::NEG_INFINITY,
            f64::INFINITY,
            mark.other(),
            &mut nodes,
        );
        // Scores are from X's perspective
        let score = match mark {
            Mark::X => value,
            Mark::O => -value,
        };

        if best.as_ref().map_or(true, |(_, best_score)| score > *best_score) {
            best = Some((candidate, score));
        }
    }

    let (best, score) = best.ok_or(SearchError::NoLegalMoves)?;
    Ok(SearchOutcome {
        best,
        score,
        depth,
        nodes,
    })
}

/// Fail-soft alpha-beta minimax. X maximizes, O minimizes, `to_move` is
/// the side placing the next mark.
pub fn alpha_beta(board: &Board, depth: usize, alpha: f64, beta: f64, to_move: Mark) -> f64 {
    let mut nodes = 0;
    alpha_beta_counted(board, depth, alpha, beta, to_move, &mut nodes)
}

fn alpha_beta_counted(
    board: &Board,
    depth: usize,
    mut alpha: f64,
    mut beta: f64,
    to_move: Mark,
    nodes: &mut u64,
) -> f64 {
    if depth == 0 || board.status() != Status::InProgress {
        return board.evaluate();
    }

    match to_move {
        Mark::X => {
            let mut best = f64::NEG_INFINITY;
            for child in children(board, to_move) {
                *nodes += 1;
                let score = alpha_beta_counted(&child, depth - 1, alpha, beta, Mark::O, nodes);
                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
        Mark::O => {
            let mut best = f64::INFINITY;
            for child in children(board, to_move) {
                *nodes += 1;
                let score = alpha_beta_counted(&child, depth - 1, alpha, beta, Mark::X, nodes);
                best = best.min(score);
                beta = beta.min(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
    }
}

/// Successor boards in generation order, cloned lazily so pruned
/// branches are never built.
fn children(board: &Board, mark: Mark) -> impl Iterator<Item = Board> + '_ {
    board.empty_indices().filter_map(move |index| {
        let mut child = board.clone();
        child.place(index, mark).ok().map(|_| child)
    })
}

/// Depth ceiling for a board of the given side length.
pub fn depth_cap(side: usize) -> usize {
    if side > 7 {
        1
    } else if side > 5 {
        3
    } else if side > 3 {
        5
    } else {
        10
    }
}

/// Resolve a requested depth against the board.
///
/// `None` or `Some(0)` means "every remaining empty cell". The result never
/// exceeds the empty cell count, is at least 1, and honours [`depth_cap`]
/// when `cap` is set.
pub fn effective_depth(board: &Board, requested: Option<usize>, cap: bool) -> usize {
    let remaining = board.empty_count();
    let mut depth = match requested {
        Some(d) if d > 0 => d.min(remaining),
        _ => remaining,
    };
    if cap {
        depth = depth.min(depth_cap(board.side()));
    }
    depth.max(1)
}

/// Alpha-beta agent with a configurable depth policy.
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    depth: Option<usize>,
    cap: bool,
}

impl MinimaxAgent {
    pub fn new(depth: Option<usize>, cap: bool) -> Self {
        MinimaxAgent { depth, cap }
    }

    /// Search every remaining ply, subject to the size-based cap.
    pub fn full() -> Self {
        Self::new(None, true)
    }

    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    pub fn caps_depth(&self) -> bool {
        self.cap
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::full()
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<Move, SearchError> {
        let depth = effective_depth(board, self.depth, self.cap);
        let outcome = search(board, mark, depth)?;
        debug!(
            mark = %mark.as_char(),
            depth = outcome.depth,
            nodes = outcome.nodes,
            score = outcome.score,
            index = outcome.best.index(),
            "search complete"
        );
        Ok(outcome.best)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
