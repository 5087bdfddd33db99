//! Static position evaluation, always from X's perspective.
//!
//! A board completed by a line scores `±win_score()`. Any other board
//! scores `side_score(X) - side_score(O)`, where a side earns:
//!
//! - one point for every line the opponent has not yet touched,
//! - `base^k` for every such line already holding `k` of its marks,
//! - a fork bonus of `count * base^k_max`, `k_max` being its best open
//!   line and `count` how many open lines reach it.
//!
//! With `base = 2 * lines + 1` a non-terminal side score stays below
//! `2 * base^side`, so `win_score = base^(side + 1)` dominates every
//! heuristic value.

use super::board::{Board, Cell};
use super::player::Mark;

impl Board {
    /// Score of a board completed by an X line. O wins score the negation.
    pub fn win_score(&self) -> f64 {
        self.score_base().powi(self.side() as i32 + 1)
    }

    /// Position score from X's perspective. Positive favours X.
    pub fn evaluate(&self) -> f64 {
        match self.winning_mark() {
            Some(Mark::X) => self.win_score(),
            Some(Mark::O) => -self.win_score(),
            None => self.side_score(Mark::X) - self.side_score(Mark::O),
        }
    }

    fn score_base(&self) -> f64 {
        (2 * self.line_count() + 1) as f64
    }

    fn side_score(&self, mark: Mark) -> f64 {
        let base = self.score_base();
        let own = mark.to_cell();

        let mut open_lines = 0usize;
        let mut tiers = 0.0;
        let mut best_held = 0usize;
        let mut forks = 0usize;

        for line in self.lines() {
            let mut held = 0usize;
            let mut blocked = false;
            for cell in line.cells() {
                if cell == own {
                    held += 1;
                } else if cell != Cell::Empty {
                    blocked = true;
                    break;
                }
            }
            if blocked {
                continue;
            }

            open_lines += 1;
            if held == 0 {
                continue;
            }
            tiers += base.powi(held as i32);
            if held > best_held {
                best_held = held;
                forks = 1;
            } else if held == best_held {
                forks += 1;
            }
        }

        let fork_bonus = if best_held > 0 {
            forks as f64 * base.powi(best_held as i32)
        } else {
            0.0
        };

        open_lines as f64 + tiers + fork_bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn swap_marks(board: &Board) -> Board {
        let swapped: String = board
            .cells()
            .iter()
            .map(|c| match c {
                Cell::X => 'O',
                Cell::O => 'X',
                Cell::Empty => '-',
            })
            .collect();
        swapped.parse().unwrap()
    }

    fn random_board(rng: &mut StdRng, side: usize) -> Board {
        let mut board = Board::square(side).unwrap();
        for index in 0..board.cell_count() {
            match rng.random_range(0..3) {
                0 => board.place(index, Mark::X).unwrap(),
                1 => board.place(index, Mark::O).unwrap(),
                _ => {}
            }
        }
        board
    }

    /// Decode `code` as a base-3 digit string, one digit per cell.
    fn board_from_code(side: usize, mut code: usize) -> Board {
        let mut board = Board::square(side).unwrap();
        for index in 0..board.cell_count() {
            match code % 3 {
                1 => board.place(index, Mark::X).unwrap(),
                2 => board.place(index, Mark::O).unwrap(),
                _ => {}
            }
            code /= 3;
        }
        board
    }

    #[test]
    fn empty_board_scores_zero() {
        for side in 1..=6 {
            let b = Board::square(side).unwrap();
            assert_eq!(b.evaluate(), 0.0, "side {side}");
        }
    }

    #[test]
    fn completed_lines_score_win() {
        let x_win = board("X X X O O - - - -");
        let o_win = board("X X - O O O X - -");
        assert_eq!(x_win.evaluate(), x_win.win_score());
        assert_eq!(o_win.evaluate(), -o_win.win_score());
    }

    #[test]
    fn drawn_board_without_open_lines_scores_zero() {
        let b = board("X O X X O O O X X");
        assert_eq!(b.evaluate(), 0.0);
    }

    #[test]
    fn center_beats_edge() {
        let center = board("- - - - X - - - -");
        let edge = board("- X - - - - - - -");
        assert!(center.evaluate() > edge.evaluate());
        assert!(edge.evaluate() > 0.0);
    }

    #[test]
    fn deeper_threat_scores_higher() {
        let two = board("X X - - O - - - -");
        let one = board("X - - - O - - - -");
        assert!(two.evaluate() > one.evaluate());
    }

    #[test]
    fn score_is_antisymmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        for side in 1..=5 {
            for _ in 0..200 {
                let b = random_board(&mut rng, side);
                let swapped = swap_marks(&b);
                assert_eq!(swapped.evaluate(), -b.evaluate(), "board:\n{b}");
            }
        }
    }

    #[test]
    fn win_dominates_every_3x3_heuristic() {
        let win = Board::square(3).unwrap().win_score();
        let mut max_heuristic: f64 = 0.0;
        for code in 0..3usize.pow(9) {
            let b = board_from_code(3, code);
            if b.winning_mark().is_none() {
                max_heuristic = max_heuristic.max(b.evaluate().abs());
            }
        }
        assert!(max_heuristic > 0.0);
        assert!(max_heuristic < win, "{max_heuristic} >= {win}");
    }

    #[test]
    fn win_dominates_heuristic_on_larger_boards() {
        let mut rng = StdRng::seed_from_u64(11);
        for side in 4..=8 {
            for _ in 0..300 {
                let b = random_board(&mut rng, side);
                if b.winning_mark().is_none() {
                    assert!(b.evaluate().abs() < b.win_score(), "board:\n{b}");
                }
            }
        }
    }

    #[test]
    fn win_score_is_finite_on_largest_board() {
        let b = Board::square(crate::game::MAX_SIDE).unwrap();
        assert!(b.win_score().is_finite());
        assert!(Board::square(17).unwrap().win_score().is_finite());
    }

    #[test]
    fn win_dominates_near_complete_line_on_largest_board() {
        let side = crate::game::MAX_SIDE;
        let mut b = Board::square(side).unwrap();
        for col in 0..side - 1 {
            b.place(col, Mark::X).unwrap();
        }
        let score = b.evaluate();
        assert!(score.is_finite());
        assert!(score > 0.0 && score < b.win_score());
    }

    #[test]
    fn evaluate_is_pure() {
        let b = board("X - O - X - - - -");
        let copy = b.clone();
        assert_eq!(b.evaluate(), copy.evaluate());
        assert_eq!(b.evaluate(), b.evaluate());
    }
}
