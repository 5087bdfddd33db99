use super::board::{Board, Cell};
use super::player::Mark;
use crate::error::{BoardError, MoveError};

/// One ply: the board before and after a single mark was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    before: Board,
    after: Board,
    index: usize,
    mark: Mark,
}

impl Move {
    /// Build a move from two snapshots that differ in exactly one cell,
    /// empty in `before`.
    pub fn new(before: Board, after: Board) -> Result<Self, MoveError> {
        if before.side() != after.side() {
            return Err(MoveError::DimensionMismatch);
        }

        let changed: Vec<usize> = before
            .cells()
            .iter()
            .zip(after.cells())
            .enumerate()
            .filter(|(_, (b, a))| b != a)
            .map(|(i, _)| i)
            .collect();

        let (index, mark) = match changed.as_slice() {
            [index] => match (before.cells()[*index], after.cells()[*index].mark()) {
                (Cell::Empty, Some(mark)) => (*index, mark),
                _ => return Err(MoveError::CellNotEmpty { index: *index }),
            },
            _ => {
                return Err(MoveError::NotSingleCell {
                    changed: changed.len(),
                })
            }
        };

        Ok(Move {
            before,
            after,
            index,
            mark,
        })
    }

    /// Clone `board` and place `mark` at `index`.
    pub fn place(board: &Board, index: usize, mark: Mark) -> Result<Self, BoardError> {
        let mut after = board.clone();
        after.place(index, mark)?;
        Ok(Move {
            before: board.clone(),
            after,
            index,
            mark,
        })
    }

    pub fn before(&self) -> &Board {
        &self.before
    }

    pub fn after(&self) -> &Board {
        &self.after
    }

    /// Index of the cell this move filled
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn into_after(self) -> Board {
        self.after
    }
}
