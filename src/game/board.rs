use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::player::Mark;
use crate::error::BoardError;

/// Largest supported side length. Terminal scores are
/// `(4 * side + 5)^(side + 1)`, which overflows `f64` from side 115 on.
pub const MAX_SIDE: usize = 114;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' | '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// The mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
        }
    }
}

/// Result of checking a board for completed lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Win(Mark),
    Draw,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::InProgress
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
    Row(usize),
    Column(usize),
}

#[derive(Debug, PartialEq, Eq)]
struct Line {
    kind: LineKind,
    indices: Vec<usize>,
}

/// Cell index tables for every line of a board, shared by all clones.
///
/// Lines are stored in status-check order: both diagonals, then the rows,
/// then the columns.
#[derive(Debug, PartialEq, Eq)]
struct Layout {
    lines: Vec<Line>,
}

impl Layout {
    fn new(side: usize) -> Self {
        let mut lines = Vec::with_capacity(2 * side + 2);
        lines.push(Line {
            kind: LineKind::Diagonal,
            indices: (0..side).map(|i| i * side + i).collect(),
        });
        lines.push(Line {
            kind: LineKind::AntiDiagonal,
            indices: (0..side).map(|i| i * side + (side - 1 - i)).collect(),
        });
        for row in 0..side {
            lines.push(Line {
                kind: LineKind::Row(row),
                indices: (0..side).map(|col| row * side + col).collect(),
            });
        }
        for col in 0..side {
            lines.push(Line {
                kind: LineKind::Column(col),
                indices: (0..side).map(|row| row * side + col).collect(),
            });
        }
        Layout { lines }
    }
}

/// A read-only view of one line, reading through to the board's cells.
#[derive(Debug, Clone, Copy)]
pub struct LineView<'a> {
    board: &'a Board,
    line: &'a Line,
}

impl<'a> LineView<'a> {
    pub fn kind(&self) -> LineKind {
        self.line.kind
    }

    pub fn indices(&self) -> &'a [usize] {
        &self.line.indices
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + 'a {
        let cells = &self.board.cells;
        self.line.indices.iter().map(move |&i| cells[i])
    }

    pub fn len(&self) -> usize {
        self.line.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.indices.is_empty()
    }

    /// The mark filling this line, if it is complete
    pub fn complete(&self) -> Option<Mark> {
        Board::line_complete(self.cells())
    }
}

/// An N×N grid stored as one flat row-major cell array.
#[derive(Debug, Clone)]
pub struct Board {
    side: usize,
    cells: Vec<Cell>,
    layout: Arc<Layout>,
}

impl Board {
    /// Create an empty board. Only square boards are supported.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 || rows != cols || rows > MAX_SIDE {
            return Err(BoardError::InvalidDimensions {
                rows,
                cols,
                max: MAX_SIDE,
            });
        }
        Ok(Board {
            side: rows,
            cells: vec![Cell::Empty; rows * cols],
            layout: Arc::new(Layout::new(rows)),
        })
    }

    pub fn square(side: usize) -> Result<Self, BoardError> {
        Self::new(side, side)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Row-major index of `(row, col)`
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.side && col < self.side).then(|| row * self.side + col)
    }

    /// Check if a cell is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        self.get(index) == Some(Cell::Empty)
    }

    /// Put `mark` into an empty cell.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), BoardError> {
        let cell_count = self.cells.len();
        match self.cells.get_mut(index) {
            None => Err(BoardError::IndexOutOfRange { index, cell_count }),
            Some(cell) if *cell != Cell::Empty => Err(BoardError::CellOccupied { index }),
            Some(cell) => {
                *cell = mark.to_cell();
                Ok(())
            }
        }
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    /// Indices of all empty cells in ascending order
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    pub fn row(&self, row: usize) -> Option<LineView<'_>> {
        (row < self.side).then(|| self.view(2 + row))
    }

    pub fn column(&self, col: usize) -> Option<LineView<'_>> {
        (col < self.side).then(|| self.view(2 + self.side + col))
    }

    pub fn diagonal(&self) -> LineView<'_> {
        self.view(0)
    }

    pub fn anti_diagonal(&self) -> LineView<'_> {
        self.view(1)
    }

    /// Every line in status-check order: diagonals, rows, columns.
    pub fn lines(&self) -> impl Iterator<Item = LineView<'_>> + '_ {
        self.layout
            .lines
            .iter()
            .map(move |line| LineView { board: self, line })
    }

    pub fn line_count(&self) -> usize {
        self.layout.lines.len()
    }

    fn view(&self, slot: usize) -> LineView<'_> {
        LineView {
            board: self,
            line: &self.layout.lines[slot],
        }
    }

    /// The mark filling every cell of `cells`, or `None` if any cell is
    /// empty, the marks differ, or the line has no cells.
    pub fn line_complete<I>(cells: I) -> Option<Mark>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut cells = cells.into_iter();
        let first = cells.next()?;
        let mark = first.mark()?;
        cells.all(|c| c == first).then_some(mark)
    }

    /// The first completed line decides the game; otherwise a full board is a draw.
    pub fn status(&self) -> Status {
        if let Some(mark) = self.winning_mark() {
            return Status::Win(mark);
        }
        if self.is_full() {
            Status::Draw
        } else {
            Status::InProgress
        }
    }

    pub(crate) fn winning_mark(&self) -> Option<Mark> {
        self.lines().find_map(|line| line.complete())
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.side == other.side && self.cells == other.cells
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.side) {
            let line: Vec<String> = row.iter().map(|c| c.as_char().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse `X`, `O` and `-` (or `.`) characters, ignoring whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                Cell::from_char(c).ok_or_else(|| BoardError::Parse(format!("unexpected character '{c}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let side = (1..=MAX_SIDE)
            .find(|side| side * side == cells.len())
            .ok_or_else(|| {
                BoardError::Parse(format!("{} cells do not form a square board", cells.len()))
            })?;

        let mut board = Board::square(side)?;
        board.cells = cells;
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::square(3).unwrap();
        assert_eq!(board.cell_count(), 9);
        assert_eq!(board.empty_count(), 9);
        assert!((0..9).all(|i| board.is_empty(i)));
        assert_eq!(board.line_count(), 8);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Board::new(0, 3),
            Err(BoardError::InvalidDimensions { rows: 0, cols: 3, .. })
        ));
        assert!(Board::new(3, 0).is_err());
        assert!(Board::new(3, 4).is_err());
        assert!(Board::square(MAX_SIDE + 1).is_err());
        assert!(Board::square(MAX_SIDE).is_ok());
    }

    #[test]
    fn test_sides_beyond_classic_sizes() {
        for side in [17, 32, 64] {
            let board = Board::square(side).unwrap();
            assert_eq!(board.cell_count(), side * side);
            assert_eq!(board.line_count(), 2 * side + 2);
        }
        let text = vec!["-"; 17 * 17].join(" ");
        let parsed: Board = text.parse().unwrap();
        assert_eq!(parsed.side(), 17);
    }

    #[test]
    fn test_place() {
        let mut board = Board::square(3).unwrap();
        board.place(4, Mark::X).unwrap();
        assert_eq!(board.get(4), Some(Cell::X));
        assert!(!board.is_empty(4));
        assert_eq!(board.empty_count(), 8);
    }

    #[test]
    fn test_place_occupied_cell() {
        let mut board = Board::square(3).unwrap();
        board.place(0, Mark::X).unwrap();
        assert_eq!(
            board.place(0, Mark::O),
            Err(BoardError::CellOccupied { index: 0 })
        );
        assert_eq!(board.get(0), Some(Cell::X));
    }

    #[test]
    fn test_place_out_of_range() {
        let mut board = Board::square(3).unwrap();
        assert_eq!(
            board.place(9, Mark::X),
            Err(BoardError::IndexOutOfRange {
                index: 9,
                cell_count: 9
            })
        );
        assert!(!board.is_empty(9));
    }

    #[test]
    fn test_views_cover_expected_cells() {
        let board = Board::square(3).unwrap();
        assert_eq!(board.row(1).unwrap().indices(), &[3, 4, 5]);
        assert_eq!(board.column(2).unwrap().indices(), &[2, 5, 8]);
        assert_eq!(board.diagonal().indices(), &[0, 4, 8]);
        assert_eq!(board.anti_diagonal().indices(), &[2, 4, 6]);
        assert!(board.row(3).is_none());
        assert!(board.column(3).is_none());
    }

    #[test]
    fn test_every_cell_in_one_row_and_one_column() {
        let board = Board::square(5).unwrap();
        for index in 0..board.cell_count() {
            let rows = (0..5)
                .filter(|&r| board.row(r).unwrap().indices().contains(&index))
                .count();
            let cols = (0..5)
                .filter(|&c| board.column(c).unwrap().indices().contains(&index))
                .count();
            assert_eq!((rows, cols), (1, 1), "cell {index}");
        }
    }

    #[test]
    fn test_views_read_live_cells() {
        let mut board = Board::square(3).unwrap();
        board.place(4, Mark::O).unwrap();
        let cells: Vec<Cell> = board.diagonal().cells().collect();
        assert_eq!(cells, vec![Cell::Empty, Cell::O, Cell::Empty]);
    }

    #[test]
    fn test_line_complete() {
        assert_eq!(Board::line_complete([Cell::X, Cell::X, Cell::X]), Some(Mark::X));
        assert_eq!(Board::line_complete([Cell::O, Cell::O]), Some(Mark::O));
        assert_eq!(Board::line_complete([Cell::X, Cell::O, Cell::X]), None);
        assert_eq!(Board::line_complete([Cell::Empty, Cell::Empty]), None);
        assert_eq!(Board::line_complete([Cell::X, Cell::X, Cell::Empty]), None);
        assert_eq!(Board::line_complete(std::iter::empty()), None);
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(Board::square(3).unwrap().status(), Status::InProgress);
    }

    #[test]
    fn test_top_row_win() {
        let mut board = Board::square(3).unwrap();
        for index in 0..3 {
            board.place(index, Mark::X).unwrap();
        }
        assert_eq!(board.status(), Status::Win(Mark::X));
    }

    #[test]
    fn test_column_and_diagonal_wins() {
        assert_eq!(board("O X - O X - O - -").status(), Status::Win(Mark::O));
        assert_eq!(board("X O - O X - - - X").status(), Status::Win(Mark::X));
        assert_eq!(board("- - O - O X O X X").status(), Status::Win(Mark::O));
    }

    #[test]
    fn test_main_diagonal_checked_first() {
        // On even boards the two diagonals are disjoint and can both be complete
        let b = board("O - - X  - O X -  - X O -  X - - O");
        assert_eq!(b.diagonal().complete(), Some(Mark::O));
        assert_eq!(b.anti_diagonal().complete(), Some(Mark::X));
        assert_eq!(b.status(), Status::Win(Mark::O));
    }

    #[test]
    fn test_draw() {
        let b = board("X O X X O O O X X");
        assert_eq!(b.status(), Status::Draw);
    }

    #[test]
    fn test_win_on_full_board_is_not_draw() {
        let b = board("X X X O O X O X O");
        assert_eq!(b.status(), Status::Win(Mark::X));
    }

    #[test]
    fn test_status_is_stable() {
        let b = board("X O - - X - O - -");
        assert_eq!(b.status(), b.status());
    }

    #[test]
    fn test_single_cell_board() {
        let mut b = Board::square(1).unwrap();
        assert_eq!(b.status(), Status::InProgress);
        b.place(0, Mark::O).unwrap();
        assert_eq!(b.status(), Status::Win(Mark::O));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = board("X - - - O - - - -");
        let mut copy = original.clone();
        copy.place(8, Mark::X).unwrap();
        assert_eq!(original.get(8), Some(Cell::Empty));
        assert_ne!(original, copy);
    }

    #[test]
    fn test_empty_indices_ascending() {
        let b = board("X O - X - O - X O");
        assert_eq!(b.empty_indices().collect::<Vec<_>>(), vec![2, 4, 6]);
    }

    #[test]
    fn test_display() {
        let b = board("X O - - X - O - -");
        assert_eq!(b.to_string(), "X O -\n- X -\nO - -\n");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!("X O".parse::<Board>(), Err(BoardError::Parse(_))));
        assert!(matches!("X O Z -".parse::<Board>(), Err(BoardError::Parse(_))));
        assert!(matches!("".parse::<Board>(), Err(BoardError::Parse(_))));
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let b = board("X O - - X - O - -");
        assert_eq!(b.to_string().parse::<Board>().unwrap(), b);
    }
}
