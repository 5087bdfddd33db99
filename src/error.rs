use std::path::PathBuf;

/// Errors raised by board construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board dimensions {rows}x{cols} (need a square board of side 1..={max})")]
    InvalidDimensions { rows: usize, cols: usize, max: usize },

    #[error("cell index {index} is out of range (board has {cell_count} cells)")]
    IndexOutOfRange { index: usize, cell_count: usize },

    #[error("cell {index} is already occupied")]
    CellOccupied { index: usize },

    #[error("failed to parse board: {0}")]
    Parse(String),
}

/// Errors raised when a `Move` is built from two boards that are not one ply apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("boards have different dimensions")]
    DimensionMismatch,

    #[error("a move must fill exactly one empty cell ({changed} cells changed)")]
    NotSingleCell { changed: usize },

    #[error("cell {index} was not filled from empty")]
    CellNotEmpty { index: usize },
}

/// Errors raised by the search engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal moves: the game is already decided")]
    NoLegalMoves,
}

/// Errors surfaced by the match controller to the calling layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("both players use mark {0}")]
    DuplicateMark(char),

    #[error("the match is already over")]
    GameOver,

    #[error("it is not a human player's turn")]
    NotHumanTurn,

    #[error("invalid move: {0}")]
    InvalidMove(#[from] BoardError),

    #[error("agent returned a move that does not apply to the live board")]
    ForeignMove,

    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
