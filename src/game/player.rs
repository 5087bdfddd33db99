use super::board::Cell;

/// The mark a player places. X is the maximizing side of the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing mark
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert mark to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }

    pub fn as_char(self) -> char {
        self.to_cell().as_char()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Automated,
}

/// A participant in a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    kind: PlayerKind,
    mark: Mark,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind, mark: Mark) -> Self {
        Player {
            name: name.into(),
            kind,
            mark,
        }
    }

    pub fn human(name: impl Into<String>, mark: Mark) -> Self {
        Self::new(name, PlayerKind::Human, mark)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }
}

/// Hands out default names for automated players.
///
/// The setup layer owns one roster per session and resets it between
/// matches, so numbering restarts at 1 for every new game.
#[derive(Debug, Default)]
pub struct PlayerRoster {
    automated: usize,
}

impl PlayerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an automated player named `Computer <n>`.
    pub fn automated(&mut self, mark: Mark) -> Player {
        self.automated += 1;
        Player::new(
            format!("Computer {}", self.automated),
            PlayerKind::Automated,
            mark,
        )
    }

    pub fn reset(&mut self) {
        self.automated = 0;
    }
}
