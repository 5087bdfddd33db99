use crate::game::Mark;

/// Result of a single automated match within a series.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MatchRecord {
    /// Zero-based game number within the series
    pub game: usize,
    /// Series slot (0 or 1) of the agent that played X
    pub x_slot: usize,
    pub x_agent: String,
    pub o_agent: String,
    pub winner: Option<Mark>,
    pub moves: usize,
    /// Final position, one row per line
    pub board: String,
}

impl MatchRecord {
    /// Series slot of the winning agent, if the match was not drawn.
    pub fn winner_slot(&self) -> Option<usize> {
        self.winner.map(|mark| match mark {
            Mark::X => self.x_slot,
            Mark::O => 1 - self.x_slot,
        })
    }
}

/// Tally of a series between two agents.
#[derive(Debug, Clone, Default)]
pub struct SeriesMetrics {
    records: Vec<MatchRecord>,
}

impl SeriesMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: MatchRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn total_games(&self) -> usize {
        self.records.len()
    }

    /// Games won by the agent in series slot `slot`.
    pub fn wins(&self, slot: usize) -> usize {
        self.records
            .iter()
            .filter(|r| r.winner_slot() == Some(slot))
            .count()
    }

    pub fn draws(&self) -> usize {
        self.records.iter().filter(|r| r.winner.is_none()).count()
    }

    /// Win rate of the agent in series slot `slot`.
    pub fn win_rate(&self, slot: usize) -> f32 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.wins(slot) as f32 / self.records.len() as f32
    }

    pub fn draw_rate(&self) -> f32 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.draws() as f32 / self.records.len() as f32
    }

    /// Average number of moves per game.
    pub fn average_length(&self) -> f32 {
        if self.records.is_empty() {
            return 0.0;
        }
        let total: usize = self.records.iter().map(|r| r.moves).sum();
        total as f32 / self.records.len() as f32
    }
}
