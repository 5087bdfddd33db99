use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::MAX_SIDE;

/// Who sits across from the human in `play`, or from the engine in `duel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    Human,
    Minimax,
    Random,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Board side length
    pub size: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig { size: 3 }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search depth; 0 searches every remaining empty cell
    pub depth: usize,
    /// Apply the board-size depth tiers
    pub depth_cap: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 0,
            depth_cap: true,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub player_name: String,
    pub computer_first: bool,
    pub versus: Opponent,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            player_name: "Player".into(),
            computer_first: false,
            versus: Opponent::Minimax,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    pub games: usize,
    pub opponent: Opponent,
    /// Swap who moves first every game
    pub alternate: bool,
    pub seed: Option<u64>,
}

impl Default for DuelConfig {
    fn default() -> Self {
        DuelConfig {
            games: 10,
            opponent: Opponent::Random,
            alternate: true,
            seed: None,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub search: SearchConfig,
    #[serde(rename = "match")]
    pub play: MatchConfig,
    pub duel: DuelConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.size == 0 || self.board.size > MAX_SIDE {
            return Err(ConfigError::Validation(format!(
                "board.size must be in 1..={MAX_SIDE}"
            )));
        }
        if self.search.depth > self.board.size * self.board.size {
            return Err(ConfigError::Validation(
                "search.depth must not exceed the number of cells".into(),
            ));
        }
        if self.play.player_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "match.player_name must not be empty".into(),
            ));
        }
        if self.duel.games == 0 {
            return Err(ConfigError::Validation("duel.games must be > 0".into()));
        }
        if self.duel.opponent == Opponent::Human {
            return Err(ConfigError::Validation(
                "duel.opponent must be minimax or random".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&AppConfig::default())
            .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
    }
}
