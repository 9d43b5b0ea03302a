//! Match settings
//!
//! The configuration surface read once at match start. Stored as JSON so a
//! menu front-end and the headless runner can share one file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{COLORS, DEFAULT_LIVES};

/// Maximum human players (one per key-binding set)
pub const MAX_HUMANS: u32 = 2;
/// Maximum bots selectable from the options screen
pub const MAX_BOTS: u32 = 3;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("arena size selector {0} must be between 1 and 3")]
    InvalidArenaSize(u32),
    #[error("difficulty {0} must be between 1 and 3")]
    InvalidDifficulty(u32),
    #[error("{humans} humans exceeds the maximum of {max}", max = MAX_HUMANS)]
    TooManyHumans { humans: u32 },
    #[error("{bots} bots exceeds the maximum of {max}", max = MAX_BOTS)]
    TooManyBots { bots: u32 },
    #[error("a match needs at least two cycles, got {0}")]
    NotEnoughEntities(u32),
    #[error("{0} cycles exceeds the palette of {max} colors", max = COLORS.len())]
    TooManyEntities(u32),
    #[error("lives must be at least 1")]
    NoLives,
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Arena window presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ArenaSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ArenaSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArenaSize::Small => "Small",
            ArenaSize::Medium => "Medium",
            ArenaSize::Large => "Large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" => Some(ArenaSize::Small),
            "medium" | "med" => Some(ArenaSize::Medium),
            "large" => Some(ArenaSize::Large),
            _ => None,
        }
    }

    /// Options-screen selector (1..=3)
    pub fn from_selector(selector: u32) -> Result<Self, SettingsError> {
        match selector {
            1 => Ok(ArenaSize::Small),
            2 => Ok(ArenaSize::Medium),
            3 => Ok(ArenaSize::Large),
            other => Err(SettingsError::InvalidArenaSize(other)),
        }
    }

    /// Window dimensions in world units
    pub fn dimensions(&self) -> (i32, i32) {
        match self {
            ArenaSize::Small => (800, 600),
            ArenaSize::Medium => (1024, 768),
            ArenaSize::Large => (1280, 960),
        }
    }
}

/// AI skill level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_level(level: u32) -> Result<Self, SettingsError> {
        match level {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Normal),
            3 => Ok(Difficulty::Hard),
            other => Err(SettingsError::InvalidDifficulty(other)),
        }
    }

    pub fn level(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// Match settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena_size: ArenaSize,
    /// Human-controlled cycles
    pub humans: u32,
    /// AI-controlled cycles
    pub bots: u32,
    pub difficulty: Difficulty,
    /// Lives per cycle
    pub lives: u32,
    /// RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Run the 3-2-1 countdown before play
    pub countdown: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_size: ArenaSize::Medium,
            humans: 1,
            bots: 1,
            difficulty: Difficulty::Easy,
            lives: DEFAULT_LIVES,
            seed: None,
            countdown: true,
        }
    }
}

impl Settings {
    /// Total cycles in the match
    pub fn entity_count(&self) -> u32 {
        self.humans + self.bots
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.humans > MAX_HUMANS {
            return Err(SettingsError::TooManyHumans {
                humans: self.humans,
            });
        }
        if self.bots > MAX_BOTS {
            return Err(SettingsError::TooManyBots { bots: self.bots });
        }
        let total = self.entity_count();
        if total < 2 {
            return Err(SettingsError::NotEnoughEntities(total));
        }
        if total as usize > COLORS.len() {
            return Err(SettingsError::TooManyEntities(total));
        }
        if self.lives == 0 {
            return Err(SettingsError::NoLives);
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_selector_ranges() {
        assert_eq!(ArenaSize::from_selector(1).unwrap(), ArenaSize::Small);
        assert_eq!(ArenaSize::from_selector(3).unwrap(), ArenaSize::Large);
        assert!(matches!(
            ArenaSize::from_selector(4),
            Err(SettingsError::InvalidArenaSize(4))
        ));
        assert_eq!(Difficulty::from_level(2).unwrap(), Difficulty::Normal);
        assert!(matches!(
            Difficulty::from_level(0),
            Err(SettingsError::InvalidDifficulty(0))
        ));
    }

    #[test]
    fn test_arena_size_from_str() {
        assert_eq!(ArenaSize::from_str("LARGE"), Some(ArenaSize::Large));
        assert_eq!(ArenaSize::from_str("med"), Some(ArenaSize::Medium));
        assert_eq!(ArenaSize::from_str("huge"), None);
    }

    #[test]
    fn test_entity_count_limits() {
        let lonely = Settings {
            humans: 1,
            bots: 0,
            ..Settings::default()
        };
        assert!(matches!(
            lonely.validate(),
            Err(SettingsError::NotEnoughEntities(1))
        ));

        let crowded = Settings {
            humans: 2,
            bots: 3,
            ..Settings::default()
        };
        assert!(crowded.validate().is_ok());

        let too_many_bots = Settings {
            humans: 0,
            bots: 4,
            ..Settings::default()
        };
        assert!(matches!(
            too_many_bots.validate(),
            Err(SettingsError::TooManyBots { bots: 4 })
        ));

        let no_lives = Settings {
            lives: 0,
            ..Settings::default()
        };
        assert!(matches!(no_lives.validate(), Err(SettingsError::NoLives)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            arena_size: ArenaSize::Large,
            humans: 0,
            bots: 3,
            difficulty: Difficulty::Hard,
            lives: 5,
            seed: Some(42),
            countdown: false,
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "bots": 2, "difficulty": "Normal" }"#).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.bots, 2);
        assert_eq!(loaded.difficulty, Difficulty::Normal);
        assert_eq!(loaded.lives, DEFAULT_LIVES);
    }

    #[test]
    fn test_load_rejects_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Settings::load(&path),
            Err(SettingsError::Parse(_))
        ));

        fs::write(&path, r#"{ "humans": 0, "bots": 1 }"#).unwrap();
        assert!(matches!(
            Settings::load(&path),
            Err(SettingsError::NotEnoughEntities(1))
        ));

        assert!(matches!(
            Settings::load(&dir.path().join("missing.json")),
            Err(SettingsError::Io(_))
        ));
    }
}
