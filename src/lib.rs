//! Light-cycle arena - a grid-based trail game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, motion, trail tracing, AI, rounds)
//! - `settings`: Match configuration and validation

pub mod settings;
pub mod sim;

pub use settings::{ArenaSize, Difficulty, Settings, SettingsError};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use sim::{GameEvent, MatchState, TickInput};

/// Game configuration constants
pub mod consts {
    /// Distance kept between the drawn border and the window edge
    pub const BORDER_MARGIN: i32 = 50;
    /// Minimum distance between a spawn point and the border
    pub const SPAWN_MARGIN: i32 = 100;

    /// Cycle speed limits (units per tick)
    pub const MIN_PLAYER_SPEED: u32 = 1;
    pub const MAX_PLAYER_SPEED: u32 = 3;
    /// Speed given to surviving bots once no humans are left
    pub const AI_ENDGAME_SPEED: u32 = 6;

    /// Cells marked on each side of a trail cell
    pub const FOOTPRINT_THICKNESS: i32 = 5;

    /// Reflex tuning: both are divided by difficulty
    pub const AI_BASE_FRAME_DELAY: u32 = 30;
    pub const AI_BASE_LOOKAHEAD: i32 = 100;

    pub const DEFAULT_LIVES: u32 = 3;

    /// Countdown before play starts (3, 2, 1)
    pub const COUNTDOWN_STEPS: u32 = 3;
    pub const COUNTDOWN_TICKS: u32 = 60;

    /// Trail colors, handed out from the end of the list
    pub const COLORS: [&str; 5] = ["#CF1FDE", "#33cc33", "#ff0000", "#E3E329", "#40BBE3"];
}

/// A match plus the seeded RNG that drives it
///
/// Owns both halves so callers only need to feed inputs.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub state: MatchState,
    rng: Pcg32,
}

impl Simulation {
    /// Build a match from validated settings
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = MatchState::new(settings, seed, &mut rng);
        Ok(Self { state, rng })
    }

    /// Advance one tick and return the events it produced
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        sim::tick(&mut self.state, input, &mut self.rng);
        self.state.drain_events()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }
}
