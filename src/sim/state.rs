//! Match state and roster
//!
//! Everything a presentation layer needs to draw a frame lives here.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Heading};
use super::grid::OccupancyGrid;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// 3-2-1 before the cycles start moving
    Countdown,
    /// Active gameplay
    Playing,
    /// One cycle (or none) has lives left
    GameOver,
}

/// Notifications for audio, particles and score display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Countdown step (3, 2, 1)
    Countdown { remaining: u32 },
    /// A cycle hit a trail or the border
    Crash { entity: usize },
    /// A cycle ran out of lives
    Eliminated { entity: usize },
    /// Trails wiped and survivors respawned
    RoundReset { round: u32 },
    /// No humans left; bots switched to endgame speed
    EndgameBoost,
    /// Match decided
    GameOver { winner: Option<usize> },
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Seed the match was started with
    pub seed: u64,
    /// Arena window size in world units
    pub arena_width: i32,
    pub arena_height: i32,
    /// Simulation tick counter (playing ticks only)
    pub tick_count: u64,
    /// Rounds completed so far
    pub round: u32,
    pub phase: GamePhase,
    /// Ticks left in the countdown
    pub countdown_ticks: u32,
    pub grid: OccupancyGrid,
    /// Roster in update order
    pub entities: Vec<Entity>,
    /// Humans not yet eliminated
    pub humans_remaining: u32,
    /// Endgame speed already applied
    pub endgame: bool,
    pub winner: Option<usize>,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl MatchState {
    /// Set up a match: fresh grid, humans first, then bots
    pub fn new(settings: &Settings, seed: u64, rng: &mut impl Rng) -> Self {
        let (arena_width, arena_height) = settings.arena_size.dimensions();
        let grid = OccupancyGrid::for_arena(arena_width, arena_height);

        let mut entities = Vec::with_capacity(settings.entity_count() as usize);
        let mut palette = COLORS.iter().rev();
        for i in 0..settings.humans {
            let id = entities.len();
            let color = palette.next().copied().unwrap_or(COLORS[0]);
            let start = random_coord(&grid, rng);
            let heading = Heading::random(rng);
            entities.push(Entity::human(
                id,
                format!("P{}", i + 1),
                color,
                start,
                heading,
                settings.lives,
            ));
        }
        for i in 0..settings.bots {
            let id = entities.len();
            let color = palette.next().copied().unwrap_or(COLORS[0]);
            let start = random_coord(&grid, rng);
            let heading = Heading::random(rng);
            entities.push(Entity::bot(
                id,
                format!("COM{}", i + 1),
                color,
                start,
                heading,
                settings.lives,
                settings.difficulty.level(),
            ));
        }

        let mut state = Self::with_entities(grid, entities);
        state.seed = seed;
        state.arena_width = arena_width;
        state.arena_height = arena_height;
        if settings.countdown {
            state.phase = GamePhase::Countdown;
            state.countdown_ticks = COUNTDOWN_STEPS * COUNTDOWN_TICKS;
        }
        log::info!(
            "Match ready: {} humans, {} bots, {} arena ({}x{} grid), seed {}",
            settings.humans,
            settings.bots,
            settings.arena_size.as_str(),
            state.grid.width(),
            state.grid.height(),
            seed
        );
        state
    }

    /// Build a match around an existing grid and roster, already playing
    pub fn with_entities(grid: OccupancyGrid, entities: Vec<Entity>) -> Self {
        let humans_remaining = entities.iter().filter(|e| !e.is_ai()).count() as u32;
        Self {
            seed: 0,
            arena_width: grid.width() + 2 * BORDER_MARGIN,
            arena_height: grid.height() + 2 * BORDER_MARGIN,
            tick_count: 0,
            round: 0,
            phase: GamePhase::Playing,
            countdown_ticks: 0,
            grid,
            entities,
            humans_remaining,
            endgame: false,
            winner: None,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cycles that still have lives
    pub fn contenders(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.has_lives())
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.winner
            .and_then(|id| self.entities.get(id))
            .map(|e| e.name.as_str())
    }
}

/// Random spawn point, kept away from the border
pub fn random_coord(grid: &OccupancyGrid, rng: &mut impl Rng) -> IVec2 {
    let x_range = (grid.width() / 2 - SPAWN_MARGIN).max(0);
    let y_range = (grid.height() / 2 - SPAWN_MARGIN).max(0);
    IVec2::new(
        rng.random_range(-x_range..=x_range),
        rng.random_range(-y_range..=y_range),
    )
}
