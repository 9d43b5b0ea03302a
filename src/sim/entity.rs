//! Light cycles and their motion
//!
//! Humans and bots share one data type; bots carry an [`AiControl`] block.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One of the four cardinal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    East,
    North,
    West,
    South,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::East, Heading::North, Heading::West, Heading::South];

    /// Angle in degrees (East = 0, counter-clockwise)
    pub fn degrees(&self) -> u32 {
        match self {
            Heading::East => 0,
            Heading::North => 90,
            Heading::West => 180,
            Heading::South => 270,
        }
    }

    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees % 360 {
            0 => Some(Heading::East),
            90 => Some(Heading::North),
            180 => Some(Heading::West),
            270 => Some(Heading::South),
            _ => None,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Heading::East => Heading::West,
            Heading::North => Heading::South,
            Heading::West => Heading::East,
            Heading::South => Heading::North,
        }
    }

    /// Travels along the x axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Heading::East | Heading::West)
    }

    /// Unit step in world and grid space (North is +y)
    pub fn unit(&self) -> IVec2 {
        match self {
            Heading::East => IVec2::X,
            Heading::North => IVec2::Y,
            Heading::West => IVec2::NEG_X,
            Heading::South => IVec2::NEG_Y,
        }
    }

    /// The two perpendicular headings, positive side first
    pub fn perpendiculars(&self) -> [Heading; 2] {
        if self.is_horizontal() {
            [Heading::North, Heading::South]
        } else {
            [Heading::East, Heading::West]
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Lifecycle of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityStatus {
    /// Moving and leaving a trail
    Ready,
    /// Hit something this tick, waiting for round reset
    Crashed,
    /// Out of lives
    Dead,
}

/// Reflex state for bot-driven cycles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiControl {
    /// 1 (easy) ..= 3 (hard)
    pub difficulty: u32,
    /// Ticks since the last turn
    pub frame_counter: u32,
    /// Ticks between decisions
    pub frame_delay: u32,
    /// How far ahead to look for obstacles, in cells
    pub lookahead_distance: i32,
}

impl AiControl {
    pub fn new(difficulty: u32) -> Self {
        let difficulty = difficulty.max(1);
        Self {
            difficulty,
            frame_counter: 0,
            frame_delay: AI_BASE_FRAME_DELAY / difficulty,
            lookahead_distance: (AI_BASE_LOOKAHEAD / difficulty as i32).max(1),
        }
    }
}

/// A light cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Roster index, also the update order
    pub id: usize,
    pub name: String,
    /// Trail color (hex)
    pub color: String,
    /// World position, origin at arena center
    pub position: Vec2,
    /// Truncated position captured before the last move
    pub prev_position: IVec2,
    pub heading: Heading,
    pub speed: u32,
    pub lives: u32,
    pub status: EntityStatus,
    /// Present for bot-driven cycles
    pub ai: Option<AiControl>,
}

impl Entity {
    /// Create a human-controlled cycle
    pub fn human(
        id: usize,
        name: impl Into<String>,
        color: impl Into<String>,
        start: IVec2,
        heading: Heading,
        lives: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            position: start.as_vec2(),
            prev_position: start,
            heading,
            speed: MIN_PLAYER_SPEED,
            lives,
            status: EntityStatus::Ready,
            ai: None,
        }
    }

    /// Create a bot-controlled cycle
    pub fn bot(
        id: usize,
        name: impl Into<String>,
        color: impl Into<String>,
        start: IVec2,
        heading: Heading,
        lives: u32,
        difficulty: u32,
    ) -> Self {
        Self {
            ai: Some(AiControl::new(difficulty)),
            ..Self::human(id, name, color, start, heading, lives)
        }
    }

    pub fn is_ai(&self) -> bool {
        self.ai.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.status == EntityStatus::Ready
    }

    /// Truncated integer position
    pub fn grid_position(&self) -> IVec2 {
        self.position.as_ivec2()
    }

    /// Move forward by the current speed. Does not check collisions.
    pub fn advance(&mut self) {
        self.forward(self.speed);
    }

    fn forward(&mut self, distance: u32) {
        self.position += self.heading.unit().as_vec2() * distance as f32;
    }

    /// Remember where this tick's move starts
    pub fn set_prev_position(&mut self) {
        self.prev_position = self.grid_position();
    }

    /// Steer toward `requested`
    ///
    /// Same heading speeds up, the opposite heading slows down (a cycle can
    /// never reverse onto its own trail), a perpendicular heading turns.
    pub fn change_direction(&mut self, requested: Heading) {
        if requested == self.heading {
            self.accelerate();
        } else if requested == self.heading.opposite() {
            self.decelerate();
        } else {
            self.heading = requested;
        }
    }

    /// Speed up by one, taking an extra step at the new speed
    pub fn accelerate(&mut self) {
        if self.speed < MAX_PLAYER_SPEED {
            self.speed += 1;
            self.forward(self.speed);
        }
    }

    /// Slow down by one, taking an extra step at the new speed
    pub fn decelerate(&mut self) {
        if self.speed > MIN_PLAYER_SPEED {
            self.speed -= 1;
            self.forward(self.speed);
        }
    }

    /// Force a speed, never below the minimum
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.max(MIN_PLAYER_SPEED);
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.status = EntityStatus::Crashed;
    }

    pub fn has_lives(&self) -> bool {
        self.lives > 0
    }

    pub fn mark_dead(&mut self) {
        self.status = EntityStatus::Dead;
    }

    /// Return to play at `(x, y)` with a fresh heading and base speed
    pub fn respawn(&mut self, x: i32, y: i32, rng: &mut impl Rng) {
        self.status = EntityStatus::Ready;
        self.position = Vec2::new(x as f32, y as f32);
        self.heading = Heading::random(rng);
        self.prev_position = IVec2::new(x, y);
        self.speed = MIN_PLAYER_SPEED;
        self.reset_reflex_timer();
    }

    /// Restart the bot's decision delay (no-op for humans)
    pub fn reset_reflex_timer(&mut self) {
        if let Some(ai) = self.ai.as_mut() {
            ai.frame_counter = 0;
        }
    }
}
