//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, passed in by the caller
//! - Stable iteration order (roster order)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod entity;
pub mod grid;
pub mod state;
pub mod tick;
pub mod trail;

pub use ai::{decide, determine_turn, is_near_collision};
pub use entity::{AiControl, Entity, EntityStatus, Heading};
pub use grid::OccupancyGrid;
pub use state::{GameEvent, GamePhase, MatchState, random_coord};
pub use tick::{Steer, TickInput, reset_round, tick};
pub use trail::{TraceOutcome, sweep, trace};
