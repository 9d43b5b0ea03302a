//! Fixed tick simulation
//!
//! One call advances every cycle by one tick, in roster order. Steering,
//! motion and trail tracing for every cycle finish before crashes are
//! resolved, so whichever cycle is traced first owns a contested cell.

use rand::Rng;

use super::ai;
use super::entity::{EntityStatus, Heading};
use super::state::{GameEvent, GamePhase, MatchState, random_coord};
use super::trail;
use crate::consts::*;

/// A steering request for a human cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steer {
    /// Roster index
    pub entity: usize,
    pub heading: Heading,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key presses since the last tick; only the latest one per cycle applies
    pub steer: Vec<Steer>,
}

impl TickInput {
    pub fn steer(entity: usize, heading: Heading) -> Self {
        Self {
            steer: vec![Steer { entity, heading }],
        }
    }
}

/// Advance the match by one tick
pub fn tick(state: &mut MatchState, input: &TickInput, rng: &mut impl Rng) {
    match state.phase {
        GamePhase::GameOver => return,
        GamePhase::Countdown => {
            run_countdown(state);
            return;
        }
        GamePhase::Playing => {}
    }

    state.tick_count += 1;

    // Steer and move
    let mut moved = Vec::with_capacity(state.entities.len());
    for (idx, entity) in state.entities.iter_mut().enumerate() {
        if !entity.is_ready() {
            continue;
        }
        if entity.is_ai() {
            ai::decide(entity, &state.grid);
            entity.set_prev_position();
        } else {
            // Captured before steering so a speed change's extra step is traced.
            // One steer per tick keeps the move on a single axis.
            entity.set_prev_position();
            let id = entity.id;
            if let Some(steer) = input.steer.iter().rev().find(|s| s.entity == id) {
                entity.change_direction(steer.heading);
            }
        }
        entity.advance();
        moved.push(idx);
    }

    // Trace into the shared grid
    for idx in moved {
        let entity = &mut state.entities[idx];
        if trail::trace(entity, &mut state.grid).crashed() {
            state.events.push(GameEvent::Crash { entity: entity.id });
        }
    }

    let crashed = state
        .entities
        .iter()
        .any(|e| e.status == EntityStatus::Crashed);
    if crashed {
        reset_round(state, rng);
        check_game_over(state);
    }

    log::trace!("tick {} complete", state.tick_count);
}

/// Count down before play; emits one event per step
fn run_countdown(state: &mut MatchState) {
    if state.countdown_ticks % COUNTDOWN_TICKS == 0 && state.countdown_ticks > 0 {
        state.events.push(GameEvent::Countdown {
            remaining: state.countdown_ticks / COUNTDOWN_TICKS,
        });
    }
    state.countdown_ticks = state.countdown_ticks.saturating_sub(1);
    if state.countdown_ticks == 0 {
        state.phase = GamePhase::Playing;
        log::info!("Countdown finished, match on");
    }
}

/// Charge lives, respawn or eliminate, and wipe the grid
pub fn reset_round(state: &mut MatchState, rng: &mut impl Rng) {
    for entity in state.entities.iter_mut() {
        match entity.status {
            EntityStatus::Dead => continue,
            EntityStatus::Crashed => entity.lose_life(),
            EntityStatus::Ready => {}
        }

        if entity.has_lives() {
            let spawn = random_coord(&state.grid, rng);
            entity.respawn(spawn.x, spawn.y, rng);
        } else {
            entity.mark_dead();
            state.events.push(GameEvent::Eliminated { entity: entity.id });
            log::info!("{} eliminated", entity.name);
            if !entity.is_ai() {
                state.humans_remaining = state.humans_remaining.saturating_sub(1);
            }
        }
    }

    // Everyone's trails go, not just the crashed cycle's
    state.grid = state.grid.empty_like();
    state.round += 1;
    state.events.push(GameEvent::RoundReset { round: state.round });
    log::info!(
        "Round {} reset after tick {}: {}",
        state.round,
        state.tick_count,
        lives_summary(state)
    );

    if state.humans_remaining == 0 {
        apply_endgame_speed(state);
    }
}

/// Speed up surviving bots once no human is left
fn apply_endgame_speed(state: &mut MatchState) {
    for entity in state.entities.iter_mut() {
        if entity.is_ai() && entity.status != EntityStatus::Dead {
            entity.set_speed(AI_ENDGAME_SPEED);
        }
    }
    if !state.endgame {
        state.endgame = true;
        state.events.push(GameEvent::EndgameBoost);
        log::info!("No humans left, bots at speed {}", AI_ENDGAME_SPEED);
    }
}

/// End the match when at most one cycle has lives
fn check_game_over(state: &mut MatchState) {
    let (first, more) = {
        let mut contenders = state.contenders();
        (contenders.next().map(|e| e.id), contenders.next().is_some())
    };
    if more {
        return;
    }

    state.winner = first;
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { winner: first });
    match state.winner_name() {
        Some(name) => log::info!("{} wins after {} ticks", name, state.tick_count),
        None => log::info!("No survivors after {} ticks", state.tick_count),
    }
}

fn lives_summary(state: &MatchState) -> String {
    state
        .entities
        .iter()
        .map(|e| format!("{}={}", e.name, e.lives))
        .collect::<Vec<_>>()
        .join(" ")
}
