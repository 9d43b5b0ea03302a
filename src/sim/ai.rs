//! Bot navigation
//!
//! Bots only react every `frame_delay` ticks. Once the delay has elapsed they
//! look `lookahead_distance` cells ahead and, if anything is in the way,
//! turn away from whichever side is found blocked first.

use glam::IVec2;

use super::entity::{Entity, Heading};
use super::grid::OccupancyGrid;

/// Run one reflex step for a bot
///
/// Returns the heading the bot turned to, if it turned. Humans and cycles
/// that are not ready are left alone.
pub fn decide(entity: &mut Entity, grid: &OccupancyGrid) -> Option<Heading> {
    if !entity.is_ready() {
        return None;
    }
    let ai = entity.ai.as_mut()?;

    ai.frame_counter += 1;
    if ai.frame_counter < ai.frame_delay {
        return None;
    }
    let lookahead = ai.lookahead_distance;

    let here = grid.to_grid_coord(entity.position.x, entity.position.y);
    if !is_near_collision(grid, here, entity.heading, lookahead) {
        return None;
    }

    let previous = entity.heading;
    let turn = determine_turn(grid, here, previous);
    entity.change_direction(turn);
    entity.reset_reflex_timer();
    log::debug!(
        "{} turning {:?} -> {:?} at grid ({}, {})",
        entity.name,
        previous,
        turn,
        here.x,
        here.y
    );
    Some(turn)
}

/// Whether anything occupies the next `lookahead` cells along `heading`
pub fn is_near_collision(
    grid: &OccupancyGrid,
    from: IVec2,
    heading: Heading,
    lookahead: i32,
) -> bool {
    let unit = heading.unit();
    (1..=lookahead.max(1)).any(|i| {
        let probe = from + unit * i;
        grid.is_collision(probe.x, probe.y)
    })
}

/// Pick the perpendicular heading away from the nearest blocked side
///
/// Both sides are probed at the same distance each step, positive side
/// first. The first blocked probe decides; remaining clearance on the other
/// side is not compared.
pub fn determine_turn(grid: &OccupancyGrid, from: IVec2, heading: Heading) -> Heading {
    let [positive, negative] = heading.perpendiculars();
    let limit = grid.width().max(grid.height()).max(1);

    for i in 1..=limit {
        let pos_probe = from + positive.unit() * i;
        if grid.is_collision(pos_probe.x, pos_probe.y) {
            return negative;
        }
        let neg_probe = from + negative.unit() * i;
        if grid.is_collision(neg_probe.x, neg_probe.y) {
            return positive;
        }
    }
    positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COLORS, DEFAULT_LIVES};
    use crate::sim::entity::EntityStatus;

    fn bot_at(x: i32, y: i32, heading: Heading, difficulty: u32) -> Entity {
        Entity::bot(
            1,
            "COM1",
            COLORS[3],
            IVec2::new(x, y),
            heading,
            DEFAULT_LIVES,
            difficulty,
        )
    }

    #[test]
    fn test_near_collision_respects_lookahead() {
        let mut grid = OccupancyGrid::new(100, 100);
        grid.mark_visited(60, 50);
        let here = IVec2::new(50, 50);
        assert!(is_near_collision(&grid, here, Heading::East, 10));
        assert!(!is_near_collision(&grid, here, Heading::East, 9));
        assert!(!is_near_collision(&grid, here, Heading::North, 40));
        // The border counts as an obstacle
        assert!(is_near_collision(&grid, here, Heading::North, 50));
    }

    #[test]
    fn test_determine_turn_first_blocked_side() {
        let mut grid = OccupancyGrid::new(100, 100);
        let here = IVec2::new(50, 50);

        // North blocked at 3, South at 4: turn South
        grid.mark_visited(50, 53);
        grid.mark_visited(50, 46);
        assert_eq!(determine_turn(&grid, here, Heading::East), Heading::South);

        // South blocked first: turn North
        let mut grid = OccupancyGrid::new(100, 100);
        grid.mark_visited(50, 48);
        grid.mark_visited(50, 60);
        assert_eq!(determine_turn(&grid, here, Heading::West), Heading::North);

        // Vertical travel scans east first
        let mut grid = OccupancyGrid::new(100, 100);
        grid.mark_visited(55, 50);
        grid.mark_visited(45, 50);
        assert_eq!(determine_turn(&grid, here, Heading::North), Heading::West);
    }

    #[test]
    fn test_determine_turn_uses_border() {
        let grid = OccupancyGrid::new(100, 100);
        // Close to the bottom edge while heading east
        assert_eq!(
            determine_turn(&grid, IVec2::new(50, 2), Heading::East),
            Heading::North
        );
        // Close to the right edge while heading north
        assert_eq!(
            determine_turn(&grid, IVec2::new(97, 50), Heading::North),
            Heading::West
        );
    }

    #[test]
    fn test_reflex_delay_then_single_turn() {
        let mut grid = OccupancyGrid::new(100, 100);
        // Obstacle 20 cells ahead, inside the normal lookahead of 50
        grid.mark_visited(70, 50);
        let mut bot = bot_at(0, 0, Heading::East, 2);

        for tick in 1..15 {
            assert_eq!(decide(&mut bot, &grid), None, "tick {tick}");
            assert_eq!(bot.heading, Heading::East);
        }

        let turn = decide(&mut bot, &grid);
        assert!(matches!(turn, Some(Heading::North | Heading::South)));
        assert_eq!(Some(bot.heading), turn);
        assert_eq!(bot.speed, 1);
        assert_eq!(bot.ai.as_ref().map(|ai| ai.frame_counter), Some(0));
    }

    #[test]
    fn test_keeps_checking_after_delay() {
        let grid = OccupancyGrid::new(100, 100);
        let mut bot = bot_at(0, 0, Heading::East, 3);
        for _ in 0..30 {
            assert_eq!(decide(&mut bot, &grid), None);
        }
        // Counter keeps running until a turn resets it
        assert_eq!(bot.ai.as_ref().map(|ai| ai.frame_counter), Some(30));
    }

    #[test]
    fn test_humans_and_crashed_bots_are_ignored() {
        let mut grid = OccupancyGrid::new(10, 10);
        grid.mark_visited(6, 5);
        let mut human = Entity::human(0, "P1", COLORS[4], IVec2::ZERO, Heading::East, 3);
        for _ in 0..40 {
            assert_eq!(decide(&mut human, &grid), None);
        }

        let mut bot = bot_at(0, 0, Heading::East, 3);
        bot.status = EntityStatus::Crashed;
        for _ in 0..40 {
            assert_eq!(decide(&mut bot, &grid), None);
        }
        assert_eq!(bot.ai.as_ref().map(|ai| ai.frame_counter), Some(0));
    }
}
