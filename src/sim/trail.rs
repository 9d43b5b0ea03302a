//! Trail tracing
//!
//! A cycle can move up to several units per tick, so the jump between two
//! ticks skips cells. The tracer rebuilds every cell crossed, in travel
//! order, and stops at the first one already occupied. Cells past the impact
//! point are never written.

use glam::IVec2;

use super::entity::{Entity, EntityStatus};
use super::grid::OccupancyGrid;
use crate::consts::FOOTPRINT_THICKNESS;

/// Result of tracing one entity's move
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceOutcome {
    /// Cells written to the grid, in travel order
    pub marked: Vec<IVec2>,
    /// Cell the entity crashed into
    pub collision: Option<IVec2>,
}

impl TraceOutcome {
    pub fn crashed(&self) -> bool {
        self.collision.is_some()
    }
}

/// Grid cells crossed between `prev_position` and the current position
///
/// Walks the axis of motion from the previous coordinate up to (but not
/// including) the current one, holding the cross axis at its previous value.
pub fn sweep(entity: &Entity, grid: &OccupancyGrid) -> Vec<IVec2> {
    let prev = entity.prev_position;
    let curr = entity.grid_position();
    if prev == curr {
        return Vec::new();
    }

    let unit = entity.heading.unit();
    let (start, end, step) = if entity.heading.is_horizontal() {
        (prev.x, curr.x, unit.x)
    } else {
        (prev.y, curr.y, unit.y)
    };

    // Heading changed without moving along the new axis
    if (end - start) * step <= 0 {
        return Vec::new();
    }

    let mut cells = Vec::with_capacity((end - start).unsigned_abs() as usize);
    let mut pos = start;
    while pos != end {
        let cell = if entity.heading.is_horizontal() {
            grid.to_grid_coord(pos as f32, prev.y as f32)
        } else {
            grid.to_grid_coord(prev.x as f32, pos as f32)
        };
        cells.push(cell);
        pos += step;
    }
    cells
}

/// Sweep the entity's move into the grid, crashing it on the first hit
pub fn trace(entity: &mut Entity, grid: &mut OccupancyGrid) -> TraceOutcome {
    let mut outcome = TraceOutcome::default();
    for cell in sweep(entity, grid) {
        if grid.is_collision(cell.x, cell.y) {
            entity.status = EntityStatus::Crashed;
            outcome.collision = Some(cell);
            log::debug!("{} crashed at grid ({}, {})", entity.name, cell.x, cell.y);
            break;
        }
        grid.mark_visited(cell.x, cell.y);
        grid.mark_footprint(cell.x, cell.y, entity.heading, FOOTPRINT_THICKNESS);
        outcome.marked.push(cell);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COLORS, DEFAULT_LIVES};
    use crate::sim::entity::Heading;

    fn cycle_at(x: i32, y: i32, heading: Heading, speed: u32) -> Entity {
        let mut e = Entity::human(
            0,
            "P1",
            COLORS[4],
            IVec2::new(x, y),
            heading,
            DEFAULT_LIVES,
        );
        e.speed = speed;
        e
    }

    fn step(e: &mut Entity) {
        e.set_prev_position();
        e.advance();
    }

    #[test]
    fn test_no_movement_no_cells() {
        let grid = OccupancyGrid::new(100, 100);
        let e = cycle_at(0, 0, Heading::East, 1);
        assert!(sweep(&e, &grid).is_empty());
    }

    #[test]
    fn test_speed_one_marks_one_cell() {
        let mut grid = OccupancyGrid::new(100, 100);
        let mut e = cycle_at(0, 0, Heading::North, 1);
        step(&mut e);

        let outcome = trace(&mut e, &mut grid);
        assert!(!outcome.crashed());
        assert_eq!(outcome.marked, vec![IVec2::new(50, 50)]);
        assert_eq!(e.status, EntityStatus::Ready);
        // One cell plus five either side
        assert_eq!(grid.occupied_count(), 1 + 2 * FOOTPRINT_THICKNESS as usize);
        assert!(grid.is_collision(45, 50));
        assert!(grid.is_collision(55, 50));
    }

    #[test]
    fn test_speed_three_sweeps_in_travel_order() {
        let grid = OccupancyGrid::new(100, 100);
        let mut e = cycle_at(10, -4, Heading::West, 3);
        step(&mut e);

        let cells = sweep(&e, &grid);
        assert_eq!(
            cells,
            vec![IVec2::new(60, 46), IVec2::new(59, 46), IVec2::new(58, 46)]
        );

        let mut e = cycle_at(0, 0, Heading::South, 3);
        step(&mut e);
        assert_eq!(
            sweep(&e, &grid),
            vec![IVec2::new(50, 50), IVec2::new(50, 49), IVec2::new(50, 48)]
        );
    }

    #[test]
    fn test_collision_stops_the_sweep() {
        let mut grid = OccupancyGrid::new(100, 100);
        grid.mark_visited(52, 50);
        let mut e = cycle_at(0, 0, Heading::East, 3);
        step(&mut e);

        let outcome = trace(&mut e, &mut grid);
        assert_eq!(outcome.collision, Some(IVec2::new(52, 50)));
        assert_eq!(outcome.marked, vec![IVec2::new(50, 50), IVec2::new(51, 50)]);
        assert_eq!(e.status, EntityStatus::Crashed);
        // Nothing written beyond the impact
        assert!(!grid.is_collision(53, 50));
    }

    #[test]
    fn test_no_self_collision_on_turn() {
        let mut grid = OccupancyGrid::new(100, 100);
        let mut e = cycle_at(0, 0, Heading::East, 1);
        for _ in 0..3 {
            step(&mut e);
            assert!(!trace(&mut e, &mut grid).crashed());
        }
        e.change_direction(Heading::North);
        for _ in 0..3 {
            step(&mut e);
            assert!(!trace(&mut e, &mut grid).crashed());
        }
        assert_eq!(e.status, EntityStatus::Ready);
    }

    #[test]
    fn test_boundary_is_a_collision() {
        let mut grid = OccupancyGrid::new(10, 10);
        let mut e = cycle_at(4, 0, Heading::East, 1);
        // x=4 maps to grid 9, the last column
        step(&mut e);
        assert!(!trace(&mut e, &mut grid).crashed());
        step(&mut e);
        let outcome = trace(&mut e, &mut grid);
        assert_eq!(outcome.collision, Some(IVec2::new(10, 5)));
    }
}
