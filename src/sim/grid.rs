//! Occupancy grid
//!
//! Boolean matrix of every cell a trail has touched. World space has its
//! origin at the arena center; grid space has its origin at the corner.
//! Anything outside the grid reads as occupied, so the arena border needs no
//! code path of its own.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::Heading;
use crate::consts::BORDER_MARGIN;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    /// Row-major, `cells[y * width + x]`
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create an empty grid
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
        }
    }

    /// Grid for an arena window, inset by the border margin on every side
    pub fn for_arena(arena_width: i32, arena_height: i32) -> Self {
        let x_boundary = arena_width / 2 - BORDER_MARGIN;
        let y_boundary = arena_height / 2 - BORDER_MARGIN;
        Self::new(x_boundary * 2, y_boundary * 2)
    }

    /// Fresh grid with the same dimensions
    pub fn empty_like(&self) -> Self {
        Self::new(self.width, self.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Translate world coordinates to grid coordinates (truncating)
    pub fn to_grid_coord(&self, world_x: f32, world_y: f32) -> IVec2 {
        let x = (world_x + (self.width / 2) as f32) as i32;
        let y = (world_y + (self.height / 2) as f32) as i32;
        IVec2::new(x, y)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Whether a cell is blocked. Out-of-range cells are always blocked.
    pub fn is_collision(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.cells[self.index(x, y)]
    }

    /// Mark a single cell. Out-of-range writes are dropped.
    pub fn mark_visited(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.cells[idx] = true;
        }
    }

    /// Widen a trail cell to match the drawn trail width
    ///
    /// Marks `thickness` cells on both sides of `(x, y)`, perpendicular to
    /// `heading`.
    pub fn mark_footprint(&mut self, x: i32, y: i32, heading: Heading, thickness: i32) {
        for n in 1..=thickness {
            if heading.is_horizontal() {
                self.mark_visited(x, y - n);
                self.mark_visited(x, y + n);
            } else {
                self.mark_visited(x + n, y);
                self.mark_visited(x - n, y);
            }
        }
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
