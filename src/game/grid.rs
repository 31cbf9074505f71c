//! Playfield geometry: grid-aligned positions on a wrap-around surface.

use rand::Rng;

use super::state::Position;

/// A fixed playfield measured in pixels, divided into square cells.
///
/// Both dimensions are multiples of `cell_size`. Coordinates leaving one edge
/// re-enter from the opposite edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cell_size: i32,
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(cell_size: i32, width: i32, height: i32) -> Self {
        debug_assert!(cell_size > 0);
        debug_assert!(width % cell_size == 0 && height % cell_size == 0);
        Self {
            cell_size,
            width,
            height,
        }
    }

    /// Number of cells per row
    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    /// Number of cell rows
    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Wrap a raw pixel coordinate onto the playfield
    pub fn wrap(&self, x: i32, y: i32) -> Position {
        Position::new(x.rem_euclid(self.width), y.rem_euclid(self.height))
    }

    /// Uniformly random grid-aligned position
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let col = rng.gen_range(0..self.columns());
        let row = rng.gen_range(0..self.rows());
        Position::new(col * self.cell_size, row * self.cell_size)
    }

    /// Check if a position is within `[0, width) x [0, height)`
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Canonical start cell
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}
