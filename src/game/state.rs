use std::collections::HashSet;

use rand::Rng;

use super::action::Direction;
use super::grid::Grid;

/// A pixel position on the playfield, always aligned to the cell grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A snake on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// When set, the next move keeps the tail
    pub grow_pending: bool,
}

impl Snake {
    /// Create a one-cell snake at `start` heading in `direction`
    pub fn new(start: Position, direction: Direction) -> Self {
        Self {
            body: vec![start],
            direction,
            grow_pending: false,
        }
    }

    /// Create a one-cell snake at `start` heading in a random direction
    pub fn spawn<R: Rng + ?Sized>(start: Position, rng: &mut R) -> Self {
        Self::new(start, Direction::random(rng))
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Change heading. U-turns are allowed.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    /// Shrink back to a single cell at the grid center with a fresh heading
    pub fn reset<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        self.body.clear();
        self.body.push(grid.center());
        self.direction = Direction::random(rng);
        self.grow_pending = false;
    }

    /// Advance one cell in the current direction, wrapping at the edges.
    ///
    /// Re-entering the body past the neck resets the snake instead of moving
    /// it. This guard is separate from the lives-based collision checks done
    /// by the session.
    pub fn advance<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        let head = self.head();
        let (dx, dy) = self.direction.delta();
        let next = grid.wrap(head.x + dx * grid.cell_size, head.y + dy * grid.cell_size);

        if self.body.iter().skip(2).any(|&segment| segment == next) {
            self.reset(grid, rng);
            return;
        }

        self.body.insert(0, next);
        if !self.grow_pending {
            self.body.pop();
        }
        self.grow_pending = false;
    }

    /// Head outside the playfield. Movement always wraps, so in practice
    /// this only fires for snakes placed off-grid by hand.
    pub fn head_collides_with_wall(&self, grid: &Grid) -> bool {
        !grid.contains(self.head())
    }

    /// Any two segments share a cell
    pub fn head_collides_with_body(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        !self.body.iter().all(|segment| seen.insert(*segment))
    }

    pub fn head_collides_with(&self, pos: Position) -> bool {
        self.head() == pos
    }
}

/// Type of collision that cost a life or ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    Wall,
    SelfCollision,
    Obstacle,
    /// Both heads on the same cell (two-player, checked for player one only)
    HeadToHead,
}
