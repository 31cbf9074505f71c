use rand::Rng;

use super::grid::Grid;
use super::state::Position;

/// The single piece of food on the board.
///
/// Placement ignores snakes and obstacles, so overlaps are possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    pub fn spawn<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        Self::at(grid.random_cell(rng))
    }

    pub fn randomize_position<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        self.position = grid.random_cell(rng);
    }
}

/// A static blocking cell, placed once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub position: Position,
}

impl Obstacle {
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    pub fn spawn<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        Self::at(grid.random_cell(rng))
    }

    pub fn randomize_position<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        self.position = grid.random_cell(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_food_placement_is_on_grid() {
        let grid = Grid::new(20, 640, 480);
        let mut rng = StdRng::seed_from_u64(3);
        let mut food = Food::spawn(&grid, &mut rng);

        for _ in 0..100 {
            food.randomize_position(&grid, &mut rng);
            assert!(grid.contains(food.position));
            assert_eq!(food.position.x % 20, 0);
            assert_eq!(food.position.y % 20, 0);
        }
    }

    #[test]
    fn test_obstacle_placement_is_on_grid() {
        let grid = Grid::new(20, 640, 480);
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..100 {
            let obstacle = Obstacle::spawn(&grid, &mut rng);
            assert!(grid.contains(obstacle.position));
        }

        let mut obstacle = Obstacle::at(Position::new(-20, 500));
        obstacle.randomize_position(&grid, &mut rng);
        assert!(grid.contains(obstacle.position));
        assert_eq!(obstacle.position.x % 20, 0);
        assert_eq!(obstacle.position.y % 20, 0);
    }

    #[test]
    fn test_fixed_placement() {
        let pos = Position::new(40, 60);
        assert_eq!(Food::at(pos).position, pos);
        assert_eq!(Obstacle::at(pos).position, pos);
    }
}
