//! Kinematic bodies, the player and the adversary
//!
//! One position/velocity pair underlies everything that moves: the player
//! steps it by a fixed delta, projectiles integrate it every tick, the
//! adversary teleports it. None of these types know about maze legality;
//! the session validates before committing a move.

use glam::Vec2;
use rand::Rng;

use super::layout::Layout;
use super::maze::Maze;

/// A directional move intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit delta in screen coordinates (y grows downward).
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Translate a joystick/drag vector into its dominant-axis direction.
    /// Vectors shorter than `dead_zone` carry no intent. Ties go to the
    /// horizontal axis.
    pub fn from_vector(v: Vec2, dead_zone: f32) -> Option<Self> {
        if v.length_squared() < dead_zone * dead_zone {
            return None;
        }
        if v.x.abs() >= v.y.abs() {
            Some(if v.x >= 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if v.y >= 0.0 {
                Direction::Down
            } else {
                Direction::Up
            })
        }
    }
}

/// Position/velocity pair shared by every moving thing on the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Body {
    /// A stationary body.
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
        }
    }

    /// One Euler step: position advances by velocity.
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Center of a block-sized body anchored at `pos` by its top-left
    /// corner.
    pub fn center(&self, block_size: i32) -> Vec2 {
        self.pos + Vec2::splat(block_size as f32 / 2.0)
    }
}

/// The player-controlled character.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    /// Pixel displacement per committed move request
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            body: Body::at(pos),
            speed,
        }
    }

    /// Where a step would land, without committing it.
    pub fn step_target(&self, dir: Direction) -> Vec2 {
        self.body.pos + dir.delta() * self.speed
    }

    /// Apply a step. No legality check here; callers validate the target
    /// cell first.
    pub fn step(&mut self, dir: Direction) {
        self.body.pos = self.step_target(dir);
    }
}

/// The roaming adversary. It perches on wall cells and moves only when the
/// respawn trigger relocates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Adversary {
    pub body: Body,
}

impl Adversary {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::at(pos),
        }
    }

    /// Relocate to a random interior wall cell. Keeps the prior position
    /// and reports false when the maze has no interior walls.
    pub fn respawn(&mut self, maze: &Maze, layout: &Layout, rng: &mut impl Rng) -> bool {
        match select_spawn_cell(maze, rng) {
            Some((row, col)) => {
                self.body.pos = layout.cell_origin(row, col);
                true
            }
            None => false,
        }
    }
}

/// Choose uniformly among the interior wall cells, or None when there are
/// none. The enumeration order is row-major, so a seeded generator yields a
/// reproducible destination sequence.
pub fn select_spawn_cell(maze: &Maze, rng: &mut impl Rng) -> Option<(usize, usize)> {
    let cells = maze.interior_wall_cells();
    if cells.is_empty() {
        return None;
    }
    Some(cells[rng.random_range(0..cells.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRID_SIZE;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ring_only_maze() -> Maze {
        // Outer ring walls, interior fully open: no legal spawn cells.
        let mut rows = [""; GRID_SIZE];
        rows[0] = "###################";
        rows[GRID_SIZE - 1] = rows[0];
        for row in rows.iter_mut().take(GRID_SIZE - 1).skip(1) {
            *row = "#.................#";
        }
        Maze::from_rows(&rows)
    }

    #[test]
    fn test_deltas_are_unit_axis_vectors() {
        assert_eq!(Direction::Up.delta(), Vec2::new(0.0, -1.0));
        assert_eq!(Direction::Down.delta(), Vec2::new(0.0, 1.0));
        assert_eq!(Direction::Left.delta(), Vec2::new(-1.0, 0.0));
        assert_eq!(Direction::Right.delta(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_drag_vectors_pick_the_dominant_axis() {
        assert_eq!(
            Direction::from_vector(Vec2::new(40.0, 10.0), 10.0),
            Some(Direction::Right)
        );
        assert_eq!(
            Direction::from_vector(Vec2::new(-40.0, 10.0), 10.0),
            Some(Direction::Left)
        );
        assert_eq!(
            Direction::from_vector(Vec2::new(5.0, 30.0), 10.0),
            Some(Direction::Down)
        );
        assert_eq!(
            Direction::from_vector(Vec2::new(5.0, -30.0), 10.0),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_short_drags_fall_in_the_dead_zone() {
        assert_eq!(Direction::from_vector(Vec2::new(3.0, 4.0), 10.0), None);
        assert_eq!(
            Direction::from_vector(Vec2::new(6.0, 8.0), 10.0),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_step_moves_by_exactly_one_speed_along_one_axis() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), 5.0);
        player.step(Direction::Right);
        assert_eq!(player.body.pos, Vec2::new(105.0, 100.0));
        player.step(Direction::Up);
        assert_eq!(player.body.pos, Vec2::new(105.0, 95.0));
    }

    #[test]
    fn test_step_target_does_not_mutate() {
        let player = Player::new(Vec2::new(100.0, 100.0), 5.0);
        assert_eq!(player.step_target(Direction::Left), Vec2::new(95.0, 100.0));
        assert_eq!(player.body.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_body_advance_is_euler_integration() {
        let mut body = Body {
            pos: Vec2::new(10.0, 20.0),
            vel: Vec2::new(3.0, -2.0),
        };
        body.advance();
        assert_eq!(body.pos, Vec2::new(13.0, 18.0));
    }

    #[test]
    fn test_body_center_is_half_a_block_in() {
        let body = Body::at(Vec2::new(100.0, 200.0));
        assert_eq!(body.center(50), Vec2::new(125.0, 225.0));
    }

    #[test]
    fn test_respawn_lands_on_an_interior_wall_cell() {
        let maze = Maze::new();
        let layout = Layout::from_viewport(950, 950).unwrap();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut adversary = Adversary::new(Vec2::ZERO);
        for _ in 0..50 {
            assert!(adversary.respawn(&maze, &layout, &mut rng));
            let cell = layout.point_to_cell(adversary.body.center(layout.block_size));
            let (row, col) = cell.expect("adversary must sit on the grid");
            assert!(row > 0 && row < GRID_SIZE - 1);
            assert!(col > 0 && col < GRID_SIZE - 1);
            assert!(!maze.is_passable(row, col));
        }
    }

    #[test]
    fn test_respawn_is_reproducible_per_seed() {
        let maze = Maze::new();
        let layout = Layout::from_viewport(950, 950).unwrap();
        let mut a = Adversary::new(Vec2::ZERO);
        let mut b = Adversary::new(Vec2::ZERO);
        let mut rng_a = Pcg32::seed_from_u64(99);
        let mut rng_b = Pcg32::seed_from_u64(99);
        for _ in 0..10 {
            a.respawn(&maze, &layout, &mut rng_a);
            b.respawn(&maze, &layout, &mut rng_b);
            assert_eq!(a.body.pos, b.body.pos);
        }
    }

    #[test]
    fn test_singleton_wall_set_forces_the_destination() {
        let mut rows = [""; GRID_SIZE];
        rows[0] = "###################";
        rows[GRID_SIZE - 1] = rows[0];
        for row in rows.iter_mut().take(GRID_SIZE - 1).skip(1) {
            *row = "#.................#";
        }
        rows[5] = "#....#............#";
        let maze = Maze::from_rows(&rows);
        let mut rng = Pcg32::seed_from_u64(0);
        for _ in 0..10 {
            assert_eq!(select_spawn_cell(&maze, &mut rng), Some((5, 5)));
        }
    }

    #[test]
    fn test_degenerate_maze_leaves_the_adversary_in_place() {
        let maze = ring_only_maze();
        let layout = Layout::from_viewport(950, 950).unwrap();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut adversary = Adversary::new(Vec2::new(123.0, 456.0));
        assert!(!adversary.respawn(&maze, &layout, &mut rng));
        assert_eq!(adversary.body.pos, Vec2::new(123.0, 456.0));
    }

    proptest! {
        #[test]
        fn test_spawn_selection_is_always_an_interior_wall(seed in any::<u64>()) {
            let maze = Maze::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let (row, col) = select_spawn_cell(&maze, &mut rng).unwrap();
            prop_assert!(row > 0 && row < GRID_SIZE - 1);
            prop_assert!(col > 0 && col < GRID_SIZE - 1);
            prop_assert!(!maze.is_passable(row, col));
        }
    }
}
