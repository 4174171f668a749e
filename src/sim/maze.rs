//! Maze grid and cell classification
//!
//! The board is a fixed 19x19 matrix compiled into the binary. Walls never
//! change after construction; the only later mutation is a pickup being
//! consumed by the player.

use rand::Rng;

use crate::consts::GRID_SIZE;

/// Classification of one maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Impassable
    Wall,
    /// Walkable floor
    Open,
    /// Walkable floor holding a collectible
    Pickup,
}

/// Compiled-in corridor layout. `#` is wall, `.` is open floor; the outer
/// ring is solid wall.
const LAYOUT: [&str; GRID_SIZE] = [
    "###################",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "#..#.###.#.###.#..#",
    "#.##.#.......#.##.#",
    "#....#.......#....#",
    "#.##...........##.#",
    "#..#.#.#####.#.#..#",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#..#...........#..#",
    "##...#.#####.#...##",
    "#..###...#...###..#",
    "#.................#",
    "###################",
];

/// The fixed square maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Maze {
    /// Build the standard maze, without pickups.
    pub fn new() -> Self {
        Self::from_rows(&LAYOUT)
    }

    /// Build a maze from a literal layout. Any character other than `#`
    /// counts as open floor; short rows are padded with floor.
    pub fn from_rows(rows: &[&str; GRID_SIZE]) -> Self {
        let mut cells = [[Cell::Open; GRID_SIZE]; GRID_SIZE];
        for (row, line) in rows.iter().enumerate() {
            for (col, byte) in line.bytes().take(GRID_SIZE).enumerate() {
                if byte == b'#' {
                    cells[row][col] = Cell::Wall;
                }
            }
        }
        Self { cells }
    }

    /// Build the standard maze and scatter pickups over it.
    pub fn with_pickups(chance: f64, rng: &mut impl Rng) -> Self {
        let mut maze = Self::new();
        maze.seed_pickups(chance, rng);
        maze
    }

    /// Mark each interior open cell as a pickup with independent
    /// probability `chance`. Called once at load; walls are never touched.
    /// Out-of-range probabilities are clamped into [0, 1]; NaN seeds
    /// nothing.
    pub fn seed_pickups(&mut self, chance: f64, rng: &mut impl Rng) {
        let chance = if chance.is_nan() {
            0.0
        } else {
            chance.clamp(0.0, 1.0)
        };
        for row in 1..GRID_SIZE - 1 {
            for col in 1..GRID_SIZE - 1 {
                if self.cells[row][col] == Cell::Open && rng.random_bool(chance) {
                    self.cells[row][col] = Cell::Pickup;
                }
            }
        }
    }

    /// Classification of a cell, or None outside the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// True iff the cell exists and is not a wall.
    pub fn is_passable(&self, row: usize, col: usize) -> bool {
        matches!(self.cell_at(row, col), Some(Cell::Open | Cell::Pickup))
    }

    /// Wall cells excluding the outer ring, in row-major order. The order
    /// is stable so randomized selection over it is reproducible.
    pub fn interior_wall_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for row in 1..GRID_SIZE - 1 {
            for col in 1..GRID_SIZE - 1 {
                if self.cells[row][col] == Cell::Wall {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    /// Consume the pickup at (row, col). Returns true when one was there;
    /// the cell downgrades to open floor.
    pub fn take_pickup(&mut self, row: usize, col: usize) -> bool {
        if self.cell_at(row, col) == Some(Cell::Pickup) {
            self.cells[row][col] = Cell::Open;
            true
        } else {
            false
        }
    }

    /// Number of pickups still on the board.
    pub fn pickup_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == Cell::Pickup)
            .count()
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::new()
    }
}
