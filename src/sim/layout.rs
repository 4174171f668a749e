//! Viewport layout and the cell/pixel coordinate transform
//!
//! The maze is square; the viewport usually is not. Block size is the
//! integer pixel width of one cell and the offsets center the grid, so
//! every pixel position in the simulation is derived from (block_size,
//! offset_x, offset_y) and nothing else.

use glam::Vec2;

use crate::consts::GRID_SIZE;

/// Pixel-space placement of the grid within a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Pixel width/height of one cell
    pub block_size: i32,
    /// Left edge of column 0
    pub offset_x: i32,
    /// Top edge of row 0
    pub offset_y: i32,
}

impl Layout {
    /// Derive the layout for a viewport. None while the viewport cannot
    /// fit at least one pixel per cell.
    pub fn from_viewport(width: i32, height: i32) -> Option<Self> {
        let block_size = width.min(height) / GRID_SIZE as i32;
        if block_size <= 0 {
            return None;
        }
        let span = block_size * GRID_SIZE as i32;
        Some(Self {
            block_size,
            offset_x: (width - span) / 2,
            offset_y: (height - span) / 2,
        })
    }

    /// Pixel width of the whole grid.
    #[inline]
    pub fn pixel_span(&self) -> i32 {
        self.block_size * GRID_SIZE as i32
    }

    /// Pixel origin (top-left corner) of a cell.
    #[inline]
    pub fn cell_origin(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            (col as i32 * self.block_size + self.offset_x) as f32,
            (row as i32 * self.block_size + self.offset_y) as f32,
        )
    }

    /// Pixel center of a cell.
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        self.cell_origin(row, col) + Vec2::splat(self.block_size as f32 / 2.0)
    }

    /// Cell containing a pixel point, or None outside the grid. Floor
    /// division, so points above or left of the grid never alias into it.
    pub fn point_to_cell(&self, point: Vec2) -> Option<(usize, usize)> {
        let col = (point.x.floor() as i32 - self.offset_x).div_euclid(self.block_size);
        let row = (point.y.floor() as i32 - self.offset_y).div_euclid(self.block_size);
        let range = 0..GRID_SIZE as i32;
        if range.contains(&row) && range.contains(&col) {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }

    /// True when `point` lies within the grid rectangle inflated by
    /// `margin` pixels on every side. Used to reap runaway projectiles.
    pub fn contains_with_margin(&self, point: Vec2, margin: f32) -> bool {
        let min_x = self.offset_x as f32 - margin;
        let min_y = self.offset_y as f32 - margin;
        let max_x = (self.offset_x + self.pixel_span()) as f32 + margin;
        let max_y = (self.offset_y + self.pixel_span()) as f32 + margin;
        point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
    }
}
