//! Maze Dash - a grid-maze dodge-and-collect arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, entities, projectiles, session state)
//! - `clock`: Fixed-rate scheduler and cooperative cancellation
//! - `session`: Session lifecycle, worker threads and the host-facing API
//! - `config`: Tunable gameplay constants
//!
//! The hosting UI is an external collaborator: it supplies a
//! [`session::RenderTarget`], forwards input and viewport changes, and
//! drives the lifecycle calls. Everything that draws pixels or reads
//! devices lives on that side of the boundary.

pub mod clock;
pub mod config;
pub mod session;
pub mod sim;

pub use config::Config;
pub use session::{RenderTarget, Session};

/// Game configuration constants
pub mod consts {
    /// Maze dimension (cells per side)
    pub const GRID_SIZE: usize = 19;
    /// Cell the player starts on (row, col) - the center of the grid
    pub const PLAYER_START: (usize, usize) = (9, 9);

    /// Frame cap for the render loop
    pub const MAX_FPS: u32 = 60;
    /// Adversary relocation period
    pub const RESPAWN_INTERVAL_MS: u64 = 10_000;
    /// Projectile spawn period
    pub const FIRE_INTERVAL_MS: u64 = 2_000;

    /// Probability that an interior open cell holds a pickup
    pub const PICKUP_CHANCE: f64 = 0.10;
    /// Points per collected pickup
    pub const PICKUP_SCORE: u32 = 10;

    /// Player displacement per committed move request (pixels)
    pub const PLAYER_STEP: f32 = 5.0;
    /// Projectile displacement per tick (pixels)
    pub const PROJECTILE_SPEED: f32 = 8.0;
    /// Minimum drag vector length that counts as a move intent (pixels)
    pub const DRAG_DEAD_ZONE: f32 = 10.0;
}
