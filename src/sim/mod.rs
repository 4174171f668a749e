//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (projectiles by insertion, cells row-major)
//! - No threads, clocks or platform dependencies
//!
//! The concurrency shell (`crate::session`, `crate::clock`) drives these
//! functions under its lock; nothing here blocks or spawns.

pub mod entity;
pub mod layout;
pub mod maze;
pub mod projectile;
pub mod state;
pub mod tick;

pub use entity::{Adversary, Body, Direction, Player, select_spawn_cell};
pub use layout::Layout;
pub use maze::{Cell, Maze};
pub use projectile::Projectile;
pub use state::{GameEvent, GameState, SessionPhase};
pub use tick::{fire, relocate_adversary, tick, try_move};
