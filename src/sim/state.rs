//! Session state and core simulation types
//!
//! Everything the workers contend over lives in one `GameState` value so a
//! single lock can guard all of it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Adversary, Player, select_spawn_cell};
use super::layout::Layout;
use super::maze::Maze;
use super::projectile::Projectile;
use crate::config::Config;
use crate::consts::PLAYER_START;

/// Current phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No entities yet; waiting for the first layout
    Initializing,
    /// Active gameplay
    Running,
    /// A projectile reached the player
    Ended,
}

/// Things that happened since the last drawn frame, for the host to react
/// to (redraw hints, sound cues). Drained after each render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PickupCollected { row: usize, col: usize },
    AdversaryRelocated,
    ProjectileFired,
    PlayerHit,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed, kept for reproducibility reports
    pub seed: u64,
    /// Seeded generator behind every random decision
    pub rng: Pcg32,
    /// Gameplay tuning in effect for this session
    pub config: Config,
    /// Current phase
    pub phase: SessionPhase,
    /// The fixed grid, pickups included
    pub maze: Maze,
    /// Pixel placement; None until the first viewport notification
    pub layout: Option<Layout>,
    /// Player character; created with the first layout
    pub player: Option<Player>,
    /// Adversary; created with the first layout
    pub adversary: Option<Adversary>,
    /// Shots in flight
    pub projectiles: Vec<Projectile>,
    /// Points from collected pickups
    pub score: u32,
    /// Render notifications queued since the last frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state before any layout is known. Pickups are scattered here,
    /// once, from the run seed.
    pub fn new(config: Config, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let maze = Maze::with_pickups(config.pickup_chance, &mut rng);
        Self {
            seed,
            rng,
            config,
            phase: SessionPhase::Initializing,
            maze,
            layout: None,
            player: None,
            adversary: None,
            projectiles: Vec::new(),
            score: 0,
            events: Vec::new(),
        }
    }

    /// Apply a viewport change.
    ///
    /// The first layout creates the entities (player at the center cell,
    /// adversary on a random interior wall) and starts the session proper.
    /// Later layouts re-derive each entity's pixel position from the grid
    /// cell it occupied under the old layout, so resizing never teleports
    /// anyone. In-flight projectiles are cleared; their pixel trajectories
    /// are meaningless at the new scale.
    pub fn apply_layout(&mut self, layout: Layout) {
        match self.layout {
            None => {
                let (row, col) = PLAYER_START;
                self.player = Some(Player::new(
                    layout.cell_origin(row, col),
                    self.config.player_step,
                ));
                // Degenerate mazes without interior walls park the
                // adversary in the top-left corner.
                let spawn = select_spawn_cell(&self.maze, &mut self.rng).unwrap_or((0, 0));
                self.adversary = Some(Adversary::new(layout.cell_origin(spawn.0, spawn.1)));
                if self.phase == SessionPhase::Initializing {
                    self.phase = SessionPhase::Running;
                }
            }
            Some(old) => {
                if let Some(player) = &mut self.player {
                    if let Some((row, col)) = old.point_to_cell(player.body.center(old.block_size))
                    {
                        player.body.pos = layout.cell_origin(row, col);
                    }
                }
                if let Some(adversary) = &mut self.adversary {
                    if let Some((row, col)) =
                        old.point_to_cell(adversary.body.center(old.block_size))
                    {
                        adversary.body.pos = layout.cell_origin(row, col);
                    }
                }
                self.projectiles.clear();
            }
        }
        self.layout = Some(layout);
    }

    /// Pixel center of the player, once entities exist.
    pub fn player_center(&self) -> Option<Vec2> {
        let layout = self.layout?;
        Some(self.player.as_ref()?.body.center(layout.block_size))
    }

    /// Pixel center of the adversary, once entities exist.
    pub fn adversary_center(&self) -> Option<Vec2> {
        let layout = self.layout?;
        Some(self.adversary.as_ref()?.body.center(layout.block_size))
    }
}
