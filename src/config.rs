//! Gameplay configuration
//!
//! One flat struct of tunables, defaulting to the constants in
//! [`crate::consts`]. Sessions are built from a `Config`; tests shrink the
//! trigger periods to millisecond scale the same way.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Timing ===
    /// Frame cap for the update/render loop
    pub max_fps: u32,
    /// Adversary relocation period (milliseconds)
    pub respawn_interval_ms: u64,
    /// Projectile spawn period (milliseconds)
    pub fire_interval_ms: u64,

    // === Movement ===
    /// Player displacement per committed move request (pixels)
    pub player_step: f32,
    /// Projectile displacement per tick (pixels)
    pub projectile_speed: f32,

    // === Pickups ===
    /// Probability that an interior open cell holds a pickup
    pub pickup_chance: f64,
    /// Points per collected pickup
    pub pickup_score: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_fps: consts::MAX_FPS,
            respawn_interval_ms: consts::RESPAWN_INTERVAL_MS,
            fire_interval_ms: consts::FIRE_INTERVAL_MS,
            player_step: consts::PLAYER_STEP,
            projectile_speed: consts::PROJECTILE_SPEED,
            pickup_chance: consts::PICKUP_CHANCE,
            pickup_score: consts::PICKUP_SCORE,
        }
    }
}

impl Config {
    /// Target duration of one loop iteration (whole milliseconds, so 60
    /// FPS caps at 16 ms). Rates outside [1, 1000] FPS clamp to the
    /// nearest bound, keeping the interval above zero.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(u64::from(1000 / self.max_fps.clamp(1, 1000)))
    }

    /// Adversary relocation period
    pub fn respawn_interval(&self) -> Duration {
        Duration::from_millis(self.respawn_interval_ms)
    }

    /// Projectile spawn period
    pub fn fire_interval(&self) -> Duration {
        Duration::from_millis(self.fire_interval_ms)
    }

    /// Pull every out-of-range value back to the nearest usable one,
    /// logging each adjustment. A hand-edited file gets a warning per bad
    /// field instead of a panic later in the session.
    pub fn sanitized(mut self) -> Self {
        if !(1..=1000).contains(&self.max_fps) {
            let fixed = self.max_fps.clamp(1, 1000);
            log::warn!("max_fps {} outside [1, 1000], using {fixed}", self.max_fps);
            self.max_fps = fixed;
        }
        if self.respawn_interval_ms == 0 {
            log::warn!("respawn_interval_ms 0 would spin, using 1");
            self.respawn_interval_ms = 1;
        }
        if self.fire_interval_ms == 0 {
            log::warn!("fire_interval_ms 0 would spin, using 1");
            self.fire_interval_ms = 1;
        }
        if !(0.0..=1.0).contains(&self.pickup_chance) {
            let fixed = if self.pickup_chance.is_nan() {
                consts::PICKUP_CHANCE
            } else {
                self.pickup_chance.clamp(0.0, 1.0)
            };
            log::warn!(
                "pickup_chance {} outside [0, 1], using {fixed}",
                self.pickup_chance
            );
            self.pickup_chance = fixed;
        }
        self
    }

    /// Load a config from a JSON file, falling back to defaults when the
    /// file is missing or malformed. Loaded values are sanitized.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Self>(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    log::warn!(
                        "Ignoring malformed config {}: {e}; using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the config as pretty-printed JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
