//! Projectiles and their hit testing
//!
//! A projectile's velocity is fixed the moment it spawns: the unit vector
//! from source to target scaled by speed. A target that moves afterward is
//! not tracked.

use glam::Vec2;

use super::entity::Body;

/// A shot in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub body: Body,
}

impl Projectile {
    /// Spawn at `source` heading toward `target` at `speed` pixels per
    /// tick. None when the two points coincide (no direction exists).
    pub fn spawn(source: Vec2, target: Vec2, speed: f32) -> Option<Self> {
        let dir = (target - source).try_normalize()?;
        Some(Self {
            body: Body {
                pos: source,
                vel: dir * speed,
            },
        })
    }

    /// Construct from an explicit position and velocity.
    pub fn with_velocity(pos: Vec2, vel: Vec2) -> Self {
        Self {
            body: Body { pos, vel },
        }
    }

    /// One tick of straight-line motion.
    pub fn advance(&mut self) {
        self.body.advance();
    }

    /// True when within `radius` of `target`, strict Euclidean distance.
    pub fn hits(&self, target: Vec2, radius: f32) -> bool {
        self.body.pos.distance(target) < radius
    }
}
