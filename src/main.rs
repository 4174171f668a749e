//! Maze Dash entry point
//!
//! Headless demo run: builds a session from config, wanders the player
//! around with random input and narrates the run through the log until a
//! projectile connects or the deadline passes.

use std::io;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rand::Rng;

use maze_dash::sim::{Direction, GameEvent, GameState};
use maze_dash::{Config, RenderTarget, Session};

/// How long the demo keeps dodging before calling it a draw.
const DEMO_DEADLINE: Duration = Duration::from_secs(60);
/// Viewport handed to the session. 950 divides evenly into 19 blocks.
const VIEWPORT: (i32, i32) = (950, 950);
/// Pacing of the scripted input feed.
const INPUT_INTERVAL: Duration = Duration::from_millis(20);

/// Render target that narrates the session instead of drawing it.
struct LoggingTarget {
    frames: u64,
}

impl RenderTarget for LoggingTarget {
    fn acquire(&mut self) -> bool {
        true
    }

    fn render(&mut self, state: &GameState) {
        self.frames += 1;
        for event in &state.events {
            match event {
                GameEvent::PickupCollected { row, col } => {
                    log::info!(
                        "Pickup collected at ({row}, {col}), score now {}",
                        state.score
                    );
                }
                GameEvent::AdversaryRelocated => log::debug!("Adversary relocated"),
                GameEvent::ProjectileFired => {
                    log::debug!("Projectile fired, {} in flight", state.projectiles.len());
                }
                GameEvent::PlayerHit => log::info!("Player hit after {} frames", self.frames),
            }
        }
    }

    fn present(&mut self) {}
}

fn random_direction(rng: &mut impl Rng) -> Direction {
    match rng.random_range(0..4) {
        0 => Direction::Up,
        1 => Direction::Down,
        2 => Direction::Left,
        _ => Direction::Right,
    }
}

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Maze Dash (headless) starting...");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "maze-dash.json".to_string());
    let config = Config::load(Path::new(&config_path));

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;
    log::info!("Session seed: {seed}");

    let mut session = Session::new(config, seed);
    session.start(LoggingTarget { frames: 0 })?;
    session.on_layout_changed(VIEWPORT.0, VIEWPORT.1);

    // Wander until a projectile connects or the deadline passes. Mixes
    // direct move intents with drag vectors, like a host UI would.
    let mut rng = rand::rng();
    let deadline = Instant::now() + DEMO_DEADLINE;
    while session.is_running() && Instant::now() < deadline {
        if rng.random_bool(0.25) {
            let dx = rng.random_range(-100.0..100.0);
            let dy = rng.random_range(-100.0..100.0);
            session.drag(dx, dy);
        } else {
            session.move_player(random_direction(&mut rng));
        }
        thread::sleep(INPUT_INTERVAL);
    }

    session.stop();
    log::info!("Final score: {}", session.score());
    println!("Final score: {}", session.score());
    Ok(())
}
