//! Session lifecycle, worker threads and the host-facing API
//!
//! A [`Session`] owns the shared [`GameState`], the render target and the
//! worker threads: the fixed-rate loop plus the respawn and fire triggers.
//! One mutex guards everything the workers contend over. The loop holds it
//! across update and draw; the triggers take it only long enough to mutate
//! the adversary or the projectile set.
//!
//! The hosting UI calls in through `start`/`pause`/`resume`/`stop`,
//! forwards viewport changes to `on_layout_changed` and input to
//! `move_player`/`drag`, and observes progress through `score`, `phase`
//! and whatever its render target records.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use glam::Vec2;

use crate::clock::{self, CancelToken};
use crate::config::Config;
use crate::consts::DRAG_DEAD_ZONE;
use crate::sim::{self, Direction, GameState, Layout, SessionPhase};

/// Drawing surface supplied by the host.
///
/// Models a lockable canvas: `acquire` may fail transiently, in which case
/// the loop skips update and draw for that iteration. After a successful
/// `acquire` the loop always calls `render` then `present`, all under the
/// session lock, so implementations never see two frames interleaved. A
/// panic escaping any of the three cancels every worker; the target stays
/// bound until [`Session::stop`] and is never called into again.
pub trait RenderTarget: Send + 'static {
    /// Try to take the surface for one frame.
    fn acquire(&mut self) -> bool;
    /// Draw a snapshot of the current state.
    fn render(&mut self, state: &GameState);
    /// Publish the frame taken by `acquire`.
    fn present(&mut self);
}

/// Everything the worker threads share, behind a single lock.
struct Shared {
    state: GameState,
    target: Option<Box<dyn RenderTarget>>,
}

/// Look past lock poisoning: a panicked worker is logged at join time and
/// must not wedge every later lifecycle call.
fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|e| e.into_inner())
}

/// A running game instance.
///
/// Dropping a session stops it first, so worker threads never outlive the
/// value that spawned them.
pub struct Session {
    shared: Arc<Mutex<Shared>>,
    token: CancelToken,
    workers: Vec<JoinHandle<()>>,
}

impl Session {
    /// Build a session in the Initializing phase. Nothing runs until
    /// [`Session::start`]; entities appear with the first layout.
    pub fn new(config: Config, seed: u64) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                state: GameState::new(config, seed),
                target: None,
            })),
            token: CancelToken::new(),
            workers: Vec::new(),
        }
    }

    /// Bind a render target and spawn the loop and trigger threads.
    pub fn start(&mut self, target: impl RenderTarget) -> io::Result<()> {
        if self.is_running() {
            log::warn!("start() on a running session ignored");
            return Ok(());
        }
        self.halt_workers();
        lock(&self.shared).target = Some(Box::new(target));
        log::info!("Session starting");
        self.spawn_workers()
    }

    /// Halt the loop and both triggers, keeping the render target bound.
    /// Joins every worker before returning.
    pub fn pause(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        log::info!("Session pausing");
        self.halt_workers();
    }

    /// Spawn a fresh set of workers against the render target bound at
    /// `start`. A paused loop is never restarted in place.
    pub fn resume(&mut self) -> io::Result<()> {
        if self.is_running() {
            return Ok(());
        }
        self.halt_workers();
        if lock(&self.shared).target.is_none() {
            log::warn!("resume() without a render target ignored");
            return Ok(());
        }
        log::info!("Session resuming");
        self.spawn_workers()
    }

    /// Halt the workers and release the render target. Synchronous: when
    /// this returns no worker thread is alive, so nothing can draw against
    /// a surface the host tears down next.
    pub fn stop(&mut self) {
        self.halt_workers();
        if lock(&self.shared).target.take().is_some() {
            log::info!("Session stopped");
        }
    }

    /// True while the worker threads are live. Goes false once the session
    /// ends, pauses or stops.
    pub fn is_running(&self) -> bool {
        !self.workers.is_empty() && !self.token.is_cancelled()
    }

    /// Current phase of the underlying state machine.
    pub fn phase(&self) -> SessionPhase {
        lock(&self.shared).state.phase
    }

    /// Points collected so far. Frozen once the session ends.
    pub fn score(&self) -> u32 {
        lock(&self.shared).state.score
    }

    /// Viewport notification. The first usable layout creates the entities
    /// and moves the session from Initializing to Running; later ones
    /// rescale entity positions in place.
    pub fn on_layout_changed(&self, width: i32, height: i32) {
        match Layout::from_viewport(width, height) {
            Some(layout) => {
                let mut guard = lock(&self.shared);
                guard.state.apply_layout(layout);
                log::info!(
                    "Viewport {}x{}: block size {}",
                    width,
                    height,
                    layout.block_size
                );
            }
            None => log::warn!("Viewport {width}x{height} too small, keeping old layout"),
        }
    }

    /// Directional move intent. Returns whether the move was committed.
    pub fn move_player(&self, dir: Direction) -> bool {
        sim::try_move(&mut lock(&self.shared).state, dir)
    }

    /// Joystick-style drag vector. Mapped to its dominant-axis direction
    /// (with a dead zone) and then handled like [`Session::move_player`].
    pub fn drag(&self, dx: f32, dy: f32) -> bool {
        match Direction::from_vector(Vec2::new(dx, dy), DRAG_DEAD_ZONE) {
            Some(dir) => self.move_player(dir),
            None => false,
        }
    }

    fn spawn_workers(&mut self) -> io::Result<()> {
        self.token = CancelToken::new();
        let (frame, respawn, fire) = {
            let guard = lock(&self.shared);
            let config = &guard.state.config;
            (
                config.frame_interval(),
                config.respawn_interval(),
                config.fire_interval(),
            )
        };

        let spawned = [
            self.spawn_loop(frame),
            self.spawn_trigger("respawn-trigger", respawn, sim::relocate_adversary),
            self.spawn_trigger("fire-trigger", fire, sim::fire),
        ];
        let mut failure = None;
        for result in spawned {
            match result {
                Ok(handle) => self.workers.push(handle),
                Err(e) => failure = Some(e),
            }
        }
        if let Some(e) = failure {
            // Partial spawns are torn down again; the session stays stopped.
            self.halt_workers();
            return Err(e);
        }
        Ok(())
    }

    /// The fixed-rate loop: acquire, update, render, present, all under
    /// the shared lock. Ending the session cancels the triggers and exits;
    /// so does a panic out of a target callback, which would otherwise
    /// kill only this thread and leave the triggers filling a state
    /// nothing draws.
    fn spawn_loop(&self, interval: Duration) -> io::Result<JoinHandle<()>> {
        let shared = Arc::clone(&self.shared);
        let token = self.token.clone();
        thread::Builder::new()
            .name("game-loop".to_string())
            .spawn(move || {
                let loop_token = token.clone();
                clock::run_fixed_rate(interval, &token, move || {
                    let mut guard = lock(&shared);
                    let Shared { state, target } = &mut *guard;
                    let Some(target) = target.as_deref_mut() else {
                        return false;
                    };
                    let drawn = panic::catch_unwind(AssertUnwindSafe(|| {
                        if !target.acquire() {
                            // Surface busy; try again next interval.
                            return false;
                        }
                        sim::tick(state);
                        target.render(state);
                        target.present();
                        true
                    }));
                    match drawn {
                        Ok(true) => {}
                        Ok(false) => return true,
                        Err(_) => {
                            log::error!("Frame callback panicked; ending session");
                            loop_token.cancel();
                            return false;
                        }
                    }
                    state.events.clear();
                    if state.phase == SessionPhase::Ended {
                        log::info!("Session ended with score {}", state.score);
                        loop_token.cancel();
                        return false;
                    }
                    true
                });
            })
    }

    fn spawn_trigger(
        &self,
        name: &str,
        period: Duration,
        op: fn(&mut GameState),
    ) -> io::Result<JoinHandle<()>> {
        let shared = Arc::clone(&self.shared);
        let token = self.token.clone();
        thread::Builder::new().name(name.to_string()).spawn(move || {
            clock::run_periodic(period, &token, move || {
                op(&mut lock(&shared).state);
            });
        })
    }

    /// Cancel the token and join every worker. A worker that died
    /// panicking is logged, not propagated.
    fn halt_workers(&mut self) {
        self.token.cancel();
        for handle in self.workers.drain(..) {
            let name = handle.thread().name().unwrap_or("worker").to_string();
            if handle.join().is_err() {
                log::error!("Worker thread {name} panicked");
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
