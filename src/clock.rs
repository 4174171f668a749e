//! Fixed-rate scheduling and cooperative cancellation
//!
//! The game loop and the periodic triggers are plain functions over a
//! [`CancelToken`] and a callback; `session` decides which threads they
//! run on. Cancellation wakes any rate-limiting sleep immediately, so
//! shutdown never waits out a full trigger period.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Shared cancellation flag with a wakeable wait
///
/// Clones share the flag. Sleeps go through the paired condvar, so
/// [`CancelToken::cancel`] interrupts them mid-interval.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `cancel` has been called
    pub fn is_cancelled(&self) -> bool {
        let (flag, _) = &*self.inner;
        *flag.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Set the flag and wake every sleeper
    pub fn cancel(&self) {
        let (flag, condvar) = &*self.inner;
        *flag.lock().unwrap_or_else(|e| e.into_inner()) = true;
        condvar.notify_all();
    }

    /// Block for up to `timeout`, waking early on cancellation.
    ///
    /// Returns false iff the token was cancelled (before or during the
    /// wait). Spurious wakeups re-check the flag and keep waiting.
    pub fn sleep(&self, timeout: Duration) -> bool {
        let (flag, condvar) = &*self.inner;
        let deadline = Instant::now() + timeout;
        let mut cancelled = flag.lock().unwrap_or_else(|e| e.into_inner());
        while !*cancelled {
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            cancelled = condvar
                .wait_timeout(cancelled, deadline - now)
                .unwrap_or_else(|e| e.into_inner())
                .0;
        }
        false
    }
}

/// Drive `frame` at a fixed rate until cancelled or the callback returns
/// false.
///
/// Each iteration records its start, runs the callback, then sleeps off
/// the remainder of `interval`. A slow frame gets no sleep; the loop
/// never runs extra iterations to catch up.
pub fn run_fixed_rate(interval: Duration, token: &CancelToken, mut frame: impl FnMut() -> bool) {
    while !token.is_cancelled() {
        let start = Instant::now();
        if !frame() {
            break;
        }
        let elapsed = start.elapsed();
        if elapsed < interval && !token.sleep(interval - elapsed) {
            break;
        }
    }
}

/// Run `task` every `period` until cancelled.
///
/// The first run happens one full period after entry, like a timer armed
/// at start. The next period begins after the task returns, so a slow
/// task delays later runs rather than stacking them.
pub fn run_periodic(period: Duration, token: &CancelToken, mut task: impl FnMut()) {
    while token.sleep(period) {
        task();
    }
}
