//! Scheduling clocks for the poll loop.

#![allow(missing_docs)]

use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use recipe_model::Duration;

/// Clock interface for poll scheduling.
pub trait Clock: Send + Sync + 'static {
    /// Current time for scheduling purposes.
    fn now(&self) -> Duration;

    /// Sleep until the given deadline.
    fn sleep_until(&self, deadline: Duration);

    /// Wake any sleepers (best-effort).
    fn wake(&self) {
        // Default: no-op for clocks without a wait mechanism.
    }
}

/// Monotonic clock based on `std::time::Instant`.
#[derive(Debug, Clone)]
pub struct StdClock {
    start: std::time::Instant,
}

impl StdClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now(&self) -> Duration {
        let elapsed = self.start.elapsed();
        let nanos = i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX);
        Duration::from_nanos(nanos)
    }

    fn sleep_until(&self, deadline: Duration) {
        let delta = deadline.as_nanos() - self.now().as_nanos();
        if delta <= 0 {
            return;
        }
        let delta = u64::try_from(delta).unwrap_or(u64::MAX);
        thread::sleep(std::time::Duration::from_nanos(delta));
    }
}

#[derive(Debug)]
struct ManualClockState {
    now: Duration,
    sleep_calls: u64,
    interrupted: bool,
}

/// Deterministic clock for tests.
///
/// Time only moves through [`advance`](Self::advance) or
/// [`set_time`](Self::set_time); sleepers block on a condvar until the
/// deadline passes or the clock is interrupted. Interruption is sticky,
/// it exists to let a stopping poll thread out of its final sleep.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<(Mutex<ManualClockState>, Condvar)>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new((
                Mutex::new(ManualClockState {
                    now: Duration::ZERO,
                    sleep_calls: 0,
                    interrupted: false,
                }),
                Condvar::new(),
            )),
        }
    }

    /// Current manual time.
    #[must_use]
    pub fn current_time(&self) -> Duration {
        let (lock, _) = &*self.inner;
        let state = lock.lock().expect("manual clock lock poisoned");
        state.now
    }

    /// Advance time by `delta` and wake sleepers.
    pub fn advance(&self, delta: Duration) -> Duration {
        let (lock, cvar) = &*self.inner;
        let mut state = lock.lock().expect("manual clock lock poisoned");
        let next = state.now.saturating_add(delta);
        state.now = next;
        cvar.notify_all();
        next
    }

    /// Set the current time explicitly.
    pub fn set_time(&self, time: Duration) {
        let (lock, cvar) = &*self.inner;
        let mut state = lock.lock().expect("manual clock lock poisoned");
        state.now = time;
        cvar.notify_all();
    }

    /// Number of sleeps issued against this clock.
    #[must_use]
    pub fn sleep_calls(&self) -> u64 {
        let (lock, _) = &*self.inner;
        let state = lock.lock().expect("manual clock lock poisoned");
        state.sleep_calls
    }

    /// Permanently release current and future sleepers.
    pub fn interrupt(&self) {
        let (lock, cvar) = &*self.inner;
        let mut state = lock.lock().expect("manual clock lock poisoned");
        state.interrupted = true;
        cvar.notify_all();
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.current_time()
    }

    fn sleep_until(&self, deadline: Duration) {
        let (lock, cvar) = &*self.inner;
        let mut state = lock.lock().expect("manual clock lock poisoned");
        state.sleep_calls = state.sleep_calls.saturating_add(1);
        while !state.interrupted && state.now < deadline {
            state = cvar.wait(state).expect("manual clock wait poisoned");
        }
    }

    fn wake(&self) {
        self.interrupt();
    }
}
