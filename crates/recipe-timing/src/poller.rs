//! Periodic telemetry polling.
//!
//! The poll loop owns the telemetry source and drives a shared session at
//! a fixed interval. Freshly emitted countdown pairs go out over an
//! optional channel; consumers that only want the latest value read the
//! session directly instead.

#![allow(missing_docs)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;

use recipe_model::{Duration, RuntimeSnapshot};
use tracing::warn;

use crate::clock::Clock;
use crate::error::EngineError;
use crate::session::RecipeSession;
use crate::timer::TimeRemaining;

/// Source of telemetry snapshots, polled at a fixed interval.
pub trait TelemetrySource: Send {
    /// The freshest snapshot, or `None` when no trustworthy read is
    /// available this scan.
    fn poll(&mut self) -> Option<RuntimeSnapshot>;
}

impl<F> TelemetrySource for F
where
    F: FnMut() -> Option<RuntimeSnapshot> + Send,
{
    fn poll(&mut self) -> Option<RuntimeSnapshot> {
        self()
    }
}

/// Poll loop execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollerState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Drives a session from a telemetry source with a scheduling clock.
pub struct TimerRunner<C: Clock + Clone, S: TelemetrySource> {
    session: Arc<Mutex<RecipeSession>>,
    source: S,
    clock: C,
    poll_interval: Duration,
    events: Option<Sender<TimeRemaining>>,
}

impl<C: Clock + Clone, S: TelemetrySource> TimerRunner<C, S> {
    #[must_use]
    pub fn new(
        session: Arc<Mutex<RecipeSession>>,
        source: S,
        clock: C,
        poll_interval: Duration,
    ) -> Self {
        Self {
            session,
            source,
            clock,
            poll_interval,
            events: None,
        }
    }

    /// Attach a channel receiving every emitted pair.
    #[must_use]
    pub fn with_event_channel(mut self, events: Sender<TimeRemaining>) -> Self {
        self.events = Some(events);
        self
    }

    /// Access the shared session.
    #[must_use]
    pub fn session(&self) -> &Arc<Mutex<RecipeSession>> {
        &self.session
    }

    /// Poll once and run the timer when a snapshot came back.
    ///
    /// Returns the emitted pair, `None` on a quiet tick (no snapshot, or
    /// no change to report).
    pub fn tick(&mut self) -> Result<Option<TimeRemaining>, EngineError> {
        let Some(snapshot) = self.source.poll() else {
            return Ok(None);
        };
        let tick = {
            let mut session = self.session.lock().expect("session lock poisoned");
            session.tick(&snapshot)?
        };
        let Some(event) = tick.emitted() else {
            return Ok(None);
        };
        if let Some(events) = &self.events {
            events.send(event).map_err(|_| EngineError::ChannelClosed)?;
        }
        Ok(Some(event))
    }

    /// Spawn the poll loop in a dedicated OS thread.
    pub fn spawn(self, name: impl Into<String>) -> Result<PollerHandle<C>, EngineError>
    where
        S: 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let state = Arc::new(Mutex::new(PollerState::Idle));
        let clock = self.clock.clone();

        let stop_thread = stop.clone();
        let state_thread = state.clone();

        let builder = thread::Builder::new().name(name.into());
        let join = builder
            .spawn(move || run_poll_loop(self, &stop_thread, &state_thread))
            .map_err(|err| EngineError::ThreadSpawn(err.to_string().into()))?;

        Ok(PollerHandle {
            stop,
            state,
            clock,
            join: Some(join),
        })
    }
}

fn run_poll_loop<C: Clock + Clone, S: TelemetrySource>(
    mut runner: TimerRunner<C, S>,
    stop: &AtomicBool,
    state: &Mutex<PollerState>,
) {
    *state.lock().expect("poller state poisoned") = PollerState::Running;
    loop {
        if stop.load(Ordering::SeqCst) {
            *state.lock().expect("poller state poisoned") = PollerState::Stopped;
            break;
        }

        let started = runner.clock.now();
        match runner.tick() {
            Ok(_) => {}
            // Nothing installed yet; keep polling until the editor
            // hands the session a recipe.
            Err(EngineError::NoRecipe) => {}
            Err(EngineError::ChannelClosed) => {
                warn!("countdown event receiver dropped, stopping poller");
                *state.lock().expect("poller state poisoned") = PollerState::Stopped;
                break;
            }
            Err(err) => warn!("poll tick failed: {err}"),
        }

        let interval = runner.poll_interval.as_nanos();
        if interval <= 0 {
            thread::yield_now();
            continue;
        }
        let deadline = Duration::from_nanos(started.as_nanos().saturating_add(interval));
        runner.clock.sleep_until(deadline);
    }
}

/// Handle to a running poll thread.
#[derive(Debug)]
pub struct PollerHandle<C: Clock + Clone> {
    stop: Arc<AtomicBool>,
    state: Arc<Mutex<PollerState>>,
    clock: C,
    join: Option<thread::JoinHandle<()>>,
}

impl<C: Clock + Clone> PollerHandle<C> {
    /// Signal the poll thread to stop.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
        self.clock.wake();
    }

    /// Current poll loop state.
    #[must_use]
    pub fn state(&self) -> PollerState {
        *self.state.lock().expect("poller state poisoned")
    }

    /// Join the poll thread.
    pub fn join(&mut self) -> thread::Result<()> {
        if let Some(join) = self.join.take() {
            return join.join();
        }
        Ok(())
    }
}
