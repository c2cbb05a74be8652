//! Test harness for driving the engine deterministically.
//!
//! Wraps a [`RecipeSession`] with an observer that records every emitted
//! countdown pair, so a test can feed a scripted snapshot sequence and
//! assert on the exact output sequence, the way the filter properties are
//! specified.

#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use recipe_analysis::StructureAnalysis;
use recipe_model::{Duration, Recipe, RuntimeSnapshot, MAX_LOOP_DEPTH};

use crate::session::RecipeSession;
use crate::timer::{TimeRemaining, TimerTick};

/// Scripted driver around one session.
pub struct EngineHarness {
    session: RecipeSession,
    emitted: Arc<Mutex<Vec<TimeRemaining>>>,
}

impl EngineHarness {
    /// Creates a harness with `recipe` installed and the recorder attached.
    #[must_use]
    pub fn with_recipe(recipe: &Recipe) -> Self {
        let mut harness = Self::new();
        harness.install(recipe);
        harness
    }

    /// Creates an empty harness; install a recipe before ticking.
    #[must_use]
    pub fn new() -> Self {
        let emitted = Arc::new(Mutex::new(Vec::new()));
        let mut session = RecipeSession::new("harness");
        let sink = emitted.clone();
        session.set_observer(move |pair| {
            sink.lock().expect("harness sink poisoned").push(pair);
        });
        Self { session, emitted }
    }

    /// Runs the static pipeline on `recipe` and installs the results.
    pub fn install(&mut self, recipe: &Recipe) -> Arc<StructureAnalysis> {
        self.session.install(recipe)
    }

    /// Feeds one snapshot; panics when no recipe is installed.
    pub fn feed(&mut self, snapshot: RuntimeSnapshot) -> TimerTick {
        self.session
            .tick(&snapshot)
            .expect("harness ticked without a recipe")
    }

    /// Feeds a flat-recipe snapshot: `step` with `elapsed` whole seconds.
    pub fn feed_step(&mut self, step: usize, elapsed_secs: i64) -> TimerTick {
        self.feed(RuntimeSnapshot::at_step(
            step,
            Duration::from_secs(elapsed_secs),
        ))
    }

    /// Feeds a snapshot with explicit loop counters.
    pub fn feed_counters(
        &mut self,
        step: usize,
        counters: [u32; MAX_LOOP_DEPTH],
        elapsed_secs: i64,
    ) -> TimerTick {
        self.feed(RuntimeSnapshot::with_counters(
            step,
            counters,
            Duration::from_secs(elapsed_secs),
        ))
    }

    /// Every pair the observer received, in emission order.
    #[must_use]
    pub fn emitted(&self) -> Vec<TimeRemaining> {
        self.emitted.lock().expect("harness sink poisoned").clone()
    }

    /// Emitted `total_left` values as whole seconds, in emission order.
    ///
    /// Recipe fixtures use whole-second durations; this keeps sequence
    /// assertions to one line.
    #[must_use]
    pub fn emitted_totals_secs(&self) -> Vec<i64> {
        self.emitted()
            .iter()
            .map(|pair| pair.total_left.as_nanos() / 1_000_000_000)
            .collect()
    }

    /// Access the underlying session.
    #[must_use]
    pub fn session(&self) -> &RecipeSession {
        &self.session
    }

    /// Mutate the underlying session.
    pub fn session_mut(&mut self) -> &mut RecipeSession {
        &mut self.session
    }
}

impl Default for EngineHarness {
    fn default() -> Self {
        Self::new()
    }
}
