//! Session tying static analysis to the live timer.

use std::sync::Arc;

use recipe_analysis::StructureAnalysis;
use recipe_model::{Recipe, RuntimeSnapshot};
use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::metrics::TimerMetricsSnapshot;
use crate::table::TimingTable;
use crate::timer::{TimeRemaining, TimerService, TimerTick};

/// One executing recipe and its countdown state.
///
/// Owns the static pipeline results and the timer. [`install`] replaces
/// analysis and table together; since the session is driven behind a
/// single `&mut` (or one mutex in the poll loop), a tick sees either the
/// old pair or the new pair, never a mix.
///
/// [`install`]: Self::install
#[derive(Debug)]
pub struct RecipeSession {
    name: SmolStr,
    analysis: Option<Arc<StructureAnalysis>>,
    table: Option<Arc<TimingTable>>,
    timer: TimerService,
    installs: u64,
}

impl RecipeSession {
    /// Creates an empty session. The name only shows up in logs.
    #[must_use]
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            analysis: None,
            table: None,
            timer: TimerService::new(),
            installs: 0,
        }
    }

    /// Runs the static pipeline on `recipe` and swaps the results in.
    ///
    /// The timer's phase history is dropped, so floors carried over from
    /// the previous recipe can never cap the new one. Returns the analysis
    /// so the editor can surface diagnostics once per edit rather than on
    /// every tick.
    pub fn install(&mut self, recipe: &Recipe) -> Arc<StructureAnalysis> {
        let analysis = Arc::new(StructureAnalysis::analyze(recipe));
        let table = Arc::new(TimingTable::compute(recipe, &analysis));
        self.timer.reset();
        self.installs = self.installs.saturating_add(1);
        if analysis.is_valid() {
            debug!(
                "session '{}': install #{} with {} steps",
                self.name,
                self.installs,
                recipe.len()
            );
        } else {
            warn!(
                "session '{}': install #{} has {} offending steps, timing degrades to flat sums",
                self.name,
                self.installs,
                analysis.offending_steps().len()
            );
        }
        self.analysis = Some(analysis.clone());
        self.table = Some(table);
        analysis
    }

    /// Feeds one telemetry snapshot through the timer.
    ///
    /// Fails only when nothing was ever installed; with a recipe in place
    /// it always produces a tick, valid analysis or not.
    pub fn tick(&mut self, snapshot: &RuntimeSnapshot) -> Result<TimerTick, EngineError> {
        let (Some(analysis), Some(table)) = (&self.analysis, &self.table) else {
            return Err(EngineError::NoRecipe);
        };
        Ok(self.timer.update(snapshot, analysis, table))
    }

    /// Installs the observer receiving freshly emitted pairs.
    pub fn set_observer(&mut self, observer: impl FnMut(TimeRemaining) + Send + 'static) {
        self.timer.set_observer(observer);
    }

    /// Analysis of the installed recipe, if any.
    #[must_use]
    pub fn analysis(&self) -> Option<&Arc<StructureAnalysis>> {
        self.analysis.as_ref()
    }

    /// Timing table of the installed recipe, if any.
    #[must_use]
    pub fn table(&self) -> Option<&Arc<TimingTable>> {
        self.table.as_ref()
    }

    /// Number of installs over the session's lifetime.
    #[must_use]
    pub fn installs(&self) -> u64 {
        self.installs
    }

    /// Timer metrics, cumulative across installs.
    #[must_use]
    pub fn metrics(&self) -> TimerMetricsSnapshot {
        self.timer.metrics()
    }
}
