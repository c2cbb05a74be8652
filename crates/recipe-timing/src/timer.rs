//! Live countdown computation.
//!
//! Every telemetry snapshot yields a `(step_left, total_left)` pair, which
//! is filtered before anything reaches the HMI: within one execution phase
//! the displayed numbers never climb. Scan jitter and retried field-bus
//! reads make raw elapsed times regress now and then, and a countdown that
//! visibly ticks upward reads as a fault to an operator. A phase is one
//! step at one combination of loop counters; any phase change drops the
//! filter state and the next pair is reported as computed.

use recipe_analysis::StructureAnalysis;
use recipe_model::{Duration, RuntimeSnapshot, MAX_LOOP_DEPTH};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::metrics::{TimerMetrics, TimerMetricsSnapshot};
use crate::table::TimingTable;

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Remaining time pair as shown on the HMI.
///
/// Serializes with fractional-second fields, the shape the display layer
/// consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRemaining {
    /// Time left in the current step.
    #[serde(rename = "step_left_s", serialize_with = "serialize_secs")]
    pub step_left: Duration,
    /// Time left to the end of the recipe.
    #[serde(rename = "total_left_s", serialize_with = "serialize_secs")]
    pub total_left: Duration,
}

/// Execution phase identity with the values last reported in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerPhase {
    step: usize,
    counters: [u32; MAX_LOOP_DEPTH],
    floor: TimeRemaining,
}

/// Outcome of one runtime update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    /// The pair after monotonic filtering.
    pub reported: TimeRemaining,
    /// `true` when `reported` differs from the previous report and was
    /// pushed to the observer.
    pub changed: bool,
}

impl TimerTick {
    /// The reported pair when it was freshly emitted.
    #[must_use]
    pub fn emitted(self) -> Option<TimeRemaining> {
        self.changed.then_some(self.reported)
    }
}

type Observer = Box<dyn FnMut(TimeRemaining) + Send>;

/// Stateful countdown filter between telemetry and the HMI.
///
/// Never fails: any snapshot against any analysis/table pair produces a
/// tick. Implausible input degrades the numbers, not the service.
pub struct TimerService {
    phase: Option<TimerPhase>,
    last_emitted: Option<TimeRemaining>,
    observer: Option<Observer>,
    metrics: TimerMetrics,
}

impl std::fmt::Debug for TimerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerService")
            .field("phase", &self.phase)
            .field("last_emitted", &self.last_emitted)
            .field("has_observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for TimerService {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerService {
    /// Creates an idle timer with no phase history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: None,
            last_emitted: None,
            observer: None,
            metrics: TimerMetrics::new(),
        }
    }

    /// Installs the single observer slot, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl FnMut(TimeRemaining) + Send + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Drops phase history and the last report.
    ///
    /// Called when new static state is installed; values floored under the
    /// previous recipe must not cap the next one. The first update after a
    /// reset always emits.
    pub fn reset(&mut self) {
        self.phase = None;
        self.last_emitted = None;
    }

    /// Cumulative counters since the service was created.
    #[must_use]
    pub fn metrics(&self) -> TimerMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Processes one telemetry snapshot against the current static state.
    pub fn update(
        &mut self,
        snapshot: &RuntimeSnapshot,
        analysis: &StructureAnalysis,
        table: &TimingTable,
    ) -> TimerTick {
        let started = std::time::Instant::now();
        let raw = self.compute(snapshot, analysis, table);

        let mut reported = raw;
        match &self.phase {
            Some(phase)
                if phase.step == snapshot.current_step
                    && phase.counters == snapshot.level_counters =>
            {
                reported.step_left = reported.step_left.min(phase.floor.step_left);
                reported.total_left = reported.total_left.min(phase.floor.total_left);
                if reported != raw {
                    self.metrics.record_floor_hit();
                }
            }
            _ => self.metrics.record_phase_change(),
        }
        self.phase = Some(TimerPhase {
            step: snapshot.current_step,
            counters: snapshot.level_counters,
            floor: reported,
        });

        let changed = self.last_emitted != Some(reported);
        if changed {
            self.last_emitted = Some(reported);
            if let Some(observer) = &mut self.observer {
                observer(reported);
            }
        }
        self.metrics.record_update(started.elapsed(), changed);
        TimerTick { reported, changed }
    }

    fn compute(
        &mut self,
        snapshot: &RuntimeSnapshot,
        analysis: &StructureAnalysis,
        table: &TimingTable,
    ) -> TimeRemaining {
        let current = snapshot.current_step;
        let step_left = table
            .step_duration(current)
            .saturating_sub(snapshot.elapsed_in_step)
            .max(Duration::ZERO);

        let chain = if table.is_flat() {
            Vec::new()
        } else {
            analysis.enclosing_chain(current)
        };

        let total_left = match chain.split_last() {
            // Flat case: no loop context, the static tail is the answer.
            None => step_left.saturating_add(table.remaining_from(current + 1)),
            Some((innermost, _)) => {
                // Mixed-radix pass count across the enclosing chain,
                // outermost counter as the most significant digit.
                let mut total_passes: u64 = 1;
                for block in &chain {
                    total_passes = total_passes.saturating_mul(u64::from(block.iterations));
                }
                let mut completed: u64 = 0;
                for (level, block) in chain.iter().enumerate() {
                    let mut counter =
                        u64::from(snapshot.level_counters.get(level).copied().unwrap_or(0));
                    let last_index = u64::from(block.iterations.saturating_sub(1));
                    if counter > last_index {
                        // Controllers report the count itself for one scan
                        // at loop exit; treat it as the last iteration.
                        debug!(
                            "level {level} counter {counter} beyond {} iterations, clamping",
                            block.iterations
                        );
                        self.metrics.record_counter_clamp();
                        counter = last_index;
                    }
                    let mut weight: u64 = 1;
                    for inner in &chain[level + 1..] {
                        weight = weight.saturating_mul(u64::from(inner.iterations));
                    }
                    completed = completed.saturating_add(counter.saturating_mul(weight));
                }
                let remaining_passes = total_passes.saturating_sub(completed).max(1);

                step_left
                    .saturating_add(
                        table
                            .single_pass(innermost.open)
                            .saturating_mul(remaining_passes - 1),
                    )
                    .saturating_add(table.remaining_from(innermost.close + 1))
            }
        };

        TimeRemaining {
            step_left,
            total_left,
        }
    }
}
