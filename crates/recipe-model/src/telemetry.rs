use crate::duration::Duration;
use crate::step::MAX_LOOP_DEPTH;

/// Snapshot of controller execution state, one per scan cycle.
///
/// Produced by the field-bus poller. The engine treats every snapshot it is
/// handed as already quality-checked; stale or implausible values are the
/// transport layer's problem, tolerating them without panicking is ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeSnapshot {
    /// Index of the step the controller is currently executing.
    pub current_step: usize,
    /// 0-based iteration index per nesting level, outermost first.
    ///
    /// Only the first `depth(current_step)` entries carry meaning; the
    /// controller leaves deeper counters at whatever they last held.
    pub level_counters: [u32; MAX_LOOP_DEPTH],
    /// Time spent in the current step so far.
    pub elapsed_in_step: Duration,
}

impl RuntimeSnapshot {
    /// Snapshot positioned at `current_step` with all loop counters at zero.
    #[must_use]
    pub fn at_step(current_step: usize, elapsed_in_step: Duration) -> Self {
        Self {
            current_step,
            level_counters: [0; MAX_LOOP_DEPTH],
            elapsed_in_step,
        }
    }

    /// Snapshot with explicit loop counters.
    #[must_use]
    pub fn with_counters(
        current_step: usize,
        level_counters: [u32; MAX_LOOP_DEPTH],
        elapsed_in_step: Duration,
    ) -> Self {
        Self {
            current_step,
            level_counters,
            elapsed_in_step,
        }
    }
}
