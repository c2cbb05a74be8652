//! Timer metrics collection.

#![allow(missing_docs)]

use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct TickStats {
    pub min_ms: f64,
    pub max_ms: f64,
    pub avg_ms: f64,
    pub last_ms: f64,
    samples: u64,
}

impl TickStats {
    pub fn record(&mut self, duration: std::time::Duration) {
        let ms = duration.as_secs_f64() * 1000.0;
        self.last_ms = ms;
        if self.samples == 0 {
            self.min_ms = ms;
            self.max_ms = ms;
            self.avg_ms = ms;
        } else {
            if ms < self.min_ms {
                self.min_ms = ms;
            }
            if ms > self.max_ms {
                self.max_ms = ms;
            }
            let total = self.avg_ms * self.samples as f64 + ms;
            self.avg_ms = total / (self.samples as f64 + 1.0);
        }
        self.samples = self.samples.saturating_add(1);
    }
}

impl Default for TickStats {
    fn default() -> Self {
        Self {
            min_ms: 0.0,
            max_ms: 0.0,
            avg_ms: 0.0,
            last_ms: 0.0,
            samples: 0,
        }
    }
}

/// Counters describing how the timer has behaved since creation.
///
/// They survive recipe installs; rates over time are the interesting
/// signal when chasing noisy telemetry in the field.
#[derive(Debug, Clone)]
pub struct TimerMetrics {
    start: Instant,
    pub tick: TickStats,
    pub updates: u64,
    pub emitted: u64,
    pub floor_hits: u64,
    pub phase_changes: u64,
    pub counter_clamps: u64,
}

impl TimerMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            tick: TickStats::default(),
            updates: 0,
            emitted: 0,
            floor_hits: 0,
            phase_changes: 0,
            counter_clamps: 0,
        }
    }

    #[must_use]
    pub fn uptime_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn record_update(&mut self, duration: std::time::Duration, emitted: bool) {
        self.updates = self.updates.saturating_add(1);
        if emitted {
            self.emitted = self.emitted.saturating_add(1);
        }
        self.tick.record(duration);
    }

    pub fn record_floor_hit(&mut self) {
        self.floor_hits = self.floor_hits.saturating_add(1);
    }

    pub fn record_phase_change(&mut self) {
        self.phase_changes = self.phase_changes.saturating_add(1);
    }

    pub fn record_counter_clamp(&mut self) {
        self.counter_clamps = self.counter_clamps.saturating_add(1);
    }

    #[must_use]
    pub fn snapshot(&self) -> TimerMetricsSnapshot {
        TimerMetricsSnapshot {
            uptime_ms: self.uptime_ms(),
            tick: self.tick,
            updates: self.updates,
            emitted: self.emitted,
            floor_hits: self.floor_hits,
            phase_changes: self.phase_changes,
            counter_clamps: self.counter_clamps,
        }
    }
}

impl Default for TimerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimerMetricsSnapshot {
    pub uptime_ms: u64,
    pub tick: TickStats,
    pub updates: u64,
    pub emitted: u64,
    pub floor_hits: u64,
    pub phase_changes: u64,
    pub counter_clamps: u64,
}
