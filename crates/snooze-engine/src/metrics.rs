//! Per-tick performance metrics for the simulation engine.
//!
//! [`TickMetrics`] captures timing and progress data for a single
//! tick; consumers (telemetry, frame-budget tuning) read them from the
//! most recent tick via
//! [`SortEngine::last_metrics`](crate::tick::SortEngine::last_metrics).

/// Timing and counter metrics collected during a single tick.
///
/// Durations are wall-clock microseconds of engine computation, not
/// virtual time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Time spent updating element progress and detecting wakes, in
    /// microseconds.
    pub progress_update_us: u64,
    /// Number of elements that woke during this tick.
    pub woke_count: u32,
    /// Number of elements still sleeping after this tick.
    pub sleeping_remaining: u32,
}

/// Counters accumulated across the lifetime of an engine.
///
/// Survive pause/play cycles; zeroed by a reset along with the rest of
/// the run state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineCounters {
    /// Total ticks evaluated.
    pub ticks_evaluated: u64,
    /// Total elements woken.
    pub elements_woken: u64,
    /// Total engine compute time across all ticks, in microseconds.
    pub compute_us: u64,
}

impl EngineCounters {
    /// Fold one tick's metrics into the running totals.
    pub(crate) fn record(&mut self, tick: &TickMetrics) {
        self.ticks_evaluated += 1;
        self.elements_woken += u64::from(tick.woke_count);
        self.compute_us += tick.total_us;
    }
}
