//! Tick engine: the single-threaded simulation loop.
//!
//! [`SortEngine`] wires together the generated population, the virtual
//! clock, and the result sequence into a deterministic tick execution
//! loop. "Concurrent sleeping" is simulated, not real: every tick
//! reads virtual elapsed time once and evaluates all elements in
//! lockstep against that one reading, committing the update as a
//! single state transition.
//!
//! # Synchronous mode only
//!
//! This module is a callable struct with no background threads; the
//! caller supplies monotonic timestamps. The realtime driver
//! ([`RealtimeRunner`](crate::realtime::RealtimeRunner)) wraps this in
//! a frame thread with a snapshot cell.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use snooze_core::{ConfigError, Element, ElementId, RunState, TickError, TickId, WakeSet};
use snooze_core::FULL_PROGRESS;

use crate::clock::VirtualClock;
use crate::config::{validate_speed_factor, RunConfig, WAIT_PER_UNIT};
use crate::generate::generate;
use crate::metrics::{EngineCounters, TickMetrics};
use crate::run::{Run, RunSnapshot};

// ── TickResult ───────────────────────────────────────────────────

/// Result of a successful tick evaluation.
#[derive(Debug)]
pub struct TickResult {
    /// Elements that woke during this tick, already in append order:
    /// ascending value, then creation order for equal values.
    pub woke: WakeSet,
    /// Performance metrics for this tick.
    pub metrics: TickMetrics,
}

// ── SortEngine ───────────────────────────────────────────────────

/// Single-threaded sleep-sort engine.
///
/// Owns all run state and evaluates ticks synchronously against
/// caller-supplied monotonic timestamps (`Duration` since an arbitrary
/// epoch). Each [`tick_at()`](SortEngine::tick_at) call advances every
/// sleeping element's progress from one consistent reading of virtual
/// elapsed time, appends any wakes to the result sequence, and detects
/// completion.
pub struct SortEngine {
    config: RunConfig,
    seed: u64,
    run: Run,
    clock: VirtualClock,
    last_metrics: TickMetrics,
    counters: EngineCounters,
}

impl SortEngine {
    /// Construct a new engine from a [`RunConfig`].
    ///
    /// Validates the configuration and generates the initial sleeping
    /// population from the configured seed. Consumes the config.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let elements = generate(config.count, config.min_value, config.max_value, &mut rng);
        let clock = VirtualClock::new(config.speed_factor);
        Ok(Self {
            config,
            seed,
            run: Run::new(elements),
            clock,
            last_metrics: TickMetrics::default(),
            counters: EngineCounters::default(),
        })
    }

    /// Construct an engine over an explicit population instead of a
    /// random one. Intended for scripted demos and tests that need
    /// exact values.
    ///
    /// A later [`reset()`](SortEngine::reset) regenerates randomly
    /// from the value range spanned by `values`.
    pub fn with_values(values: &[u32], speed_factor: f64) -> Result<Self, ConfigError> {
        if values.is_empty() {
            return Err(ConfigError::ZeroElementCount);
        }
        if values.contains(&0) {
            return Err(ConfigError::ZeroMinValue);
        }
        validate_speed_factor(speed_factor)?;

        let (min_value, max_value) = values
            .iter()
            .fold((u32::MAX, 0), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let config = RunConfig {
            count: values.len() as u32,
            min_value,
            max_value,
            speed_factor,
            seed: 0,
            frame_rate_hz: None,
        };
        let elements = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Element::new(ElementId(i as u32), v))
            .collect();
        Ok(Self {
            seed: config.seed,
            run: Run::new(elements),
            clock: VirtualClock::new(speed_factor),
            config,
            last_metrics: TickMetrics::default(),
            counters: EngineCounters::default(),
        })
    }

    /// Begin (or continue) playback, anchoring real-time elapsed
    /// computation at `now`.
    ///
    /// Idempotent while already playing. A no-op once the run has
    /// completed: a terminal run only leaves `Completed` via
    /// [`reset()`](SortEngine::reset).
    pub fn play_at(&mut self, now: Duration) {
        if self.run.state == RunState::Idle {
            self.run.state = RunState::Playing;
            self.clock.resume_at(now);
        }
    }

    /// Pause playback. Progress and the result sequence retain their
    /// last committed values; no virtual time accrues while paused.
    pub fn pause_at(&mut self, now: Duration) {
        if self.run.state == RunState::Playing {
            self.clock.pause_at(now);
            self.run.state = RunState::Idle;
        }
    }

    /// Change the speed factor, effective for future accrual only —
    /// already-accrued progress is never rescaled.
    ///
    /// Allowed in every run state, including mid-run. An invalid
    /// factor is rejected with no state change.
    pub fn set_speed_at(&mut self, now: Duration, factor: f64) -> Result<(), ConfigError> {
        validate_speed_factor(factor)?;
        self.clock.set_speed_at(now, factor);
        Ok(())
    }

    /// Discard the current run and start a fresh one: regenerate the
    /// population from `seed`, empty the result sequence, zero the
    /// clock and tick counter, and return to `Idle`.
    ///
    /// Callable at any time, including mid-run (acts as an implicit
    /// pause plus full state replacement). The speed factor carries
    /// over — it is playback state, not run state.
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let elements = generate(
            self.config.count,
            self.config.min_value,
            self.config.max_value,
            &mut rng,
        );
        self.run = Run::new(elements);
        self.clock.reset(self.clock.speed());
        self.last_metrics = TickMetrics::default();
        self.counters = EngineCounters::default();
    }

    /// Evaluate one tick at `now`.
    ///
    /// Commits virtual-time accrual, recomputes every sleeping
    /// element's progress from that single reading, wakes elements
    /// reaching full progress (appending their values in tie-break
    /// order: ascending value, then creation order), and marks the run
    /// `Completed` once all elements are awake.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::InvalidTransition`] if the run is not
    /// playing. The realtime driver checks state first, so reaching
    /// this from the public surface is a logic fault.
    pub fn tick_at(&mut self, now: Duration) -> Result<TickResult, TickError> {
        if self.run.state != RunState::Playing {
            return Err(TickError::InvalidTransition {
                state: self.run.state,
            });
        }

        let tick_start = Instant::now();
        let elapsed = self.clock.advance_to(now);

        // One pass over the population from the single `elapsed`
        // reading. Wakes are collected first so the append order is
        // decided by the tie-break rule, not iteration order.
        let progress_start = Instant::now();
        let mut woke = WakeSet::new();
        for el in self.run.elements.values_mut() {
            if el.is_awake() {
                continue;
            }
            let required = el.required_wait(WAIT_PER_UNIT);
            let fraction = elapsed.as_secs_f64() / required.as_secs_f64();
            let progress = (fraction * FULL_PROGRESS).min(FULL_PROGRESS);
            if progress >= FULL_PROGRESS {
                el.wake();
                woke.push(el.id);
            } else {
                el.progress = progress;
            }
        }

        // Tie-break: simultaneous wakes append in ascending value;
        // equal values fall back to creation order (ascending ID).
        woke.sort_unstable_by_key(|id| (self.run.elements[id].value, *id));
        for id in &woke {
            self.run.result.push(self.run.elements[id].value);
        }
        let progress_update_us = progress_start.elapsed().as_micros() as u64;

        self.run.tick = TickId(self.run.tick.0 + 1);

        if self.run.all_awake() {
            self.run.state = RunState::Completed;
            self.clock.pause_at(now);
        }

        let metrics = TickMetrics {
            total_us: tick_start.elapsed().as_micros() as u64,
            progress_update_us,
            woke_count: woke.len() as u32,
            sleeping_remaining: self.run.sleeping_count() as u32,
        };
        self.last_metrics = metrics.clone();
        self.counters.record(&metrics);

        Ok(TickResult { woke, metrics })
    }

    /// Owned snapshot of the current committed state.
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            elements: self.run.elements.values().cloned().collect(),
            result: self.run.result.clone(),
            virtual_elapsed: self.clock.accrued(),
            speed_factor: self.clock.speed(),
            is_playing: self.run.state.is_playing(),
            state: self.run.state,
            tick: self.run.tick,
        }
    }

    /// The run's lifecycle state.
    pub fn state(&self) -> RunState {
        self.run.state
    }

    /// Whether the scheduler should be evaluating ticks.
    pub fn is_playing(&self) -> bool {
        self.run.state.is_playing()
    }

    /// Number of ticks evaluated since the last reset.
    pub fn current_tick(&self) -> TickId {
        self.run.tick
    }

    /// The current speed factor.
    pub fn speed_factor(&self) -> f64 {
        self.clock.speed()
    }

    /// The seed the current population was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only access to the run.
    pub fn run(&self) -> &Run {
        &self.run
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &TickMetrics {
        &self.last_metrics
    }

    /// Counters accumulated since construction or the last reset.
    pub fn counters(&self) -> &EngineCounters {
        &self.counters
    }
}

impl std::fmt::Debug for SortEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortEngine")
            .field("state", &self.run.state)
            .field("tick", &self.run.tick)
            .field("seed", &self.seed)
            .field("sleeping", &self.run.sleeping_count())
            .finish()
    }
}
