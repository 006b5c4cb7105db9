//! User-facing `RealtimeRunner` API and its frame thread.
//!
//! This is the primary mode for driving a visualization: the tick
//! engine runs on a dedicated background thread at a configurable
//! frame rate (default 60 Hz), publishing a snapshot after every state
//! change for presentation-side readers.
//!
//! # Architecture
//!
//! ```text
//! User Thread(s)              Frame Thread
//!     |                           |
//!     |--play()/pause()/--------->| ctrl_rx.try_recv() (drain)
//!     |  reset()/set_speed()      | engine.tick_at(now) if playing
//!     |  [ctrl_tx: bounded(64)]   | cell.push(snapshot)
//!     |                           | park_timeout(budget - elapsed)
//!     |                           |
//!     |--snapshot()----> cell.latest() (Arc clone, lock held briefly)
//! ```
//!
//! Control messages are fire-and-forget: the frame thread drains them
//! at the top of each frame, before any tick evaluation, so a pause or
//! reset always lands before the next tick mutates the run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use snooze_core::{ConfigError, RunState, TickId};

use crate::cell::SnapshotCell;
use crate::config::{validate_speed_factor, RunConfig};
use crate::run::RunSnapshot;
use crate::tick::SortEngine;

// ── Error types ──────────────────────────────────────────────────

/// Error issuing a control operation to the frame thread.
#[derive(Debug, PartialEq)]
pub enum ControlError {
    /// The frame thread has shut down.
    Shutdown,
    /// The control channel is full (back-pressure).
    ChannelFull,
    /// The operation was rejected before sending.
    Rejected(ConfigError),
}

impl std::fmt::Display for ControlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shutdown => write!(f, "frame thread has shut down"),
            Self::ChannelFull => write!(f, "control channel full"),
            Self::Rejected(e) => write!(f, "control rejected: {e}"),
        }
    }
}

impl std::error::Error for ControlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

// ── Control messages ─────────────────────────────────────────────

/// Fire-and-forget control messages into the frame thread.
#[derive(Debug)]
enum ControlMsg {
    Play,
    Pause,
    Reset { seed: u64 },
    SetSpeed { factor: f64 },
}

// ── Frame thread ─────────────────────────────────────────────────

/// State owned exclusively by the frame thread.
struct FrameThread {
    engine: SortEngine,
    cell: Arc<SnapshotCell>,
    ctrl_rx: crossbeam_channel::Receiver<ControlMsg>,
    shutdown: Arc<AtomicBool>,
    frame_budget: Duration,
    /// Epoch for the engine's monotonic timestamps.
    origin: Instant,
}

impl FrameThread {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn run(mut self) {
        while !self.shutdown.load(Ordering::Acquire) {
            let frame_start = Instant::now();

            self.drain_controls();

            if self.engine.is_playing() {
                let now = self.now();
                if self.engine.tick_at(now).is_ok() {
                    self.cell.push(self.engine.snapshot());
                }
            }

            // park_timeout instead of thread::sleep: shutdown unparks
            // us immediately regardless of the frame rate.
            let elapsed = frame_start.elapsed();
            if let Some(remaining) = self.frame_budget.checked_sub(elapsed) {
                thread::park_timeout(remaining);
            }
        }
    }

    /// Drain all pending controls, publishing after each one so every
    /// state change is observable even between ticks.
    fn drain_controls(&mut self) {
        while let Ok(msg) = self.ctrl_rx.try_recv() {
            let now = self.now();
            match msg {
                ControlMsg::Play => self.engine.play_at(now),
                ControlMsg::Pause => self.engine.pause_at(now),
                ControlMsg::Reset { seed } => self.engine.reset(seed),
                // Validated on the sending side; a failure here would
                // mean a sender bypassed `RealtimeRunner::set_speed`.
                ControlMsg::SetSpeed { factor } => {
                    let _ = self.engine.set_speed_at(now, factor);
                }
            }
            self.cell.push(self.engine.snapshot());
        }
    }
}

// ── RealtimeRunner ───────────────────────────────────────────────

/// Realtime driver for the sleep-sort engine.
///
/// Owns a background frame thread that exclusively holds the
/// [`SortEngine`] and evaluates one tick per frame period while the
/// run is playing. Callers interact through non-blocking control
/// methods and read state via owned snapshots, so the runner is safe
/// to share across threads.
///
/// An initial snapshot is published before the frame thread starts:
/// [`snapshot()`](RealtimeRunner::snapshot) never returns `None` on a
/// live runner.
pub struct RealtimeRunner {
    cell: Arc<SnapshotCell>,
    ctrl_tx: Option<crossbeam_channel::Sender<ControlMsg>>,
    shutdown_flag: Arc<AtomicBool>,
    frame_thread: Option<JoinHandle<()>>,
}

impl RealtimeRunner {
    /// Create a runner and spawn its frame thread.
    ///
    /// The config is validated and consumed; the engine starts `Idle`
    /// with its initial snapshot already published.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let frame_budget = Duration::from_secs_f64(1.0 / config.resolved_frame_rate_hz());
        let engine = SortEngine::new(config)?;

        let cell = Arc::new(SnapshotCell::new());
        cell.push(engine.snapshot());

        let shutdown_flag = Arc::new(AtomicBool::new(false));

        // Control channel: bounded(64) — drained at the top of every
        // frame, so it only fills if the frame thread is wedged.
        let (ctrl_tx, ctrl_rx) = crossbeam_channel::bounded(64);

        let thread_cell = Arc::clone(&cell);
        let thread_shutdown = Arc::clone(&shutdown_flag);
        let frame_thread = thread::Builder::new()
            .name("snooze-frame".into())
            .spawn(move || {
                let state = FrameThread {
                    engine,
                    cell: thread_cell,
                    ctrl_rx,
                    shutdown: thread_shutdown,
                    frame_budget,
                    origin: Instant::now(),
                };
                state.run();
            })
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            cell,
            ctrl_tx: Some(ctrl_tx),
            shutdown_flag,
            frame_thread: Some(frame_thread),
        })
    }

    /// Begin or continue playback.
    pub fn play(&self) -> Result<(), ControlError> {
        self.send(ControlMsg::Play)
    }

    /// Pause playback; committed progress is retained.
    pub fn pause(&self) -> Result<(), ControlError> {
        self.send(ControlMsg::Pause)
    }

    /// Discard the current run and regenerate from `seed`.
    pub fn reset(&self, seed: u64) -> Result<(), ControlError> {
        self.send(ControlMsg::Reset { seed })
    }

    /// Change the speed factor for future virtual-time accrual.
    ///
    /// Validated here, before the message is sent: an invalid factor
    /// returns [`ControlError::Rejected`] and nothing reaches the
    /// frame thread.
    pub fn set_speed(&self, factor: f64) -> Result<(), ControlError> {
        validate_speed_factor(factor).map_err(ControlError::Rejected)?;
        self.send(ControlMsg::SetSpeed { factor })
    }

    /// The most recently published snapshot.
    ///
    /// `None` only after [`shutdown()`](RealtimeRunner::shutdown) on a
    /// runner whose cell was never seeded, which cannot happen through
    /// this constructor.
    pub fn snapshot(&self) -> Option<Arc<RunSnapshot>> {
        self.cell.latest()
    }

    /// Whether playback is currently active, per the latest snapshot.
    pub fn is_playing(&self) -> bool {
        self.cell.latest().is_some_and(|s| s.is_playing)
    }

    /// The run's lifecycle state, per the latest snapshot.
    pub fn state(&self) -> RunState {
        self.cell
            .latest()
            .map(|s| s.state)
            .unwrap_or(RunState::Idle)
    }

    /// The current speed factor, per the latest snapshot.
    pub fn speed_factor(&self) -> f64 {
        self.cell.latest().map(|s| s.speed_factor).unwrap_or(1.0)
    }

    /// Ticks evaluated since the last reset, per the latest snapshot.
    pub fn current_tick(&self) -> TickId {
        self.cell.latest().map(|s| s.tick).unwrap_or(TickId(0))
    }

    /// Total snapshots published by the frame thread.
    pub fn publish_count(&self) -> u64 {
        self.cell.publish_count()
    }

    /// Stop the frame thread and join it. Idempotent; called by
    /// `Drop`.
    pub fn shutdown(&mut self) {
        if self.frame_thread.is_none() {
            return;
        }

        self.shutdown_flag.store(true, Ordering::Release);

        // Wake the frame thread if it's parked in a budget sleep.
        if let Some(handle) = &self.frame_thread {
            handle.thread().unpark();
        }

        // Drop the control channel so later sends fail fast.
        self.ctrl_tx.take();

        if let Some(handle) = self.frame_thread.take() {
            let _ = handle.join();
        }
    }

    fn send(&self, msg: ControlMsg) -> Result<(), ControlError> {
        let ctrl_tx = self.ctrl_tx.as_ref().ok_or(ControlError::Shutdown)?;
        ctrl_tx.try_send(msg).map_err(|e| match e {
            crossbeam_channel::TrySendError::Full(_) => ControlError::ChannelFull,
            crossbeam_channel::TrySendError::Disconnected(_) => ControlError::Shutdown,
        })
    }
}

impl Drop for RealtimeRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for RealtimeRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeRunner")
            .field("live", &self.frame_thread.is_some())
            .field("published", &self.cell.publish_count())
            .finish()
    }
}

// The runner is handed between threads in tests and applications.
const _: () = {
    const fn assert_sync<T: Send + Sync>() {}
    assert_sync::<RealtimeRunner>();
};
