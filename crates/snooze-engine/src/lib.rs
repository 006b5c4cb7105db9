//! Sleep-sort simulation engine.
//!
//! Models the "sleep sort" joke algorithm — each element waits a
//! duration proportional to its value, and values are collected in the
//! order their waits expire — as a deterministic single-control-thread
//! tick loop over a virtual clock. No real per-element concurrency is
//! involved: every tick evaluates all elements in lockstep against one
//! reading of virtual elapsed time.
//!
//! Two ways to drive it:
//!
//! - [`SortEngine`] — the synchronous core. The caller supplies
//!   monotonic timestamps explicitly, which makes it fully testable
//!   with a synthetic clock.
//! - [`RealtimeRunner`] — a frame thread that owns a `SortEngine`,
//!   evaluates one tick per frame period while playing, and publishes
//!   owned snapshots for a presentation layer to read.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod clock;
pub mod config;
pub mod generate;
pub mod metrics;
pub mod realtime;
pub mod run;
pub mod tick;

pub use cell::SnapshotCell;
pub use clock::VirtualClock;
pub use config::{RunConfig, DEFAULT_FRAME_RATE_HZ, WAIT_PER_UNIT};
pub use generate::generate;
pub use metrics::{EngineCounters, TickMetrics};
pub use realtime::{ControlError, RealtimeRunner};
pub use run::{Run, RunSnapshot};
pub use tick::{SortEngine, TickResult};
