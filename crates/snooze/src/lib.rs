//! Snooze: a sleep-sort simulation engine with a virtual clock.
//!
//! Sleep sort "sorts" by concurrency: each element waits a duration
//! proportional to its value, and the order in which elements wake is
//! the sorted order. Snooze simulates that race deterministically — a
//! single-threaded tick engine advances every element against one
//! virtual clock, so runs are reproducible, pausable, and can be sped
//! up or slowed down without changing the outcome.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Snooze sub-crates. For most users, adding `snooze` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! Synchronous driving with explicit timestamps (tests, scripted
//! playback):
//!
//! ```rust
//! use std::time::Duration;
//! use snooze::prelude::*;
//!
//! let mut engine = SortEngine::with_values(&[5, 1, 9, 1], 1.0).unwrap();
//! engine.play_at(Duration::ZERO);
//!
//! let mut now = Duration::ZERO;
//! while !engine.state().is_terminal() {
//!     now += Duration::from_millis(16);
//!     engine.tick_at(now).unwrap();
//! }
//! assert_eq!(engine.run().result(), &[1, 1, 5, 9]);
//! ```
//!
//! Realtime driving with a background frame thread (visualizations):
//!
//! ```rust,no_run
//! use snooze::prelude::*;
//!
//! let runner = RealtimeRunner::new(RunConfig::default()).unwrap();
//! runner.play().unwrap();
//! // A presentation loop polls owned snapshots at its own cadence.
//! if let Some(snapshot) = runner.snapshot() {
//!     for element in &snapshot.elements {
//!         println!("{}: {:.0}%", element.value, element.progress);
//!     }
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `snooze-core` | Elements, IDs, run states, error types |
//! | [`engine`] | `snooze-engine` | Tick engine, virtual clock, realtime runner |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`snooze-core`).
///
/// Contains [`types::Element`], [`types::ElementStatus`], the run
/// lifecycle state, and the error types.
pub use snooze_core as types;

/// Simulation engine (`snooze-engine`).
///
/// [`engine::SortEngine`] for synchronous, timestamp-driven ticking;
/// [`engine::RealtimeRunner`] for autonomous background ticking with
/// snapshot publication.
pub use snooze_engine as engine;

/// Common imports for typical Snooze usage.
///
/// ```rust
/// use snooze::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use snooze_core::{Element, ElementId, ElementStatus, RunState, TickId};

    // Errors
    pub use snooze_core::{ConfigError, TickError};

    // Engine
    pub use snooze_engine::{
        ControlError, RealtimeRunner, RunConfig, RunSnapshot, SortEngine, TickResult,
    };
}
