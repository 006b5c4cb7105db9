//! Core types for the snooze sleep-sort simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary used throughout the snooze workspace:
//! typed IDs, the element data model, run states, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod error;
pub mod id;
pub mod state;

pub use element::{Element, ElementStatus, FULL_PROGRESS};
pub use error::{ConfigError, TickError};
pub use id::{ElementId, TickId, WakeSet};
pub use state::RunState;
