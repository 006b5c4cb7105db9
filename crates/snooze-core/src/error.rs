//! Error types for the snooze simulation, organized by subsystem:
//! configuration (rejected at the boundary) and tick execution
//! (programming-logic faults, unreachable from the public surface).

use std::error::Error;
use std::fmt;

use crate::state::RunState;

/// Errors detected while validating run configuration.
///
/// Rejected synchronously at call time and never partially applied:
/// a failed validation leaves any prior run untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Element count is zero — there is nothing to sort.
    ZeroElementCount,
    /// Minimum value is zero; values must be positive so every element
    /// has a nonzero wait.
    ZeroMinValue,
    /// `min_value` exceeds `max_value`, leaving an empty sampling range.
    EmptyValueRange {
        /// The configured minimum.
        min: u32,
        /// The configured maximum.
        max: u32,
    },
    /// Speed factor is NaN, infinite, zero, or negative.
    InvalidSpeedFactor {
        /// The invalid value.
        value: f64,
    },
    /// Frame rate is NaN, infinite, zero, negative, or so small its
    /// reciprocal overflows.
    InvalidFrameRate {
        /// The invalid value.
        value: f64,
    },
    /// A background thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroElementCount => write!(f, "element count must be at least 1"),
            Self::ZeroMinValue => write!(f, "min_value must be at least 1"),
            Self::EmptyValueRange { min, max } => {
                write!(f, "min_value {min} exceeds max_value {max}")
            }
            Self::InvalidSpeedFactor { value } => {
                write!(f, "speed factor must be finite and positive, got {value}")
            }
            Self::InvalidFrameRate { value } => {
                write!(f, "frame rate must be finite and positive, got {value}")
            }
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from tick execution.
///
/// The realtime driver checks the run state before every tick, so this
/// is unreachable from the public surface. If it does surface, it is a
/// programming-logic fault, not a recoverable runtime condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickError {
    /// A tick was requested while the run was not playing.
    InvalidTransition {
        /// The run state at the time of the request.
        state: RunState,
    },
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { state } => {
                write!(f, "tick requested while run is {state}")
            }
        }
    }
}

impl Error for TickError {}
