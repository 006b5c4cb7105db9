//! The per-run state machine.

use std::fmt;

/// Lifecycle state of a run.
///
/// ```text
/// Idle --play--> Playing --pause--> Idle
///                Playing --all elements awake--> Completed
/// any state --reset--> Idle (fresh run)
/// ```
///
/// `Idle` and `Completed` both forbid ticking; only `Playing` accrues
/// virtual time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Not playing: either never started or paused. Progress and the
    /// result sequence retain their last committed values.
    Idle,
    /// The scheduler is actively ticking and virtual time accrues.
    Playing,
    /// Every element is awake. Terminal until the next reset.
    Completed,
}

impl RunState {
    /// Whether the scheduler should be evaluating ticks in this state.
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Whether the run has finished (all elements awake).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Playing => write!(f, "playing"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_playing_is_playing() {
        assert!(!RunState::Idle.is_playing());
        assert!(RunState::Playing.is_playing());
        assert!(!RunState::Completed.is_playing());
    }

    #[test]
    fn only_completed_is_terminal() {
        assert!(!RunState::Idle.is_terminal());
        assert!(!RunState::Playing.is_terminal());
        assert!(RunState::Completed.is_terminal());
    }
}
