//! The element data model: one value being "sorted by waiting".

use std::fmt;
use std::time::Duration;

use crate::id::ElementId;

/// Progress value at which an element wakes. Progress is pinned to
/// exactly this value on the wake tick and held there for the rest of
/// the run.
pub const FULL_PROGRESS: f64 = 100.0;

/// Whether an element is still waiting out its sleep or has woken.
///
/// Transitions are monotonic: `Sleeping → Awake` at most once per run,
/// never the reverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementStatus {
    /// The element's wait has not yet elapsed.
    Sleeping,
    /// The element's wait elapsed and its value was appended to the
    /// result sequence. Terminal for the run.
    Awake,
}

impl fmt::Display for ElementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sleeping => write!(f, "sleeping"),
            Self::Awake => write!(f, "awake"),
        }
    }
}

/// One element of the population being sorted.
///
/// `id` and `value` are immutable after creation. `progress` is the
/// elapsed fraction of the required wait in `[0, 100]`, non-decreasing
/// while [`ElementStatus::Sleeping`] and pinned to [`FULL_PROGRESS`]
/// once [`ElementStatus::Awake`].
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Stable identity, unique within a run. Ascending ID = creation order.
    pub id: ElementId,
    /// The positive integer being sorted; determines the required wait.
    pub value: u32,
    /// Sleeping or awake.
    pub status: ElementStatus,
    /// Elapsed fraction of the required wait, in `[0, 100]`.
    pub progress: f64,
}

impl Element {
    /// Create a fresh sleeping element with zero progress.
    pub fn new(id: ElementId, value: u32) -> Self {
        Self {
            id,
            value,
            status: ElementStatus::Sleeping,
            progress: 0.0,
        }
    }

    /// The virtual-time wait this element must sleep before waking:
    /// `value × wait_per_unit`. Fixed at creation, never recomputed.
    pub fn required_wait(&self, wait_per_unit: Duration) -> Duration {
        wait_per_unit * self.value
    }

    /// Whether this element has woken.
    pub fn is_awake(&self) -> bool {
        self.status == ElementStatus::Awake
    }

    /// Transition to [`ElementStatus::Awake`] with progress pinned to
    /// exactly [`FULL_PROGRESS`].
    pub fn wake(&mut self) {
        self.status = ElementStatus::Awake;
        self.progress = FULL_PROGRESS;
    }
}
