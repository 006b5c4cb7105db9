//! Strongly-typed identifiers and the [`WakeSet`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Identifies one element within a run.
///
/// Elements are generated at run creation and assigned sequential IDs.
/// `ElementId(n)` corresponds to the n-th element in creation order, so
/// ascending ID order *is* insertion order — the tie-break rule for
/// equal-value simultaneous wakes relies on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ElementId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time the engine evaluates one scheduling tick.
/// Reset to 0 when a new run is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// The set of elements that woke during a single tick.
///
/// Uses `SmallVec<[ElementId; 8]>` to avoid heap allocation for the
/// default population size; larger wake batches spill to the heap
/// transparently.
pub type WakeSet = SmallVec<[ElementId; 8]>;
