//! Single-slot snapshot publication.
//!
//! The frame thread publishes a fresh [`RunSnapshot`] after every
//! state change; presentation-side readers take the latest one at
//! their own cadence. Only the newest snapshot matters for rendering,
//! so the cell holds exactly one `Arc` and each publish replaces the
//! previous — a stale frame is simply never observed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::run::RunSnapshot;

/// Shared slot holding the most recently published snapshot.
///
/// Writers call [`push()`](SnapshotCell::push); readers call
/// [`latest()`](SnapshotCell::latest) and receive a cheap `Arc` clone.
/// The publish counter lets a polling reader detect whether anything
/// new arrived without comparing snapshot contents.
#[derive(Debug, Default)]
pub struct SnapshotCell {
    slot: Mutex<Option<Arc<RunSnapshot>>>,
    published: AtomicU64,
}

impl SnapshotCell {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a snapshot, replacing whatever was there before.
    pub fn push(&self, snapshot: RunSnapshot) {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            // A writer panicking mid-replace cannot leave a torn
            // snapshot behind (the slot holds a whole Arc), so the
            // poisoned lock is still safe to use.
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(Arc::new(snapshot));
        self.published.fetch_add(1, Ordering::Release);
    }

    /// The most recently published snapshot, if any.
    pub fn latest(&self) -> Option<Arc<RunSnapshot>> {
        let slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.clone()
    }

    /// Total number of snapshots published since creation.
    pub fn publish_count(&self) -> u64 {
        self.published.load(Ordering::Acquire)
    }
}

// The cell is shared between the frame thread and readers.
const _: () = {
    const fn assert_sync<T: Send + Sync>() {}
    assert_sync::<SnapshotCell>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use snooze_core::{RunState, TickId};
    use std::time::Duration;

    fn snapshot(tick: u64) -> RunSnapshot {
        RunSnapshot {
            elements: Vec::new(),
            result: Vec::new(),
            virtual_elapsed: Duration::ZERO,
            speed_factor: 1.0,
            is_playing: false,
            state: RunState::Idle,
            tick: TickId(tick),
        }
    }

    #[test]
    fn empty_cell_has_no_snapshot() {
        let cell = SnapshotCell::new();
        assert!(cell.latest().is_none());
        assert_eq!(cell.publish_count(), 0);
    }

    #[test]
    fn push_then_latest_round_trips() {
        let cell = SnapshotCell::new();
        cell.push(snapshot(3));
        let latest = cell.latest().unwrap();
        assert_eq!(latest.tick, TickId(3));
        assert_eq!(cell.publish_count(), 1);
    }

    #[test]
    fn newer_push_replaces_older() {
        let cell = SnapshotCell::new();
        cell.push(snapshot(1));
        cell.push(snapshot(2));
        assert_eq!(cell.latest().unwrap().tick, TickId(2));
        assert_eq!(cell.publish_count(), 2);
    }

    #[test]
    fn readers_hold_old_arcs_independently() {
        let cell = SnapshotCell::new();
        cell.push(snapshot(1));
        let held = cell.latest().unwrap();
        cell.push(snapshot(2));
        // The earlier reader still sees the frame it took.
        assert_eq!(held.tick, TickId(1));
        assert_eq!(cell.latest().unwrap().tick, TickId(2));
    }

    #[test]
    fn concurrent_publish_and_read() {
        let cell = Arc::new(SnapshotCell::new());
        let writer = {
            let cell = Arc::clone(&cell);
            std::thread::spawn(move || {
                for i in 0..200 {
                    cell.push(snapshot(i));
                }
            })
        };
        let reader = {
            let cell = Arc::clone(&cell);
            std::thread::spawn(move || {
                let mut last = 0u64;
                for _ in 0..200 {
                    if let Some(snap) = cell.latest() {
                        assert!(snap.tick.0 >= last);
                        last = snap.tick.0;
                    }
                }
            })
        };
        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(cell.publish_count(), 200);
    }
}
