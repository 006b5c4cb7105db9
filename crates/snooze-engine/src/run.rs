//! Aggregate run state and the published snapshot view.

use std::time::Duration;

use indexmap::IndexMap;

use snooze_core::{Element, ElementId, RunState, TickId};

/// The aggregate simulation state for one play-through.
///
/// Elements are stored in an insertion-ordered map keyed by
/// [`ElementId`]: iteration order is creation order, lookups by ID are
/// O(1). Cardinality and values are fixed for the duration of the run;
/// only `status`/`progress`, the result sequence, the state, and the
/// tick counter change.
#[derive(Clone, Debug)]
pub struct Run {
    /// The population, in creation order.
    pub(crate) elements: IndexMap<ElementId, Element>,
    /// Values in wake order. Append-only during a run.
    pub(crate) result: Vec<u32>,
    /// Lifecycle state.
    pub(crate) state: RunState,
    /// Number of ticks evaluated so far.
    pub(crate) tick: TickId,
}

impl Run {
    /// Create a fresh idle run from a generated population.
    pub fn new(elements: Vec<Element>) -> Self {
        let elements: IndexMap<ElementId, Element> =
            elements.into_iter().map(|el| (el.id, el)).collect();
        Self {
            result: Vec::with_capacity(elements.len()),
            elements,
            state: RunState::Idle,
            tick: TickId(0),
        }
    }

    /// Number of elements in the population.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the population is empty. Never true for a validated run.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements still sleeping.
    pub fn sleeping_count(&self) -> usize {
        self.elements.values().filter(|el| !el.is_awake()).count()
    }

    /// Whether every element has woken.
    pub fn all_awake(&self) -> bool {
        self.elements.values().all(Element::is_awake)
    }

    /// The values appended so far, in wake order.
    pub fn result(&self) -> &[u32] {
        &self.result
    }

    /// Lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Iterate elements in creation order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }
}

/// Owned, read-only view of a run at one committed point in time.
///
/// Published after every state change; a presentation layer renders
/// from this and never touches run state directly. Cloneable and
/// thread-safe, so the realtime driver can hand it across threads
/// inside an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSnapshot {
    /// Elements in creation order, with current status and progress.
    pub elements: Vec<Element>,
    /// Values in wake order.
    pub result: Vec<u32>,
    /// Virtual time elapsed since the run started.
    pub virtual_elapsed: Duration,
    /// Current speed factor.
    pub speed_factor: f64,
    /// Whether the scheduler is actively ticking.
    pub is_playing: bool,
    /// Lifecycle state.
    pub state: RunState,
    /// Ticks evaluated so far.
    pub tick: TickId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use snooze_core::ElementStatus;

    fn population(values: &[u32]) -> Vec<Element> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Element::new(ElementId(i as u32), v))
            .collect()
    }

    #[test]
    fn new_run_is_idle_and_empty_result() {
        let run = Run::new(population(&[5, 1, 9]));
        assert_eq!(run.len(), 3);
        assert_eq!(run.state(), RunState::Idle);
        assert_eq!(run.tick, TickId(0));
        assert!(run.result().is_empty());
        assert_eq!(run.sleeping_count(), 3);
        assert!(!run.all_awake());
    }

    #[test]
    fn iteration_order_is_creation_order() {
        let run = Run::new(population(&[9, 2, 7, 2]));
        let values: Vec<u32> = run.elements().map(|el| el.value).collect();
        assert_eq!(values, vec![9, 2, 7, 2]);
    }

    #[test]
    fn all_awake_tracks_statuses() {
        let mut run = Run::new(population(&[1, 2]));
        for el in run.elements.values_mut() {
            el.wake();
        }
        assert!(run.all_awake());
        assert_eq!(run.sleeping_count(), 0);
        assert!(run
            .elements()
            .all(|el| el.status == ElementStatus::Awake));
    }
}
