//! Element set generation.
//!
//! Produces the initial sleeping population for a run. Pure with
//! respect to state: the only randomness is value selection through
//! the caller-supplied RNG, so a fixed seed yields an identical
//! population. Uses a seeded ChaCha8 RNG for the determinism contract.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use snooze_core::{Element, ElementId};

/// Generate `count` sleeping elements with values drawn uniformly from
/// `[min_value, max_value]` inclusive.
///
/// IDs are assigned sequentially from 0, so ascending ID order is
/// creation order. Duplicate values are permitted; the engine's
/// tie-break rule handles them.
///
/// Bounds are assumed already validated (`count >= 1`,
/// `1 <= min_value <= max_value`); see
/// [`RunConfig::validate`](crate::config::RunConfig::validate).
pub fn generate(count: u32, min_value: u32, max_value: u32, rng: &mut ChaCha8Rng) -> Vec<Element> {
    (0..count)
        .map(|i| Element::new(ElementId(i), rng.random_range(min_value..=max_value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use snooze_core::ElementStatus;

    #[test]
    fn generates_requested_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(generate(8, 10, 49, &mut rng).len(), 8);
    }

    #[test]
    fn ids_are_sequential_creation_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let elements = generate(5, 1, 9, &mut rng);
        for (i, el) in elements.iter().enumerate() {
            assert_eq!(el.id, ElementId(i as u32));
        }
    }

    #[test]
    fn values_within_inclusive_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let elements = generate(200, 10, 12, &mut rng);
        assert!(elements.iter().all(|el| (10..=12).contains(&el.value)));
        // With 200 draws from 3 values, both bounds should be hit.
        assert!(elements.iter().any(|el| el.value == 10));
        assert!(elements.iter().any(|el| el.value == 12));
    }

    #[test]
    fn all_start_sleeping_at_zero_progress() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let elements = generate(8, 10, 49, &mut rng);
        assert!(elements
            .iter()
            .all(|el| el.status == ElementStatus::Sleeping && el.progress == 0.0));
    }

    #[test]
    fn same_seed_same_population() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(generate(16, 1, 100, &mut a), generate(16, 1, 100, &mut b));
    }

    #[test]
    fn degenerate_range_yields_duplicates() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let elements = generate(4, 7, 7, &mut rng);
        assert!(elements.iter().all(|el| el.value == 7));
    }
}
