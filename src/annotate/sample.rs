use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

/// Draws up to `amount` items without replacement. The same seed gives the same draw.
pub fn sample_without_replacement<T: Clone>(items: &[T], amount: usize, seed: u64) -> Vec<T> {
    let amount = amount.min(items.len());
    if amount == 0 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    index::sample(&mut rng, items.len(), amount)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

/// Even split of the sample across `groups`; the remainder is dropped.
pub fn per_group(total: usize, groups: usize) -> usize {
    if groups == 0 {
        0
    } else {
        total / groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn draw_is_reproducible() {
        let items: Vec<u32> = (0..100).collect();
        let a = sample_without_replacement(&items, 8, 42);
        let b = sample_without_replacement(&items, 8, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn draw_has_no_repeats() {
        let items: Vec<u32> = (0..20).collect();
        let drawn = sample_without_replacement(&items, 15, 7);
        let unique: HashSet<_> = drawn.iter().collect();
        assert_eq!(unique.len(), 15);
    }

    #[test]
    fn capped_at_available() {
        let items = vec!["a", "b"];
        let drawn = sample_without_replacement(&items, 8, 42);
        assert_eq!(drawn.len(), 2);
        assert!(sample_without_replacement::<u8>(&[], 8, 42).is_empty());
    }

    #[test]
    fn remainder_is_dropped() {
        assert_eq!(per_group(25, 3), 8);
        assert_eq!(per_group(2, 3), 0);
        assert_eq!(per_group(9, 0), 0);
    }
}
