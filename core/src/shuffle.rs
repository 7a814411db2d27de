//! Shuffled tile orders. An order is a permutation of `0..total` where
//! `order[slot]` names the correct index of the tile placed at `slot`.

use rand::Rng;

/// Uniform in-place Fisher-Yates shuffle.
pub fn fisher_yates<R: Rng + ?Sized>(order: &mut [usize], rng: &mut R) {
    for i in (1..order.len()).rev() {
        let j = rng.random_range(0..=i);
        order.swap(i, j);
    }
}

pub fn is_identity(order: &[usize]) -> bool {
    order.iter().enumerate().all(|(slot, index)| *index == slot)
}

/// Produce a shuffled order that is guaranteed not to be solved already.
///
/// Boards with fewer than two tiles only have the identity order, so they
/// are returned as-is rather than looping forever on the rejection check.
pub fn scramble_order<R: Rng + ?Sized>(total: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..total).collect();
    if total < 2 {
        return order;
    }
    loop {
        fisher_yates(&mut order, rng);
        if !is_identity(&order) {
            return order;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn is_permutation(order: &[usize]) -> bool {
        let mut seen = vec![false; order.len()];
        for &index in order {
            if index >= order.len() || seen[index] {
                return false;
            }
            seen[index] = true;
        }
        true
    }

    #[test]
    fn scramble_is_a_non_identity_permutation() {
        let mut rng = SmallRng::seed_from_u64(7);
        for total in [4usize, 9, 16, 25, 48] {
            for _ in 0..50 {
                let order = scramble_order(total, &mut rng);
                assert_eq!(order.len(), total);
                assert!(is_permutation(&order));
                assert!(!is_identity(&order));
            }
        }
    }

    #[test]
    fn tiny_boards_do_not_loop() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(scramble_order(0, &mut rng), Vec::<usize>::new());
        assert_eq!(scramble_order(1, &mut rng), vec![0]);
    }

    #[test]
    fn seeded_shuffle_is_deterministic() {
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        assert_eq!(scramble_order(16, &mut a), scramble_order(16, &mut b));
    }

    #[test]
    fn identity_check() {
        assert!(is_identity(&[0, 1, 2, 3]));
        assert!(!is_identity(&[1, 0, 2, 3]));
        assert!(is_identity(&[]));
    }

    #[test]
    fn two_by_two_hits_all_non_identity_permutations_roughly_uniformly() {
        let mut rng = SmallRng::seed_from_u64(0x2520);
        let trials = 23_000usize;
        let mut counts: HashMap<Vec<usize>, usize> = HashMap::new();
        for _ in 0..trials {
            let order = scramble_order(4, &mut rng);
            *counts.entry(order).or_insert(0) += 1;
        }
        // 4! = 24 permutations, identity rejected.
        assert_eq!(counts.len(), 23);
        assert!(!counts.contains_key(&vec![0, 1, 2, 3]));
        for (order, count) in counts {
            assert!(
                count > 500 && count < 1500,
                "order {order:?} seen {count} times"
            );
        }
    }
}
