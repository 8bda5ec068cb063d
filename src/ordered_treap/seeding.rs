use rand::distr::{Distribution, StandardUniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::OrderedTreap;
use crate::raw::RawTreap;

/// Seed used by [`OrderedTreap::new`] and friends.
pub(super) const DEFAULT_SEED: u64 = 0x7472_6561_7053_EED5;

impl<K, P> OrderedTreap<K, P> {
    /// Creates an empty treap whose priority generator starts from `seed`.
    ///
    /// Treaps created with the same seed and fed the same calls end up with the same shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let mut a: OrderedTreap<u32> = OrderedTreap::with_seed(7);
    /// let mut b: OrderedTreap<u32> = OrderedTreap::with_seed(7);
    /// for key in 0..100 {
    ///     a.insert_random(key);
    ///     b.insert_random(key);
    /// }
    /// assert_eq!(a, b);
    /// ```
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        OrderedTreap {
            raw: RawTreap::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Restarts the priority generator from `seed`. Elements already in the treap keep
    /// their priorities.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }
}

impl<K: Ord, P: PartialOrd> OrderedTreap<K, P>
where
    StandardUniform: Distribution<P>,
{
    /// Inserts a key with a priority drawn from the treap's own generator.
    ///
    /// Priorities are uniform over the whole domain of `P` and independent of the keys,
    /// so the expected height stays logarithmic for any insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let mut treap: OrderedTreap<u32> = OrderedTreap::new();
    /// for key in 0..1_000 {
    ///     treap.insert_random(key);
    /// }
    /// assert_eq!(treap.len(), 1_000);
    /// assert!(treap.height() < 60);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    pub fn insert_random(&mut self, key: K) {
        let priority = self.rng.random();
        self.raw.insert(key, priority);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn reseed_replays_priorities() {
        let mut treap: OrderedTreap<u8> = OrderedTreap::with_seed(1);
        treap.insert_random(1);
        treap.reseed(1);
        treap.insert_random(2);

        let priorities: Vec<u64> = treap.iter().map(|(_, p)| *p).collect();
        assert_eq!(priorities[0], priorities[1]);
    }

    #[test]
    fn new_uses_default_seed() {
        let mut a: OrderedTreap<u8> = OrderedTreap::new();
        let mut b: OrderedTreap<u8> = OrderedTreap::with_seed(DEFAULT_SEED);
        a.insert_random(0);
        b.insert_random(0);
        assert_eq!(a, b);
    }
}
