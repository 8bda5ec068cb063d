use core::borrow::Borrow;
use core::ops::Index;

use super::{OrderedTreap, Ties};
use crate::{Rank, TreapError};

impl<K, P> OrderedTreap<K, P> {
    /// Returns the element at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Elements with equal keys occupy consecutive ranks.
    ///
    /// # Errors
    ///
    /// Returns [`TreapError::RankOutOfRange`] if `rank >= len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::{OrderedTreap, TreapError};
    ///
    /// let treap = OrderedTreap::from([("a", 10), ("c", 30), ("b", 20)]);
    ///
    /// assert_eq!(treap.get_by_rank(1), Ok((&"b", &20)));
    /// assert_eq!(treap.get_by_rank(3), Err(TreapError::RankOutOfRange { rank: 3, len: 3 }));
    /// ```
    pub fn get_by_rank(&self, rank: usize) -> Result<(&K, &P), TreapError> {
        self.raw
            .get_by_rank(rank)
            .map(|node| (node.key(), node.priority()))
            .ok_or(TreapError::RankOutOfRange { rank, len: self.len() })
    }
}

impl<K: Ord, P> OrderedTreap<K, P> {
    /// Returns the zero-based rank of the first element with the given key, or `None` if
    /// the key is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let treap = OrderedTreap::from([(10, 0), (20, 0), (20, 1), (30, 0)]);
    ///
    /// assert_eq!(treap.rank_of(&20), Some(1));
    /// assert_eq!(treap.rank_of(&30), Some(3));
    /// assert_eq!(treap.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key)?;
        Some(self.raw.count_left_of(key, Ties::Right))
    }
}

/// Indexes into the treap by rank, yielding the key.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use ordered_treap::{OrderedTreap, Rank};
///
/// let treap = OrderedTreap::from([(8, 0), (1, 1), (5, 4)]);
///
/// assert_eq!(treap[Rank(0)], 1);
/// assert_eq!(treap[Rank(2)], 8);
/// ```
impl<K, P> Index<Rank> for OrderedTreap<K, P> {
    type Output = K;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(k, _)| k).expect("index out of bounds")
    }
}
