use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use smallvec::SmallVec;

use crate::TreapError;
use crate::raw::{Node, RawTreap};

mod order_statistic;
mod seeding;

/// Which half of a split receives the elements whose key equals the pivot.
///
/// # Examples
///
/// ```
/// use ordered_treap::{OrderedTreap, Ties};
///
/// let treap = OrderedTreap::from([(1, 0), (2, 0), (3, 0)]);
///
/// let (left, right) = treap.clone().split(&2, Ties::Right);
/// assert_eq!(left.len(), 1);  // [1]
/// assert_eq!(right.len(), 2); // [2, 3]
///
/// let (left, right) = treap.split(&2, Ties::Left);
/// assert_eq!(left.len(), 2);  // [1, 2]
/// assert_eq!(right.len(), 1); // [3]
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Ties {
    /// The left half holds keys `<= pivot`, the right half keys `> pivot`.
    Left,
    /// The left half holds keys `< pivot`, the right half keys `>= pivot`.
    Right,
}

/// A sorted multiset based on a [treap].
///
/// Every element is a key together with a priority. Keys are kept in binary search tree
/// order, priorities in max-heap order: no element has a higher priority than its parent.
/// When priorities are drawn at random, as [`insert_random`] does, the expected height of
/// the tree is O(log n) whatever the order of insertion. Every node also records the size
/// of its subtree, which makes rank queries O(log n).
///
/// Duplicate keys are allowed and form a contiguous run in key order. A newly inserted
/// duplicate is placed before the existing elements with the same key.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering
/// relative to any other key changes while it is in the treap, or for two priorities to be
/// incomparable (such as `f64::NAN`). The behavior resulting from such a logic error is not
/// specified, but will not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use ordered_treap::{OrderedTreap, Rank};
///
/// // Priorities can be given explicitly...
/// let mut treap = OrderedTreap::new();
/// treap.insert(1, 1);
/// treap.insert(9, 0);
/// treap.insert(5, 4);
/// treap.insert(8, 0);
/// treap.insert(4, 9);
///
/// assert_eq!(treap.len(), 5);
/// assert_eq!(treap[Rank(1)], 4);
///
/// // ... which fixes the shape: the highest priority is at the root.
/// assert_eq!(treap.height(), 4);
///
/// assert!(treap.remove(&1));
/// assert!(!treap.remove(&1));
/// assert_eq!(treap[Rank(0)], 4);
///
/// let keys: Vec<_> = treap.keys().copied().collect();
/// assert_eq!(keys, [4, 5, 8, 9]);
/// ```
///
/// A seeded treap with random priorities:
///
/// ```
/// use ordered_treap::OrderedTreap;
///
/// let mut treap: OrderedTreap<&str> = OrderedTreap::with_seed(42);
/// for word in ["pear", "apple", "fig", "apple"] {
///     treap.insert_random(word);
/// }
/// assert_eq!(treap.count(&"apple"), 2);
/// assert_eq!(treap.first().map(|(k, _)| *k), Some("apple"));
/// ```
///
/// [treap]: https://en.wikipedia.org/wiki/Treap
/// [`insert_random`]: OrderedTreap::insert_random
pub struct OrderedTreap<K, P = u64> {
    raw: RawTreap<K, P>,
    rng: SmallRng,
}

/// An iterator over the elements of an `OrderedTreap`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`OrderedTreap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use ordered_treap::OrderedTreap;
///
/// let treap = OrderedTreap::from([(2, 'b'), (1, 'a')]);
/// let mut iter = treap.iter();
/// assert_eq!(iter.next(), Some((&1, &'a')));
/// assert_eq!(iter.next_back(), Some((&2, &'b')));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: OrderedTreap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, P> {
    // Nodes whose left subtree has been yielded but which have not been yielded themselves.
    front: SmallVec<[&'a Node<K, P>; 32]>,
    // Mirror image of `front` for reverse iteration.
    back: SmallVec<[&'a Node<K, P>; 32]>,
    remaining: usize,
}

/// An iterator over the keys of an `OrderedTreap`, in order.
///
/// This `struct` is created by the [`keys`] method on [`OrderedTreap`].
///
/// [`keys`]: OrderedTreap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, P> {
    inner: Iter<'a, K, P>,
}

/// An owning iterator over the elements of an `OrderedTreap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`OrderedTreap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, P> {
    inner: alloc::vec::IntoIter<(K, P)>,
}

impl<K, P> OrderedTreap<K, P> {
    /// Makes a new, empty `OrderedTreap`.
    ///
    /// Does not allocate anything on its own. The priority generator starts from a fixed
    /// seed, so two treaps fed the same calls have the same shape; use
    /// [`with_seed`](OrderedTreap::with_seed) to pick another one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let mut treap = OrderedTreap::new();
    /// treap.insert("a", 0.5);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(seeding::DEFAULT_SEED)
    }

    fn from_raw(raw: RawTreap<K, P>, rng: SmallRng) -> Self {
        OrderedTreap { raw, rng }
    }

    /// Clears the treap, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let mut treap = OrderedTreap::new();
    /// assert_eq!(treap.len(), 0);
    /// treap.insert(7, 1);
    /// treap.insert(7, 2);
    /// assert_eq!(treap.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the treap contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of levels of the underlying tree, `0` when empty.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the element with the smallest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<(&K, &P)> {
        self.raw.first().map(|node| (node.key(), node.priority()))
    }

    /// Returns the element with the largest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<(&K, &P)> {
        self.raw.last().map(|node| (node.key(), node.priority()))
    }

    /// Gets an iterator over the `(key, priority)` pairs of the treap, sorted by key.
    ///
    /// The order among elements with equal keys is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let treap = OrderedTreap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    /// let keys: Vec<_> = treap.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(1) amortized per step.
    pub fn iter(&self) -> Iter<'_, K, P> {
        let mut iter = Iter {
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: self.len(),
        };
        iter.descend_front(self.raw.root());
        iter.descend_back(self.raw.root());
        iter
    }

    /// Same as [`iter`](OrderedTreap::iter).
    pub fn elements(&self) -> Iter<'_, K, P> {
        self.iter()
    }

    /// Gets an iterator over the keys of the treap, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let treap = OrderedTreap::from([(2, 0), (1, 0), (2, 1)]);
    /// let keys: Vec<_> = treap.keys().copied().collect();
    /// assert_eq!(keys, [1, 2, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, P> {
        Keys { inner: self.iter() }
    }

    /// Splits the treap into the first `rank` elements and the rest.
    ///
    /// If `rank >= len()`, the right half is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let treap = OrderedTreap::from([(10, 0), (20, 0), (30, 0)]);
    /// let (left, right) = treap.split_at_rank(1);
    /// assert_eq!(left.keys().copied().collect::<Vec<_>>(), [10]);
    /// assert_eq!(right.keys().copied().collect::<Vec<_>>(), [20, 30]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn split_at_rank(mut self, rank: usize) -> (Self, Self) {
        let rng = SmallRng::from_rng(&mut self.rng);
        let (left, right) = self.raw.split_at_rank(rank);
        log::trace!("split_at_rank({rank}): {} + {}", left.len(), right.len());
        (Self::from_raw(left, self.rng), Self::from_raw(right, rng))
    }
}

impl<K: Ord, P> OrderedTreap<K, P> {
    /// Returns `true` if the treap contains an element with the given key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Returns the number of elements with the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let treap = OrderedTreap::from([(1, 0), (3, 1), (3, 2), (5, 0)]);
    /// assert_eq!(treap.count(&3), 2);
    /// assert_eq!(treap.count(&4), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count_left_of(key, Ties::Left) - self.raw.count_left_of(key, Ties::Right)
    }

    /// Splits the treap in two around `key`, consuming it.
    ///
    /// With [`Ties::Right`] the left half holds every key `< key` and the right half every
    /// key `>= key`; with [`Ties::Left`] the left half holds every key `<= key` and the
    /// right half every key `> key`. Nodes are moved, not copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::{OrderedTreap, Ties};
    ///
    /// let treap = OrderedTreap::from([(1, 0), (2, 5), (2, 3), (3, 9)]);
    /// let (left, right) = treap.split(&2, Ties::Right);
    /// assert_eq!(left.keys().copied().collect::<Vec<_>>(), [1]);
    /// assert_eq!(right.keys().copied().collect::<Vec<_>>(), [2, 2, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn split<Q>(mut self, key: &Q, ties: Ties) -> (Self, Self)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let rng = SmallRng::from_rng(&mut self.rng);
        let (left, right) = self.raw.split(key, ties);
        log::trace!("split({ties:?}): {} + {}", left.len(), right.len());
        (Self::from_raw(left, self.rng), Self::from_raw(right, rng))
    }
}

impl<K: Ord, P: PartialOrd> OrderedTreap<K, P> {
    /// Builds a treap from keys sorted in non-decreasing order and their priorities.
    ///
    /// `keys[i]` gets priority `priorities[i]`. The tree is assembled in a single pass
    /// along its rightmost path, without a search per element.
    ///
    /// # Errors
    ///
    /// Returns [`TreapError::LengthMismatch`] if the two vectors differ in length and
    /// [`TreapError::UnsortedKeys`] if a key is less than its predecessor. No treap is
    /// built in either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::{OrderedTreap, Rank};
    ///
    /// let treap = OrderedTreap::build(
    ///     vec![0, 1, 2, 3, 4, 5, 6],
    ///     vec![0.0, 0.1, 0.9, 0.7, 0.3, 0.2, 0.8],
    /// )?;
    /// assert_eq!(treap.len(), 7);
    /// assert_eq!(treap[Rank(5)], 5);
    ///
    /// assert!(OrderedTreap::build(vec![2, 1], vec![0, 0]).is_err());
    /// # Ok::<(), ordered_treap::TreapError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn build(keys: alloc::vec::Vec<K>, priorities: alloc::vec::Vec<P>) -> Result<Self, TreapError> {
        let raw = RawTreap::build(keys, priorities)?;
        Ok(Self::from_raw(raw, SmallRng::seed_from_u64(seeding::DEFAULT_SEED)))
    }

    /// Joins two treaps into one, consuming both.
    ///
    /// Every key of `left` must be less than or equal to every key of `right`. This is
    /// only checked in debug builds; violating it in a release build leaves the result
    /// out of order. Use [`try_merge`](OrderedTreap::try_merge) for a checked variant.
    /// The result keeps the priority generator of `left`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let left = OrderedTreap::from([(1, 4), (2, 2)]);
    /// let right = OrderedTreap::from([(2, 7), (5, 1)]);
    /// let merged = OrderedTreap::merge(left, right);
    /// assert_eq!(merged.keys().copied().collect::<Vec<_>>(), [1, 2, 2, 5]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn merge(left: Self, right: Self) -> Self {
        log::trace!("merge: {} + {}", left.len(), right.len());
        Self::from_raw(RawTreap::merge(left.raw, right.raw), left.rng)
    }

    /// Joins two treaps like [`merge`](OrderedTreap::merge), after checking that every key
    /// of `left` is less than or equal to every key of `right`.
    ///
    /// # Errors
    ///
    /// Returns [`TreapError::Overlap`] if the last key of `left` is greater than the first
    /// key of `right`. Both treaps are dropped in that case.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn try_merge(left: Self, right: Self) -> Result<Self, TreapError> {
        if let (Some((l, _)), Some((r, _))) = (left.last(), right.first())
            && l > r
        {
            return Err(TreapError::Overlap);
        }
        Ok(Self::merge(left, right))
    }

    /// Inserts a key with the given priority.
    ///
    /// Keys already present are not replaced: the treap is a multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let mut treap = OrderedTreap::new();
    /// treap.insert(37, 10);
    /// treap.insert(37, 20);
    /// assert_eq!(treap.count(&37), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, priority: P) {
        self.raw.insert(key, priority);
    }

    /// Removes one element with the given key. Returns whether an element was removed.
    ///
    /// When the key occurs several times, which of the duplicates goes is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let mut treap = OrderedTreap::from([(1, 0), (1, 1)]);
    /// assert!(treap.remove(&1));
    /// assert_eq!(treap.len(), 1);
    /// assert!(!treap.remove(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Removes every element with the given key and returns how many there were.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let mut treap: OrderedTreap<i32> = [1, 2, 3, 3, 3, 4].into_iter().zip(0..).collect();
    /// assert_eq!(treap.remove_range(&3), 3);
    /// assert_eq!(treap.remove_range(&3), 0);
    /// assert_eq!(treap.keys().copied().collect::<Vec<_>>(), [1, 2, 4]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n), independent of the number of duplicates.
    pub fn remove_range<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let removed = self.raw.extract_range(key).len();
        log::trace!("remove_range: {removed} removed");
        removed
    }

    /// Removes every element with the given key and returns them as a new treap.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn extract_range<Q>(&mut self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let run = self.raw.extract_range(key);
        Self::from_raw(run, SmallRng::from_rng(&mut self.rng))
    }
}

impl<'a, K, P> Iter<'a, K, P> {
    fn descend_front(&mut self, mut node: Option<&'a Node<K, P>>) {
        while let Some(n) = node {
            self.front.push(n);
            node = n.left();
        }
    }

    fn descend_back(&mut self, mut node: Option<&'a Node<K, P>>) {
        while let Some(n) = node {
            self.back.push(n);
            node = n.right();
        }
    }
}

impl<K: Clone, P: Clone> Clone for OrderedTreap<K, P> {
    fn clone(&self) -> Self {
        OrderedTreap {
            raw: self.raw.clone(),
            rng: self.rng.clone(),
        }
    }
}

impl<K: PartialEq, P: PartialEq> PartialEq for OrderedTreap<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, P: Eq> Eq for OrderedTreap<K, P> {}

/// Formats the elements as a list of `(key, priority)` pairs in key order.
///
/// The alternate form `{:#?}` draws the tree instead: one line per node with its
/// subtree size, children indented below it, and `null` for a missing child.
///
/// # Examples
///
/// ```
/// use ordered_treap::OrderedTreap;
///
/// let treap = OrderedTreap::from([(1, 0), (2, 5)]);
/// assert_eq!(format!("{treap:?}"), "[(1, 0), (2, 5)]");
/// assert_eq!(
///     format!("{treap:#?}"),
///     "(2: 5) - 2\n    (1: 0) - 1\n        null\n        null\n    null\n"
/// );
/// ```
impl<K: fmt::Debug, P: fmt::Debug> fmt::Debug for OrderedTreap<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            Node::write_shape(self.raw.root(), f)
        } else {
            f.debug_list().entries(self.iter()).finish()
        }
    }
}

impl<K, P> Default for OrderedTreap<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, P: PartialOrd> FromIterator<(K, P)> for OrderedTreap<K, P> {
    fn from_iter<T: IntoIterator<Item = (K, P)>>(iter: T) -> Self {
        let mut treap = OrderedTreap::new();
        treap.extend(iter);
        treap
    }
}

impl<K: Ord, P: PartialOrd> Extend<(K, P)> for OrderedTreap<K, P> {
    fn extend<T: IntoIterator<Item = (K, P)>>(&mut self, iter: T) {
        for (key, priority) in iter {
            self.insert(key, priority);
        }
    }
}

impl<K: Ord, P: PartialOrd, const N: usize> From<[(K, P); N]> for OrderedTreap<K, P> {
    fn from(arr: [(K, P); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, P> IntoIterator for &'a OrderedTreap<K, P> {
    type Item = (&'a K, &'a P);
    type IntoIter = Iter<'a, K, P>;

    fn into_iter(self) -> Iter<'a, K, P> {
        self.iter()
    }
}

impl<K, P> IntoIterator for OrderedTreap<K, P> {
    type Item = (K, P);
    type IntoIter = IntoIter<K, P>;

    /// Gets an owning iterator over the elements of the treap, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_treap::OrderedTreap;
    ///
    /// let treap = OrderedTreap::from([(3, 'c'), (1, 'a')]);
    /// let v: Vec<_> = treap.into_iter().collect();
    /// assert_eq!(v, [(1, 'a'), (3, 'c')]);
    /// ```
    fn into_iter(mut self) -> IntoIter<K, P> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, K: 'a, P: 'a> Iterator for Iter<'a, K, P> {
    type Item = (&'a K, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.front.pop()?;
        self.descend_front(node.right());
        self.remaining -= 1;
        Some((node.key(), node.priority()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, P: 'a> DoubleEndedIterator for Iter<'a, K, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.back.pop()?;
        self.descend_back(node.left());
        self.remaining -= 1;
        Some((node.key(), node.priority()))
    }
}

impl<K, P> ExactSizeIterator for Iter<'_, K, P> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, P> FusedIterator for Iter<'_, K, P> {}

impl<K, P> Clone for Iter<'_, K, P> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, P> Default for Iter<'_, K, P> {
    /// Creates an empty `ordered_treap::Iter`.
    ///
    /// ```
    /// let iter: ordered_treap::ordered_treap::Iter<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: 0,
        }
    }
}

impl<K, P> fmt::Debug for Iter<'_, K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

impl<'a, K, P> Iterator for Keys<'a, K, P> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, P> DoubleEndedIterator for Keys<'_, K, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, P> ExactSizeIterator for Keys<'_, K, P> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, P> FusedIterator for Keys<'_, K, P> {}

impl<K, P> Clone for Keys<'_, K, P> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K, P> fmt::Debug for Keys<'_, K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys").field("remaining", &self.inner.remaining).finish()
    }
}

impl<K, P> Iterator for IntoIter<K, P> {
    type Item = (K, P);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, P> DoubleEndedIterator for IntoIter<K, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, P> ExactSizeIterator for IntoIter<K, P> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, P> FusedIterator for IntoIter<K, P> {}

impl<K: fmt::Debug, P: fmt::Debug> fmt::Debug for IntoIter<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn iterators_meet_in_the_middle() {
        let treap: OrderedTreap<i32, u32> = (0..10).zip([5, 3, 9, 1, 1, 8, 2, 7, 0, 4]).collect();
        let mut iter = treap.iter();
        let mut seen = Vec::new();
        while let Some((k, _)) = iter.next() {
            seen.push(*k);
            if let Some((k, _)) = iter.next_back() {
                seen.push(*k);
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn split_halves_use_distinct_generators() {
        let treap: OrderedTreap<i32> = OrderedTreap::with_seed(7);
        let (mut left, mut right) = treap.split(&0, Ties::Right);
        left.insert_random(1);
        right.insert_random(1);
        assert_ne!(left.first().map(|(_, p)| *p), right.first().map(|(_, p)| *p));
    }
}
