use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;

use smallvec::SmallVec;

use super::node::{Node, Tree};
use crate::{Ties, TreapError};

/// Rightmost path of a tree under construction, root first. Right links are detached
/// while a node sits on the path.
type Spine<K, P> = SmallVec<[Box<Node<K, P>>; 32]>;

/// The core treap implementation backing `OrderedTreap`.
pub(crate) struct RawTreap<K, P> {
    /// Root of the tree, if the treap is non-empty.
    root: Tree<K, P>,
}

impl<K, P> RawTreap<K, P> {
    /// Creates a new, empty treap.
    pub(crate) const fn new() -> Self {
        Self { root: None }
    }

    const fn from_root(root: Tree<K, P>) -> Self {
        Self { root }
    }

    /// Returns the number of elements, read from the root's size.
    pub(crate) fn len(&self) -> usize {
        Node::size_of(&self.root)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        Node::dismantle(self.root.take());
    }

    pub(crate) fn root(&self) -> Option<&Node<K, P>> {
        self.root.as_deref()
    }

    pub(crate) fn height(&self) -> usize {
        Node::height(&self.root)
    }

    /// Returns the leftmost node.
    pub(crate) fn first(&self) -> Option<&Node<K, P>> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(node)
    }

    /// Returns the rightmost node.
    pub(crate) fn last(&self) -> Option<&Node<K, P>> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(node)
    }

    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<&Node<K, P>> {
        Node::select(&self.root, rank)
    }

    /// Splits off everything from position `rank` onwards.
    pub(crate) fn split_at_rank(mut self, rank: usize) -> (Self, Self) {
        let (left, right) = Node::split_at_rank(self.root.take(), rank);
        (Self::from_root(left), Self::from_root(right))
    }

    /// Moves all elements out in key order. O(n), no restructuring.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, P)> {
        let mut result = Vec::with_capacity(self.len());
        Node::drain_into(self.root.take(), &mut result);
        result
    }
}

impl<K: Ord, P> RawTreap<K, P> {
    pub(crate) fn split<Q>(mut self, key: &Q, ties: Ties) -> (Self, Self)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (left, right) = Node::split(self.root.take(), key, ties);
        (Self::from_root(left), Self::from_root(right))
    }

    pub(crate) fn search<Q>(&self, key: &Q) -> Option<&Node<K, P>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Node::search(&self.root, key)
    }

    /// Number of elements strictly less than `key` (`Ties::Right`) or at most `key` (`Ties::Left`).
    pub(crate) fn count_left_of<Q>(&self, key: &Q, ties: Ties) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Node::count_left_of(&self.root, key, ties)
    }
}

impl<K: Ord, P: PartialOrd> RawTreap<K, P> {
    /// Builds a treap from key-sorted parallel sequences in amortized O(n).
    ///
    /// Each element is appended to the rightmost path: ancestors it outranks are popped
    /// and become its left subtree, and it is then pushed as the new tip of the path.
    pub(crate) fn build(keys: Vec<K>, priorities: Vec<P>) -> Result<Self, TreapError> {
        if keys.len() != priorities.len() {
            return Err(TreapError::LengthMismatch {
                keys: keys.len(),
                priorities: priorities.len(),
            });
        }
        if let Some(index) = keys.windows(2).position(|pair| pair[1] < pair[0]) {
            return Err(TreapError::UnsortedKeys { index: index + 1 });
        }

        let len = keys.len();
        let mut spine: Spine<K, P> = SmallVec::new();

        for (key, priority) in keys.into_iter().zip(priorities) {
            let mut node = Node::boxed(key, priority);
            let mut displaced: Tree<K, P> = None;

            loop {
                match spine.pop() {
                    Some(mut top) if top.priority() <= node.priority() => {
                        top.set_right(displaced);
                        displaced = Some(top);
                    }
                    Some(top) => {
                        spine.push(top);
                        break;
                    }
                    None => break,
                }
            }

            node.set_left(displaced);
            spine.push(node);
        }

        // Reattach the right links bottom-up so sizes are final.
        let mut root: Tree<K, P> = None;
        while let Some(mut node) = spine.pop() {
            node.set_right(root);
            root = Some(node);
        }

        log::debug!("built treap of {len} elements");
        Ok(Self::from_root(root))
    }

    /// Joins two treaps. Every key of `left` must be <= every key of `right`.
    pub(crate) fn merge(mut left: Self, mut right: Self) -> Self {
        debug_assert!(
            match (left.last(), right.first()) {
                (Some(l), Some(r)) => l.key() <= r.key(),
                _ => true,
            },
            "merge: left keys must not exceed right keys"
        );
        Self::from_root(Node::merge(left.root.take(), right.root.take()))
    }

    pub(crate) fn insert(&mut self, key: K, priority: P) {
        Node::insert(&mut self.root, Node::boxed(key, priority));
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Node::remove(&mut self.root, key)
    }

    /// Detaches the whole run of elements equal to `key`.
    pub(crate) fn extract_range<Q>(&mut self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (less, rest) = Node::split(self.root.take(), key, Ties::Right);
        let (run, greater) = Node::split(rest, key, Ties::Left);
        self.root = Node::merge(less, greater);
        Self::from_root(run)
    }
}

impl<K: Clone, P: Clone> Clone for RawTreap<K, P> {
    fn clone(&self) -> Self {
        Self::from_root(Node::clone_tree(&self.root))
    }
}

impl<K, P> Drop for RawTreap<K, P> {
    fn drop(&mut self) {
        Node::dismantle(self.root.take());
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::super::node::tests::check;
    use super::*;
    use alloc::vec;
    use proptest::prelude::*;

    fn keys<K: Clone, P: Clone>(raw: &RawTreap<K, P>) -> Vec<K> {
        raw.clone().drain_to_vec().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn build_matches_cartesian_shape() {
        let raw = RawTreap::build(vec![0, 1, 2, 3, 4, 5, 6], vec![0.0, 0.1, 0.9, 0.7, 0.3, 0.2, 0.8]).unwrap();
        assert_eq!(check(&raw.root), 7);
        assert_eq!(raw.root().map(|n| *n.key()), Some(2));
        assert_eq!(keys(&raw), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn build_rejects_bad_input() {
        assert_eq!(
            RawTreap::build(vec![1, 2], vec![1]).err(),
            Some(TreapError::LengthMismatch { keys: 2, priorities: 1 })
        );
        assert_eq!(
            RawTreap::build(vec![1, 3, 2], vec![1, 1, 1]).err(),
            Some(TreapError::UnsortedKeys { index: 2 })
        );
    }

    #[test]
    fn build_empty() {
        let raw: RawTreap<i32, u32> = RawTreap::build(vec![], vec![]).unwrap();
        assert!(raw.is_empty());
        assert_eq!(raw.height(), 0);
    }

    #[test]
    fn extract_range_takes_whole_run() {
        let mut raw = RawTreap::new();
        for (i, key) in [1, 2, 3, 3, 3, 3, 3, 4, 5, 6, 7, 8].into_iter().enumerate() {
            raw.insert(key, (i * 7919) % 13);
        }

        let run = raw.extract_range(&3);
        check(&raw.root);
        check(&run.root);
        assert_eq!(keys(&run), vec![3; 5]);
        assert_eq!(keys(&raw), vec![1, 2, 4, 5, 6, 7, 8]);
    }

    proptest! {
        #[test]
        fn build_and_insert_agree(mut pairs in prop::collection::vec((-50i32..50, any::<u32>()), 0..200)) {
            let mut inserted = RawTreap::new();
            for &(key, priority) in &pairs {
                inserted.insert(key, priority);
            }

            pairs.sort_by_key(|&(key, _)| key);
            let (keys_in, priorities): (Vec<_>, Vec<_>) = pairs.iter().copied().unzip();
            let built = RawTreap::build(keys_in.clone(), priorities).unwrap();

            prop_assert_eq!(check(&inserted.root), pairs.len());
            prop_assert_eq!(check(&built.root), pairs.len());
            prop_assert_eq!(keys(&inserted), keys_in.clone());
            prop_assert_eq!(keys(&built), keys_in);
        }

        #[test]
        fn extract_range_matches_filter(
            pairs in prop::collection::vec((0i32..16, any::<u32>()), 0..200),
            key in 0i32..16,
        ) {
            let mut raw = RawTreap::new();
            for &(k, p) in &pairs {
                raw.insert(k, p);
            }
            let before = keys(&raw);

            let run = raw.extract_range(&key);
            prop_assert_eq!(check(&run.root), before.iter().filter(|&&k| k == key).count());
            prop_assert_eq!(check(&raw.root), before.iter().filter(|&&k| k != key).count());
            prop_assert!(!keys(&raw).contains(&key));
        }
    }
}
