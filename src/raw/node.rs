use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

use smallvec::SmallVec;

use super::size::Size;
use crate::Ties;

/// An owned, possibly empty subtree.
pub(crate) type Tree<K, P> = Option<Box<Node<K, P>>>;

/// Nodes detached while descending, parent first.
type Path<K, P> = SmallVec<[Box<Node<K, P>>; 32]>;

// Treap node: BST on `key`, max-heap on `priority`.
//
// Nothing here recurses: the height of a treap is only logarithmic in expectation, and
// caller-chosen priorities can turn it into a chain.
pub(crate) struct Node<K, P> {
    key: K,
    priority: P,
    // The number of nodes in the subtree rooted at this node.
    size: Size,
    left: Tree<K, P>,
    right: Tree<K, P>,
}

impl<K, P> Node<K, P> {
    /// Creates a new leaf node.
    pub(crate) fn boxed(key: K, priority: P) -> Box<Self> {
        Box::new(Self {
            key,
            priority,
            size: Size::ONE,
            left: None,
            right: None,
        })
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn priority(&self) -> &P {
        &self.priority
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns the number of nodes in `tree`, zero if it is empty.
    #[inline]
    pub(crate) fn size_of(tree: &Tree<K, P>) -> usize {
        tree.as_ref().map_or(0, |node| node.size.to_usize())
    }

    /// Recalculates this node's size from its children.
    #[inline]
    pub(crate) fn update_size(&mut self) {
        self.size = Size::joining(Self::size_of(&self.left), Self::size_of(&self.right));
    }

    pub(crate) fn set_left(&mut self, left: Tree<K, P>) {
        self.left = left;
        self.update_size();
    }

    pub(crate) fn set_right(&mut self, right: Tree<K, P>) {
        self.right = right;
        self.update_size();
    }

    /// Detaches both children, leaving this node a leaf.
    fn take_children(&mut self) -> (Tree<K, P>, Tree<K, P>) {
        self.size = Size::ONE;
        (self.left.take(), self.right.take())
    }

    /// Relinks a path of nodes that each continue in their right child.
    fn hang_right(mut path: Path<K, P>) -> Tree<K, P> {
        let mut tree = None;
        while let Some(mut node) = path.pop() {
            node.set_right(tree);
            tree = Some(node);
        }
        tree
    }

    /// Relinks a path of nodes that each continue in their left child.
    fn hang_left(mut path: Path<K, P>) -> Tree<K, P> {
        let mut tree = None;
        while let Some(mut node) = path.pop() {
            node.set_left(tree);
            tree = Some(node);
        }
        tree
    }

    /// Frees `tree` one node at a time.
    ///
    /// Left children are rotated up until the current node has none, so every box is
    /// dropped as a leaf. Sizes are not maintained.
    pub(crate) fn dismantle(mut tree: Tree<K, P>) {
        while let Some(mut node) = tree {
            match node.left.take() {
                Some(mut left) => {
                    node.left = left.right.take();
                    left.right = Some(node);
                    tree = Some(left);
                }
                None => tree = node.right.take(),
            }
        }
    }

    /// Returns the number of levels in `tree`.
    pub(crate) fn height(tree: &Tree<K, P>) -> usize {
        let mut height = 0;
        let mut pending: SmallVec<[(&Self, usize); 32]> = SmallVec::new();
        pending.extend(tree.as_deref().map(|root| (root, 1)));

        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            for child in [node.left(), node.right()].into_iter().flatten() {
                pending.push((child, depth + 1));
            }
        }

        height
    }

    /// Moves every (key, priority) pair of `tree` into `out`, in order.
    ///
    /// Uses the same rotations as [`dismantle`](Node::dismantle), which keep the
    /// in-order sequence intact.
    pub(crate) fn drain_into(mut tree: Tree<K, P>, out: &mut Vec<(K, P)>) {
        while let Some(mut node) = tree {
            match node.left.take() {
                Some(mut left) => {
                    node.left = left.right.take();
                    left.right = Some(node);
                    tree = Some(left);
                }
                None => {
                    let Node { key, priority, right, .. } = *node;
                    out.push((key, priority));
                    tree = right;
                }
            }
        }
    }

    /// Returns the node at zero-based in-order position `rank`.
    pub(crate) fn select(tree: &Tree<K, P>, mut rank: usize) -> Option<&Self> {
        let mut current = tree.as_deref();

        while let Some(node) = current {
            let left_size = Self::size_of(&node.left);
            match rank.cmp(&left_size) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => {
                    rank -= left_size + 1;
                    current = node.right();
                }
            }
        }

        None
    }

    /// Splits `tree` so the left part holds the first `rank` nodes.
    pub(crate) fn split_at_rank(mut tree: Tree<K, P>, mut rank: usize) -> (Tree<K, P>, Tree<K, P>) {
        let mut lefts: Path<K, P> = SmallVec::new();
        let mut rights: Path<K, P> = SmallVec::new();

        while let Some(mut node) = tree {
            let left_size = Self::size_of(&node.left);
            if rank <= left_size {
                tree = node.left.take();
                rights.push(node);
            } else {
                rank -= left_size + 1;
                tree = node.right.take();
                lefts.push(node);
            }
        }

        (Self::hang_right(lefts), Self::hang_left(rights))
    }

    /// Renders `tree` one node per line, indented by depth, with empty children as
    /// `null`.
    pub(crate) fn write_shape(tree: Option<&Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        K: fmt::Debug,
        P: fmt::Debug,
    {
        let mut pending: SmallVec<[(Option<&Self>, usize); 32]> = SmallVec::new();
        pending.push((tree, 0));

        while let Some((node, depth)) = pending.pop() {
            let indent = depth * 4;
            match node {
                Some(node) => {
                    writeln!(
                        f,
                        "{:indent$}({:?}: {:?}) - {}",
                        "",
                        node.key,
                        node.priority,
                        node.size.to_usize()
                    )?;
                    pending.push((node.right(), depth + 1));
                    pending.push((node.left(), depth + 1));
                }
                None => writeln!(f, "{:indent$}null", "")?,
            }
        }

        Ok(())
    }
}

impl<K: Clone, P: Clone> Node<K, P> {
    /// Copies `tree` node for node, keeping its shape.
    pub(crate) fn clone_tree(tree: &Tree<K, P>) -> Tree<K, P> {
        // `true` once both children of the node have been copied onto `copied`.
        let mut pending: SmallVec<[(Option<&Self>, bool); 32]> = SmallVec::new();
        let mut copied: SmallVec<[Tree<K, P>; 32]> = SmallVec::new();
        pending.push((tree.as_deref(), false));

        while let Some((node, expanded)) = pending.pop() {
            match node {
                None => copied.push(None),
                Some(node) if expanded => {
                    let right = copied.pop().flatten();
                    let left = copied.pop().flatten();
                    copied.push(Some(Box::new(Self {
                        key: node.key.clone(),
                        priority: node.priority.clone(),
                        size: node.size,
                        left,
                        right,
                    })));
                }
                Some(node) => {
                    pending.push((Some(node), true));
                    pending.push((node.right(), false));
                    pending.push((node.left(), false));
                }
            }
        }

        copied.pop().flatten()
    }
}

impl<K: Ord, P> Node<K, P> {
    /// Returns true if this node belongs to the left half of a split at `key`.
    #[inline]
    fn goes_left<Q>(&self, key: &Q, ties: Ties) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.key.borrow().cmp(key) {
            Ordering::Less => true,
            Ordering::Equal => ties == Ties::Left,
            Ordering::Greater => false,
        }
    }

    /// Partitions `tree` around `key`; `ties` decides which half receives equal keys.
    ///
    /// Only the nodes on the search path are touched: the child on the far side of each
    /// of them is reattached as is.
    pub(crate) fn split<Q>(mut tree: Tree<K, P>, key: &Q, ties: Ties) -> (Tree<K, P>, Tree<K, P>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut lefts: Path<K, P> = SmallVec::new();
        let mut rights: Path<K, P> = SmallVec::new();

        while let Some(mut node) = tree {
            if node.goes_left(key, ties) {
                tree = node.right.take();
                lefts.push(node);
            } else {
                tree = node.left.take();
                rights.push(node);
            }
        }

        (Self::hang_right(lefts), Self::hang_left(rights))
    }

    /// Counts the nodes that would land in the left half of `split(tree, key, ties)`.
    pub(crate) fn count_left_of<Q>(tree: &Tree<K, P>, key: &Q, ties: Ties) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = tree.as_deref();

        while let Some(node) = current {
            if node.goes_left(key, ties) {
                count += Self::size_of(&node.left) + 1;
                current = node.right();
            } else {
                current = node.left();
            }
        }

        count
    }

    /// Returns the highest node holding `key`, if any.
    pub(crate) fn search<'a, Q>(tree: &'a Tree<K, P>, key: &Q) -> Option<&'a Self>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = tree.as_deref();

        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => current = node.right(),
            }
        }

        None
    }
}

impl<K: Ord, P: PartialOrd> Node<K, P> {
    #[inline]
    fn outranked_by(&self, priority: &P) -> bool {
        self.priority < *priority
    }

    /// Joins two trees where every key of `left` is <= every key of `right`.
    ///
    /// The root with the higher priority wins; on a tie the left root does.
    pub(crate) fn merge(mut left: Tree<K, P>, mut right: Tree<K, P>) -> Tree<K, P> {
        // Winning roots, top down, each tagged with the side it came from.
        let mut path: SmallVec<[(Box<Self>, bool); 32]> = SmallVec::new();

        let mut merged = loop {
            match (left, right) {
                (None, tree) | (tree, None) => break tree,
                (Some(mut l), Some(mut r)) => {
                    if l.priority >= r.priority {
                        left = l.right.take();
                        right = Some(r);
                        path.push((l, true));
                    } else {
                        left = Some(l);
                        right = r.left.take();
                        path.push((r, false));
                    }
                }
            }
        };

        while let Some((mut node, from_left)) = path.pop() {
            if from_left {
                node.set_right(merged);
            } else {
                node.set_left(merged);
            }
            merged = Some(node);
        }

        merged
    }

    /// Inserts `item` into the tree at `slot`.
    ///
    /// `item` takes the place of the first node on its search path with a lower
    /// priority. Equal keys are routed left, so `item` ends up first among its duplicates.
    pub(crate) fn insert(mut slot: &mut Tree<K, P>, mut item: Box<Self>) {
        while slot.as_ref().is_some_and(|node| !node.outranked_by(&item.priority)) {
            let Some(node) = slot else { break };
            node.size = node.size.incremented();
            slot = if item.key <= node.key { &mut node.left } else { &mut node.right };
        }

        let (left, right) = Self::split(slot.take(), &item.key, Ties::Right);
        item.left = left;
        item.right = right;
        item.update_size();
        *slot = Some(item);
    }

    /// Removes one node holding `key`, merging its children in its place.
    pub(crate) fn remove<Q>(mut slot: &mut Tree<K, P>, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // Sizes shrink on the way down, so the key must be known to be present.
        if Self::search(slot, key).is_none() {
            return false;
        }

        while let Some(ordering) = slot
            .as_ref()
            .map(|node| key.cmp(node.key.borrow()))
            .filter(|ordering| ordering.is_ne())
        {
            let Some(node) = slot else { break };
            node.size = node.size.decremented();
            slot = if ordering.is_lt() { &mut node.left } else { &mut node.right };
        }

        let Some(node) = slot else {
            return false;
        };
        let (left, right) = node.take_children();
        *slot = Self::merge(left, right);
        true
    }
}
