/// A zero-based rank into the sorted order of a treap.
///
/// # Examples
///
/// ```
/// use ordered_treap::{OrderedTreap, Rank};
///
/// let mut treap = OrderedTreap::new();
/// treap.insert("b", 1);
/// treap.insert("a", 2);
///
/// assert_eq!(treap[Rank(0)], "a");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
