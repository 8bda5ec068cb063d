//! An order-statistic treap for Rust.
//!
//! This crate provides [`OrderedTreap`], a sorted multiset of keys in which every element
//! also carries a priority. Keys are kept in binary-search-tree order and priorities in
//! max-heap order; with random priorities the expected height is O(log n) regardless of
//! the insertion order.
//!
//! Besides the usual insert and remove, the treap supports:
//!
//! - [`split`](OrderedTreap::split) and [`merge`](OrderedTreap::merge) of whole treaps in O(log n)
//! - [`remove_range`](OrderedTreap::remove_range) - drop every duplicate of a key in O(log n)
//! - [`get_by_rank`](OrderedTreap::get_by_rank) and indexing by [`Rank`] - the k-th smallest key
//! - [`build`](OrderedTreap::build) - O(n) construction from key-sorted input
//!
//! # Example
//!
//! ```
//! use ordered_treap::{OrderedTreap, Rank, Ties};
//!
//! let mut treap: OrderedTreap<i32> = OrderedTreap::new();
//! for key in [5, 1, 4, 4, 9] {
//!     treap.insert_random(key);
//! }
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(treap[Rank(0)], 1);
//! assert_eq!(treap.rank_of(&4), Some(1));
//! assert_eq!(treap.count(&4), 2);
//!
//! // Remove both 4s at once.
//! assert_eq!(treap.remove_range(&4), 2);
//!
//! // Split into keys < 5 and keys >= 5, then put the halves back together.
//! let (low, high) = treap.split(&5, Ties::Right);
//! assert_eq!(low.keys().copied().collect::<Vec<_>>(), [1]);
//! assert_eq!(high.keys().copied().collect::<Vec<_>>(), [5, 9]);
//! let treap = OrderedTreap::merge(low, high);
//! assert_eq!(treap.len(), 3);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No unsafe code** - Children are uniquely owned boxes, split and merge relink them
//! - **Deterministic** - Each treap owns a seedable generator for its random priorities

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

// Unit tests use `format!`/`vec!` through proptest.
#[cfg(test)]
#[macro_use]
extern crate std;

mod error;
mod order_statistic;
mod raw;

pub mod ordered_treap;

pub use error::TreapError;
pub use order_statistic::Rank;
pub use ordered_treap::{OrderedTreap, Ties};
