use thiserror::Error;

/// Errors reported by fallible [`OrderedTreap`](crate::OrderedTreap) operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum TreapError {
    /// A rank was not below the length of the treap.
    #[error("rank {rank} is out of range for a treap of length {len}")]
    RankOutOfRange {
        /// The requested zero-based rank.
        rank: usize,
        /// The length of the treap at the time of the call.
        len: usize,
    },

    /// `build` received key and priority sequences of different lengths.
    #[error("build received {keys} keys but {priorities} priorities")]
    LengthMismatch { keys: usize, priorities: usize },

    /// `build` received keys that are not sorted in non-decreasing order.
    #[error("build keys are not sorted: key at index {index} is less than its predecessor")]
    UnsortedKeys {
        /// Index of the first key that is less than the key before it.
        index: usize,
    },

    /// `try_merge` received a left treap with a key greater than a key of the right treap.
    #[error("cannot merge: the left treap has a key greater than the first key of the right treap")]
    Overlap,
}
