use thiserror::Error;

/// A structural defect found by [`TreeMap::check`](crate::TreeMap::check).
///
/// The check reports the first violation it meets.  `K` is the type used to
/// name the offending node: the map reports keys, while the internal walk
/// reports [`Position`](crate::Position)s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError<K> {
    /// The stored height disagrees with the heights of the node's children.
    #[error("stale height at key {key:?}: stored {stored}, expected {expected}")]
    StaleHeight {
        /// The node whose height is stale.
        key: K,
        /// The height found in the node.
        stored: i32,
        /// `1 + max(height(left), height(right))`.
        expected: i32,
    },

    /// The children's heights differ by more than one.
    #[error("unbalanced node at key {key:?}: left height {left}, right height {right}")]
    Unbalanced {
        /// The unbalanced node.
        key: K,
        /// Height of the left subtree.
        left: i32,
        /// Height of the right subtree.
        right: i32,
    },

    /// An in-order walk met this key after a key that is not smaller.
    #[error("key {key:?} out of order")]
    OutOfOrder {
        /// The first key that broke the ordering.
        key: K,
    },

    /// A parent link does not point back at the node that owns the child.
    #[error("broken parent link at key {key:?}")]
    BrokenLink {
        /// The node with the bad parent link.
        key: K,
    },

    /// The number of reachable nodes differs from the recorded length.
    #[error("length mismatch: counted {counted}, recorded {recorded}")]
    LengthMismatch {
        /// Nodes reachable from the root.
        counted: usize,
        /// The tree's recorded length.
        recorded: usize,
    },
}

impl<K> InvariantError<K> {
    /// Renames the offending node, e.g. from a position to its key.
    pub fn map_key<L, F: FnOnce(K) -> L>(self, f: F) -> InvariantError<L> {
        use InvariantError::*;
        match self {
            StaleHeight {
                key,
                stored,
                expected,
            } => StaleHeight {
                key: f(key),
                stored,
                expected,
            },
            Unbalanced { key, left, right } => Unbalanced {
                key: f(key),
                left,
                right,
            },
            OutOfOrder { key } => OutOfOrder { key: f(key) },
            BrokenLink { key } => BrokenLink { key: f(key) },
            LengthMismatch { counted, recorded } => {
                LengthMismatch { counted, recorded }
            }
        }
    }
}
