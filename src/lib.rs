//! # An ordered map on an AVL-balanced binary search tree
//!
//! `avl_tree_map` provides [`AvlTreeMap`], a sorted key-value map with
//! logarithmic lookup, insertion and removal.  The map is built from three
//! pieces:
//!
//! - [`Tree`], an arena-backed binary search tree whose nodes are addressed by
//!   stable [`Position`]s and which offers rotation and trinode
//!   restructuring primitives;
//! - [`TreeMap`], the map façade, which performs the plain BST mutation and
//!   then calls a [`Rebalance`] strategy;
//! - [`Avl`], the strategy that keeps node heights in the tree's auxiliary
//!   slot and restores the AVL balance invariant after every mutation.
//!
//! The map is not synchronized; wrap it in a lock to share it across threads.
//!
//! # Examples
//! ```
//! use avl_tree_map::AvlTreeMap;
//!
//! let mut m = AvlTreeMap::new();
//! for k in [10, 20, 30] {
//!     m.insert(k, k.to_string());
//! }
//!
//! // inserting in order triggered a rotation: 20 is now the root
//! let root = m.tree().root().unwrap();
//! assert_eq!(m.tree().key(root), &20);
//! assert_eq!(m.remove(&10), Some("10".to_string()));
//! assert!(m.check().is_ok());
//! ```
#![warn(missing_docs)]

mod error;
pub use error::InvariantError;

pub mod tree;
pub use tree::{Position, Search, Side, Tree};

mod map;
pub use map::{IntoIter, Iter, Rebalance, TreeMap, Unbalanced};

pub mod avl;
pub use avl::{Avl, AvlTreeMap};
