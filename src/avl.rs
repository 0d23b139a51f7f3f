//! The AVL rebalancing strategy.
//!
//! Heights live in each node's auxiliary slot.  An absent child has height 0
//! and a node without children has height 1.  The tree creates nodes with an
//! auxiliary value of 0, which is stale for a leaf; the insertion walk fixes
//! it on its first step, and that change is what carries the walk upward.
//!
//! After every mutation the heights along the changed path are recomputed
//! bottom-up.  A node whose children's heights differ by two is repaired
//! with a trinode restructuring, and the walk stops at the first node whose
//! height did not change, since nothing above it can have changed either.
use std::cmp::Ordering::*;

use log::trace;

use crate::error::InvariantError;
use crate::map::{Rebalance, TreeMap};
use crate::tree::{Position, Side, Tree};

/// A map from keys to values sorted by key, kept balanced as an [AVL
/// tree](https://en.wikipedia.org/wiki/AVL_tree).
///
/// Lookups, insertions and removals take `O(log n)` time: the heights of
/// every node's two subtrees differ by at most one, so the tree is never more
/// than about 1.44 times as tall as a perfectly balanced one.
///
/// # Examples
/// ```
/// use avl_tree_map::AvlTreeMap;
///
/// let mut m = AvlTreeMap::new();
/// for i in 0..1000 {
///     m.insert(i, i * i);
/// }
/// assert_eq!(m.get(&12), Some(&144));
/// assert!(m.height() <= 14);
/// ```
pub type AvlTreeMap<K, V> = TreeMap<K, V, Avl>;

/// The AVL balancer, as a [`Rebalance`] strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Avl;

impl<K, V> Rebalance<K, V> for Avl {
    fn after_insert(&self, tree: &mut Tree<K, V>, p: Position) {
        rebalance(tree, p);
    }

    fn after_remove(&self, tree: &mut Tree<K, V>, p: Position) {
        rebalance(tree, p);
    }

    fn check_node(
        &self,
        tree: &Tree<K, V>,
        p: Position,
    ) -> Result<(), InvariantError<Position>> {
        let left = height(tree, tree.left(p));
        let right = height(tree, tree.right(p));
        let expected = 1 + left.max(right);

        if tree.aux(p) != expected {
            Err(InvariantError::StaleHeight {
                key: p,
                stored: tree.aux(p),
                expected,
            })
        } else if (left - right).abs() > 1 {
            Err(InvariantError::Unbalanced {
                key: p,
                left,
                right,
            })
        } else {
            Ok(())
        }
    }
}

/// The stored height of `p`; an absent node has height 0.
pub fn height<K, V>(tree: &Tree<K, V>, p: Option<Position>) -> i32 {
    p.map_or(0, |p| tree.aux(p))
}

/// Sets the height of `p` from the (current) heights of its children.
pub fn recompute_height<K, V>(tree: &mut Tree<K, V>, p: Position) {
    let ht = 1 + height(tree, tree.left(p)).max(height(tree, tree.right(p)));
    tree.set_aux(p, ht);
}

/// Do the heights of `p`'s children differ by at most one?
pub fn is_balanced<K, V>(tree: &Tree<K, V>, p: Position) -> bool {
    (height(tree, tree.left(p)) - height(tree, tree.right(p))).abs() <= 1
}

/// Returns a child of `p` whose height is no smaller than its sibling's.
///
/// Ties are broken toward the side `p` hangs from its own parent (left for
/// the root), so that a restructuring through this child is a single
/// rotation whenever one suffices.
pub fn taller_child<K, V>(tree: &Tree<K, V>, p: Position) -> Option<Position> {
    let (lf, rt) = (tree.left(p), tree.right(p));
    match height(tree, lf).cmp(&height(tree, rt)) {
        Greater => lf,
        Less => rt,
        Equal => match tree.side_of(p) {
            None | Some(Side::Left) => lf,
            Some(Side::Right) => rt,
        },
    }
}

/// Restores heights and balance on the path from `p` up to the root.
///
/// `p` is the node where the structure changed: a fresh leaf after an
/// insertion, or the parent of the vacated slot after a removal.
pub fn rebalance<K, V>(tree: &mut Tree<K, V>, p: Position) {
    let mut cur = Some(p);

    while let Some(mut p) = cur {
        // not yet recalculated
        let old_ht = tree.aux(p);

        if !is_balanced(tree, p) {
            let x = match taller_child(tree, p).and_then(|y| taller_child(tree, y)) {
                Some(x) => x,
                None => unreachable!("unbalanced node without a taller grandchild"),
            };

            p = tree.restructure(x);
            trace!("restructured around {:?}, new subtree root {:?}", x, p);

            // the old subtree root and the taller child are now the children
            // of p and their heights are stale
            if let Some(lf) = tree.left(p) {
                recompute_height(tree, lf);
            }
            if let Some(rt) = tree.right(p) {
                recompute_height(tree, rt);
            }
        }

        recompute_height(tree, p);
        let new_ht = tree.aux(p);
        cur = tree.parent(p);

        if old_ht == new_ht {
            trace!("height of {:?} settled at {}", p, new_ht);
            break;
        }
    }
}
