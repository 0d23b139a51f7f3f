//! The binary search tree substrate.
//!
//! Nodes live in an arena and refer to each other by [`Position`].  A child
//! link owns nothing: the arena owns every node, and parent links are plain
//! positions used only to walk upward.  Positions stay attached to their node
//! across rotations, so a balancer can hold on to one while the tree is
//! reshaped around it.
use std::borrow::Borrow;
use std::cmp::Ordering::*;
use std::iter::FusedIterator;
use std::mem::replace;

/// A stable handle to a node of a [`Tree`].
///
/// A position is valid until its node is unlinked; after that the slot may be
/// reused for a different node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(usize);

impl Position {
    /// The arena slot of this position.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Which child of its parent a node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The left (smaller keys) child.
    Left,
    /// The right (larger keys) child.
    Right,
}

/// The outcome of searching a tree for a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Search {
    /// The key is stored at this position.
    Found(Position),

    /// The key is absent.  A new leaf for it belongs on the given side of the
    /// given parent, or at the root (`None`) if the tree is empty.
    Vacant(Option<(Position, Side)>),
}

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    val: V,
    aux: i32,
    parent: Option<Position>,
    left: Option<Position>,
    right: Option<Position>,
}

/// An unbalanced binary search tree stored in an arena.
///
/// The tree keeps keys in search order and offers the navigation and
/// rotation primitives a balancing strategy needs.  Every node carries an
/// auxiliary integer that the tree itself never reads; new nodes start with 0.
#[derive(Clone)]
pub struct Tree<K, V> {
    root: Option<Position>,
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    len: usize,
    rotations: u64,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Tree<K, V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Tree {
            root: None,
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            rotations: 0,
        }
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node.  The rotation counter is kept.
    pub fn clear(&mut self) {
        self.root = None;
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    /// The number of single rotations performed over the tree's lifetime.  A
    /// double rotation counts twice.
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    fn node(&self, p: Position) -> &Node<K, V> {
        match self.slots.get(p.0) {
            Some(Some(n)) => n,
            _ => panic!("stale tree position {:?}", p),
        }
    }

    fn node_mut(&mut self, p: Position) -> &mut Node<K, V> {
        match self.slots.get_mut(p.0) {
            Some(Some(n)) => n,
            _ => panic!("stale tree position {:?}", p),
        }
    }

    /// The root position, if the tree is not empty.
    pub fn root(&self) -> Option<Position> {
        self.root
    }

    /// The left child of `p`.
    pub fn left(&self, p: Position) -> Option<Position> {
        self.node(p).left
    }

    /// The right child of `p`.
    pub fn right(&self, p: Position) -> Option<Position> {
        self.node(p).right
    }

    /// The child of `p` on the given side.
    pub fn child(&self, p: Position, side: Side) -> Option<Position> {
        match side {
            Side::Left => self.left(p),
            Side::Right => self.right(p),
        }
    }

    /// The parent of `p`, or `None` for the root.
    pub fn parent(&self, p: Position) -> Option<Position> {
        self.node(p).parent
    }

    /// Is `p` the root of the tree?
    pub fn is_root(&self, p: Position) -> bool {
        self.root == Some(p)
    }

    /// Does `p` have no children?
    pub fn is_leaf(&self, p: Position) -> bool {
        let n = self.node(p);
        n.left.is_none() && n.right.is_none()
    }

    /// Which child of its parent `p` is, or `None` for the root.
    pub fn side_of(&self, p: Position) -> Option<Side> {
        let parent = self.parent(p)?;
        if self.left(parent) == Some(p) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// The auxiliary value stored at `p`.
    pub fn aux(&self, p: Position) -> i32 {
        self.node(p).aux
    }

    /// Overwrites the auxiliary value stored at `p`.
    pub fn set_aux(&mut self, p: Position, aux: i32) {
        self.node_mut(p).aux = aux;
    }

    /// The key stored at `p`.
    pub fn key(&self, p: Position) -> &K {
        &self.node(p).key
    }

    /// The value stored at `p`.
    pub fn value(&self, p: Position) -> &V {
        &self.node(p).val
    }

    /// A mutable reference to the value stored at `p`.
    pub fn value_mut(&mut self, p: Position) -> &mut V {
        &mut self.node_mut(p).val
    }

    /// The key and value stored at `p`.
    pub fn entry(&self, p: Position) -> (&K, &V) {
        let n = self.node(p);
        (&n.key, &n.val)
    }

    /// The key and a mutable reference to the value stored at `p`.
    pub fn entry_mut(&mut self, p: Position) -> (&K, &mut V) {
        let n = self.node_mut(p);
        (&n.key, &mut n.val)
    }

    /// Replaces the entry stored at `p` and returns the old one.  The caller
    /// must keep the keys in search order.
    pub fn replace_entry(&mut self, p: Position, key: K, val: V) -> (K, V) {
        let n = self.node_mut(p);
        (replace(&mut n.key, key), replace(&mut n.val, val))
    }

    /// The leftmost node of the subtree rooted at `p`.
    pub fn subtree_first(&self, mut p: Position) -> Position {
        while let Some(lf) = self.left(p) {
            p = lf;
        }
        p
    }

    /// The rightmost node of the subtree rooted at `p`.
    pub fn subtree_last(&self, mut p: Position) -> Position {
        while let Some(rt) = self.right(p) {
            p = rt;
        }
        p
    }

    /// The node with the smallest key.
    pub fn first(&self) -> Option<Position> {
        self.root.map(|rt| self.subtree_first(rt))
    }

    /// The node with the largest key.
    pub fn last(&self) -> Option<Position> {
        self.root.map(|rt| self.subtree_last(rt))
    }

    /// The node that follows `p` in key order.
    pub fn successor(&self, p: Position) -> Option<Position> {
        if let Some(rt) = self.right(p) {
            return Some(self.subtree_first(rt));
        }

        // climb until we leave a left subtree
        let mut p = p;
        while let Some(parent) = self.parent(p) {
            if self.left(parent) == Some(p) {
                return Some(parent);
            }
            p = parent;
        }
        None
    }

    /// The node that precedes `p` in key order.
    pub fn predecessor(&self, p: Position) -> Option<Position> {
        if let Some(lf) = self.left(p) {
            return Some(self.subtree_last(lf));
        }

        let mut p = p;
        while let Some(parent) = self.parent(p) {
            if self.right(parent) == Some(p) {
                return Some(parent);
            }
            p = parent;
        }
        None
    }

    /// Every live position, parents before children (pre-order).
    pub fn positions(&self) -> Positions<'_, K, V> {
        Positions {
            tree: self,
            work: self.root.into_iter().collect(),
        }
    }

    /// The number of nodes on the longest root-to-leaf path, 0 when empty.
    ///
    /// This measures the structure and ignores the auxiliary values.
    pub fn height(&self) -> usize {
        let mut work: Vec<(Position, usize)> =
            self.root.map(|rt| (rt, 1)).into_iter().collect();
        let mut max_ht = 0;
        while let Some((p, depth)) = work.pop() {
            max_ht = max_ht.max(depth);
            let n = self.node(p);
            work.extend(n.left.map(|c| (c, depth + 1)));
            work.extend(n.right.map(|c| (c, depth + 1)));
        }
        max_ht
    }

    fn alloc(&mut self, node: Node<K, V>) -> Position {
        self.len += 1;
        match self.free.pop() {
            Some(i) => {
                self.slots[i] = Some(node);
                Position(i)
            }
            None => {
                self.slots.push(Some(node));
                Position(self.slots.len() - 1)
            }
        }
    }

    /// Creates the root of an empty tree.
    pub fn add_root(&mut self, key: K, val: V) -> Position {
        assert!(self.root.is_none(), "tree already has a root");
        let p = self.alloc(Node {
            key,
            val,
            aux: 0,
            parent: None,
            left: None,
            right: None,
        });
        self.root = Some(p);
        p
    }

    /// Creates a leaf in the empty child slot `side` of `parent`.
    pub fn add_child(
        &mut self,
        parent: Position,
        side: Side,
        key: K,
        val: V,
    ) -> Position {
        assert!(
            self.child(parent, side).is_none(),
            "child slot is already occupied"
        );
        let p = self.alloc(Node {
            key,
            val,
            aux: 0,
            parent: Some(parent),
            left: None,
            right: None,
        });
        self.link(parent, side, Some(p));
        p
    }

    // Makes child the `side` child of parent, updating the child's back link.
    // The node previously in that slot (if any) is left dangling.
    fn link(&mut self, parent: Position, side: Side, child: Option<Position>) {
        let n = self.node_mut(parent);
        match side {
            Side::Left => n.left = child,
            Side::Right => n.right = child,
        }

        if let Some(c) = child {
            self.node_mut(c).parent = Some(parent);
        }
    }

    // Puts child in the slot described by `slot`, where `None` is the root.
    fn attach(&mut self, slot: Option<(Position, Side)>, child: Option<Position>) {
        match slot {
            Some((parent, side)) => self.link(parent, side, child),
            None => {
                self.root = child;
                if let Some(c) = child {
                    self.node_mut(c).parent = None;
                }
            }
        }
    }

    // The parent of p and the side of it that holds p.
    fn slot_of(&self, p: Position) -> Option<(Position, Side)> {
        let parent = self.parent(p)?;
        self.side_of(p).map(|side| (parent, side))
    }

    /// Removes a node with at most one child, splicing that child into the
    /// node's place.  Returns the node's entry and its former parent.
    ///
    /// # Panics
    /// Panics if `p` has two children.
    pub fn unlink(&mut self, p: Position) -> (K, V, Option<Position>) {
        let child = match (self.left(p), self.right(p)) {
            (Some(_), Some(_)) => panic!("cannot unlink a node with two children"),
            (lf, None) => lf,
            (None, rt) => rt,
        };

        let parent = self.parent(p);
        let slot = self.slot_of(p);
        self.attach(slot, child);

        let old_n = match self.slots[p.0].take() {
            Some(n) => n,
            None => panic!("stale tree position {:?}", p),
        };
        self.free.push(p.0);
        self.len -= 1;

        (old_n.key, old_n.val, parent)
    }

    /// Rotates `x` above its parent, preserving the in-order sequence.
    ///
    /// # Panics
    /// Panics if `x` is the root.
    pub fn rotate(&mut self, x: Position) {
        // For a left child x of y we want
        //    y(x(a, b), c)   =>   x(a, y(b, c))
        // and the mirror image for a right child.  a and c keep their parents.
        let y = match self.parent(x) {
            Some(y) => y,
            None => panic!("cannot rotate the root"),
        };

        // x takes over y's slot in the grandparent (or the root)
        let slot = self.slot_of(y);
        self.attach(slot, Some(x));

        if self.left(y) == Some(x) {
            // move b from x to y
            let b = self.right(x);
            self.link(y, Side::Left, b);
            self.link(x, Side::Right, Some(y));
        } else {
            let b = self.left(x);
            self.link(y, Side::Right, b);
            self.link(x, Side::Left, Some(y));
        }

        self.rotations += 1;
    }

    /// Performs a trinode restructuring for `x`, its parent `y` and its
    /// grandparent `z`, and returns the position that now roots the subtree
    /// `z` used to root.
    ///
    /// When `x` and `y` lean the same way this is a single rotation of `y`;
    /// otherwise `x` is rotated twice, ending above both `y` and `z`.
    ///
    /// # Panics
    /// Panics if `x` has no grandparent.
    pub fn restructure(&mut self, x: Position) -> Position {
        let y = match self.parent(x) {
            Some(y) => y,
            None => panic!("restructure needs a grandparent"),
        };
        assert!(self.parent(y).is_some(), "restructure needs a grandparent");

        if self.side_of(x) == self.side_of(y) {
            self.rotate(y);
            y
        } else {
            self.rotate(x);
            self.rotate(x);
            x
        }
    }

    /// Searches for `key`, returning where it is or where it would go.
    pub fn search<Q>(&self, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut p = match self.root {
            None => return Search::Vacant(None), // *** EARLY RETURN ***
            Some(rt) => rt,
        };

        loop {
            let (side, next) = match key.cmp(self.key(p).borrow()) {
                Equal => return Search::Found(p),
                Less => (Side::Left, self.left(p)),
                Greater => (Side::Right, self.right(p)),
            };

            match next {
                Some(c) => p = c,
                None => return Search::Vacant(Some((p, side))),
            }
        }
    }

    /// Consumes the tree and returns its entries sorted by key.
    pub fn into_entries(mut self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.len);
        let mut cur = self.first();
        while let Some(p) = cur {
            order.push(p);
            cur = self.successor(p);
        }

        order
            .into_iter()
            .filter_map(|p| self.slots[p.0].take())
            .map(|n| (n.key, n.val))
            .collect()
    }
}

/// Pre-order iterator over the positions of a [`Tree`].
pub struct Positions<'a, K, V> {
    tree: &'a Tree<K, V>,
    work: Vec<Position>,
}

impl<'a, K, V> Iterator for Positions<'a, K, V> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let p = self.work.pop()?;
        let n = self.tree.node(p);
        self.work.extend(n.right);
        self.work.extend(n.left);
        Some(p)
    }
}

impl<'a, K, V> FusedIterator for Positions<'a, K, V> {}
