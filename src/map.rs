use std::borrow::Borrow;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;
use std::mem::replace;

use log::warn;

use crate::error::InvariantError;
use crate::tree::{Position, Search, Tree};

#[cfg(any(test, feature = "paranoid"))]
macro_rules! chk_map {
    ( $x:expr ) => {{
        if let Err(e) = $x.verify() {
            panic!("tree invariant violated: {}", e);
        }
    }};
}

#[cfg(not(any(test, feature = "paranoid")))]
macro_rules! chk_map {
    ( $x:expr ) => {{
        let _ = &$x;
    }};
}

/// A strategy that restores a shape invariant after the tree is mutated.
///
/// [`TreeMap`] calls `after_insert` exactly once right after a new leaf is
/// linked, and `after_remove` exactly once right after a node is unlinked,
/// passing the parent of the vacated slot.  When the removed node was the root
/// there is no such parent and `after_remove` is not called.
pub trait Rebalance<K, V> {
    /// Called with the freshly linked leaf.
    fn after_insert(&self, tree: &mut Tree<K, V>, p: Position);

    /// Called with the parent of the slot an unlinked node used to occupy.
    fn after_remove(&self, tree: &mut Tree<K, V>, p: Position);

    /// Checks the strategy's own invariant at one node.  Used only by
    /// diagnostics.
    fn check_node(
        &self,
        _tree: &Tree<K, V>,
        _p: Position,
    ) -> Result<(), InvariantError<Position>> {
        Ok(())
    }
}

/// The do-nothing strategy: a plain, unbalanced binary search tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unbalanced;

impl<K, V> Rebalance<K, V> for Unbalanced {
    fn after_insert(&self, _tree: &mut Tree<K, V>, _p: Position) {}

    fn after_remove(&self, _tree: &mut Tree<K, V>, _p: Position) {}
}

/// A map from keys to values sorted by key.
///
/// The map is a binary search tree whose shape is maintained by the
/// rebalancing strategy `R`.  With the default [`Unbalanced`] strategy the
/// tree is a plain BST; [`AvlTreeMap`](crate::AvlTreeMap) plugs in the AVL
/// balancer.
///
/// We aim for the API to resemble (a subset of) the API of
/// [`std::collections::BTreeMap`].
#[derive(Clone)]
pub struct TreeMap<K, V, R = Unbalanced> {
    pub(crate) tree: Tree<K, V>,
    rebalancer: R,
}

impl<K, V, R> Debug for TreeMap<K, V, R>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, R> PartialEq for TreeMap<K, V, R> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, R> Eq for TreeMap<K, V, R> {}

impl<K, Q, V, R> std::ops::Index<&Q> for TreeMap<K, V, R>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
    R: Rebalance<K, V>,
{
    type Output = V;

    fn index(&self, index: &Q) -> &Self::Output {
        match self.get(index) {
            Some(v) => v,
            None => panic!("Key not found in TreeMap"),
        }
    }
}

impl<K, V, R: Default> Default for TreeMap<K, V, R> {
    fn default() -> Self {
        TreeMap {
            tree: Tree::new(),
            rebalancer: R::default(),
        }
    }
}

// Accessors that need neither an ordering nor a strategy.
impl<K, V, R> TreeMap<K, V, R> {
    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Drops all entries from the map.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Read-only access to the underlying tree, e.g. to inspect its shape.
    pub fn tree(&self) -> &Tree<K, V> {
        &self.tree
    }

    /// The number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Creates an iterator over the map entries, sorted by key.
    ///
    /// # Examples
    /// ```
    /// use avl_tree_map::AvlTreeMap;
    ///
    /// let m = AvlTreeMap::from([(0,1), (1,2), (2, 3)]);
    /// for (i, (k, v)) in m.iter().enumerate() {
    ///     assert_eq!(&i, k);
    ///     assert_eq!(&(i+1), v);
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: &self.tree,
            front: self.tree.first(),
            back: self.tree.last(),
            len: self.tree.len(),
        }
    }

    /// Produces an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|p| p.0)
    }

    /// Produces an iterator over the values of the map, ordered by their
    /// associated keys.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|p| p.1)
    }

    /// Applies f to each entry of the map in order of the keys.
    pub fn for_each<F: FnMut((&K, &V))>(&self, f: F) {
        self.iter().for_each(f);
    }

    /// Applies a function to every key-value pair in the map, in key order,
    /// with mutable access to the values.
    ///
    /// # Examples
    /// ```
    /// use avl_tree_map::AvlTreeMap;
    ///
    /// let mut m = AvlTreeMap::from([(0,0), (1,1), (2,2)]);
    /// m.for_each_mut(|(k, v)| *v += k);
    /// assert_eq!(m.get(&2), Some(&4));
    /// ```
    pub fn for_each_mut<F: FnMut((&K, &mut V))>(&mut self, mut f: F) {
        let mut cur = self.tree.first();
        while let Some(p) = cur {
            f(self.tree.entry_mut(p));
            cur = self.tree.successor(p);
        }
    }

    /// Returns the entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|p| self.tree.entry(p))
    }

    /// Returns the entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|p| self.tree.entry(p))
    }
}

impl<K: Ord, V, R: Rebalance<K, V>> TreeMap<K, V, R> {
    /// Creates a new, empty map.
    ///
    /// # Examples
    /// ```
    /// use avl_tree_map::AvlTreeMap;
    /// let m: AvlTreeMap<usize, usize> = AvlTreeMap::new();
    /// assert!(m.is_empty());
    /// ```
    pub fn new() -> Self
    where
        R: Default,
    {
        Self::default()
    }

    /// Creates a new, empty map that rebalances with the given strategy.
    pub fn with_rebalancer(rebalancer: R) -> Self {
        TreeMap {
            tree: Tree::new(),
            rebalancer,
        }
    }

    fn find<Q>(&self, key: &Q) -> Option<Position>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.tree.search(key) {
            Search::Found(p) => Some(p),
            Search::Vacant(_) => None,
        }
    }

    /// Returns true if the map contains the key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns a reference to the value associated with `key`.
    ///
    /// # Examples
    /// ```
    /// use avl_tree_map::AvlTreeMap;
    ///
    /// let m = AvlTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(m.get(&2), Some(&"b"));
    /// assert_eq!(m.get(&3), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|p| self.tree.value(p))
    }

    /// Returns the stored key and its value.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|p| self.tree.entry(p))
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let p = self.find(key)?;
        Some(self.tree.value_mut(p))
    }

    /// Inserts a key-value pair in the map.
    ///
    /// If the key was present, its value is replaced and the old value is
    /// returned; the tree's shape does not change.
    ///
    /// # Examples
    /// ```
    /// use avl_tree_map::AvlTreeMap;
    ///
    /// let mut m = AvlTreeMap::new();
    /// assert_eq!(m.insert(0, "a"), None);
    /// assert_eq!(m.insert(0, "b"), Some("a"));
    /// assert_eq!(m.get(&0), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, val: V) -> Option<V> {
        let p = match self.tree.search(&key) {
            Search::Found(p) => {
                return Some(replace(self.tree.value_mut(p), val)); // *** EARLY RETURN ***
            }
            Search::Vacant(None) => self.tree.add_root(key, val),
            Search::Vacant(Some((parent, side))) => {
                self.tree.add_child(parent, side, key, val)
            }
        };

        self.rebalancer.after_insert(&mut self.tree, p);
        chk_map!(self);
        None
    }

    /// Removes a key from a map and returns the unmapped value.
    ///
    /// # Examples
    /// ```
    /// use avl_tree_map::AvlTreeMap;
    ///
    /// let mut m = AvlTreeMap::new();
    /// m.insert(1, 2);
    /// m.insert(2, 3);
    /// assert_eq!(m.remove(&2), Some(3));
    /// assert_eq!(m.remove(&2), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|e| e.1)
    }

    /// Removes a key from a map and returns the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let p = self.find(key)?;
        Some(self.remove_at(p))
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let p = self.tree.first()?;
        Some(self.remove_at(p))
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let p = self.tree.last()?;
        Some(self.remove_at(p))
    }

    // Unlinks the node at p.  A node with two children trades entries with
    // its in-order successor, which has no left child and is unlinked instead.
    fn remove_at(&mut self, p: Position) -> (K, V) {
        let (old_elt, parent) = match (self.tree.left(p), self.tree.right(p)) {
            (Some(_), Some(rt)) => {
                let succ = self.tree.subtree_first(rt);
                let (succ_key, succ_val, parent) = self.tree.unlink(succ);
                (self.tree.replace_entry(p, succ_key, succ_val), parent)
            }

            _ => {
                let (k, v, parent) = self.tree.unlink(p);
                ((k, v), parent)
            }
        };

        if let Some(parent) = parent {
            self.rebalancer.after_remove(&mut self.tree, parent);
        }

        chk_map!(self);
        old_elt
    }

    /// Checks the tree's structure and the strategy's invariant at every
    /// node, reporting the first violation found.
    ///
    /// This is a diagnostic aid; a correct map always passes.
    ///
    /// # Examples
    /// ```
    /// use avl_tree_map::AvlTreeMap;
    ///
    /// let m: AvlTreeMap<_, _> = (0..100).map(|i| (i, ())).collect();
    /// assert!(m.check().is_ok());
    /// ```
    pub fn check(&self) -> Result<(), InvariantError<K>>
    where
        K: Clone + Debug,
    {
        self.verify().map_err(|e| {
            let e = e.map_key(|p| self.tree.key(p).clone());
            warn!("{}", e);
            e
        })
    }

    // Same as check, but names nodes by position so that it needs no bounds
    // on K beyond Ord.
    pub(crate) fn verify(&self) -> Result<(), InvariantError<Position>> {
        let t = &self.tree;

        if let Some(rt) = t.root() {
            if t.parent(rt).is_some() {
                return Err(InvariantError::BrokenLink { key: rt });
            }
        }

        let mut counted = 0;
        for p in t.positions() {
            counted += 1;
            for c in [t.left(p), t.right(p)].into_iter().flatten() {
                if t.parent(c) != Some(p) {
                    return Err(InvariantError::BrokenLink { key: c });
                }
            }
            self.rebalancer.check_node(t, p)?;
        }

        if counted != t.len() {
            return Err(InvariantError::LengthMismatch {
                counted,
                recorded: t.len(),
            });
        }

        let mut prev: Option<Position> = None;
        let mut cur = t.first();
        while let Some(p) = cur {
            if prev.is_some_and(|q| t.key(q) >= t.key(p)) {
                return Err(InvariantError::OutOfOrder { key: p });
            }
            prev = Some(p);
            cur = t.successor(p);
        }

        Ok(())
    }
}

/// An iterator over the entries of a [`TreeMap`], sorted by key.
pub struct Iter<'a, K, V> {
    tree: &'a Tree<K, V>,
    front: Option<Position>,
    back: Option<Position>,
    len: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let p = self.front?;
        self.front = self.tree.successor(p);
        self.len -= 1;
        Some(self.tree.entry(p))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let p = self.back?;
        self.back = self.tree.predecessor(p);
        self.len -= 1;
        Some(self.tree.entry(p))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

impl<'a, K, V, R> IntoIterator for &'a TreeMap<K, V, R> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator over the entries of a [`TreeMap`], sorted by key.
pub struct IntoIter<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, R> IntoIterator for TreeMap<K, V, R> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            entries: self.tree.into_entries().into_iter(),
        }
    }
}

impl<K: Ord, V, R: Rebalance<K, V>> Extend<(K, V)> for TreeMap<K, V, R> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, R, const N: usize> From<[(K, V); N]> for TreeMap<K, V, R>
where
    K: Ord,
    R: Rebalance<K, V> + Default,
{
    fn from(vs: [(K, V); N]) -> Self {
        TreeMap::from_iter(vs)
    }
}

impl<K, V, R> FromIterator<(K, V)> for TreeMap<K, V, R>
where
    K: Ord,
    R: Rebalance<K, V> + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut m = TreeMap::new();
        m.extend(iter);
        m
    }
}

#[cfg(test)]
mod test {
    extern crate quickcheck;
    use super::*;
    use crate::AvlTreeMap;
    use quickcheck::quickcheck;

    type PlainMap<K, V> = TreeMap<K, V, Unbalanced>;

    fn rm_test(vs: Vec<(i8, u32)>) {
        let mut fmap = AvlTreeMap::new();
        let mut plain = PlainMap::new();
        let mut btree = std::collections::BTreeMap::new();

        for &(k, v) in vs.iter() {
            match k {
                1..=i8::MAX => {
                    let k = k % 32;
                    let old_v = btree.insert(k, v);
                    assert_eq!(fmap.insert(k, v), old_v);
                    assert_eq!(plain.insert(k, v), old_v);
                }

                0 | i8::MIN => (),

                _ => {
                    let k = -k % 32;
                    let old_v = btree.remove(&k);
                    assert_eq!(fmap.remove(&k), old_v);
                    assert_eq!(plain.remove(&k), old_v);
                }
            }

            assert!(fmap.iter().cmp(btree.iter()).is_eq());
            assert!(plain.iter().cmp(btree.iter()).is_eq());
            fmap.check().unwrap();
            plain.check().unwrap();
        }
    }

    // systematically try deleting each element of fmap
    fn chk_all_removes(fmap: AvlTreeMap<u8, u8>) {
        for (k, v) in fmap.clone().iter() {
            let mut fmap2 = fmap.clone();
            assert_eq!(fmap2.remove(k), Some(*v));
            assert!(!fmap2.contains_key(k));
            assert_eq!(fmap2.len(), fmap.len() - 1);
            fmap2.check().unwrap();
        }
    }

    #[test]
    fn rm_each_test() {
        // build map in order to encourage skewing
        let fmap: AvlTreeMap<_, _> = (0..32).map(|x| (x, x + 100)).collect();
        chk_all_removes(fmap);

        // build map in reverse order to encourage opposite skewing
        let fmap: AvlTreeMap<_, _> =
            (0..32).rev().map(|x| (x, x + 100)).collect();
        chk_all_removes(fmap);
    }

    #[test]
    fn insert_existing_key_keeps_shape() {
        let mut m: AvlTreeMap<_, _> = (0..10).map(|i| (i, 0)).collect();
        let rotations = m.tree().rotations();
        let root = m.tree().root();

        assert_eq!(m.insert(4, 1), Some(0));
        assert_eq!(m.len(), 10);
        assert_eq!(m.tree().rotations(), rotations);
        assert_eq!(m.tree().root(), root);
        assert_eq!(m[&4], 1);
    }

    #[test]
    fn for_each_mut_test() {
        let mut m: AvlTreeMap<_, _> = (0..8).map(|x| (x, 0)).collect();

        m.for_each_mut(|(_, v)| *v = 1);

        for (i, (k, v)) in m.iter().enumerate() {
            assert_eq!(i, *k);
            assert_eq!(1, *v);
        }
    }

    #[test]
    fn iter_len_test() {
        let fmap: AvlTreeMap<_, _> = (0..10).map(|i| (i, ())).collect();

        let mut iter = fmap.iter();
        let mut cnt = 10;
        while iter.next().is_some() {
            assert_eq!(iter.len(), cnt - 1);
            cnt -= 1;
        }
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_both_ends_meet() {
        let fmap: AvlTreeMap<_, _> = (0..5).map(|i| (i, ())).collect();

        let mut iter = fmap.iter();
        assert_eq!(iter.next(), Some((&0, &())));
        assert_eq!(iter.next_back(), Some((&4, &())));
        assert_eq!(iter.next_back(), Some((&3, &())));
        assert_eq!(iter.next(), Some((&1, &())));
        assert_eq!(iter.next(), Some((&2, &())));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn pop_ends() {
        let mut m: AvlTreeMap<_, _> = (0..6).map(|i| (i, i * 10)).collect();
        assert_eq!(m.pop_first(), Some((0, 0)));
        assert_eq!(m.pop_last(), Some((5, 50)));
        assert_eq!(m.first_key_value(), Some((&1, &10)));
        assert_eq!(m.last_key_value(), Some((&4, &40)));
        assert_eq!(m.len(), 4);

        let mut empty: AvlTreeMap<u8, u8> = AvlTreeMap::new();
        assert_eq!(empty.pop_first(), None);
        assert_eq!(empty.pop_last(), None);
    }

    #[test]
    fn into_iter_sorted() {
        let m = AvlTreeMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
        let v: Vec<_> = m.into_iter().collect();
        assert_eq!(v, vec![(1, 'a'), (2, 'b'), (3, 'c')]);
    }

    #[test]
    fn debug_prints_entries() {
        let m = AvlTreeMap::from([(2, "b"), (1, "a")]);
        assert_eq!(format!("{:?}", m), r#"{1: "a", 2: "b"}"#);
    }

    #[test]
    fn check_reports_stale_height() {
        let mut m: AvlTreeMap<_, _> = (0..7).map(|i| (i, ())).collect();
        let rt = m.tree.root().unwrap();
        let ht = m.tree.aux(rt);
        m.tree.set_aux(rt, ht + 1);

        let key = *m.tree.key(rt);
        assert_eq!(
            m.check(),
            Err(InvariantError::StaleHeight {
                key,
                stored: ht + 1,
                expected: ht,
            })
        );
    }

    #[test]
    fn check_reports_out_of_order_key() {
        let mut m: PlainMap<_, _> = (0..3).map(|i| (i, ())).collect();
        // 0(., 1(., 2)); break the order by renaming the middle key
        let one = m.tree.right(m.tree.root().unwrap()).unwrap();
        m.tree.replace_entry(one, 7, ());
        let two = m.tree.right(one).unwrap();
        assert_eq!(m.check(), Err(InvariantError::OutOfOrder { key: 2 }));
        assert_eq!(*m.tree.key(two), 2);
    }

    #[test]
    #[should_panic(expected = "Key not found")]
    fn index_missing_key() {
        let m = AvlTreeMap::from([(1, 1)]);
        let _ = m[&2];
    }

    #[test]
    fn borrowed_keys() {
        let mut m: AvlTreeMap<String, u8> = AvlTreeMap::new();
        m.insert("b".to_string(), 2);
        m.insert("a".to_string(), 1);
        assert_eq!(m.get("a"), Some(&1));
        assert!(m.contains_key("b"));
        assert_eq!(m.remove_entry("b"), Some(("b".to_string(), 2)));
        assert_eq!(m.get_key_value("a"), Some((&"a".to_string(), &1)));
    }

    #[test]
    fn rm_test_regr1() {
        rm_test(vec![(101, 0), (100, 0), (1, 0), (-100, 0)]);
    }

    #[test]
    fn rm_test_regr2() {
        rm_test(vec![
            (99, 0),
            (1, 0),
            (103, 0),
            (3, 0),
            (98, 0),
            (2, 0),
            (8, 0),
            (4, 0),
            (5, 0),
            (6, 0),
            (7, 0),
            (102, 0),
            (9, 0),
            (97, 0),
            (-102, 0),
            (10, 0),
            (-97, 0),
        ]);
    }

    quickcheck! {
        fn qc_rm_test(vs: Vec<(i8, u32)>) -> () {
            rm_test(vs);
        }

        fn qc_rm_test2(vs: Vec<(u8, u8)>) -> () {
            let fmap = vs.into_iter().collect();
            chk_all_removes(fmap);
        }

        fn qc_eq_ignores_shape(vs: Vec<(u8, u8)>) -> () {
            let fwd: AvlTreeMap<_, _> = vs.iter().copied().collect();
            let mut rev = AvlTreeMap::new();
            for (k, v) in fwd.iter().rev() {
                rev.insert(*k, *v);
            }
            assert_eq!(fwd, rev);
        }
    }
}
