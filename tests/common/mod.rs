use avl_tree_map::{AvlTreeMap, Tree};
use proptest::prelude::*;

#[allow(dead_code)]
pub(super) fn assert_eq_iters<I: Iterator, J: Iterator<Item = I::Item>>(
    mut i: I,
    mut j: J,
) where
    I::Item: std::fmt::Debug + Eq, // same inferred for J::Item
{
    loop {
        match (i.next(), j.next()) {
            (None, None) => return,
            (a, b) => assert_eq!(a, b),
        }
    }
}

#[allow(dead_code)]
pub(super) fn init_logging() {
    // a second init from another test fails harmlessly
    let _ = simplelog::TestLogger::init(
        simplelog::LevelFilter::Trace,
        simplelog::Config::default(),
    );
}

/// Checks the AVL invariants the long way, from the tree's shape alone.
/// Returns the structural height of the subtree.
#[allow(dead_code)]
pub(super) fn chk_avl_shape<K: Ord, V>(
    t: &Tree<K, V>,
    p: Option<avl_tree_map::Position>,
) -> i32 {
    match p {
        None => 0,
        Some(p) => {
            let lf = chk_avl_shape(t, t.left(p));
            let rt = chk_avl_shape(t, t.right(p));
            assert!((lf - rt).abs() <= 1, "unbalanced node");
            let ht = 1 + lf.max(rt);
            assert_eq!(t.aux(p), ht, "stale height");
            ht
        }
    }
}

/// The height bound of an AVL tree, counting edges.
#[allow(dead_code)]
pub(super) fn chk_height_bound<K, V>(m: &AvlTreeMap<K, V>) {
    if let Some(edges) = m.height().checked_sub(1) {
        let bound = 1.44 * ((m.len() + 2) as f64).log2() - 1.0;
        assert!(
            edges as f64 <= bound,
            "{} entries, height {}",
            m.len(),
            m.height()
        );
    }
}

#[allow(dead_code)]
pub(super) type SmallIntPairs = Vec<(u16, u16)>;

#[allow(dead_code)]
pub(super) fn small_int_pairs() -> impl Strategy<Value = SmallIntPairs> {
    prop::collection::vec((0u16..1024u16, 0u16..1024u16), 0..512)
}

#[allow(dead_code)]
pub(super) fn string_u16_pairs() -> impl Strategy<Value = Vec<(String, u16)>> {
    prop::collection::vec(("[a-z]{0,2}", 0u16..1024u16), 0..512)
}

/// A mix of inserts (`Ok`) and removes (`Err`) over a small key space, so
/// that removals often hit.
#[allow(dead_code)]
pub(super) fn small_int_ops() -> impl Strategy<Value = Vec<Result<(u8, u16), u8>>> {
    prop::collection::vec(
        prop_oneof![
            (0u8..64, any::<u16>()).prop_map(Ok::<(u8, u16), u8>),
            (0u8..64).prop_map(Err::<(u8, u16), u8>),
        ],
        0..512,
    )
}

#[allow(unused_macros)]
macro_rules! assert_eq_all {
    ( $x:expr, $( $y:expr ),+ $(,)? ) => {{
        let x = $x;
        $( assert_eq!(x, $y); )+
    }};
}
