use quickcheck_macros::quickcheck;
use weighted_bst::{Tree, Weight};

use std::collections::BTreeMap;

use crate::Op;

/// Every tree in these tests starts from a root at 0 so the model starts with it too.
fn new_tree() -> (Tree<i8>, BTreeMap<Weight, i8>) {
    let mut map = BTreeMap::new();
    map.insert(0, 0);
    (Tree::new(0, 0), map)
}

fn weights(tree: &Tree<i8>) -> Vec<Weight> {
    let mut weights = Vec::new();
    tree.traverse(|weight| weights.push(weight));
    weights
}

/// Applies a set of operations to a tree and a map.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of weights in the tree.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, map: &mut BTreeMap<Weight, i8>) -> bool {
    for op in ops {
        let ok = match *op {
            Op::Insert(w, v) => {
                let w = Weight::from(w);
                tree.insert(w, v) == map.insert(w, v)
            }
            Op::Delete(w) => {
                let w = Weight::from(w);
                let before = tree.len();
                let deleted = tree.delete_node(w);
                let expected = map.remove(&w);
                let shrank = if expected.is_some() {
                    tree.len() == before - 1
                } else {
                    tree.len() == before
                };
                deleted == expected && shrank && tree.find(w).is_none()
            }
            Op::Traverse => weights(tree).into_iter().eq(map.keys().copied()),
        };
        if !ok || !tree.is_balanced() || tree.len() != map.len() {
            return false;
        }
    }

    true
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let (mut tree, mut map) = new_tree();

    do_ops(&ops, &mut tree, &mut map)
        && map.iter().all(|(w, v)| tree.find(*w) == Some(v))
        && tree.iter().map(|(w, &v)| (w, v)).eq(map.iter().map(|(&w, &v)| (w, v)))
}

#[quickcheck]
fn last_write_wins(xs: Vec<(i8, i8)>) -> bool {
    let (mut tree, mut map) = new_tree();
    for &(w, v) in &xs {
        tree.insert(w.into(), v);
        map.insert(w.into(), v);
    }

    tree.len() == map.len() && map.iter().all(|(w, v)| tree.find(*w) == Some(v))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let (mut tree, _) = new_tree();
    for &x in &xs {
        tree.insert(x.into(), x);
    }

    nots.iter()
        .filter(|&&n| n != 0 && !xs.contains(&n))
        .all(|&n| tree.find(n.into()).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let (mut tree, _) = new_tree();
    for &x in &xs {
        tree.insert(x.into(), x);
    }
    for &delete in &deletes {
        tree.delete_node(delete.into());
    }

    let mut still_present = xs
        .iter()
        .chain(std::iter::once(&0))
        .filter(|&x| !deletes.contains(x));

    deletes.iter().all(|&x| tree.find(x.into()).is_none())
        && still_present.all(|&x| tree.find(x.into()).is_some())
        && tree.is_balanced()
}

#[quickcheck]
fn traversal_is_sorted(xs: Vec<i8>) -> bool {
    let (mut tree, _) = new_tree();
    for &x in &xs {
        tree.insert(x.into(), x);
    }

    let mut expected: Vec<Weight> = xs.iter().map(|&x| x.into()).chain([0]).collect();
    expected.sort_unstable();
    expected.dedup();

    weights(&tree) == expected
}

#[quickcheck]
fn min_max_match_sorted_snapshot(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let (mut tree, mut map) = new_tree();
    for &x in &xs {
        tree.insert(x.into(), x);
        map.insert(x.into(), x);
    }
    for &x in &deletes {
        tree.delete_node(x.into());
        map.remove(&Weight::from(x));
    }

    let min = tree.find_minimum().map(|n| n.weight());
    let max = tree.find_maximum().map(|n| n.weight());
    min == map.keys().next().copied() && max == map.keys().next_back().copied()
}

#[quickcheck]
fn parent_links_survive_deletes(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let (mut tree, _) = new_tree();
    for &x in &xs {
        tree.insert(x.into(), x);
    }
    for &x in &deletes {
        tree.delete_node(x.into());
    }

    let root_ok = tree.get_root().map_or(true, |root| root.parent().is_none());
    root_ok
        && tree.iter().all(|(w, _)| {
            let node = tree.find_node(w).unwrap();
            let left_ok = node
                .left()
                .map_or(true, |l| l.parent().map(|p| p.id()) == Some(node.id()));
            let right_ok = node
                .right()
                .map_or(true, |r| r.parent().map(|p| p.id()) == Some(node.id()));
            left_ok && right_ok
        })
}
