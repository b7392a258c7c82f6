//! Model-based checks of [`AvlTree`] against [`BTreeSet`].
extern crate std;

use std::{collections::BTreeSet, prelude::v1::*};

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::{AvlTree, Error};

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    /// Resolves to a key already in the set, chosen by index.
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Contains(ItemValue),
    Delete(ItemValue),
    Min,
    PopMin,
    Max,
    PopMax,
}

impl Op {
    fn finalize(self, sorted: &[u32]) -> FinalOp {
        fn get_value(v: &[u32], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len()]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Contains(item) => FinalOp::Contains(get_value(sorted, item)),
            Op::Delete(item) => FinalOp::Delete(get_value(sorted, item)),
            Op::Min => FinalOp::Min,
            Op::PopMin => FinalOp::PopMin,
            Op::Max => FinalOp::Max,
            Op::PopMax => FinalOp::PopMax,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Contains(u32),
    Delete(u32),
    Min,
    PopMin,
    Max,
    PopMax,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        value_strategy().prop_map(Op::Insert),
        value_strategy().prop_map(Op::Contains),
        value_strategy().prop_map(Op::Delete),
        Just(Op::Min),
        Just(Op::PopMin),
        Just(Op::Max),
        Just(Op::PopMax),
    ]
}

/// Applies `ops` to both a `BTreeSet` and an [`AvlTree`], panicking on the first divergence or
/// broken tree invariant.
pub fn run_btree_equivalence(ops: Vec<Op>) {
    let mut sorted_values = Vec::with_capacity(ops.len());
    let mut btree = BTreeSet::new();
    let mut avl: AvlTree<u32> = AvlTree::new();

    fn insert_sorted(v: &mut Vec<u32>, value: u32) {
        if let Err(idx) = v.binary_search(&value) {
            v.insert(idx, value);
        }
    }

    fn remove_sorted(v: &mut Vec<u32>, value: u32) {
        if let Ok(idx) = v.binary_search(&value) {
            v.remove(idx);
        }
    }

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_values);

        match final_op {
            FinalOp::Insert(value) => {
                insert_sorted(&mut sorted_values, value);

                let from_btree = if btree.insert(value) {
                    Ok(())
                } else {
                    Err(Error::DuplicateKey)
                };
                let from_avl = avl.insert(value);

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Contains(value) => {
                assert_eq!(
                    btree.contains(&value),
                    avl.contains(&value),
                    "FinalOp #{op_id}: {final_op:?}"
                );
                assert_eq!(
                    btree.get(&value),
                    avl.get(&value),
                    "FinalOp #{op_id}: {final_op:?}"
                );
            }

            FinalOp::Delete(value) => {
                remove_sorted(&mut sorted_values, value);

                let from_btree = if btree.is_empty() {
                    Err(Error::EmptyTree)
                } else if btree.remove(&value) {
                    Ok(value)
                } else {
                    Err(Error::KeyNotFound)
                };
                let from_avl = avl.delete(&value);

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Min => {
                let from_btree = btree.first().ok_or(Error::EmptyTree);
                let from_avl = avl.min();

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopMin => {
                let from_btree = btree.pop_first();
                if let Some(value) = from_btree {
                    remove_sorted(&mut sorted_values, value);
                }
                let from_avl = avl.pop_min();

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Max => {
                let from_btree = btree.last().ok_or(Error::EmptyTree);
                let from_avl = avl.max();

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopMax => {
                let from_btree = btree.pop_last();
                if let Some(value) = from_btree {
                    remove_sorted(&mut sorted_values, value);
                }
                let from_avl = avl.pop_max();

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }
        }

        avl.assert_invariants();
        assert_eq!(btree.len(), avl.len());
        assert_eq!(avl.len(), avl.size());
        assert!(btree.iter().eq(avl.iter()));
        assert!(btree.iter().rev().eq(avl.keys(true)));
    }
}

/// Two key sets to combine with [`AvlTree::union`] and [`AvlTree::intersection`].
#[derive(Clone, Debug)]
pub struct SetOpsInput {
    pub lhs: Vec<u32>,
    pub rhs: Vec<u32>,
}

impl<'a> arbitrary::Arbitrary<'a> for SetOpsInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        // Keep keys small so that the two sides overlap.
        fn value(u: &mut arbitrary::Unstructured<'_>) -> u32 {
            u32::from(u8::arbitrary(u).unwrap_or(0))
        }

        let num_lhs = u8::arbitrary(u)? % 200;
        let num_rhs = u8::arbitrary(u)? % 200;

        let lhs = core::iter::repeat_with(|| value(u))
            .take(num_lhs.into())
            .collect();

        let rhs = core::iter::repeat_with(|| value(u))
            .take(num_rhs.into())
            .collect();

        Ok(SetOpsInput { lhs, rhs })
    }
}

pub fn set_ops_strategy() -> impl Strategy<Value = SetOpsInput> {
    let side = || proptest::collection::vec(0u32..256, 0..200);
    (side(), side()).prop_map(|(lhs, rhs)| SetOpsInput { lhs, rhs })
}

/// Builds a tree from `values` in the given order, skipping repeats.
fn build(values: &[u32]) -> (AvlTree<u32>, BTreeSet<u32>) {
    let mut btree = BTreeSet::new();
    let mut avl = AvlTree::new();

    for &value in values {
        let expected = if btree.insert(value) {
            Ok(())
        } else {
            Err(Error::DuplicateKey)
        };
        assert_eq!(avl.insert(value), expected);
    }

    (avl, btree)
}

/// Checks union and intersection of trees built from `lhs` and `rhs` against `BTreeSet`.
pub fn run_set_ops_equivalence(input: SetOpsInput) {
    let (a, a_set) = build(&input.lhs);
    let (b, b_set) = build(&input.rhs);

    let union = a.union(&b);
    union.assert_invariants();
    assert!(union.iter().eq(a_set.union(&b_set)));

    let intersection = a.intersection(&b);
    intersection.assert_invariants();
    assert!(intersection.iter().eq(a_set.intersection(&b_set)));

    // Both operations are symmetric.
    assert!(b.union(&a).iter().eq(union.iter()));
    assert!(b.intersection(&a).iter().eq(intersection.iter()));

    // The operands are untouched.
    a.assert_invariants();
    b.assert_invariants();
    assert!(a.iter().eq(a_set.iter()));
    assert!(b.iter().eq(b_set.iter()));
}
