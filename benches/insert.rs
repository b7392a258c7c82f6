use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use avl_set::AvlTree;

const N: usize = 5_000;

pub fn benchmarks(c: &mut Criterion) {
    // Keys must be distinct before they reach the tree.
    let mut rng = StdRng::seed_from_u64(0);
    let mut distinct = BTreeSet::new();
    while distinct.len() < N {
        distinct.insert(rng.gen::<u64>());
    }
    let mut values: Vec<u64> = distinct.into_iter().collect();
    values.shuffle(&mut rng);

    c.bench_function("tree_insert", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for value in &values {
                tree.insert(*value).unwrap();
            }
            tree
        })
    });

    let tree = AvlTree::from_keys(values.iter().copied()).unwrap();

    c.bench_function("tree_contains", |b| {
        b.iter(|| {
            for value in &values {
                black_box(tree.contains(value));
            }
        })
    });

    c.bench_function("tree_keys", |b| {
        b.iter(|| {
            for key in &tree {
                black_box(key);
            }
        })
    });

    c.bench_function("tree_delete", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                for value in &values {
                    tree.delete(value).unwrap();
                }
                tree
            },
            criterion::BatchSize::SmallInput,
        )
    });

    let other = AvlTree::from_keys(values.iter().step_by(2).map(|v| v ^ 1)).unwrap();

    c.bench_function("tree_union", |b| b.iter(|| tree.union(&other)));
    c.bench_function("tree_intersection", |b| b.iter(|| tree.intersection(&other)));
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
