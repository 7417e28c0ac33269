//! The standard-library baseline, measured through the same adapter the
//! harness uses.

use criterion::{black_box, Bencher, Criterion};
use ordset::StdSet;
use rand::prelude::*;

fn bench_insert(b: &mut Bencher, base: usize, inserts: usize) {
    let mut set: StdSet<u32> = StdSet::new();
    let mut rng = SmallRng::from_entropy();

    for _ in 0..base {
        set.insert(rng.gen());
    }

    b.iter(|| {
        for _ in 0..inserts {
            set.insert(rng.gen());
        }
    });
}

fn bench_find(b: &mut Bencher, size: usize) {
    let mut rng = SmallRng::from_entropy();
    let mut set: StdSet<u32> = StdSet::new();
    while set.len() < size {
        set.insert(rng.gen());
    }

    b.iter(|| {
        let cursor = set.find(&rng.gen());
        black_box(cursor.is_end());
    });
}

fn bench_iter(b: &mut Bencher, size: usize) {
    let mut set: StdSet<u32> = StdSet::new();
    let mut rng = SmallRng::from_entropy();

    for _ in 0..size {
        set.insert(rng.gen());
    }

    b.iter(|| {
        for entry in &set {
            black_box(entry);
        }
    });
}

pub fn benchmark(c: &mut Criterion) {
    c.bench_function("StdSet insert 1000 (empty)", |b| {
        bench_insert(b, 0, 1_000);
    });
    c.bench_function("StdSet insert 1000 (filled)", |b| {
        bench_insert(b, 100_000, 1_000);
    });
    c.bench_function("StdSet find (100000)", |b| {
        bench_find(b, 100_000);
    });
    c.bench_function("StdSet iter 10000", |b| {
        bench_iter(b, 10_000);
    });
}
