//! Basic benchmarks for the `observable_collections` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use observable_collections::ObservableList;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

const ITEM_COUNT: usize = 10_000;

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("observable_ops");

    group.bench_function("add_without_subscribers", |b| {
        b.iter(|| {
            let list = ObservableList::new();

            for i in 0..ITEM_COUNT {
                list.add(black_box(i));
            }

            black_box(list)
        });
    });

    group.bench_function("add_with_one_subscriber", |b| {
        b.iter(|| {
            let list = ObservableList::new();
            _ = list.subscribe(|record| {
                _ = black_box(record);
            });

            for i in 0..ITEM_COUNT {
                list.add(black_box(i));
            }

            black_box(list)
        });
    });

    group.finish();
}
