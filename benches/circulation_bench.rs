//! Benchmarks for catalog search and the issue/return cycle.

use std::{hint::black_box, time::Duration};

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use library_circulation::{
    BookId, CirculationService, LibraryConfig, MemberId, clock::ManualClock,
};

/// Benchmark settings small enough to run in CI
fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(1))
        .warm_up_time(Duration::from_secs(1))
}

/// A library with `books` titles and one member
fn stocked_library(books: u32) -> CirculationService {
    let mut library =
        CirculationService::new(&LibraryConfig::default(), Box::new(ManualClock::default()));
    for n in 0..books {
        drop(library.add_book(&format!("Volume {n} of the Collected Works"), "Anonymous", ""));
    }
    drop(library.add_member("Ada", "ada@example.org"));
    library
}

/// Search and circulation timings
fn circulation_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Circulation");

    let library = stocked_library(1_000);
    group.bench_function("search_1000_hit", |b| {
        b.iter(|| black_box(library.search_books(black_box("volume 999"))).len());
    });
    group.bench_function("search_1000_miss", |b| {
        b.iter(|| black_box(library.search_books(black_box("xyz"))).len());
    });

    group.bench_function("issue_then_return", |b| {
        b.iter_batched(
            || stocked_library(10),
            |mut library| {
                drop(black_box(library.issue_book(MemberId(1), BookId(1005))));
                drop(black_box(library.return_book(MemberId(1), BookId(1005))));
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets = circulation_bench
}
criterion_main!(benches);
