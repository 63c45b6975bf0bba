mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use map_placement::prelude::{distance_field, orientation_field, BinaryMask, RoadNetwork};

/// A road grid: one horizontal and one vertical road every `spacing` cells plus a diagonal.
fn road_grid(size: usize, spacing: usize) -> BinaryMask {
    BinaryMask::from_fn(size, size, |x, y| x % spacing == 0 || y % spacing == 0 || x == y)
}

fn distance_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("roads/distance_field");

    for &n in &[128usize, 512, 1024] {
        let mask = road_grid(n, 97);
        group.throughput(common::elements_throughput(n * n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(distance_field(black_box(&mask))));
        });
    }

    // No road at all: every cell ends at the cap without any expansion.
    let empty = BinaryMask::filled(512, 512, false);
    group.bench_function("no_roads_512", |b| {
        b.iter(|| black_box(distance_field(&empty)));
    });

    group.finish();
}

fn orientation_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("roads/orientation_field");

    let distance = distance_field(&road_grid(512, 97));
    group.throughput(common::elements_throughput(distance.len()));
    for &radius in &[1usize, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &r| {
            b.iter(|| black_box(orientation_field(&distance, r)));
        });
    }

    group.finish();
}

fn network_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("roads/network");
    let mask = road_grid(512, 64);
    group.throughput(common::elements_throughput(mask.len()));

    group.bench_function("from_mask_512", |b| {
        b.iter(|| {
            let roads = RoadNetwork::from_mask(mask.clone(), 1.0, 2);
            black_box(roads.is_ok());
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = distance_benches, orientation_benches, network_benches
}
criterion_main!(benches);
