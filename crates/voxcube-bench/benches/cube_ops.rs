//! Criterion benchmarks for cube mutation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use voxcube_bench::random_cube;
use voxcube_core::{Axis, AxisVector, CubeDims, VoxelCube};

fn bench_shift_all_directions(c: &mut Criterion) {
    let base = random_cube(CubeDims::cube(8).unwrap(), 0.3, 42);
    let mut group = c.benchmark_group("shift_8");
    for vector in AxisVector::ALL {
        group.bench_function(vector.to_string(), |b| {
            b.iter_batched_ref(
                || base.clone(),
                |cube| cube.shift(black_box(vector)),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_shift_wide(c: &mut Criterion) {
    let base = random_cube(CubeDims::new(64, 16, 16).unwrap(), 0.3, 42);
    c.bench_function("shift_64x16x16_neg_z", |b| {
        b.iter_batched_ref(
            || base.clone(),
            |cube| cube.shift(AxisVector::NEG_Z),
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_set_plane(c: &mut Criterion) {
    let mut cube = VoxelCube::new(8).unwrap();
    c.bench_function("set_plane_8", |b| {
        b.iter(|| {
            for axis in Axis::ALL {
                cube.clear();
                cube.set_plane(axis, black_box(3));
            }
            black_box(&cube);
        });
    });
}

criterion_group!(
    benches,
    bench_shift_all_directions,
    bench_shift_wide,
    bench_set_plane
);
criterion_main!(benches);
