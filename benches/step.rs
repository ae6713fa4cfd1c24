//! Benchmarks the per-frame particle update at the full cloud size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use morphcloud::prelude::*;
use rand::rngs::SmallRng;

fn bench_step(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(8);
    let target = shape::generate(ShapeKind::Galaxy, PARTICLE_COUNT, &[], &mut rng);

    let mut cloud = ParticleCloud::with_rng(PARTICLE_COUNT, SmallRng::seed_from_u64(7));
    c.bench_function("step_idle", |b| {
        b.iter(|| cloud.step(black_box(&target), None))
    });

    let mut cloud = ParticleCloud::with_rng(PARTICLE_COUNT, SmallRng::seed_from_u64(7));
    c.bench_function("step_scatter", |b| {
        b.iter(|| cloud.step(black_box(&target), Some(Vec2::new(3.0, -2.0))))
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
