//! Benchmarks for field generation and per-frame CPU updates.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tinsel::field::{generate, FieldLayout};
use tinsel::{Mode, OrnamentAnimator, ParticleClass, ParticleRecord};

fn table(class: ParticleClass, count: usize) -> Vec<ParticleRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    generate(count, class, &FieldLayout::for_class(class), &mut rng)
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for count in [1_000usize, 15_000, 50_000] {
        group.bench_with_input(BenchmarkId::new("foliage", count), &count, |b, &count| {
            let layout = FieldLayout::for_class(ParticleClass::Foliage);
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(generate(count, ParticleClass::Foliage, &layout, &mut rng)))
        });
    }

    group.bench_function("lights_400", |b| {
        let layout = FieldLayout::for_class(ParticleClass::Light);
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| black_box(generate(400, ParticleClass::Light, &layout, &mut rng)))
    });

    group.finish();
}

fn bench_ornament_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("ornament_update");

    // Default scene and a 10x heavier one.
    for scale in [1usize, 10] {
        let mut animator = OrnamentAnimator::new(
            table(ParticleClass::Ball, 300 * scale),
            table(ParticleClass::Box, 120 * scale),
            table(ParticleClass::Light, 400 * scale),
            2.0,
        );
        let instances = 820 * scale;

        group.bench_with_input(BenchmarkId::new("mid_transition", instances), &instances, |b, _| {
            let mut t = 0.0f32;
            b.iter(|| {
                t += 1.0 / 60.0;
                animator.update(black_box(0.5), t);
            })
        });

        group.bench_with_input(BenchmarkId::new("frame", instances), &instances, |b, _| {
            let mut t = 0.0f32;
            b.iter(|| {
                t += 1.0 / 60.0;
                animator.frame(Mode::Formed, t, 1.0 / 60.0);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_ornament_update);
criterion_main!(benches);
