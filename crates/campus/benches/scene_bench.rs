//! Criterion benchmarks for scene construction and transit stepping.
//!
//! Benchmarks:
//!   - synthesize a composite glass-fronted building
//!   - build the full Ariake scene from the layout tables
//!   - one animator tick with the Ariake transit tables
//!
//! Run with: cargo bench -p campus --bench scene_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use campus::buildings::synthesize;
use campus::{build_scene, CampusRng, SiteConfig, TransitAnimator};

// ---------------------------------------------------------------------------
// Benchmark: building synthesis
// ---------------------------------------------------------------------------

fn bench_synthesize(c: &mut Criterion) {
    let config = SiteConfig::default();
    let spec = match config.building("Building 1") {
        Some(spec) => spec.clone(),
        None => return,
    };

    c.bench_function("synthesize_building_1", |b| {
        b.iter(|| black_box(synthesize(black_box(&spec))));
    });
}

// ---------------------------------------------------------------------------
// Benchmark: full scene build
// ---------------------------------------------------------------------------

fn bench_build_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_build");
    group.sample_size(50);

    let config = SiteConfig::default();
    group.bench_function("ariake", |b| {
        b.iter(|| black_box(build_scene(black_box(&config))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: transit tick
// ---------------------------------------------------------------------------

fn bench_transit_tick(c: &mut Criterion) {
    let config = SiteConfig::default();
    let mut rng = CampusRng::default();
    let mut animator = TransitAnimator::new(config.transit, &mut rng.0);
    // Warm up so pedestrians are on their walkways.
    for _ in 0..600 {
        animator.tick(1.0 / 60.0, &mut rng.0);
    }

    c.bench_function("transit_tick_60hz", |b| {
        b.iter(|| animator.tick(black_box(1.0 / 60.0), &mut rng.0));
    });
}

criterion_group!(benches, bench_synthesize, bench_build_scene, bench_transit_tick);
criterion_main!(benches);
