use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use gridseer::{CellPos, GridDims, InferenceEngine, Observation, PerceptSet};

const SIDE: usize = 16;

/// An engine with a checkerboard of empty observations declared but
/// not yet propagated. Consistent with a hazard-free board whose goal
/// sits outside every observed neighborhood, so propagation never
/// contradicts.
fn seeded_engine() -> InferenceEngine {
    let dims = GridDims::new(SIDE, SIDE).unwrap();
    let mut engine = InferenceEngine::new(dims);
    for pos in dims.positions() {
        if (pos.row + pos.col) % 2 == 0 {
            engine
                .declare_observation(Observation::empty(pos))
                .unwrap();
        }
    }
    engine
}

fn bench_propagate_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagation");
    group.throughput(Throughput::Elements((SIDE * SIDE) as u64));
    group.bench_function("fixed_point_16x16_checkerboard", |b| {
        b.iter_batched(
            seeded_engine,
            |mut engine| engine.propagate().unwrap(),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_incremental_turn(c: &mut Criterion) {
    // One observation on an already settled store, the per-turn case.
    let mut settled = seeded_engine();
    settled.propagate().unwrap();

    c.bench_function("propagation/single_observation_turn", |b| {
        b.iter_batched(
            || settled.clone(),
            |mut engine| {
                engine
                    .declare_observation(Observation::new(
                        CellPos::new(0, 1),
                        PerceptSet::EMPTY,
                    ))
                    .unwrap();
                engine.propagate().unwrap()
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_query_all(c: &mut Criterion) {
    let mut settled = seeded_engine();
    settled.propagate().unwrap();

    c.bench_function("propagation/query_all_snapshot", |b| {
        b.iter(|| settled.query_all());
    });
}

criterion_group!(
    benches,
    bench_propagate_sweep,
    bench_incremental_turn,
    bench_query_all
);
criterion_main!(benches);
