use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use nbody_trajectory::{scenario, Simulator};

fn bench_accelerations(c: &mut Criterion) {
    let mut group = c.benchmark_group("accelerations");

    for n in [3, 64, 256] {
        let bodies = scenario::random_bodies(n, &mut fastrand::Rng::with_seed(0))
            .expect("valid scenario");
        group.throughput(Throughput::Elements((n * n) as u64));

        for parallel in [false, true] {
            let mut sim = Simulator::with_bodies(bodies.clone(), 0.0, 10.0, 500)
                .expect("valid scenario");
            sim.set_parallel(parallel);

            let label = if parallel { "rayon" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, n), &n, |b, _| {
                b.iter(|| sim.compute_accelerations().expect("no coincident bodies"));
            });
        }
    }

    group.finish();
}

fn bench_run(c: &mut Criterion) {
    // The classic three-body setup: 500 steps over ten years.
    let bodies = scenario::random_bodies(3, &mut fastrand::Rng::with_seed(0))
        .expect("valid scenario");

    c.bench_function("run_three_body_500", |b| {
        b.iter_batched(
            || Simulator::with_bodies(bodies.clone(), 0.0, 10.0, 500).expect("valid scenario"),
            |mut sim| {
                sim.run().expect("no coincident bodies");
                sim
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_accelerations, bench_run);
criterion_main!(benches);
