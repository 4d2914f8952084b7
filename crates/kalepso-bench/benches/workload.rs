//! Workload generation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kalepso_bench::backends::text;
use kalepso_bench::fixtures::synthetic_salaries;
use kalepso_bench::workload::{generate, WorkloadParams};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("workload/generate");
    let source = synthetic_salaries(247_000, 42);

    for size in [1_000, 10_000, 100_000] {
        let params = WorkloadParams::new(size, 10, size / 10);
        group.bench_with_input(BenchmarkId::new("sample", size), &params, |b, params| {
            b.iter(|| {
                let workload = generate(&source, params, 123_456).unwrap();
                black_box(workload.queries.len());
            });
        });
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let source = synthetic_salaries(10_000, 42);
    let workload = generate(&source, &WorkloadParams::new(10_000, 10, 1_000), 1).unwrap();

    c.bench_function("workload/emit", |b| {
        b.iter(|| black_box(text::emit(&workload).len()));
    });
}

criterion_group!(benches, bench_generate, bench_emit);
criterion_main!(benches);
