use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mmult::{Dims, Matrix, Variant, WorkerPool, matmul_naive_ijk, multiply};
use pprof::criterion::{Output, PProfProfiler};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = bench_kernels
}
criterion_main!(benches);

fn bench_kernels(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let pool = WorkerPool::new(0).unwrap();

    for size in [128, 256, 512] {
        let dims = Dims::new(size, size, size);
        let a = Matrix::<i32>::random(dims.m, dims.k, &mut rng).unwrap();
        let b = Matrix::<i32>::random(dims.k, dims.n, &mut rng).unwrap();
        let mut out = Matrix::<i32>::zeros(dims.m, dims.n).unwrap();

        let mut group = c.benchmark_group(format!("matmul_{size}"));
        group.throughput(Throughput::Elements(dims.ops() as u64));

        group.bench_function("naive_ijk", |bench| {
            bench.iter(|| {
                matmul_naive_ijk(
                    black_box(a.as_slice()),
                    black_box(b.as_slice()),
                    out.as_mut_slice(),
                    dims,
                )
            })
        });

        for variant in Variant::ALL {
            for tile in [16, 32, 64] {
                group.bench_with_input(
                    BenchmarkId::new(variant.name(), tile),
                    &tile,
                    |bench, &tile| {
                        bench.iter(|| {
                            multiply(
                                variant,
                                black_box(a.as_slice()),
                                black_box(b.as_slice()),
                                out.as_mut_slice(),
                                dims,
                                tile,
                                &pool,
                            )
                            .unwrap()
                        })
                    },
                );
            }
        }

        group.finish();
    }
}
