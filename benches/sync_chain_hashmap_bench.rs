use chain_hashmap::SyncChainHashMap;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::thread;
use std::time::Duration;

const OPS_PER_THREAD: u64 = 5_000;

fn bench_uncontended(c: &mut Criterion) {
    c.bench_function("sync::get_cloned_uncontended", |b| {
        let m = SyncChainHashMap::new();
        for k in 0..10_000u64 {
            m.put(k, k);
        }
        let mut k = 0u64;
        b.iter(|| {
            k = (k + 1) % 10_000;
            black_box(m.get_cloned(&k))
        })
    });
}

// Every operation takes the same lock, so this measures how the single
// table mutex behaves as threads are added.
fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync::mixed");
    for threads in [1u64, 2, 4, 8] {
        group.throughput(Throughput::Elements(threads * OPS_PER_THREAD));
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &n| {
            b.iter(|| {
                let m: SyncChainHashMap<u64, u64> = SyncChainHashMap::new();
                thread::scope(|s| {
                    for t in 0..n {
                        let m = &m;
                        s.spawn(move || {
                            for i in 0..OPS_PER_THREAD {
                                let k = t * OPS_PER_THREAD + i % 1_000;
                                match i % 4 {
                                    0 | 1 => m.put(k, i),
                                    2 => {
                                        black_box(m.get_cloned(&k));
                                    }
                                    _ => {
                                        m.remove(&k);
                                    }
                                }
                            }
                        });
                    }
                });
                black_box(m.len())
            })
        });
    }
    group.finish();
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_uncontended, bench_contended
}
criterion_main!(benches);
