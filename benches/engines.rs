//! Per-engine operation benchmarks.
//!
//! Run with: `cargo bench --bench engines`
//!
//! Every engine sees the same key stream: a warm-up fill to capacity, then a
//! mixed read/write phase over a key universe four times larger than the
//! cache, skewed towards a hot quarter of the keys.

use std::hint::black_box;

use cachelayer::cache::Cache;
use cachelayer::item::Item;
use cachelayer::registry::{PolicyKind, Registry};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 4_096;
const OPS: usize = 20_000;

fn key_stream(len: usize) -> Vec<String> {
    let universe = CAPACITY * 4;
    let hot = universe / 4;
    let mut rng = StdRng::seed_from_u64(42);
    (0..len)
        .map(|_| {
            let index = if rng.gen_bool(0.8) {
                rng.gen_range(0..hot)
            } else {
                rng.gen_range(0..universe)
            };
            format!("key:{index}")
        })
        .collect()
}

fn warmed(kind: PolicyKind) -> Cache<u64> {
    let mut cache = Cache::new(Registry::linked().new_container(kind, CAPACITY));
    for i in 0..CAPACITY as u64 {
        let _ = cache.put(Item::new(format!("key:{i}"), i).unwrap());
    }
    cache
}

// ============================================================================
// Put Throughput
// ============================================================================

fn bench_put(c: &mut Criterion) {
    let keys = key_stream(OPS);
    let mut group = c.benchmark_group("put");
    group.throughput(Throughput::Elements(OPS as u64));

    for kind in Registry::<u64>::linked().registered() {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &keys, |b, keys| {
            b.iter_batched(
                || warmed(kind),
                |mut cache| {
                    for (i, key) in keys.iter().enumerate() {
                        let _ = cache.put(Item::new(key.as_str(), i as u64).unwrap());
                    }
                    cache
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

// ============================================================================
// Mixed Read/Write
// ============================================================================

fn bench_mixed(c: &mut Criterion) {
    let keys = key_stream(OPS);
    let mut group = c.benchmark_group("get_or_put");
    group.throughput(Throughput::Elements(OPS as u64));

    for kind in Registry::<u64>::linked().registered() {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &keys, |b, keys| {
            b.iter_batched(
                || warmed(kind),
                |mut cache| {
                    let mut hits = 0usize;
                    for (i, key) in keys.iter().enumerate() {
                        match cache.get(key) {
                            Ok(Some(item)) => {
                                hits += 1;
                                black_box(item.value());
                            },
                            _ => {
                                let _ = cache.put(Item::new(key.as_str(), i as u64).unwrap());
                            },
                        }
                    }
                    black_box(hits)
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_put, bench_mixed);
criterion_main!(benches);
