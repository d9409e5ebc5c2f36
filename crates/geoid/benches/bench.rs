use core::hint::black_box;
use core::num::NonZeroU32;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use geoid::{GeoId, GeoIdGenerator, GeoIdRange};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

// Number of identifiers processed per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

fn sample_ids() -> Vec<String> {
    GeoIdGenerator::default()
        .iter()
        .take(TOTAL_IDS)
        .map(|id| id.to_string())
        .collect()
}

/// Decodes a fixed set of encoded identifiers.
fn bench_decode(c: &mut Criterion) {
    let encoded = sample_ids();
    let mut group = c.benchmark_group("codec/decode");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for s in &encoded {
                black_box(GeoId::decode(black_box(s)).ok());
            }
        });
    });

    group.finish();
}

/// Encodes into a stack buffer and into an allocated `String`.
fn bench_encode(c: &mut Criterion) {
    let ids: Vec<GeoId> = GeoIdGenerator::default().iter().take(TOTAL_IDS).collect();
    let mut group = c.benchmark_group("codec/encode");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("buf/elems/{TOTAL_IDS}"), |b| {
        let mut buf = [0_u8; GeoId::ENCODED_LEN];
        b.iter(|| {
            for id in &ids {
                id.encode_to_buf(&mut buf);
                black_box(&buf);
            }
        });
    });

    group.bench_function(format!("string/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for id in &ids {
                black_box(id.encode());
            }
        });
    });

    group.finish();
}

/// Walks the full default range at several strides.
fn bench_enumerate(c: &mut Criterion) {
    let generator = GeoIdGenerator::default();
    let mut group = c.benchmark_group("range/enumerate");

    for stride in [1, 10, 100] {
        let stride = NonZeroU32::new(stride).unwrap();
        group.throughput(Throughput::Elements(u64::from(generator.count_step(stride))));
        group.bench_function(format!("stride/{stride}"), |b| {
            b.iter(|| {
                for id in generator.iter_step(stride) {
                    black_box(id);
                }
            });
        });
    }

    group.finish();
}

/// Partitions the default range for growing worker counts.
fn bench_partition(c: &mut Criterion) {
    let generator = GeoIdGenerator::default();
    let mut group = c.benchmark_group("range/partition");

    for workers in [1, 15, 256, 4096] {
        group.throughput(Throughput::Elements(workers as u64));
        group.bench_function(format!("workers/{workers}"), |b| {
            b.iter(|| black_box(generator.partition(black_box(workers)).ok()));
        });
    }

    group.finish();
}

/// Shares one generator across threads, each walking its own sub-range.
fn bench_partition_walk_threaded(c: &mut Criterion) {
    let generator = GeoIdGenerator::default();
    let mut group = c.benchmark_group("range/partition_walk");
    group.throughput(Throughput::Elements(u64::from(generator.count())));

    for thread_count in [1, 2, 4, 8, 16] {
        group.bench_function(format!("threads/{thread_count}"), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();

                for _ in 0..iters {
                    let plan: Vec<GeoIdRange> = generator.partition(thread_count).unwrap();
                    let barrier = Arc::new(Barrier::new(thread_count + 1));
                    scope(|s| {
                        for range in &plan {
                            let barrier = Arc::clone(&barrier);
                            s.spawn(move || {
                                barrier.wait();
                                for id in range.iter() {
                                    black_box(id);
                                }
                            });
                        }
                        barrier.wait();
                    });
                }

                start.elapsed()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_encode,
    bench_enumerate,
    bench_partition,
    bench_partition_walk_threaded,
);
criterion_main!(benches);
