use core::num::NonZeroU32;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use geoid::GeoIdGenerator;
use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
    time::{Duration, Instant},
};

const BIN: &str = env!("CARGO_BIN_EXE_geoid-scraper");

const START: &str = "G0100000";
const END: &str = "G0110000";

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("geoid-scraper-bench-{name}-{}", std::process::id()))
}

/// Runs the binary once and returns how long it took.
fn run_once(args: &[&str], data_dir: &Path) -> Duration {
    let start = Instant::now();
    let status = Command::new(BIN)
        .args(args)
        .args(["--start", START, "--end", END, "--request-delay-ms", "0"])
        .arg("--data-dir")
        .arg(data_dir)
        .env("RUST_LOG", "error")
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status()
        .expect("Failed to start geoid-scraper");
    let elapsed = start.elapsed();
    assert!(status.success(), "geoid-scraper exited with {status}");
    elapsed
}

/// End-to-end `run` with the link fetcher, for growing worker counts.
fn bench_run(c: &mut Criterion) {
    let data_dir = scratch_dir("run");
    let mut group = c.benchmark_group("cli/run");
    group.sample_size(10);

    let generator = GeoIdGenerator::parse(START, END).unwrap();

    for stride in [1, 10] {
        for workers in [1, 4, 16] {
            // Every sub-range restarts the stride at its own first identifier.
            let step = NonZeroU32::new(stride).unwrap();
            let ids: u64 = generator
                .partition(workers)
                .unwrap()
                .iter()
                .map(|r| u64::from(r.count_step(step)))
                .sum();
            group.throughput(Throughput::Elements(ids));
            group.bench_function(format!("stride/{stride}/workers/{workers}"), |b| {
                let workers = workers.to_string();
                let stride = stride.to_string();
                b.iter_custom(|iters| {
                    (0..iters)
                        .map(|_| {
                            run_once(
                                &["run", "--workers", &workers, "--stride", &stride],
                                &data_dir,
                            )
                        })
                        .sum()
                });
            });
        }
    }

    group.finish();
    let _ = std::fs::remove_dir_all(data_dir);
}

/// End-to-end `urls` manifest generation.
fn bench_urls(c: &mut Criterion) {
    let data_dir = scratch_dir("urls");
    let output = data_dir.join("urls.csv");
    let output = output.to_string_lossy().into_owned();
    let mut group = c.benchmark_group("cli/urls");
    group.sample_size(10);
    group.throughput(Throughput::Elements(10_001));

    group.bench_function("stride/1", |b| {
        b.iter_custom(|iters| {
            (0..iters)
                .map(|_| run_once(&["urls", "--output", &output, "--stride", "1"], &data_dir))
                .sum()
        });
    });

    group.finish();
    let _ = std::fs::remove_dir_all(data_dir);
}

criterion_group!(cli_benches, bench_run, bench_urls);
criterion_main!(cli_benches);
