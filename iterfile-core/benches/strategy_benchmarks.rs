//! Benchmarks comparing the four line-production strategies

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use iterfile_core::{chan_read_lines, for_each_line, generate, iterate, ReaderConfig};
use std::convert::Infallible;
use std::fs;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const WORDS: [&str; 5] = ["fizz", "buzz", "foo", "bar", "baz"];

/// Write a fixture of `lines` lines with 20-100 words each
fn generate_fixture(dir: &Path, name: &str, lines: usize) -> PathBuf {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = |bound: u64| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state % bound
    };

    let mut content = String::new();
    for _ in 0..lines {
        let words = 20 + next(81);
        for i in 0..words {
            if i > 0 {
                content.push(' ');
            }
            content.push_str(WORDS[next(WORDS.len() as u64) as usize]);
        }
        content.push('\n');
    }

    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn count_channel(path: &Path) -> usize {
    chan_read_lines(path)
        .unwrap()
        .map(|line| line.unwrap().len())
        .sum()
}

fn count_callback(path: &Path) -> usize {
    let mut chars = 0;
    for_each_line(path, |line| {
        chars += line.len();
        Ok::<_, Infallible>(())
    })
    .unwrap();
    chars
}

fn count_generator(path: &Path) -> usize {
    let mut chars = 0;
    let (mut next, mut more) = generate(path).unwrap();
    while more {
        let (line, has_more) = next().unwrap();
        chars += line.len();
        more = has_more;
    }
    chars
}

fn count_iterator(path: &Path) -> usize {
    let mut chars = 0;
    let mut it = iterate(path).unwrap();
    while it.advance() {
        chars += it.line().len();
    }
    chars
}

fn benchmark_strategies(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let fixtures = [
        ("small", generate_fixture(temp_dir.path(), "small.txt", 100)),
        ("medium", generate_fixture(temp_dir.path(), "medium.txt", 1_000)),
        ("large", generate_fixture(temp_dir.path(), "large.txt", 10_000)),
    ];

    let strategies: [(&str, fn(&Path) -> usize); 4] = [
        ("channel", count_channel),
        ("callback", count_callback),
        ("generator", count_generator),
        ("iterator", count_iterator),
    ];

    let mut group = c.benchmark_group("readlines");
    for (label, path) in &fixtures {
        let size = fs::metadata(path).unwrap().len();
        group.throughput(Throughput::Bytes(size));
        if *label == "large" {
            group.sample_size(10); // Reduce sample size for larger fixtures
        }

        for (name, count) in strategies {
            group.bench_with_input(BenchmarkId::new(name, label), path, |b, path| {
                b.iter(|| count(black_box(path)));
            });
        }
    }
    group.finish();
}

fn benchmark_handoff_capacity(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let path = generate_fixture(temp_dir.path(), "medium.txt", 1_000);

    let mut group = c.benchmark_group("channel_handoff_capacity");
    for capacity in [0usize, 1, 16, 256] {
        let config = ReaderConfig::buffered(capacity);
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &config, |b, config| {
            b.iter(|| {
                let chars: usize = iterfile_core::chan_read_lines_with(&path, config)
                    .unwrap()
                    .map(|line| line.unwrap().len())
                    .sum();
                black_box(chars)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_strategies, benchmark_handoff_capacity);
criterion_main!(benches);
