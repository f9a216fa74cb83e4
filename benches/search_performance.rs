use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rltail::{LineIndex, LineSearcher, SearchOptions};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Log-like file where every `pattern_frequency`-th line mentions an error
fn create_log_file_with_patterns(size_kb: usize, pattern_frequency: usize) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let target_size = size_kb * 1024;
    let mut current_size = 0;
    let mut line_num = 0;

    let log_levels = ["DEBUG", "INFO", "WARN"];
    let services = ["auth", "database", "cache", "payment", "notification"];

    while current_size < target_size {
        let service = services[line_num % services.len()];
        let log_line = if line_num % pattern_frequency == 0 {
            format!(
                "[2024-09-02T10:{:02}:{:02}] ERROR {}: Request {} failed with timeout user_{}\n",
                (line_num / 60) % 60,
                line_num % 60,
                service,
                line_num,
                line_num % 1000
            )
        } else {
            format!(
                "[2024-09-02T10:{:02}:{:02}] {} {}: Request {} completed in {}ms\n",
                (line_num / 60) % 60,
                line_num % 60,
                log_levels[line_num % log_levels.len()],
                service,
                line_num,
                line_num % 250
            )
        };

        temp_file
            .write_all(log_line.as_bytes())
            .expect("Failed to write line");
        current_size += log_line.len();
        line_num += 1;
    }

    temp_file.flush().expect("Failed to flush");
    temp_file
}

fn bench_search_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_patterns");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(5));

    let file = create_log_file_with_patterns(4 * 1024, 100);
    let mut index = LineIndex::open(file.path()).expect("Failed to index");
    let searcher = LineSearcher::new(SearchOptions::default());

    for pattern in ["ERROR", r"user_\d{3}\b", "failed with (timeout|refused)"] {
        group.bench_with_input(
            BenchmarkId::new("first_match", pattern),
            &pattern,
            |b, pattern| {
                b.iter(|| black_box(searcher.search(&mut index, 1, pattern).expect("search")))
            },
        );
    }

    group.finish();
}

fn bench_full_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_scan");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(8));

    let file = create_log_file_with_patterns(4 * 1024, 100);
    let mut index = LineIndex::open(file.path()).expect("Failed to index");

    // No line matches, so every line is read and decoded
    group.bench_function("no_match", |b| {
        let searcher = LineSearcher::new(SearchOptions::default());
        b.iter(|| black_box(searcher.search(&mut index, 0, "NOT_PRESENT").expect("search")))
    });

    group.bench_function("no_match_case_insensitive", |b| {
        let searcher = LineSearcher::new(SearchOptions {
            case_insensitive: true,
        });
        b.iter(|| black_box(searcher.search(&mut index, 0, "not_present").expect("search")))
    });

    group.finish();
}

criterion_group!(benches, bench_search_patterns, bench_full_scan);
criterion_main!(benches);
