use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xcodebuild_runner::{extract_alerts, OutputLog};

/// A formatter transcript with an analyzer marker after every `group` files.
fn synthetic_transcript(line_count: usize, group: usize) -> Vec<String> {
    let mut raw = Vec::with_capacity(line_count + line_count / group);
    for i in 0..line_count {
        raw.push(format!(
            "\x1b[1;34m▸\x1b[0m Analyze Sources/Module{:03}/File{i:05}.m",
            i % 50
        ));
        if (i + 1) % group == 0 {
            raw.push(format!("({group} commands with analyzer issues)"));
        }
    }
    raw.push("Executed 120 tests, with 0 failures (0 unexpected) in 4.2 seconds".to_string());
    raw
}

fn bench_record(c: &mut Criterion) {
    let raw = synthetic_transcript(10_000, 25);
    c.bench_function("record_10k_colored_lines", |b| {
        b.iter(|| OutputLog::from_raw_lines(black_box(&raw)));
    });
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_alerts");
    for lines in [1_000usize, 10_000, 50_000] {
        let log = OutputLog::from_raw_lines(synthetic_transcript(lines, 10));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &log, |b, log| {
            b.iter(|| extract_alerts(black_box(log.lines())));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_record, bench_extract);
criterion_main!(benches);
