use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use steptracker::{build_day_report, build_training_report, duration};

/// Performance benchmarks for record parsing and report rendering

fn create_training_records(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| {
            let activity = if i % 2 == 0 { "Бег" } else { "Ходьба" };
            format!("{},{},{}m", 1000 + i * 37, activity, 10 + i % 120)
        })
        .collect()
}

fn create_step_records(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| format!("{},{}h{}m", 2000 + i * 53, i % 5, i % 60))
        .collect()
}

fn bench_training_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("Training Report");

    for &size in &[1, 10, 100, 1000] {
        let records = create_training_records(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("build_training_report", size),
            &records,
            |b, records| {
                b.iter(|| {
                    for record in records {
                        let _ = build_training_report(black_box(record), 70.0, 1.75);
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_day_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("Day Report");

    for &size in &[1, 10, 100, 1000] {
        let records = create_step_records(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("build_day_report", size),
            &records,
            |b, records| {
                b.iter(|| {
                    for record in records {
                        black_box(build_day_report(black_box(record), 70.0, 1.75));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_duration_parsing(c: &mut Criterion) {
    let inputs = ["45m", "1h30m", "2.5h", "90s", "1h2m3s4ms"];

    c.bench_function("parse_duration", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = duration::parse_duration(black_box(input));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_training_reports,
    bench_day_reports,
    bench_duration_parsing
);
criterion_main!(benches);
