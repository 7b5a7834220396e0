//! Benchmarks pour le parsing des journaux GPS

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use gpslog::{ParseOptions, TrackSummary};

/// Journal synthétique: un échantillon toutes les 200 ms
fn synthetic_log(rows: usize) -> String {
    let mut log = String::from("timestamp;lat;lon;alt;fix;sats\n");
    for i in 0..rows {
        let i = i as i64;
        log.push_str(&format!(
            "{};{};{};{};3;12\n",
            i * 200_000,
            474_000_000 + i * 37,
            85_000_000 - i * 21,
            500_000 + (i % 1000) * 15
        ));
    }
    log
}

fn bench_parse(c: &mut Criterion) {
    let options = ParseOptions::default();

    let mut group = c.benchmark_group("parse_bytes");
    for rows in [1_000, 100_000] {
        let log = synthetic_log(rows);
        group.throughput(Throughput::Bytes(log.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &log, |b, log| {
            b.iter(|| {
                let result = gpslog::parse_bytes(black_box(log.as_bytes()), &options).unwrap();
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let log = synthetic_log(100_000);
    let result = gpslog::parse_bytes(log.as_bytes(), &ParseOptions::default()).unwrap();

    c.bench_function("track_summary", |b| {
        b.iter(|| black_box(TrackSummary::from_points(black_box(&result.points))))
    });
}

criterion_group!(benches, bench_parse, bench_summary);
criterion_main!(benches);
