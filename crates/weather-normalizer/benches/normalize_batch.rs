use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weather_normalizer::{Normalizer, RawReading, Source, TemperatureUnit, WindSpeedUnit};

fn readings(count: usize) -> Vec<(usize, RawReading)> {
    let timestamp = Utc.with_ymd_and_hms(2025, 12, 1, 12, 15, 0).unwrap();
    (0..count)
        .map(|i| {
            let raw = RawReading::new(
                250.0 + (i % 80) as f64,
                TemperatureUnit::Kelvin,
                (i % 60) as f64,
                WindSpeedUnit::KilometersPerHour,
                (i % 120) as i64,
                1.3521,
                103.8198,
                timestamp,
            )
            .with_pressure(1007.0);
            (i, raw)
        })
        .collect()
}

fn bench_normalize_batch(c: &mut Criterion) {
    let normalizer = Normalizer::default();
    let mut group = c.benchmark_group("normalize_batch");

    for size in [100usize, 10_000] {
        let items = readings(size);
        group.bench_with_input(BenchmarkId::new("sequential", size), &items, |b, items| {
            b.iter(|| normalizer.normalize_batch(black_box(items.iter().map(|(i, r)| (*i, r))), &Source::CLIENT))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &items, |b, items| {
            b.iter(|| {
                let refs: Vec<(usize, &RawReading)> = items.iter().map(|(i, r)| (*i, r)).collect();
                normalizer.normalize_batch_parallel(black_box(refs), &Source::CLIENT)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize_batch);
criterion_main!(benches);
