//! Benchmarks for the Attune rollup engine
//!
//! Run with: cargo bench

use attune::engine::{compute_daily_rollup, compute_rolling_stats};
use attune::events::types::{
    CravingEvent, EventSet, FoodEvent, MovementEvent, SleepEvent, StressEvent, WaterEvent,
};
use attune::insights::InsightGenerator;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// A day's worth of events, `density` entries per type
fn day_events(date: NaiveDate, density: usize) -> EventSet {
    let noon = Utc
        .from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());

    let mut set = EventSet::new();
    for i in 0..density {
        let ts = noon + Duration::minutes(i as i64 * 7);
        set.food.push(
            FoodEvent::new("bench", "grain bowl with veggies")
                .at(ts)
                .calories(350.0, 550.0),
        );
        set.water.push(WaterEvent::new("bench", 8.0).at(ts));
        set.cravings
            .push(CravingEvent::new("bench", "sweet").at(ts).intensity(3));
        set.movement.push(
            MovementEvent::new("bench", "walking")
                .at(ts)
                .duration(20.0)
                .burn(56.0, 84.0),
        );
        set.sleep.push(SleepEvent::new("bench", 4).at(ts).hours(7.0));
        set.stress.push(StressEvent::new("bench", 2).at(ts));
    }
    set
}

fn bench_daily_rollup(c: &mut Criterion) {
    let mut group = c.benchmark_group("daily_rollup");

    for density in [1, 10, 100] {
        let events = day_events(base_date(), density);
        group.throughput(Throughput::Elements(events.len() as u64));

        group.bench_function(format!("events_{}", density * 6), |b| {
            b.iter(|| compute_daily_rollup(black_box("bench"), base_date(), black_box(&events)))
        });
    }

    group.finish();
}

fn bench_rolling_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_stats");

    for days in [7u32, 30, 90] {
        let rollups: Vec<_> = (0..days)
            .map(|i| {
                let date = base_date() + Duration::days(i as i64);
                compute_daily_rollup("bench", date, &day_events(date, 5))
            })
            .collect();

        group.throughput(Throughput::Elements(days as u64));

        group.bench_function(format!("window_{}", days), |b| {
            b.iter(|| compute_rolling_stats(black_box(&rollups), days))
        });
    }

    group.finish();
}

fn bench_insight_generation(c: &mut Criterion) {
    let rollups: Vec<_> = (0..30)
        .map(|i| {
            let date = base_date() + Duration::days(i);
            compute_daily_rollup("bench", date, &day_events(date, 5))
        })
        .collect();
    let stats = compute_rolling_stats(&rollups, 30);
    let generator = InsightGenerator::default();

    c.bench_function("insight_generation", |b| {
        b.iter(|| generator.generate(black_box(&stats)))
    });
}

criterion_group!(
    benches,
    bench_daily_rollup,
    bench_rolling_stats,
    bench_insight_generation
);
criterion_main!(benches);
