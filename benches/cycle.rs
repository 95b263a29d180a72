use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use alertarb::{
    resolve, select_highest, AlertContext, ArbiterConfig, CarParams, Category, EventName, EventSet,
    LiveState, PolicyTable,
};

const MONITORED: [EventName; 8] = [
    EventName::Overheat,
    EventName::PedalPressed,
    EventName::BelowEngageSpeed,
    EventName::CalibrationIncomplete,
    EventName::SteerSaturated,
    EventName::CanError,
    EventName::LowSpeedLockout,
    EventName::DoorOpen,
];

fn context() -> AlertContext {
    AlertContext::new(
        CarParams {
            car_name: "toyota".to_string(),
            min_enable_speed: 8.0,
            min_steer_speed: 0.0,
        },
        LiveState {
            calibration_percent: Some(40),
            ..LiveState::default()
        },
        true,
    )
}

fn bench_cycle(c: &mut Criterion) {
    let table = Arc::new(PolicyTable::standard(&ArbiterConfig::default()).unwrap());
    let ctx = context();

    let mut group = c.benchmark_group("cycle");
    group.throughput(Throughput::Elements(MONITORED.len() as u64));

    group.bench_function("add_resolve_reset", |b| {
        let mut events = EventSet::new(Arc::clone(&table));
        events.add(EventName::Startup, true);
        b.iter(|| {
            for &event in &MONITORED {
                events.add(event, false);
            }
            let alerts = resolve(
                &events,
                &[Category::NoEntry, Category::SoftDisable, Category::Permanent, Category::Warning],
                &ctx,
            )
            .unwrap();
            black_box(select_highest(&alerts));
            events.reset();
        });
    });

    group.bench_function("has_category", |b| {
        let mut events = EventSet::new(Arc::clone(&table));
        for &event in &MONITORED {
            events.add(event, false);
        }
        b.iter(|| {
            for category in Category::ALL {
                black_box(events.has_category(category));
            }
        });
    });

    group.bench_function("snapshot_json", |b| {
        let mut events = EventSet::new(Arc::clone(&table));
        for &event in &MONITORED {
            events.add(event, false);
        }
        b.iter(|| black_box(events.snapshot().to_json().unwrap()));
    });

    group.finish();
}

fn bench_table_build(c: &mut Criterion) {
    let config = ArbiterConfig::default();
    c.bench_function("policy_table_standard", |b| {
        b.iter(|| black_box(PolicyTable::standard(&config).unwrap()));
    });
}

criterion_group!(benches, bench_cycle, bench_table_build);
criterion_main!(benches);
