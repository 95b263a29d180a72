use std::sync::Arc;
use std::thread;
use std::time::Duration;

use alertarb::telemetry;
use alertarb::{ArbiterConfig, Category, EventName, EventSet, PolicyTable, TelemetryError};

#[test]
fn control_loop_publishes_snapshots_to_consumer_thread() {
    let config = ArbiterConfig::default();
    let table = Arc::new(PolicyTable::standard(&config).unwrap());
    let (publisher, receiver) = telemetry::channel_for(&config);

    let consumer_table = Arc::clone(&table);
    let consumer = thread::spawn(move || {
        let mut cycles = Vec::new();
        loop {
            match receiver.recv_timeout(Duration::from_secs(5)) {
                Ok(snapshot) => {
                    snapshot.verify_fingerprint(&consumer_table).unwrap();
                    assert!(snapshot.has_category(Category::Permanent));
                    cycles.push(snapshot.cycle);
                }
                Err(TelemetryError::Disconnected) => break,
                Err(err) => panic!("unexpected: {err}"),
            }
        }
        cycles
    });

    let mut events = EventSet::new(table);
    events.add(EventName::Startup, true);
    for _ in 0..20 {
        events.add(EventName::Overheat, false);
        publisher.publish(events.snapshot()).unwrap();
        events.reset();
    }
    let dropped = publisher.dropped();
    drop(publisher);

    let cycles = consumer.join().unwrap();
    assert_eq!(cycles.len() as u64 + dropped, 20);
    assert!(cycles.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn slow_consumer_never_blocks_publisher() {
    let (publisher, receiver) = telemetry::channel(4);
    let table = Arc::new(PolicyTable::standard(&ArbiterConfig::default()).unwrap());
    let mut events = EventSet::new(table);

    let mut accepted = 0;
    for _ in 0..100 {
        events.add(EventName::CanError, false);
        if publisher.publish(events.snapshot()).unwrap() {
            accepted += 1;
        }
        events.reset();
    }
    assert_eq!(accepted, 4);
    assert_eq!(publisher.dropped(), 96);
    assert_eq!(receiver.drain().len(), 4);
}
