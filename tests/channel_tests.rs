//! ToChannel: delivery count and close-once semantics.

use std::thread;

use lazyq::channel::{bounded, unbounded};
use lazyq::{Query, Value};

#[test]
fn test_empty_sequence_closes_immediately() {
    let (tx, rx) = unbounded::<Value>();
    assert_eq!(Query::empty().to_channel(tx), 0);
    assert!(rx.recv().is_err());
}

#[test]
fn test_sends_every_element_then_closes() {
    let (tx, rx) = unbounded();
    let sent = Query::range(0, 100).to_channel(tx);
    assert_eq!(sent, 100);
    let received: Vec<Value> = rx.iter().collect();
    assert_eq!(received.len(), 100);
    assert_eq!(received.last(), Some(&Value::I64(99)));
}

#[test]
fn test_rendezvous_channel_with_consumer_thread() {
    let (tx, rx) = bounded(0);
    let consumer = thread::spawn(move || rx.iter().filter_map(|v: Value| v.as_i64()).sum::<i64>());
    let sent = Query::range(1, 10).to_channel(tx);
    assert_eq!(sent, 10);
    assert_eq!(consumer.join().unwrap(), 55);
}

#[test]
fn test_stops_when_receiver_is_dropped() {
    let (tx, rx) = unbounded::<Value>();
    drop(rx);
    assert_eq!(Query::range(0, 5).to_channel(tx), 0);
}
