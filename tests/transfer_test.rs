/*!
 * Transfer Tests
 * Non-blocking send/receive, priority handling, and would-block sentinels
 */

mod common;

use common::{init_logs, unique_name};
use pmq::{CreateConfig, MessageQueue, MqError, NoopRegistry, OpenConfig};
use pretty_assertions::assert_eq;
use serial_test::serial;

const MSGSIZE: i64 = 64;

fn open_small(name: &str) -> MessageQueue {
    let config = OpenConfig {
        name: name.to_owned(),
        create: Some(CreateConfig::new(0o600).maxmsgs(4).msgsize(MSGSIZE)),
    };
    let mut queue = MessageQueue::new();
    queue.open(&mut NoopRegistry, &config, |_| {}).unwrap();
    queue
}

fn cleanup(mut queue: MessageQueue) {
    queue.close(&mut NoopRegistry).unwrap();
    queue.unlink().unwrap();
}

#[test]
#[serial]
fn send_recv_roundtrip() {
    init_logs();
    let name = unique_name("roundtrip");
    let mut queue = open_small(&name);

    assert!(queue.send(b"hello mq", 3).unwrap());

    let mut buf = [0u8; MSGSIZE as usize];
    let (bytes, priority) = queue.recv_prio(&mut buf).unwrap().unwrap();
    assert_eq!(bytes, 8);
    assert_eq!(priority, 3);
    assert_eq!(&buf[..bytes], b"hello mq");

    cleanup(queue);
}

#[test]
#[serial]
fn recv_on_empty_returns_none() {
    init_logs();
    let name = unique_name("empty");
    let mut queue = open_small(&name);

    let mut buf = [0u8; MSGSIZE as usize];
    assert_eq!(queue.recv(&mut buf).unwrap(), None);

    cleanup(queue);
}

#[test]
#[serial]
fn highest_priority_dequeues_first() {
    init_logs();
    let name = unique_name("priority");
    let mut queue = open_small(&name);

    assert!(queue.send(b"p1", 1).unwrap());
    assert!(queue.send(b"p5", 5).unwrap());
    assert!(queue.send(b"p3", 3).unwrap());

    let mut buf = [0u8; MSGSIZE as usize];
    let mut order = Vec::new();
    while let Some((bytes, priority)) = queue.recv_prio(&mut buf).unwrap() {
        order.push((buf[..bytes].to_vec(), priority));
    }
    assert_eq!(
        order,
        vec![
            (b"p5".to_vec(), 5),
            (b"p3".to_vec(), 3),
            (b"p1".to_vec(), 1),
        ]
    );

    cleanup(queue);
}

#[test]
#[serial]
fn fifo_within_equal_priority() {
    init_logs();
    let name = unique_name("fifo");
    let mut queue = open_small(&name);

    assert!(queue.send(b"first", 2).unwrap());
    assert!(queue.send(b"second", 2).unwrap());

    let mut buf = [0u8; MSGSIZE as usize];
    let bytes = queue.recv(&mut buf).unwrap().unwrap();
    assert_eq!(&buf[..bytes], b"first");
    let bytes = queue.recv(&mut buf).unwrap().unwrap();
    assert_eq!(&buf[..bytes], b"second");

    cleanup(queue);
}

#[test]
#[serial]
fn fill_to_capacity_then_would_block() {
    init_logs();
    let name = unique_name("capacity");
    let mut queue = open_small(&name);

    for expected_depth in 1..=4i64 {
        assert!(queue.send(b"fill", 0).unwrap());
        assert_eq!(queue.curmsgs(), expected_depth);
    }
    assert!(queue.is_full());

    // Full queue: would-block is a value, not an error, and the depth
    // is untouched.
    assert!(!queue.send(b"overflow", 0).unwrap());
    assert_eq!(queue.curmsgs(), 4);

    cleanup(queue);
}

#[test]
#[serial]
fn priority_out_of_range_is_usage_error() {
    init_logs();
    let name = unique_name("badprio");
    let mut queue = open_small(&name);

    let err = queue.send(b"msg", 32).unwrap_err();
    assert!(matches!(err, MqError::InvalidArgument(_)));
    // Raised before any syscall: nothing was enqueued.
    assert_eq!(queue.curmsgs(), 0);

    assert!(queue.send(b"msg", 31).unwrap());
    assert_eq!(queue.curmsgs(), 1);

    cleanup(queue);
}

#[test]
#[serial]
fn zero_length_message() {
    init_logs();
    let name = unique_name("zerolen");
    let mut queue = open_small(&name);

    assert!(queue.send(b"", 0).unwrap());
    let mut buf = [0u8; MSGSIZE as usize];
    assert_eq!(queue.recv(&mut buf).unwrap(), Some(0));

    cleanup(queue);
}
