/*!
 * Test Helpers
 * Unique queue names and a recording dispatcher registry
 */

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use pmq::EventRegistry;
use std::io;
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicU32, Ordering};

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Queue name unique to this process and call site, so a crashed earlier
/// run cannot collide with the current one.
pub fn unique_name(tag: &str) -> String {
    format!(
        "/pmq-test-{}-{}-{}",
        tag,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Registry that records every registration call.
#[derive(Debug, Default)]
pub struct RecordingRegistry {
    pub registered: Vec<RawFd>,
    pub deregistered: Vec<RawFd>,
}

impl EventRegistry for RecordingRegistry {
    fn register(&mut self, fd: RawFd) -> io::Result<()> {
        self.registered.push(fd);
        Ok(())
    }

    fn deregister(&mut self, fd: RawFd) -> io::Result<()> {
        self.deregistered.push(fd);
        Ok(())
    }
}
