/*!
 * Queue Handle
 * Owns the descriptor, the queue name, and the cached attributes
 */

use super::readiness::EdgeState;
use super::types::QueueAttrs;
use crate::sys;
use crate::types::Edge;
use libc::mqd_t;
use log::warn;
use std::ffi::CString;
use std::os::unix::io::RawFd;

/// Handle to one named POSIX message queue.
///
/// Always opened read-write and non-blocking; would-block conditions
/// surface as values (`send` returning `false`, `recv` returning `None`),
/// never as waits. Exactly one thread may touch a given handle; the
/// kernel serializes access to the shared queue across processes.
pub struct MessageQueue {
    pub(super) mqd: mqd_t,
    /// Present once any open has succeeded; consumed by unlink.
    pub(super) name: Option<CString>,
    pub(super) attrs: QueueAttrs,
    pub(super) edges: EdgeState,
    /// Bound on the first successful open, held for the handle's lifetime.
    pub(super) sink: Option<Box<dyn FnMut(Edge)>>,
}

impl MessageQueue {
    /// Create a handle with no live descriptor and no name.
    pub fn new() -> Self {
        Self {
            mqd: sys::MQD_INVALID,
            name: None,
            attrs: QueueAttrs::default(),
            edges: EdgeState::default(),
            sink: None,
        }
    }

    /// Whether the handle currently owns a live descriptor.
    pub fn is_open(&self) -> bool {
        self.mqd != sys::MQD_INVALID
    }

    /// The queue name from the last successful open, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(|name| name.to_str().ok())
    }

    /// The raw pollable descriptor, while open.
    pub fn raw_fd(&self) -> Option<RawFd> {
        self.is_open().then_some(self.mqd as RawFd)
    }

    /// Refresh the cached attributes from the kernel.
    ///
    /// This is the single refresh-on-touch point: invoked after open,
    /// after every send/receive outcome, at the start of each dispatcher
    /// tick, and before every accessor read. A failed refresh (closed
    /// handle) leaves the previous snapshot in place.
    pub(super) fn refresh_attrs(&mut self) {
        if let Ok(attr) = sys::mq_getattr(self.mqd) {
            self.attrs = QueueAttrs::from(attr);
        }
    }

    /// Message size limit, fixed at creation time.
    ///
    /// Accessors refresh the cache first; on a closed handle the refresh
    /// silently fails and the stale cached value is returned.
    pub fn msgsize(&mut self) -> i64 {
        self.refresh_attrs();
        self.attrs.msgsize
    }

    /// Queue capacity in messages, fixed at creation time.
    pub fn maxmsgs(&mut self) -> i64 {
        self.refresh_attrs();
        self.attrs.maxmsgs
    }

    /// Current queue depth.
    pub fn curmsgs(&mut self) -> i64 {
        self.refresh_attrs();
        self.attrs.curmsgs
    }

    /// Whether the queue is at capacity.
    pub fn is_full(&mut self) -> bool {
        self.refresh_attrs();
        self.attrs.is_full()
    }

    /// The cached snapshot as-is, without a refresh.
    pub fn attrs(&self) -> &QueueAttrs {
        &self.attrs
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MessageQueue {
    /// Closes a still-open descriptor. Dispatcher deregistration needs
    /// the registry, so hosts that polled this handle must `close()` it
    /// before dropping.
    fn drop(&mut self) {
        if self.is_open() {
            if let Err(errno) = sys::mq_close(self.mqd) {
                warn!("leaking mq descriptor {}: close failed: {}", self.mqd, errno);
            }
            self.mqd = sys::MQD_INVALID;
        }
    }
}

impl std::fmt::Debug for MessageQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("MessageQueue")
            .field("mqd", &self.mqd)
            .field("name", &self.name)
            .field("attrs", &self.attrs)
            .field("edges", &self.edges)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
