/*!
 * Queue Types
 * Cached attribute snapshot shared by the handle and the readiness bridge
 */

use serde::{Deserialize, Serialize};

/// Snapshot of the kernel's queue attributes.
///
/// `maxmsgs` and `msgsize` are fixed at creation time; `curmsgs` changes
/// on every successful send/receive by any process sharing the queue.
/// The snapshot is advisory between refreshes, never authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueAttrs {
    pub flags: i64,
    pub maxmsgs: i64,
    pub msgsize: i64,
    pub curmsgs: i64,
}

impl QueueAttrs {
    pub fn is_full(&self) -> bool {
        self.curmsgs == self.maxmsgs
    }
}

impl From<libc::mq_attr> for QueueAttrs {
    fn from(attr: libc::mq_attr) -> Self {
        Self {
            flags: attr.mq_flags as i64,
            maxmsgs: attr.mq_maxmsg as i64,
            msgsize: attr.mq_msgsize as i64,
            curmsgs: attr.mq_curmsgs as i64,
        }
    }
}
