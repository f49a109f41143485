/*!
 * Transfer Operations
 * Non-blocking send and receive against the open queue
 */

use super::handle::MessageQueue;
use crate::sys;
use crate::types::{MqError, MqResult, Priority, MAX_PRIORITY};
use log::debug;
use nix::errno::Errno;

impl MessageQueue {
    /// Enqueue `msg` at the given priority.
    ///
    /// Returns `Ok(false)` when the queue is full (the would-block
    /// condition); pair it with the writable-edge notification to retry.
    /// A priority outside [0, 32) is a usage error raised before any
    /// syscall. On a closed handle the kernel reports `EBADF`, surfaced
    /// as an OS error.
    pub fn send(&mut self, msg: &[u8], priority: Priority) -> MqResult<bool> {
        if priority >= MAX_PRIORITY {
            return Err(MqError::invalid_argument(format!(
                "priority {} out of range [0, {})",
                priority, MAX_PRIORITY
            )));
        }

        let result = match sys::mq_send(self.mqd, msg, priority) {
            Ok(()) => {
                debug!("sent {} bytes at priority {}", msg.len(), priority);
                Ok(true)
            }
            Err(Errno::EAGAIN) => Ok(false),
            Err(errno) => return Err(MqError::os("mq_send", errno)),
        };

        // Occupancy may have changed, on the would-block path too.
        self.refresh_attrs();
        result
    }

    /// Dequeue the highest-priority message into `buf`.
    ///
    /// `buf` must be at least the queue's `msgsize` (the kernel rejects
    /// smaller buffers with `EMSGSIZE`). Returns `Ok(None)` when the
    /// queue is empty; pair it with the readable-edge notification.
    pub fn recv(&mut self, buf: &mut [u8]) -> MqResult<Option<usize>> {
        Ok(self.recv_prio(buf)?.map(|(bytes, _)| bytes))
    }

    /// Like [`recv`](Self::recv), also reporting the message's priority.
    pub fn recv_prio(&mut self, buf: &mut [u8]) -> MqResult<Option<(usize, Priority)>> {
        let result = match sys::mq_receive(self.mqd, buf) {
            Ok((bytes, priority)) => {
                debug!("received {} bytes at priority {}", bytes, priority);
                Ok(Some((bytes, priority)))
            }
            Err(Errno::EAGAIN) => Ok(None),
            Err(errno) => return Err(MqError::os("mq_receive", errno)),
        };

        self.refresh_attrs();
        result
    }
}
