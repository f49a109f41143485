/*!
 * Event Registry Interface
 * The seam between a queue handle and the host event dispatcher
 */

use std::io;
use std::os::unix::io::RawFd;

/// Host-implemented descriptor registry.
///
/// A handle registers its descriptor for combined read+write interest on
/// a successful open and deregisters it on close. The dispatcher is
/// expected to poll level-triggered readiness and feed each sample back
/// through [`MessageQueue::handle_tick`](crate::MessageQueue::handle_tick);
/// the handle turns those levels into edges. A descriptor is registered
/// at most once per open and never polled after close.
pub trait EventRegistry {
    /// Register a descriptor for read+write interest.
    fn register(&mut self, fd: RawFd) -> io::Result<()>;

    /// Remove a previously registered descriptor.
    fn deregister(&mut self, fd: RawFd) -> io::Result<()>;
}

/// Registry for hosts that drive the queue synchronously and never poll.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRegistry;

impl EventRegistry for NoopRegistry {
    fn register(&mut self, _fd: RawFd) -> io::Result<()> {
        Ok(())
    }

    fn deregister(&mut self, _fd: RawFd) -> io::Result<()> {
        Ok(())
    }
}
