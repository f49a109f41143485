/*!
 * Queue Lifecycle Operations
 * Open, close, and unlink
 */

use super::config::OpenConfig;
use super::handle::MessageQueue;
use super::readiness::EdgeState;
use super::types::QueueAttrs;
use crate::registry::EventRegistry;
use crate::sys;
use crate::types::{Edge, MqError, MqResult};
use libc::{mqd_t, O_CREAT, O_EXCL, O_NONBLOCK, O_RDWR};
use log::{debug, info, warn};
use std::ffi::CString;
use std::os::unix::io::RawFd;

impl MessageQueue {
    /// Open the named queue, creating it first when the config says so.
    ///
    /// The queue is always requested read-write and non-blocking. Any
    /// previously open descriptor is deregistered, closed, and
    /// invalidated before the new open is attempted, so a failed call
    /// leaves the handle without a live queue. On success the attributes
    /// are fetched and cached, the name is stored for a later unlink,
    /// the edge state is seeded from the current occupancy, and the
    /// descriptor is registered with `registry` for read+write interest.
    ///
    /// `sink` is bound only by the first successful open on this handle;
    /// re-opens keep the original sink and drop the argument.
    pub fn open<R>(
        &mut self,
        registry: &mut R,
        config: &OpenConfig,
        sink: impl FnMut(Edge) + 'static,
    ) -> MqResult<()>
    where
        R: EventRegistry + ?Sized,
    {
        let name = Self::validate_name(&config.name)?;
        let mut oflag = O_RDWR | O_NONBLOCK;

        // Resolve creation parameters before touching the old descriptor.
        let create = match &config.create {
            Some(create) => {
                oflag |= O_CREAT;
                if create.exclusive {
                    oflag |= O_EXCL;
                }
                let mode = create.mode.bits()? as libc::mode_t;
                Some((mode, sys::creation_attr(create.maxmsgs, create.msgsize)))
            }
            None => None,
        };

        self.release_descriptor(registry);

        let mqd = match create {
            Some((mode, mut attr)) => sys::mq_open(&name, oflag, mode, Some(&mut attr)),
            None => sys::mq_open(&name, oflag, 0, None),
        }
        .map_err(|errno| MqError::os("mq_open", errno))?;

        // Second syscall: adopt the kernel's actual limits (creation
        // limits are ignored when attaching to an existing queue).
        let attrs = match sys::mq_getattr(mqd) {
            Ok(attr) => QueueAttrs::from(attr),
            Err(errno) => {
                let _ = sys::mq_close(mqd);
                return Err(MqError::os("mq_getattr", errno));
            }
        };

        if let Err(e) = registry.register(mqd as RawFd) {
            let _ = sys::mq_close(mqd);
            return Err(MqError::Registry(e));
        }

        self.mqd = mqd;
        self.attrs = attrs;
        self.name = Some(name);
        self.edges = EdgeState::seeded(&attrs);
        if self.sink.is_none() {
            self.sink = Some(Box::new(sink));
        }

        info!(
            "opened queue {} (mqd {}, maxmsgs {}, msgsize {}, curmsgs {})",
            config.name, self.mqd, attrs.maxmsgs, attrs.msgsize, attrs.curmsgs
        );
        Ok(())
    }

    /// Close the descriptor and deregister it from the dispatcher.
    ///
    /// The name is kept so the queue can still be unlinked. The
    /// descriptor is invalidated even if the underlying close reports an
    /// error; every error path leaves the handle well-defined.
    pub fn close<R>(&mut self, registry: &mut R) -> MqResult<()>
    where
        R: EventRegistry + ?Sized,
    {
        if !self.is_open() {
            return Err(MqError::AlreadyClosed);
        }

        if let Err(e) = registry.deregister(self.mqd as RawFd) {
            warn!("deregistering mqd {} failed: {}", self.mqd, e);
        }

        let result = sys::mq_close(self.mqd);
        debug!("closed queue mqd {}", self.mqd);
        self.mqd = sys::MQD_INVALID;
        result.map_err(|errno| MqError::os("mq_close", errno))
    }

    /// Remove the queue's name from the namespace.
    ///
    /// Requires a name from an earlier successful open; the descriptor
    /// need not still be open. The stored name is consumed on success,
    /// so a second unlink fails as a usage error.
    pub fn unlink(&mut self) -> MqResult<()> {
        let name = self.name.as_ref().ok_or(MqError::NothingToUnlink)?;
        sys::mq_unlink(name).map_err(|errno| MqError::os("mq_unlink", errno))?;
        info!("unlinked queue {:?}", name);
        self.name = None;
        Ok(())
    }

    fn validate_name(name: &str) -> MqResult<CString> {
        if name.is_empty() {
            return Err(MqError::invalid_argument("queue name must be non-empty"));
        }
        CString::new(name)
            .map_err(|_| MqError::invalid_argument("queue name must not contain NUL bytes"))
    }

    /// Drop the current descriptor, if any, before a re-open. Failures
    /// are logged and ignored; the descriptor is gone either way.
    fn release_descriptor<R>(&mut self, registry: &mut R)
    where
        R: EventRegistry + ?Sized,
    {
        if !self.is_open() {
            return;
        }
        if let Err(e) = registry.deregister(self.mqd as RawFd) {
            warn!("deregistering mqd {} failed: {}", self.mqd, e);
        }
        if let Err(errno) = sys::mq_close(self.mqd) {
            warn!("closing mqd {} failed: {}", self.mqd, errno);
        }
        let old: mqd_t = self.mqd;
        self.mqd = sys::MQD_INVALID;
        debug!("released mqd {} ahead of re-open", old);
    }
}
