/*!
 * Syscall Shims
 * Thin safe wrappers over the mq_* family
 *
 * `nix::mqueue` wraps the descriptor in an opaque `MqdT`, but the
 * readiness bridge needs the raw descriptor to hand to a poll-based
 * dispatcher (on Linux `mqd_t` is an ordinary file descriptor), so the
 * calls go through `libc` directly. Errors come back as `nix::errno::Errno`.
 */

use libc::{c_char, c_int, c_uint, mqd_t};
use nix::errno::Errno;
use std::ffi::CStr;
use std::mem;

/// Sentinel for a handle with no live descriptor.
pub(crate) const MQD_INVALID: mqd_t = -1;

/// Build an `mq_attr` carrying creation limits. Only `mq_maxmsg` and
/// `mq_msgsize` are honored by `mq_open`.
pub(crate) fn creation_attr(maxmsgs: i64, msgsize: i64) -> libc::mq_attr {
    // mq_attr has private padding in libc, so start from zeroes.
    let mut attr: libc::mq_attr = unsafe { mem::zeroed() };
    attr.mq_maxmsg = maxmsgs as _;
    attr.mq_msgsize = msgsize as _;
    attr
}

pub(crate) fn mq_open(
    name: &CStr,
    oflag: c_int,
    mode: libc::mode_t,
    attr: Option<&mut libc::mq_attr>,
) -> Result<mqd_t, Errno> {
    let mqd = unsafe {
        match attr {
            Some(attr) => libc::mq_open(
                name.as_ptr(),
                oflag,
                mode as c_uint,
                attr as *mut libc::mq_attr,
            ),
            None => libc::mq_open(name.as_ptr(), oflag),
        }
    };
    if mqd == MQD_INVALID {
        Err(Errno::last())
    } else {
        Ok(mqd)
    }
}

pub(crate) fn mq_getattr(mqd: mqd_t) -> Result<libc::mq_attr, Errno> {
    let mut attr: libc::mq_attr = unsafe { mem::zeroed() };
    let res = unsafe { libc::mq_getattr(mqd, &mut attr) };
    if res == -1 {
        Err(Errno::last())
    } else {
        Ok(attr)
    }
}

pub(crate) fn mq_send(mqd: mqd_t, msg: &[u8], priority: u32) -> Result<(), Errno> {
    let res =
        unsafe { libc::mq_send(mqd, msg.as_ptr() as *const c_char, msg.len(), priority) };
    if res == -1 {
        Err(Errno::last())
    } else {
        Ok(())
    }
}

pub(crate) fn mq_receive(mqd: mqd_t, buf: &mut [u8]) -> Result<(usize, u32), Errno> {
    let mut priority: c_uint = 0;
    let n = unsafe {
        libc::mq_receive(mqd, buf.as_mut_ptr() as *mut c_char, buf.len(), &mut priority)
    };
    if n < 0 {
        Err(Errno::last())
    } else {
        Ok((n as usize, priority))
    }
}

pub(crate) fn mq_close(mqd: mqd_t) -> Result<(), Errno> {
    let res = unsafe { libc::mq_close(mqd) };
    if res == -1 {
        Err(Errno::last())
    } else {
        Ok(())
    }
}

pub(crate) fn mq_unlink(name: &CStr) -> Result<(), Errno> {
    let res = unsafe { libc::mq_unlink(name.as_ptr()) };
    if res == -1 {
        Err(Errno::last())
    } else {
        Ok(())
    }
}
