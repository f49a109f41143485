/*!
 * Core Types
 * Error taxonomy, result alias, and readiness edge tags
 */

use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message priority. The facility dequeues higher priorities first,
/// oldest-first within equal priority.
pub type Priority = u32;

/// Exclusive upper bound on message priority.
pub const MAX_PRIORITY: Priority = 32;

/// Queue operation result
pub type MqResult<T> = Result<T, MqError>;

/// Unified queue error type
///
/// Usage errors (`InvalidArgument`, `AlreadyClosed`, `NothingToUnlink`)
/// are raised before any syscall is attempted. Would-block conditions are
/// never errors; `send` returns `false` and `recv` returns `None` for
/// them instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MqError {
    /// Bad argument shape, type, or range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Close called on a handle with no live descriptor
    #[error("Queue already closed")]
    AlreadyClosed,

    /// Unlink called on a handle that never opened a queue
    #[error("Nothing to unlink")]
    NothingToUnlink,

    /// OS-level failure, with the platform's descriptive text
    #[error("{op} failed: {errno}")]
    Os {
        op: &'static str,
        #[source]
        errno: Errno,
    },

    /// The external dispatcher refused the descriptor registration
    #[error("Dispatcher registration failed: {0}")]
    Registry(#[from] std::io::Error),
}

impl MqError {
    /// Create an invalid argument error
    #[inline]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an OS error for the named operation
    #[inline]
    pub fn os(op: &'static str, errno: Errno) -> Self {
        Self::Os { op, errno }
    }

    /// Errno carried by an OS-level error, if any
    pub fn errno(&self) -> Option<Errno> {
        match self {
            Self::Os { errno, .. } => Some(*errno),
            _ => None,
        }
    }
}

/// Readiness transition reported to the notification sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    /// The queue went from empty-looking to readable
    Readable,
    /// The queue went from full-looking to writable
    Writable,
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Edge::Readable => write!(f, "readable"),
            Edge::Writable => write!(f, "writable"),
        }
    }
}
