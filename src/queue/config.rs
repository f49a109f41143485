/*!
 * Open Configuration
 * Open/create parameters and process-wide creation defaults
 */

use crate::types::{MqError, MqResult};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Process-wide creation defaults, initialized once on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueDefaults {
    pub maxmsgs: i64,
    pub msgsize: i64,
}

static DEFAULTS: OnceLock<QueueDefaults> = OnceLock::new();

/// Read-only creation defaults shared by every handle in the process.
pub fn defaults() -> &'static QueueDefaults {
    DEFAULTS.get_or_init(|| QueueDefaults {
        maxmsgs: 10,
        msgsize: 8192,
    })
}

/// Permission bits for queue creation, as raw bits or an octal string.
///
/// Both forms are part of the configuration surface; callers coming from
/// shell-style tooling tend to carry modes as strings like `"0644"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModeSpec {
    Bits(u32),
    Octal(String),
}

impl ModeSpec {
    /// Resolve to raw permission bits.
    pub fn bits(&self) -> MqResult<u32> {
        match self {
            ModeSpec::Bits(bits) => Ok(*bits),
            ModeSpec::Octal(s) => u32::from_str_radix(s, 8).map_err(|_| {
                MqError::invalid_argument(format!("mode '{}' is not an octal string", s))
            }),
        }
    }
}

impl From<u32> for ModeSpec {
    fn from(bits: u32) -> Self {
        ModeSpec::Bits(bits)
    }
}

impl From<&str> for ModeSpec {
    fn from(s: &str) -> Self {
        ModeSpec::Octal(s.to_owned())
    }
}

/// Creation parameters. Only meaningful when a queue is being created;
/// attaching to an existing queue adopts the kernel's actual limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConfig {
    pub mode: ModeSpec,
    /// Fail if the name already exists.
    pub exclusive: bool,
    pub maxmsgs: i64,
    pub msgsize: i64,
}

impl CreateConfig {
    pub fn new(mode: impl Into<ModeSpec>) -> Self {
        let defaults = defaults();
        Self {
            mode: mode.into(),
            exclusive: false,
            maxmsgs: defaults.maxmsgs,
            msgsize: defaults.msgsize,
        }
    }

    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    pub fn maxmsgs(mut self, maxmsgs: i64) -> Self {
        self.maxmsgs = maxmsgs;
        self
    }

    pub fn msgsize(mut self, msgsize: i64) -> Self {
        self.msgsize = msgsize;
        self
    }
}

/// Parameters for [`MessageQueue::open`](crate::MessageQueue::open).
///
/// `create` being `None` means attach-only: creation limits are not
/// accepted in that case, by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenConfig {
    /// Slash-prefixed queue name, e.g. `/events`.
    pub name: String,
    pub create: Option<CreateConfig>,
}

impl OpenConfig {
    /// Attach to an existing queue.
    pub fn attach(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            create: None,
        }
    }

    /// Create the queue if it does not exist, then attach.
    pub fn create(name: impl Into<String>, mode: impl Into<ModeSpec>) -> Self {
        Self {
            name: name.into(),
            create: Some(CreateConfig::new(mode)),
        }
    }
}
