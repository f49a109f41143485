/*!
 * pmq
 * Client library for kernel-provided named POSIX message queues
 *
 * Multiple independent processes open the same named queue and exchange
 * discrete, prioritized messages without a broker. A handle performs
 * non-blocking enqueue/dequeue and bridges the kernel's level-triggered
 * readiness into edge-triggered notifications for a single-threaded
 * external event dispatcher. Linux only: `mqd_t` is a pollable file
 * descriptor there.
 */

pub mod queue;
pub mod registry;
pub mod types;

mod sys;

// Re-exports
pub use queue::{
    defaults, CreateConfig, EdgeState, MessageQueue, ModeSpec, OpenConfig, QueueAttrs,
    QueueDefaults,
};
pub use registry::{EventRegistry, NoopRegistry};
pub use types::{Edge, MqError, MqResult, Priority, MAX_PRIORITY};
