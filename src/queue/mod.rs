/*!
 * Queue Module
 * Handle lifecycle, transfer operations, and readiness bridging
 */

pub mod config;
pub mod handle;
pub mod lifecycle;
pub mod operations;
pub mod readiness;
pub mod types;

// Re-export public API
pub use config::{defaults, CreateConfig, ModeSpec, OpenConfig, QueueDefaults};
pub use handle::MessageQueue;
pub use readiness::EdgeState;
pub use types::QueueAttrs;
