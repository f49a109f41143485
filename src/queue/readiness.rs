/*!
 * Readiness Bridge
 * Level-to-edge conversion for dispatcher ticks
 *
 * The polling mechanism is level-triggered: it reports the current
 * readable/writable state on every tick. Consumers want one notification
 * per transition ("the queue just became non-empty"), so two booleans per
 * handle act as a minimal edge detector with no extra buffering.
 */

use super::handle::MessageQueue;
use super::types::QueueAttrs;
use crate::types::Edge;
use log::debug;
use serde::{Deserialize, Serialize};

/// Last-known edge state. A flag being `false` means the queue was
/// observed not-ready on the most recent re-arm, not necessarily the
/// instantaneous kernel state between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeState {
    pub can_read: bool,
    pub can_write: bool,
}

impl EdgeState {
    /// Seed from occupancy at open time, so a pre-existing level does
    /// not fire a spurious "became ready" edge on the first tick.
    pub(super) fn seeded(attrs: &QueueAttrs) -> Self {
        Self {
            can_read: attrs.curmsgs > 0,
            can_write: attrs.curmsgs < attrs.maxmsgs,
        }
    }

    /// Apply one level sample. Returns which rising edges fired; a
    /// not-ready level re-arms the corresponding edge without firing.
    pub(super) fn apply(&mut self, readable: bool, writable: bool) -> (bool, bool) {
        let mut fired = (false, false);
        if readable && !self.can_read {
            self.can_read = true;
            fired.0 = true;
        } else if !readable {
            self.can_read = false;
        }
        if writable && !self.can_write {
            self.can_write = true;
            fired.1 = true;
        } else if !writable {
            self.can_write = false;
        }
        fired
    }
}

impl MessageQueue {
    /// Feed one dispatcher tick's level readiness through the bridge.
    ///
    /// Refreshes the attribute cache (any process may have changed the
    /// occupancy), then fires the notification sink at most once per
    /// rising edge. Sink failures are not caught here; a panicking sink
    /// unwinds to the dispatcher's fault boundary.
    pub fn handle_tick(&mut self, readable: bool, writable: bool) {
        // No edge evaluation after close; the sink must not fire again.
        if !self.is_open() {
            return;
        }
        self.refresh_attrs();

        let (read_edge, write_edge) = self.edges.apply(readable, writable);
        if read_edge {
            self.notify(Edge::Readable);
        }
        if write_edge {
            self.notify(Edge::Writable);
        }
    }

    /// Current edge state, mainly for diagnostics.
    pub fn edges(&self) -> EdgeState {
        self.edges
    }

    fn notify(&mut self, edge: Edge) {
        debug!("queue {:?} became {}", self.name, edge);
        if let Some(sink) = self.sink.as_mut() {
            sink(edge);
        }
    }
}
