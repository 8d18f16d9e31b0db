// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain events published after successful mutations.

use portlink_domain::{Berth, PortCall, UtcTimestamp, Vessel};
use serde::{Deserialize, Serialize};

/// A change that connected clients may want to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PortEvent {
    PortCallCreated {
        port_call: PortCall,
    },
    PortCallUpdated {
        port_call: PortCall,
    },
    PortCallDeleted {
        port_call_id: i64,
    },
    VesselChanged {
        vessel: Vessel,
    },
    VesselDeleted {
        vessel_id: i64,
    },
    BerthChanged {
        berth: Berth,
    },
    BerthDeleted {
        berth_id: i64,
    },
    /// Throughput report from the load simulator.
    SimulatorMetrics {
        operations_per_second: u32,
        timestamp: UtcTimestamp,
        last_operation: String,
    },
    /// Greeting sent to a newly connected subscriber.
    Connected {
        message: String,
    },
}

impl PortEvent {
    /// The broadcast topic this event belongs to.
    ///
    /// Creation and update share a topic; subscribers refresh the same view.
    #[must_use]
    pub const fn topic(&self) -> &'static str {
        match self {
            Self::PortCallCreated { .. } | Self::PortCallUpdated { .. } => "PortCallChanged",
            Self::PortCallDeleted { .. } => "PortCallDeleted",
            Self::VesselChanged { .. } => "VesselChanged",
            Self::VesselDeleted { .. } => "VesselDeleted",
            Self::BerthChanged { .. } => "BerthChanged",
            Self::BerthDeleted { .. } => "BerthDeleted",
            Self::SimulatorMetrics { .. } => "LoadSimulatorMetrics",
            Self::Connected { .. } => "Connected",
        }
    }
}

/// Fire-and-forget fan-out of domain events.
///
/// Implementations must not block and give no delivery guarantee.
pub trait EventNotifier: Send + Sync {
    fn publish(&self, event: PortEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl EventNotifier for NoopNotifier {
    fn publish(&self, _event: PortEvent) {}
}
