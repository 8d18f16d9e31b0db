// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Enumerated states for vessels, berths and port calls.
//!
//! Each enum has a stable snake_case string form used for persistence
//! and the API.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle of a port call.
///
/// The nominal progression is `Scheduled → Approaching → Arrived →
/// Berthed → InProgress → Completed`, with `Cancelled` and `Delayed`
/// as side states. No transition graph is enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortCallStatus {
    /// Requested but not yet approved. Queued requests may overlap.
    Scheduled,
    /// Approved and inbound.
    Approaching,
    Arrived,
    Berthed,
    /// Cargo operations underway.
    InProgress,
    Completed,
    Cancelled,
    Delayed,
}

impl PortCallStatus {
    pub const ALL: [Self; 8] = [
        Self::Scheduled,
        Self::Approaching,
        Self::Arrived,
        Self::Berthed,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
        Self::Delayed,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Approaching => "approaching",
            Self::Arrived => "arrived",
            Self::Berthed => "berthed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Delayed => "delayed",
        }
    }

    /// Returns true if the port call no longer holds its berth.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns true if the port call is approved and holds its berth.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(
            self,
            Self::Approaching | Self::Arrived | Self::Berthed | Self::InProgress | Self::Delayed
        )
    }

    /// Returns true if the port call is a queued, unapproved request.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Scheduled)
    }

    /// Returns true if the berth is physically occupied (used by the
    /// active port call listing).
    #[must_use]
    pub const fn is_alongside(&self) -> bool {
        matches!(self, Self::Berthed | Self::InProgress)
    }
}

impl FromStr for PortCallStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus {
                kind: "port call status",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for PortCallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational state of a berth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BerthStatus {
    Available,
    Occupied,
    Reserved,
    /// Rejects every new booking regardless of fit or timing.
    UnderMaintenance,
    Closed,
}

impl BerthStatus {
    pub const ALL: [Self; 5] = [
        Self::Available,
        Self::Occupied,
        Self::Reserved,
        Self::UnderMaintenance,
        Self::Closed,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Reserved => "reserved",
            Self::UnderMaintenance => "under_maintenance",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for BerthStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus {
                kind: "berth status",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for BerthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational state of a vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselStatus {
    Approaching,
    Anchored,
    Docked,
    LoadingUnloading,
    Departed,
    UnderMaintenance,
}

impl VesselStatus {
    pub const ALL: [Self; 6] = [
        Self::Approaching,
        Self::Anchored,
        Self::Docked,
        Self::LoadingUnloading,
        Self::Departed,
        Self::UnderMaintenance,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approaching => "approaching",
            Self::Anchored => "anchored",
            Self::Docked => "docked",
            Self::LoadingUnloading => "loading_unloading",
            Self::Departed => "departed",
            Self::UnderMaintenance => "under_maintenance",
        }
    }
}

impl FromStr for VesselStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus {
                kind: "vessel status",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for VesselStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hull category of a vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselType {
    Container,
    Tanker,
    BulkCarrier,
    RoRo,
    Cruise,
    GeneralCargo,
    Reefer,
}

impl VesselType {
    pub const ALL: [Self; 7] = [
        Self::Container,
        Self::Tanker,
        Self::BulkCarrier,
        Self::RoRo,
        Self::Cruise,
        Self::GeneralCargo,
        Self::Reefer,
    ];

    /// Returns the string representation of the vessel type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Tanker => "tanker",
            Self::BulkCarrier => "bulk_carrier",
            Self::RoRo => "ro_ro",
            Self::Cruise => "cruise",
            Self::GeneralCargo => "general_cargo",
            Self::Reefer => "reefer",
        }
    }

    /// Human-readable label, e.g. `"Bulk Carrier"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::Tanker => "Tanker",
            Self::BulkCarrier => "Bulk Carrier",
            Self::RoRo => "RoRo",
            Self::Cruise => "Cruise",
            Self::GeneralCargo => "General Cargo",
            Self::Reefer => "Reefer",
        }
    }
}

impl FromStr for VesselType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|vessel_type| vessel_type.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus {
                kind: "vessel type",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for VesselType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
