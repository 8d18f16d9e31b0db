// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_window::BookingWindow;
use crate::status::{BerthStatus, PortCallStatus, VesselStatus, VesselType};
use crate::timestamp::UtcTimestamp;
use serde::{Deserialize, Serialize};

/// A registered vessel.
///
/// Identity is the IMO-style registration code; `vessel_id` is the
/// surrogate key and is `None` until the vessel has been persisted.
/// Dimensions are in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    pub vessel_id: Option<i64>,
    pub imo_number: String,
    pub name: String,
    pub vessel_type: VesselType,
    pub flag_country: String,
    pub length_overall: f64,
    pub beam: f64,
    pub draft: f64,
    pub cargo_type: Option<String>,
    pub capacity: Option<i64>,
    pub status: VesselStatus,
    pub owner_company: Option<String>,
    pub agent_email: Option<String>,
}

impl Vessel {
    /// Creates an unpersisted vessel with no optional details.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        imo_number: &str,
        name: &str,
        vessel_type: VesselType,
        flag_country: &str,
        length_overall: f64,
        beam: f64,
        draft: f64,
        status: VesselStatus,
    ) -> Self {
        Self {
            vessel_id: None,
            imo_number: imo_number.to_string(),
            name: name.to_string(),
            vessel_type,
            flag_country: flag_country.to_string(),
            length_overall,
            beam,
            draft,
            cargo_type: None,
            capacity: None,
            status,
            owner_company: None,
            agent_email: None,
        }
    }
}

/// A physical docking location.
///
/// `max_vessel_length` and `max_draft` are the admission ceilings for
/// physical fit, in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Berth {
    pub berth_id: Option<i64>,
    pub berth_code: String,
    pub terminal_name: String,
    pub max_vessel_length: f64,
    pub max_draft: f64,
    pub facilities: Option<String>,
    pub status: BerthStatus,
    pub notes: Option<String>,
}

impl Berth {
    /// Creates an unpersisted berth with no facilities or notes.
    #[must_use]
    pub fn new(
        berth_code: &str,
        terminal_name: &str,
        max_vessel_length: f64,
        max_draft: f64,
        status: BerthStatus,
    ) -> Self {
        Self {
            berth_id: None,
            berth_code: berth_code.to_string(),
            terminal_name: terminal_name.to_string(),
            max_vessel_length,
            max_draft,
            facilities: None,
            status,
            notes: None,
        }
    }
}

/// A booking of a berth by a vessel for an estimated time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortCall {
    pub port_call_id: Option<i64>,
    pub vessel_id: i64,
    pub berth_id: i64,
    pub estimated_arrival: UtcTimestamp,
    pub estimated_departure: UtcTimestamp,
    pub actual_arrival: Option<UtcTimestamp>,
    pub actual_departure: Option<UtcTimestamp>,
    pub status: PortCallStatus,
    pub cargo_description: Option<String>,
    pub cargo_quantity: Option<f64>,
    pub cargo_unit: Option<String>,
    pub notes: Option<String>,
    pub delay_reason: Option<String>,
    /// 1 (lowest) through 5 (highest).
    pub priority: Option<u8>,
}

impl PortCall {
    /// Creates an unpersisted port call with no cargo details.
    #[must_use]
    pub const fn new(
        vessel_id: i64,
        berth_id: i64,
        estimated_arrival: UtcTimestamp,
        estimated_departure: UtcTimestamp,
        status: PortCallStatus,
    ) -> Self {
        Self {
            port_call_id: None,
            vessel_id,
            berth_id,
            estimated_arrival,
            estimated_departure,
            actual_arrival: None,
            actual_departure: None,
            status,
            cargo_description: None,
            cargo_quantity: None,
            cargo_unit: None,
            notes: None,
            delay_reason: None,
            priority: None,
        }
    }

    /// The estimated berth occupancy of this port call.
    #[must_use]
    pub const fn window(&self) -> BookingWindow {
        BookingWindow::new(self.estimated_arrival, self.estimated_departure)
    }

    /// Returns true if `other` moves this booking to another berth, assigns
    /// it another vessel or changes its estimated window.
    ///
    /// Only such changes require the booking rules to run again.
    #[must_use]
    pub fn schedule_differs(&self, other: &Self) -> bool {
        self.berth_id != other.berth_id
            || self.vessel_id != other.vessel_id
            || self.estimated_arrival != other.estimated_arrival
            || self.estimated_departure != other.estimated_departure
    }
}

/// A port call joined with the display names of its vessel and berth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortCallDetails {
    pub port_call: PortCall,
    pub vessel_name: String,
    pub berth_code: String,
}
