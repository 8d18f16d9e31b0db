// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry enumerations and timestamps as strings so that a bad
//! value is reported as `InvalidInput` naming the field, rather than as an
//! opaque body rejection.

use portlink_domain::{
    Berth, PortCall, PortCallDetails, PortCallStatus, UtcTimestamp, Vessel,
};
use portlink_persistence::Page;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_UPCOMING_LIMIT: u32 = 20;

/// Resolves list paging, clamping the size to 1..=100 and the number to at
/// least 1.
#[must_use]
pub fn resolve_page(page_number: Option<u32>, page_size: Option<u32>) -> Page {
    let number: u32 = page_number.unwrap_or(1).max(1);
    let size: u32 = page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    Page::new(number, size)
}

/// A page of results with the total count of matching rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
}

/// Query string for `GET /port-calls`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListPortCallsQuery {
    pub status: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

/// Query string for `GET /vessels`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListVesselsQuery {
    pub status: Option<String>,
    pub vessel_type: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

/// Query string for `GET /berths`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListBerthsQuery {
    pub status: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

/// Query string for `GET /port-calls/upcoming`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<u32>,
}

/// Body of `POST /port-calls` and `PUT /port-calls/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortCallRequest {
    pub vessel_id: i64,
    pub berth_id: i64,
    /// RFC 3339, any offset.
    pub estimated_arrival: String,
    /// RFC 3339, any offset.
    pub estimated_departure: String,
    pub actual_arrival: Option<String>,
    pub actual_departure: Option<String>,
    /// Defaults to `scheduled`.
    pub status: Option<String>,
    pub cargo_description: Option<String>,
    pub cargo_quantity: Option<f64>,
    pub cargo_unit: Option<String>,
    pub notes: Option<String>,
    pub delay_reason: Option<String>,
    pub priority: Option<u8>,
}

/// Body of `POST /port-calls/validate`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidatePortCallRequest {
    #[serde(flatten)]
    pub port_call: PortCallRequest,
    /// The booking being edited, ignored by the overlap check.
    pub exclude_port_call_id: Option<i64>,
}

/// A port call as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortCallResponse {
    pub port_call_id: i64,
    pub vessel_id: i64,
    pub vessel_name: String,
    pub berth_id: i64,
    pub berth_code: String,
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
    pub priority: Option<u8>,
}

impl PortCallResponse {
    /// Builds the response from a stored port call.
    ///
    /// Returns `None` if the port call has not been stored yet.
    #[must_use]
    pub fn from_details(details: PortCallDetails) -> Option<Self> {
        let PortCallDetails {
            port_call,
            vessel_name,
            berth_code,
        } = details;
        let PortCall {
            port_call_id,
            vessel_id,
            berth_id,
            estimated_arrival,
            estimated_departure,
            actual_arrival,
            actual_departure,
            status,
            cargo_description,
            cargo_quantity,
            cargo_unit,
            notes,
            delay_reason,
            priority,
        } = port_call;

        Some(Self {
            port_call_id: port_call_id?,
            vessel_id,
            vessel_name,
            berth_id,
            berth_code,
            estimated_arrival,
            estimated_departure,
            actual_arrival,
            actual_departure,
            status,
            cargo_description,
            cargo_quantity,
            cargo_unit,
            notes,
            delay_reason,
            priority,
        })
    }
}

/// Body of `POST /vessels` and `PUT /vessels/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VesselRequest {
    pub imo_number: String,
    pub name: String,
    pub vessel_type: String,
    pub flag_country: String,
    pub length_overall: f64,
    pub beam: f64,
    pub draft: f64,
    pub cargo_type: Option<String>,
    pub capacity: Option<i64>,
    pub status: String,
    pub owner_company: Option<String>,
    pub agent_email: Option<String>,
}

/// Body of `POST /berths` and `PUT /berths/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BerthRequest {
    pub berth_code: String,
    pub terminal_name: String,
    pub max_vessel_length: f64,
    pub max_draft: f64,
    pub facilities: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

/// Vessels and berths are returned in their domain shape.
pub type VesselResponse = Vessel;
pub type BerthResponse = Berth;
