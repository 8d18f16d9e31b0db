// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Portlink berth planner.
//!
//! Handlers accept string-typed requests, convert them to domain values,
//! route port call mutations through the `BookingService` and translate
//! every failure into an `ApiError`. No HTTP types appear here.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
    translate_store_error,
};
pub use handlers::{
    PortlinkService, approve_port_call, berth_from_request, create_berth, create_port_call,
    create_vessel, delete_berth, delete_port_call, delete_vessel, get_berth, get_port_call,
    get_vessel, list_active_port_calls, list_available_berths, list_berths, list_port_calls,
    list_upcoming_port_calls, list_vessel_port_calls, list_vessels, port_call_from_request,
    update_berth, update_port_call, update_vessel, validate_port_call, vessel_from_request,
};
pub use request_response::{
    BerthRequest, BerthResponse, DEFAULT_PAGE_SIZE, DEFAULT_UPCOMING_LIMIT, ListBerthsQuery,
    ListPortCallsQuery, ListVesselsQuery, MAX_PAGE_SIZE, PagedResponse, PortCallRequest,
    PortCallResponse, UpcomingQuery, ValidatePortCallRequest, VesselRequest, VesselResponse,
    resolve_page,
};
