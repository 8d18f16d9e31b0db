// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage boundary for the booking core.
//!
//! The core never owns persistence. It reads snapshots through
//! `EntityStore` and only writes after a booking has been approved.
//! Every operation is awaitable so a backend can suspend on I/O.

use portlink_domain::{Berth, PortCall, PortCallDetails, PortCallStatus, Vessel};
use std::future::Future;

/// Failures raised by an entity store.
///
/// These are faults, not booking rejections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backend could not complete the operation.
    #[error("store backend failure: {0}")]
    Backend(String),
    /// A uniqueness or referential constraint was violated.
    #[error("store constraint violated: {0}")]
    Conflict(String),
}

/// Read/write access to vessels, berths and port calls.
pub trait EntityStore: Send + Sync {
    /// Looks up a vessel by surrogate id.
    fn get_vessel(
        &self,
        vessel_id: i64,
    ) -> impl Future<Output = Result<Option<Vessel>, StoreError>> + Send;

    /// Looks up a vessel by IMO registration code.
    fn get_vessel_by_imo(
        &self,
        imo_number: &str,
    ) -> impl Future<Output = Result<Option<Vessel>, StoreError>> + Send;

    /// Inserts a vessel and returns it with its assigned id.
    fn create_vessel(
        &self,
        vessel: &Vessel,
    ) -> impl Future<Output = Result<Vessel, StoreError>> + Send;

    /// Looks up a berth by surrogate id.
    fn get_berth(
        &self,
        berth_id: i64,
    ) -> impl Future<Output = Result<Option<Berth>, StoreError>> + Send;

    /// Lists berths whose status is `Available`, ordered by berth code.
    fn list_available_berths(&self) -> impl Future<Output = Result<Vec<Berth>, StoreError>> + Send;

    /// Lists the bookings of a berth, skipping the given statuses,
    /// ordered by estimated arrival.
    fn list_bookings_by_berth(
        &self,
        berth_id: i64,
        exclude_statuses: &[PortCallStatus],
    ) -> impl Future<Output = Result<Vec<PortCallDetails>, StoreError>> + Send;

    /// Looks up a port call by surrogate id.
    fn get_booking(
        &self,
        port_call_id: i64,
    ) -> impl Future<Output = Result<Option<PortCall>, StoreError>> + Send;

    /// Inserts a port call and returns it with its assigned id.
    fn create_booking(
        &self,
        port_call: &PortCall,
    ) -> impl Future<Output = Result<PortCall, StoreError>> + Send;

    /// Replaces a port call. Returns `None` if it does not exist.
    fn update_booking(
        &self,
        port_call_id: i64,
        port_call: &PortCall,
    ) -> impl Future<Output = Result<Option<PortCall>, StoreError>> + Send;

    /// Deletes a port call. Returns false if it did not exist.
    fn delete_booking(
        &self,
        port_call_id: i64,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}
