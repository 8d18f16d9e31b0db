// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking admission checks.
//!
//! The validator is read-only: it loads snapshots from the store and
//! either approves a proposed booking or returns the first rule it
//! breaks. Checks run in a fixed order and stop at the first failure:
//!
//! 1. vessel exists
//! 2. berth exists
//! 3. berth is not under maintenance
//! 4. vessel length, then draft, fit the berth
//! 5. no blocking booking overlaps the window
//! 6. departure is after arrival
//!
//! The overlap check deliberately precedes the time-range check, so a
//! malformed window that overlaps a booking is reported as a conflict.

use crate::error::CoreError;
use crate::store::{EntityStore, StoreError};
use portlink_domain::{
    Berth, BookingWindow, ConflictScope, DomainError, EntityKind, PortCall, PortCallDetails,
    PortCallStatus, RejectionKind, UtcTimestamp, Vessel, ensure_berth_accepts_bookings,
    ensure_no_overlap, ensure_valid_time_range, ensure_vessel_fits_berth,
};
use serde::Serialize;
use tracing::debug;

/// The schedule-relevant part of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    pub vessel_id: i64,
    pub berth_id: i64,
    pub window: BookingWindow,
    pub status: PortCallStatus,
}

impl From<&PortCall> for BookingRequest {
    fn from(port_call: &PortCall) -> Self {
        Self {
            vessel_id: port_call.vessel_id,
            berth_id: port_call.berth_id,
            window: port_call.window(),
            status: port_call.status,
        }
    }
}

/// Runs the admission checks against an entity store.
pub struct BookingValidator<'a, S: EntityStore> {
    store: &'a S,
}

impl<'a, S: EntityStore> BookingValidator<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Validates a booking using the conflict scope implied by its status.
    ///
    /// # Arguments
    ///
    /// * `request` - The proposed vessel, berth, window and status
    /// * `exclude_id` - The booking being updated, if any
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Rejected` with the first broken rule, or
    /// `CoreError::Store` if a lookup fails.
    pub async fn validate(
        &self,
        request: &BookingRequest,
        exclude_id: Option<i64>,
    ) -> Result<(), CoreError> {
        self.validate_in_scope(request, ConflictScope::for_status(request.status), exclude_id)
            .await
    }

    /// Validates a booking against an explicit conflict scope.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Rejected` with the first broken rule, or
    /// `CoreError::Store` if a lookup fails.
    pub async fn validate_in_scope(
        &self,
        request: &BookingRequest,
        scope: ConflictScope,
        exclude_id: Option<i64>,
    ) -> Result<(), CoreError> {
        let vessel: Vessel = self
            .store
            .get_vessel(request.vessel_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: EntityKind::Vessel,
                id: request.vessel_id,
            })?;

        let berth: Berth = self
            .store
            .get_berth(request.berth_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: EntityKind::Berth,
                id: request.berth_id,
            })?;

        ensure_berth_accepts_bookings(&berth)?;
        ensure_vessel_fits_berth(&vessel, &berth)?;

        let existing: Vec<PortCallDetails> = self
            .store
            .list_bookings_by_berth(request.berth_id, scope.excluded_statuses())
            .await?;
        debug!(
            berth_id = request.berth_id,
            candidates = existing.len(),
            ?scope,
            "Checking berth for overlapping bookings"
        );
        ensure_no_overlap(&berth, &request.window, scope, exclude_id, &existing)?;

        ensure_valid_time_range(&request.window)?;

        Ok(())
    }
}

/// A structured booking rejection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub message: String,
    pub http_status_hint: u16,
    #[serde(skip)]
    pub reason: DomainError,
}

impl From<DomainError> for Rejection {
    fn from(reason: DomainError) -> Self {
        Self {
            kind: reason.kind(),
            message: reason.to_string(),
            http_status_hint: reason.http_status_hint(),
            reason,
        }
    }
}

/// Result of a dry-run validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Approved,
    Rejected(Rejection),
}

impl ValidationOutcome {
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// Validates a proposed booking without writing anything.
///
/// All timestamps are UTC by construction of `UtcTimestamp`.
///
/// # Arguments
///
/// * `store` - The entity store to read from
/// * `vessel_id` - The vessel requesting the berth
/// * `berth_id` - The requested berth
/// * `arrival` - Estimated arrival
/// * `departure` - Estimated departure
/// * `status` - Status the booking would have
/// * `exclude_booking_id` - The booking being updated, if any
///
/// # Returns
///
/// `Approved`, or `Rejected` with the kind, message and HTTP status hint
/// of the first broken rule.
///
/// # Errors
///
/// Returns `StoreError` only if the store itself fails.
pub async fn validate_booking<S: EntityStore>(
    store: &S,
    vessel_id: i64,
    berth_id: i64,
    arrival: UtcTimestamp,
    departure: UtcTimestamp,
    status: PortCallStatus,
    exclude_booking_id: Option<i64>,
) -> Result<ValidationOutcome, StoreError> {
    let request: BookingRequest = BookingRequest {
        vessel_id,
        berth_id,
        window: BookingWindow::new(arrival, departure),
        status,
    };

    match BookingValidator::new(store)
        .validate(&request, exclude_booking_id)
        .await
    {
        Ok(()) => Ok(ValidationOutcome::Approved),
        Err(CoreError::Rejected(reason)) => Ok(ValidationOutcome::Rejected(Rejection::from(reason))),
        Err(CoreError::Store(err)) => Err(err),
    }
}
