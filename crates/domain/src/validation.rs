// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_window::BookingWindow;
use crate::conflict::{ConflictScope, find_conflicting_booking};
use crate::error::{Dimension, DomainError};
use crate::status::BerthStatus;
use crate::types::{Berth, PortCall, PortCallDetails, Vessel};

pub const MAX_VESSEL_LENGTH_METERS: f64 = 500.0;
pub const MAX_VESSEL_BEAM_METERS: f64 = 100.0;
pub const MAX_DRAFT_METERS: f64 = 50.0;
pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;

/// Validates that a berth accepts new bookings.
///
/// # Errors
///
/// Returns `DomainError::BerthUnavailable` if the berth is under maintenance.
pub fn ensure_berth_accepts_bookings(berth: &Berth) -> Result<(), DomainError> {
    // Rule: a berth under maintenance rejects bookings regardless of fit or timing
    if berth.status == BerthStatus::UnderMaintenance {
        return Err(DomainError::BerthUnavailable {
            berth_code: berth.berth_code.clone(),
            reason: String::from("under maintenance"),
        });
    }
    Ok(())
}

/// Validates that a vessel physically fits a berth.
///
/// Length is checked before draft and only the first violation is
/// reported.
///
/// # Arguments
///
/// * `vessel` - The vessel requesting the berth
/// * `berth` - The requested berth
///
/// # Errors
///
/// Returns `DomainError::CapacityExceeded` naming the first dimension that
/// does not fit.
pub fn ensure_vessel_fits_berth(vessel: &Vessel, berth: &Berth) -> Result<(), DomainError> {
    if vessel.length_overall > berth.max_vessel_length {
        return Err(DomainError::CapacityExceeded {
            berth_code: berth.berth_code.clone(),
            dimension: Dimension::Length,
            vessel_value: vessel.length_overall,
            berth_max: berth.max_vessel_length,
        });
    }

    if vessel.draft > berth.max_draft {
        return Err(DomainError::CapacityExceeded {
            berth_code: berth.berth_code.clone(),
            dimension: Dimension::Draft,
            vessel_value: vessel.draft,
            berth_max: berth.max_draft,
        });
    }

    Ok(())
}

/// Validates that a proposed window does not collide with existing
/// bookings at the berth.
///
/// This function is pure; `existing` must contain the bookings of `berth`.
///
/// # Arguments
///
/// * `berth` - The berth being booked
/// * `proposed` - The requested occupancy window
/// * `scope` - Which existing statuses can block
/// * `exclude_id` - The booking being updated, if any
/// * `existing` - Bookings at the berth
///
/// # Errors
///
/// Returns `DomainError::OverlappingBooking` describing the first conflict.
pub fn ensure_no_overlap(
    berth: &Berth,
    proposed: &BookingWindow,
    scope: ConflictScope,
    exclude_id: Option<i64>,
    existing: &[PortCallDetails],
) -> Result<(), DomainError> {
    match find_conflicting_booking(proposed, scope, exclude_id, existing) {
        Some(conflict) => Err(DomainError::OverlappingBooking {
            berth_code: berth.berth_code.clone(),
            vessel_name: conflict.vessel_name.clone(),
            arrival: conflict.port_call.estimated_arrival,
            departure: conflict.port_call.estimated_departure,
        }),
        None => Ok(()),
    }
}

/// Validates that departure is strictly after arrival.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeRange` for zero or negative durations.
pub fn ensure_valid_time_range(window: &BookingWindow) -> Result<(), DomainError> {
    if !window.is_well_formed() {
        return Err(DomainError::InvalidTimeRange {
            arrival: window.arrival(),
            departure: window.departure(),
        });
    }
    Ok(())
}

/// Validates the field constraints of a vessel record.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` for the first field that is empty,
/// too long or out of range.
pub fn validate_vessel_fields(vessel: &Vessel) -> Result<(), DomainError> {
    require_text("imo_number", &vessel.imo_number, 20)?;
    require_text("name", &vessel.name, 100)?;
    require_text("flag_country", &vessel.flag_country, 100)?;
    check_dimension("length_overall", vessel.length_overall, MAX_VESSEL_LENGTH_METERS)?;
    check_dimension("beam", vessel.beam, MAX_VESSEL_BEAM_METERS)?;
    check_dimension("draft", vessel.draft, MAX_DRAFT_METERS)?;
    check_optional_text("cargo_type", vessel.cargo_type.as_deref(), 100)?;
    check_optional_text("owner_company", vessel.owner_company.as_deref(), 200)?;
    check_optional_text("agent_email", vessel.agent_email.as_deref(), 200)?;

    if let Some(capacity) = vessel.capacity
        && capacity < 0
    {
        return Err(invalid("capacity", "must not be negative"));
    }

    // Rule: agent email needs a local part and a domain
    if let Some(email) = vessel.agent_email.as_deref() {
        let well_formed: bool = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(invalid("agent_email", "must be an email address"));
        }
    }

    Ok(())
}

/// Validates the field constraints of a berth record.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` for the first invalid field.
pub fn validate_berth_fields(berth: &Berth) -> Result<(), DomainError> {
    require_text("berth_code", &berth.berth_code, 50)?;
    require_text("terminal_name", &berth.terminal_name, 200)?;
    check_dimension(
        "max_vessel_length",
        berth.max_vessel_length,
        MAX_VESSEL_LENGTH_METERS,
    )?;
    check_dimension("max_draft", berth.max_draft, MAX_DRAFT_METERS)?;
    check_optional_text("facilities", berth.facilities.as_deref(), 500)?;
    check_optional_text("notes", berth.notes.as_deref(), 1000)?;
    Ok(())
}

/// Validates the informational fields of a port call.
///
/// Schedule rules (fit, overlap, time ordering) are not checked here.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` for the first invalid field.
pub fn validate_port_call_fields(port_call: &PortCall) -> Result<(), DomainError> {
    check_optional_text(
        "cargo_description",
        port_call.cargo_description.as_deref(),
        100,
    )?;
    check_optional_text("cargo_unit", port_call.cargo_unit.as_deref(), 50)?;
    check_optional_text("notes", port_call.notes.as_deref(), 1000)?;
    check_optional_text("delay_reason", port_call.delay_reason.as_deref(), 200)?;

    if let Some(quantity) = port_call.cargo_quantity
        && (!quantity.is_finite() || quantity < 0.0)
    {
        return Err(invalid("cargo_quantity", "must be a non-negative number"));
    }

    if let Some(priority) = port_call.priority
        && !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority)
    {
        return Err(invalid(
            "priority",
            &format!("must be between {MIN_PRIORITY} and {MAX_PRIORITY}, got {priority}"),
        ));
    }

    Ok(())
}

fn invalid(field: &'static str, reason: &str) -> DomainError {
    DomainError::InvalidField {
        field,
        reason: reason.to_string(),
    }
}

fn require_text(field: &'static str, value: &str, max_chars: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "cannot be empty"));
    }
    check_optional_text(field, Some(value), max_chars)
}

fn check_optional_text(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<(), DomainError> {
    if let Some(text) = value
        && text.chars().count() > max_chars
    {
        return Err(invalid(
            field,
            &format!("must be at most {max_chars} characters"),
        ));
    }
    Ok(())
}

fn check_dimension(field: &'static str, value: f64, max: f64) -> Result<(), DomainError> {
    // Rule: dimensions are positive and finite meters below the physical ceiling
    if !value.is_finite() || value <= 0.0 || value > max {
        return Err(invalid(
            field,
            &format!("must be greater than 0 and at most {max:.0} meters"),
        ));
    }
    Ok(())
}
