// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Port call mutations go through the `BookingService` so that every write
//! is validated under the berth lock. Vessel and berth maintenance writes
//! directly through persistence and publishes its own events.

use num_traits::ToPrimitive;
use portlink::{BerthGuard, BookingService, EventNotifier, PortEvent, ValidationOutcome};
use portlink_domain::{
    Berth, BerthStatus, DomainError, PortCall, PortCallDetails, PortCallStatus, UtcTimestamp,
    Vessel, VesselStatus, VesselType, validate_berth_fields, validate_vessel_fields,
};
use portlink_persistence::{Page, SqliteStore};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
    translate_store_error,
};
use crate::request_response::{
    BerthRequest, DEFAULT_UPCOMING_LIMIT, ListBerthsQuery, ListPortCallsQuery, ListVesselsQuery,
    MAX_PAGE_SIZE, PagedResponse, PortCallRequest, PortCallResponse, UpcomingQuery,
    ValidatePortCallRequest, VesselRequest, resolve_page,
};

/// The booking service as wired by the server.
pub type PortlinkService<N> = BookingService<SqliteStore, N>;

fn parse_timestamp(field: &str, value: &str) -> Result<UtcTimestamp, ApiError> {
    UtcTimestamp::parse_rfc3339(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn parse_optional_timestamp(
    field: &str,
    value: Option<&str>,
) -> Result<Option<UtcTimestamp>, ApiError> {
    value.map(|v| parse_timestamp(field, v)).transpose()
}

fn parse_enum<T: FromStr<Err = DomainError>>(field: &str, value: &str) -> Result<T, ApiError> {
    T::from_str(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn parse_optional_enum<T: FromStr<Err = DomainError>>(
    field: &str,
    value: Option<&str>,
) -> Result<Option<T>, ApiError> {
    value.map(|v| parse_enum(field, v)).transpose()
}

fn total_count(count: i64) -> u64 {
    count.to_u64().unwrap_or_default()
}

fn paged<T>(items: Vec<T>, count: i64, page: Page) -> PagedResponse<T> {
    PagedResponse {
        items,
        total_count: total_count(count),
        page_number: page.number,
        page_size: page.size,
    }
}

fn details_to_responses(details: Vec<PortCallDetails>) -> Vec<PortCallResponse> {
    details
        .into_iter()
        .filter_map(PortCallResponse::from_details)
        .collect()
}

/// Converts a port call request into a domain port call.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming the first malformed timestamp or
/// status.
pub fn port_call_from_request(request: &PortCallRequest) -> Result<PortCall, ApiError> {
    let estimated_arrival: UtcTimestamp =
        parse_timestamp("estimated_arrival", &request.estimated_arrival)?;
    let estimated_departure: UtcTimestamp =
        parse_timestamp("estimated_departure", &request.estimated_departure)?;
    let status: PortCallStatus =
        parse_optional_enum("status", request.status.as_deref())?.unwrap_or(PortCallStatus::Scheduled);

    let mut port_call: PortCall = PortCall::new(
        request.vessel_id,
        request.berth_id,
        estimated_arrival,
        estimated_departure,
        status,
    );
    port_call.actual_arrival =
        parse_optional_timestamp("actual_arrival", request.actual_arrival.as_deref())?;
    port_call.actual_departure =
        parse_optional_timestamp("actual_departure", request.actual_departure.as_deref())?;
    port_call.cargo_description.clone_from(&request.cargo_description);
    port_call.cargo_quantity = request.cargo_quantity;
    port_call.cargo_unit.clone_from(&request.cargo_unit);
    port_call.notes.clone_from(&request.notes);
    port_call.delay_reason.clone_from(&request.delay_reason);
    port_call.priority = request.priority;
    Ok(port_call)
}

/// Converts and validates a vessel request.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown enumeration value or a
/// field outside its limits.
pub fn vessel_from_request(request: &VesselRequest) -> Result<Vessel, ApiError> {
    let vessel_type: VesselType = parse_enum("vessel_type", &request.vessel_type)?;
    let status: VesselStatus = parse_enum("status", &request.status)?;

    let mut vessel: Vessel = Vessel::new(
        request.imo_number.trim(),
        request.name.trim(),
        vessel_type,
        request.flag_country.trim(),
        request.length_overall,
        request.beam,
        request.draft,
        status,
    );
    vessel.cargo_type.clone_from(&request.cargo_type);
    vessel.capacity = request.capacity;
    vessel.owner_company.clone_from(&request.owner_company);
    vessel.agent_email.clone_from(&request.agent_email);

    validate_vessel_fields(&vessel).map_err(translate_domain_error)?;
    Ok(vessel)
}

/// Converts and validates a berth request.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown status or a field
/// outside its limits.
pub fn berth_from_request(request: &BerthRequest) -> Result<Berth, ApiError> {
    let status: BerthStatus = parse_enum("status", &request.status)?;

    let mut berth: Berth = Berth::new(
        request.berth_code.trim(),
        request.terminal_name.trim(),
        request.max_vessel_length,
        request.max_draft,
        status,
    );
    berth.facilities.clone_from(&request.facilities);
    berth.notes.clone_from(&request.notes);

    validate_berth_fields(&berth).map_err(translate_domain_error)?;
    Ok(berth)
}

// ============================================================================
// Port calls
// ============================================================================

async fn load_port_call(store: &SqliteStore, port_call_id: i64) -> Result<PortCallResponse, ApiError> {
    let details: Option<PortCallDetails> = store
        .lock()
        .await
        .get_port_call_details(port_call_id)
        .map_err(translate_persistence_error)?;

    details
        .and_then(PortCallResponse::from_details)
        .ok_or_else(|| ApiError::not_found("PortCall", port_call_id))
}

fn stored_id(id: Option<i64>) -> Result<i64, ApiError> {
    id.ok_or_else(ApiError::internal)
}

/// Lists port calls, earliest arrival first.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown status filter, or
/// `ApiError::Internal` if the store fails.
pub async fn list_port_calls(
    store: &SqliteStore,
    query: &ListPortCallsQuery,
) -> Result<PagedResponse<PortCallResponse>, ApiError> {
    let status: Option<PortCallStatus> = parse_optional_enum("status", query.status.as_deref())?;
    let page: Page = resolve_page(query.page_number, query.page_size);

    let mut persistence = store.lock().await;
    let details: Vec<PortCallDetails> = persistence
        .list_port_calls(status, page)
        .map_err(translate_persistence_error)?;
    let count: i64 = persistence
        .count_port_calls(status)
        .map_err(translate_persistence_error)?;
    drop(persistence);

    Ok(paged(details_to_responses(details), count, page))
}

/// Retrieves one port call with its vessel name and berth code.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the port call does not exist.
pub async fn get_port_call(
    store: &SqliteStore,
    port_call_id: i64,
) -> Result<PortCallResponse, ApiError> {
    load_port_call(store, port_call_id).await
}

/// Lists queued or approaching port calls arriving from `now` on.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the store fails.
pub async fn list_upcoming_port_calls(
    store: &SqliteStore,
    now: UtcTimestamp,
    query: &UpcomingQuery,
) -> Result<Vec<PortCallResponse>, ApiError> {
    let limit: u32 = query
        .limit
        .unwrap_or(DEFAULT_UPCOMING_LIMIT)
        .clamp(1, MAX_PAGE_SIZE);

    let details: Vec<PortCallDetails> = store
        .lock()
        .await
        .list_upcoming_port_calls(now, limit)
        .map_err(translate_persistence_error)?;

    Ok(details_to_responses(details))
}

/// Lists port calls currently alongside a berth.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the store fails.
pub async fn list_active_port_calls(store: &SqliteStore) -> Result<Vec<PortCallResponse>, ApiError> {
    let details: Vec<PortCallDetails> = store
        .lock()
        .await
        .list_active_port_calls()
        .map_err(translate_persistence_error)?;

    Ok(details_to_responses(details))
}

/// Creates a port call after the booking checks pass.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a malformed request, or the
/// translated rejection of the first broken booking rule.
pub async fn create_port_call<N: EventNotifier>(
    service: &PortlinkService<N>,
    request: &PortCallRequest,
) -> Result<PortCallResponse, ApiError> {
    let port_call: PortCall = port_call_from_request(request)?;
    let created: PortCall = service
        .create(port_call)
        .await
        .map_err(translate_core_error)?;

    load_port_call(service.store(), stored_id(created.port_call_id)?).await
}

/// Replaces a port call.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the port call does not exist, or
/// the translated rejection of the first broken rule.
pub async fn update_port_call<N: EventNotifier>(
    service: &PortlinkService<N>,
    port_call_id: i64,
    request: &PortCallRequest,
) -> Result<PortCallResponse, ApiError> {
    let changes: PortCall = port_call_from_request(request)?;
    service
        .update(port_call_id, changes)
        .await
        .map_err(translate_core_error)?;

    load_port_call(service.store(), port_call_id).await
}

/// Approves a queued port call.
///
/// # Errors
///
/// Returns the translated rejection if the approval would double-book the
/// berth or otherwise breaks a booking rule.
pub async fn approve_port_call<N: EventNotifier>(
    service: &PortlinkService<N>,
    port_call_id: i64,
) -> Result<PortCallResponse, ApiError> {
    service
        .approve(port_call_id)
        .await
        .map_err(translate_core_error)?;

    load_port_call(service.store(), port_call_id).await
}

/// Deletes a port call.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the port call does not exist.
pub async fn delete_port_call<N: EventNotifier>(
    service: &PortlinkService<N>,
    port_call_id: i64,
) -> Result<(), ApiError> {
    service
        .delete(port_call_id)
        .await
        .map_err(translate_core_error)
}

/// Runs the booking checks for a proposal without writing anything.
///
/// A rejection is a successful dry run and is returned as
/// `ValidationOutcome::Rejected`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a malformed request, or
/// `ApiError::Internal` if the store fails.
pub async fn validate_port_call<N: EventNotifier>(
    service: &PortlinkService<N>,
    request: &ValidatePortCallRequest,
) -> Result<ValidationOutcome, ApiError> {
    let port_call: PortCall = port_call_from_request(&request.port_call)?;
    let outcome: ValidationOutcome = service
        .check(&port_call, request.exclude_port_call_id)
        .await
        .map_err(translate_store_error)?;

    debug!(
        vessel_id = port_call.vessel_id,
        berth_id = port_call.berth_id,
        approved = outcome.is_approved(),
        "Dry-run booking validation"
    );
    Ok(outcome)
}

// ============================================================================
// Vessels
// ============================================================================

/// Lists vessels ordered by name.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown filter value.
pub async fn list_vessels(
    store: &SqliteStore,
    query: &ListVesselsQuery,
) -> Result<PagedResponse<Vessel>, ApiError> {
    let status: Option<VesselStatus> = parse_optional_enum("status", query.status.as_deref())?;
    let vessel_type: Option<VesselType> =
        parse_optional_enum("vessel_type", query.vessel_type.as_deref())?;
    let page: Page = resolve_page(query.page_number, query.page_size);

    let mut persistence = store.lock().await;
    let vessels: Vec<Vessel> = persistence
        .list_vessels(status, vessel_type, page)
        .map_err(translate_persistence_error)?;
    let count: i64 = persistence
        .count_vessels(status, vessel_type)
        .map_err(translate_persistence_error)?;
    drop(persistence);

    Ok(paged(vessels, count, page))
}

/// Retrieves a vessel.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the vessel does not exist.
pub async fn get_vessel(store: &SqliteStore, vessel_id: i64) -> Result<Vessel, ApiError> {
    store
        .lock()
        .await
        .get_vessel(vessel_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Vessel", vessel_id))
}

/// Lists a vessel's port calls, most recent first.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the vessel does not exist.
pub async fn list_vessel_port_calls(
    store: &SqliteStore,
    vessel_id: i64,
) -> Result<Vec<PortCallResponse>, ApiError> {
    let mut persistence = store.lock().await;
    if persistence
        .get_vessel(vessel_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(ApiError::not_found("Vessel", vessel_id));
    }
    let details: Vec<PortCallDetails> = persistence
        .list_port_calls_by_vessel(vessel_id)
        .map_err(translate_persistence_error)?;
    drop(persistence);

    Ok(details_to_responses(details))
}

/// Registers a vessel.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for invalid fields or
/// `ApiError::Conflict` if the IMO number is already registered.
pub async fn create_vessel<N: EventNotifier>(
    service: &PortlinkService<N>,
    request: &VesselRequest,
) -> Result<Vessel, ApiError> {
    let vessel: Vessel = vessel_from_request(request)?;
    let created: Vessel = service
        .store()
        .lock()
        .await
        .create_vessel(&vessel)
        .map_err(translate_persistence_error)?;

    info!(vessel_id = ?created.vessel_id, imo_number = %created.imo_number, "Vessel registered");
    service.notifier().publish(PortEvent::VesselChanged {
        vessel: created.clone(),
    });
    Ok(created)
}

/// Replaces a vessel's details.
///
/// Existing bookings are not re-validated against new dimensions.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the vessel does not exist.
pub async fn update_vessel<N: EventNotifier>(
    service: &PortlinkService<N>,
    vessel_id: i64,
    request: &VesselRequest,
) -> Result<Vessel, ApiError> {
    let vessel: Vessel = vessel_from_request(request)?;
    let updated: Vessel = service
        .store()
        .lock()
        .await
        .update_vessel(vessel_id, &vessel)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Vessel", vessel_id))?;

    info!(vessel_id, status = %updated.status, "Vessel updated");
    service.notifier().publish(PortEvent::VesselChanged {
        vessel: updated.clone(),
    });
    Ok(updated)
}

/// Deletes a vessel and its port calls.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the vessel does not exist.
pub async fn delete_vessel<N: EventNotifier>(
    service: &PortlinkService<N>,
    vessel_id: i64,
) -> Result<(), ApiError> {
    let deleted: bool = service
        .store()
        .lock()
        .await
        .delete_vessel(vessel_id)
        .map_err(translate_persistence_error)?;

    if !deleted {
        return Err(ApiError::not_found("Vessel", vessel_id));
    }

    info!(vessel_id, "Vessel deleted");
    service
        .notifier()
        .publish(PortEvent::VesselDeleted { vessel_id });
    Ok(())
}

// ============================================================================
// Berths
// ============================================================================

/// Lists berths ordered by code.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown status filter.
pub async fn list_berths(
    store: &SqliteStore,
    query: &ListBerthsQuery,
) -> Result<PagedResponse<Berth>, ApiError> {
    let status: Option<BerthStatus> = parse_optional_enum("status", query.status.as_deref())?;
    let page: Page = resolve_page(query.page_number, query.page_size);

    let mut persistence = store.lock().await;
    let berths: Vec<Berth> = persistence
        .list_berths(status, page)
        .map_err(translate_persistence_error)?;
    let count: i64 = persistence
        .count_berths(status)
        .map_err(translate_persistence_error)?;
    drop(persistence);

    Ok(paged(berths, count, page))
}

/// Lists berths that are currently `Available`.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the store fails.
pub async fn list_available_berths(store: &SqliteStore) -> Result<Vec<Berth>, ApiError> {
    store
        .lock()
        .await
        .list_available_berths()
        .map_err(translate_persistence_error)
}

/// Retrieves a berth.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the berth does not exist.
pub async fn get_berth(store: &SqliteStore, berth_id: i64) -> Result<Berth, ApiError> {
    store
        .lock()
        .await
        .get_berth(berth_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Berth", berth_id))
}

/// Registers a berth.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for invalid fields or
/// `ApiError::Conflict` if the berth code is taken.
pub async fn create_berth<N: EventNotifier>(
    service: &PortlinkService<N>,
    request: &BerthRequest,
) -> Result<Berth, ApiError> {
    let berth: Berth = berth_from_request(request)?;
    let created: Berth = service
        .store()
        .lock()
        .await
        .create_berth(&berth)
        .map_err(translate_persistence_error)?;

    info!(berth_id = ?created.berth_id, berth_code = %created.berth_code, "Berth registered");
    service.notifier().publish(PortEvent::BerthChanged {
        berth: created.clone(),
    });
    Ok(created)
}

/// Replaces a berth's details, including its status.
///
/// The berth's booking lock is held so the change cannot interleave with a
/// booking being validated against the old values.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the berth does not exist.
pub async fn update_berth<N: EventNotifier>(
    service: &PortlinkService<N>,
    berth_id: i64,
    request: &BerthRequest,
) -> Result<Berth, ApiError> {
    let berth: Berth = berth_from_request(request)?;

    let guard: BerthGuard = service.lock_berths(&[berth_id]).await;
    let result: Result<Option<Berth>, ApiError> = service
        .store()
        .lock()
        .await
        .update_berth(berth_id, &berth)
        .map_err(translate_persistence_error);
    drop(guard);

    let updated: Berth = result?.ok_or_else(|| ApiError::not_found("Berth", berth_id))?;
    info!(berth_id, status = %updated.status, "Berth updated");
    service.notifier().publish(PortEvent::BerthChanged {
        berth: updated.clone(),
    });
    Ok(updated)
}

/// Deletes a berth that no port call references.
///
/// # Errors
///
/// Returns `ApiError::Conflict` while port calls reference the berth, or
/// `ApiError::ResourceNotFound` if it does not exist.
pub async fn delete_berth<N: EventNotifier>(
    service: &PortlinkService<N>,
    berth_id: i64,
) -> Result<(), ApiError> {
    let guard: BerthGuard = service.lock_berths(&[berth_id]).await;
    let result: Result<bool, ApiError> = service
        .store()
        .lock()
        .await
        .delete_berth(berth_id)
        .map_err(translate_persistence_error);
    drop(guard);

    if !result? {
        return Err(ApiError::not_found("Berth", berth_id));
    }

    info!(berth_id, "Berth deleted");
    service.notifier().publish(PortEvent::BerthDeleted { berth_id });
    Ok(())
}
