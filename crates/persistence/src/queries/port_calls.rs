// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Port call queries.
//!
//! Listings join the vessel name and berth code so callers can render a
//! booking without further lookups. Timestamp filters compare the stored
//! fixed-width text, which orders the same way as the instants.

use diesel::SqliteConnection;
use diesel::prelude::*;
use portlink_domain::{PortCall, PortCallDetails, PortCallStatus, UtcTimestamp};
use tracing::debug;

use super::Page;
use crate::data_models::{
    PortCallDetailsRow, PortCallRow, details_from_row, format_timestamp,
};
use crate::diesel_schema::{berths, port_calls, vessels};
use crate::error::PersistenceError;

fn collect_details(rows: Vec<PortCallDetailsRow>) -> Result<Vec<PortCallDetails>, PersistenceError> {
    rows.into_iter().map(details_from_row).collect()
}

/// Retrieves a port call by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
/// Returns `Ok(None)` if the port call does not exist.
pub fn get_port_call(
    conn: &mut SqliteConnection,
    port_call_id: i64,
) -> Result<Option<PortCall>, PersistenceError> {
    debug!(port_call_id, "Looking up port call");

    port_calls::table
        .filter(port_calls::port_call_id.eq(port_call_id))
        .select(PortCallRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_port_call: {e}")))?
        .map(PortCall::try_from)
        .transpose()
}

/// Retrieves a port call with its vessel name and berth code.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
pub fn get_port_call_details(
    conn: &mut SqliteConnection,
    port_call_id: i64,
) -> Result<Option<PortCallDetails>, PersistenceError> {
    port_calls::table
        .inner_join(vessels::table)
        .inner_join(berths::table)
        .filter(port_calls::port_call_id.eq(port_call_id))
        .select((PortCallRow::as_select(), vessels::name, berths::berth_code))
        .first::<PortCallDetailsRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_port_call_details: {e}")))?
        .map(details_from_row)
        .transpose()
}

/// Lists port calls ordered by estimated arrival, optionally filtered by
/// status.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_port_calls(
    conn: &mut SqliteConnection,
    status: Option<PortCallStatus>,
    page: Page,
) -> Result<Vec<PortCallDetails>, PersistenceError> {
    let mut query = port_calls::table
        .inner_join(vessels::table)
        .inner_join(berths::table)
        .select((PortCallRow::as_select(), vessels::name, berths::berth_code))
        .into_boxed();

    if let Some(status) = status {
        query = query.filter(port_calls::status.eq(status.as_str()));
    }

    let rows: Vec<PortCallDetailsRow> = query
        .order((
            port_calls::estimated_arrival.asc(),
            port_calls::port_call_id.asc(),
        ))
        .offset(page.offset())
        .limit(page.limit())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_port_calls: {e}")))?;

    collect_details(rows)
}

/// Counts port calls matching the same filter as `list_port_calls`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_port_calls(
    conn: &mut SqliteConnection,
    status: Option<PortCallStatus>,
) -> Result<i64, PersistenceError> {
    let mut query = port_calls::table
        .select(diesel::dsl::count_star())
        .into_boxed();

    if let Some(status) = status {
        query = query.filter(port_calls::status.eq(status.as_str()));
    }

    query
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_port_calls: {e}")))
}

/// Lists a vessel's port calls, most recent arrival first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_port_calls_by_vessel(
    conn: &mut SqliteConnection,
    vessel_id: i64,
) -> Result<Vec<PortCallDetails>, PersistenceError> {
    let rows: Vec<PortCallDetailsRow> = port_calls::table
        .inner_join(vessels::table)
        .inner_join(berths::table)
        .filter(port_calls::vessel_id.eq(vessel_id))
        .select((PortCallRow::as_select(), vessels::name, berths::berth_code))
        .order(port_calls::estimated_arrival.desc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_port_calls_by_vessel: {e}")))?;

    collect_details(rows)
}

/// Lists the port calls at a berth, earliest arrival first, skipping the
/// given statuses.
///
/// This is the candidate set for the overlap check.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `berth_id` - The berth
/// * `exclude_statuses` - Statuses that cannot block a booking
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_port_calls_by_berth(
    conn: &mut SqliteConnection,
    berth_id: i64,
    exclude_statuses: &[PortCallStatus],
) -> Result<Vec<PortCallDetails>, PersistenceError> {
    let excluded: Vec<&'static str> = exclude_statuses
        .iter()
        .map(PortCallStatus::as_str)
        .collect();

    let rows: Vec<PortCallDetailsRow> = port_calls::table
        .inner_join(vessels::table)
        .inner_join(berths::table)
        .filter(port_calls::berth_id.eq(berth_id))
        .filter(port_calls::status.ne_all(excluded))
        .select((PortCallRow::as_select(), vessels::name, berths::berth_code))
        .order((
            port_calls::estimated_arrival.asc(),
            port_calls::port_call_id.asc(),
        ))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_port_calls_by_berth: {e}")))?;

    debug!(berth_id, count = rows.len(), "Loaded berth bookings");
    collect_details(rows)
}

/// Lists `Scheduled` or `Approaching` port calls arriving at or after
/// `from`, earliest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_upcoming_port_calls(
    conn: &mut SqliteConnection,
    from: UtcTimestamp,
    limit: u32,
) -> Result<Vec<PortCallDetails>, PersistenceError> {
    let from_text: String = format_timestamp(from)?;
    let statuses: [&str; 2] = [
        PortCallStatus::Scheduled.as_str(),
        PortCallStatus::Approaching.as_str(),
    ];

    let rows: Vec<PortCallDetailsRow> = port_calls::table
        .inner_join(vessels::table)
        .inner_join(berths::table)
        .filter(port_calls::estimated_arrival.ge(from_text))
        .filter(port_calls::status.eq_any(statuses))
        .select((PortCallRow::as_select(), vessels::name, berths::berth_code))
        .order(port_calls::estimated_arrival.asc())
        .limit(i64::from(limit))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_upcoming_port_calls: {e}")))?;

    collect_details(rows)
}

/// Lists port calls alongside a berth (`Berthed` or `InProgress`), earliest
/// departure first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_active_port_calls(
    conn: &mut SqliteConnection,
) -> Result<Vec<PortCallDetails>, PersistenceError> {
    let statuses: [&str; 2] = [
        PortCallStatus::Berthed.as_str(),
        PortCallStatus::InProgress.as_str(),
    ];

    let rows: Vec<PortCallDetailsRow> = port_calls::table
        .inner_join(vessels::table)
        .inner_join(berths::table)
        .filter(port_calls::status.eq_any(statuses))
        .select((PortCallRow::as_select(), vessels::name, berths::berth_code))
        .order(port_calls::estimated_departure.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_active_port_calls: {e}")))?;

    collect_details(rows)
}
