// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vessel queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use portlink_domain::{Vessel, VesselStatus, VesselType};
use tracing::debug;

use super::Page;
use crate::data_models::VesselRow;
use crate::diesel_schema::vessels;
use crate::error::PersistenceError;

/// Retrieves a vessel by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
/// Returns `Ok(None)` if the vessel does not exist.
pub fn get_vessel(
    conn: &mut SqliteConnection,
    vessel_id: i64,
) -> Result<Option<Vessel>, PersistenceError> {
    debug!(vessel_id, "Looking up vessel");

    vessels::table
        .filter(vessels::vessel_id.eq(vessel_id))
        .select(VesselRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_vessel: {e}")))?
        .map(Vessel::try_from)
        .transpose()
}

/// Retrieves a vessel by IMO number.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
pub fn get_vessel_by_imo(
    conn: &mut SqliteConnection,
    imo_number: &str,
) -> Result<Option<Vessel>, PersistenceError> {
    vessels::table
        .filter(vessels::imo_number.eq(imo_number))
        .select(VesselRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_vessel_by_imo: {e}")))?
        .map(Vessel::try_from)
        .transpose()
}

/// Lists vessels ordered by name, optionally filtered.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_vessels(
    conn: &mut SqliteConnection,
    status: Option<VesselStatus>,
    vessel_type: Option<VesselType>,
    page: Page,
) -> Result<Vec<Vessel>, PersistenceError> {
    let mut query = vessels::table.select(VesselRow::as_select()).into_boxed();

    if let Some(status) = status {
        query = query.filter(vessels::status.eq(status.as_str()));
    }
    if let Some(vessel_type) = vessel_type {
        query = query.filter(vessels::vessel_type.eq(vessel_type.as_str()));
    }

    let rows: Vec<VesselRow> = query
        .order((vessels::name.asc(), vessels::vessel_id.asc()))
        .offset(page.offset())
        .limit(page.limit())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_vessels: {e}")))?;

    rows.into_iter().map(Vessel::try_from).collect()
}

/// Counts vessels matching the same filters as `list_vessels`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_vessels(
    conn: &mut SqliteConnection,
    status: Option<VesselStatus>,
    vessel_type: Option<VesselType>,
) -> Result<i64, PersistenceError> {
    let mut query = vessels::table
        .select(diesel::dsl::count_star())
        .into_boxed();

    if let Some(status) = status {
        query = query.filter(vessels::status.eq(status.as_str()));
    }
    if let Some(vessel_type) = vessel_type {
        query = query.filter(vessels::vessel_type.eq(vessel_type.as_str()));
    }

    query
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_vessels: {e}")))
}

/// Returns true if no vessel has been stored yet.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn is_vessel_table_empty(conn: &mut SqliteConnection) -> Result<bool, PersistenceError> {
    let count: i64 = count_vessels(conn, None, None)?;
    Ok(count == 0)
}
