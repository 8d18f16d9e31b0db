// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Berth queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use portlink_domain::{Berth, BerthStatus};
use tracing::debug;

use super::Page;
use crate::data_models::BerthRow;
use crate::diesel_schema::{berths, port_calls};
use crate::error::PersistenceError;

/// Retrieves a berth by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
/// Returns `Ok(None)` if the berth does not exist.
pub fn get_berth(
    conn: &mut SqliteConnection,
    berth_id: i64,
) -> Result<Option<Berth>, PersistenceError> {
    debug!(berth_id, "Looking up berth");

    berths::table
        .filter(berths::berth_id.eq(berth_id))
        .select(BerthRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_berth: {e}")))?
        .map(Berth::try_from)
        .transpose()
}

/// Retrieves a berth by its code.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
pub fn get_berth_by_code(
    conn: &mut SqliteConnection,
    berth_code: &str,
) -> Result<Option<Berth>, PersistenceError> {
    berths::table
        .filter(berths::berth_code.eq(berth_code))
        .select(BerthRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_berth_by_code: {e}")))?
        .map(Berth::try_from)
        .transpose()
}

/// Lists berths ordered by code, optionally filtered by status.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_berths(
    conn: &mut SqliteConnection,
    status: Option<BerthStatus>,
    page: Page,
) -> Result<Vec<Berth>, PersistenceError> {
    let mut query = berths::table.select(BerthRow::as_select()).into_boxed();

    if let Some(status) = status {
        query = query.filter(berths::status.eq(status.as_str()));
    }

    let rows: Vec<BerthRow> = query
        .order(berths::berth_code.asc())
        .offset(page.offset())
        .limit(page.limit())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_berths: {e}")))?;

    rows.into_iter().map(Berth::try_from).collect()
}

/// Counts berths matching the same filter as `list_berths`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_berths(
    conn: &mut SqliteConnection,
    status: Option<BerthStatus>,
) -> Result<i64, PersistenceError> {
    let mut query = berths::table.select(diesel::dsl::count_star()).into_boxed();

    if let Some(status) = status {
        query = query.filter(berths::status.eq(status.as_str()));
    }

    query
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_berths: {e}")))
}

/// Lists every berth with status `Available`, ordered by code.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_available_berths(conn: &mut SqliteConnection) -> Result<Vec<Berth>, PersistenceError> {
    let rows: Vec<BerthRow> = berths::table
        .filter(berths::status.eq(BerthStatus::Available.as_str()))
        .select(BerthRow::as_select())
        .order(berths::berth_code.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_available_berths: {e}")))?;

    rows.into_iter().map(Berth::try_from).collect()
}

/// Returns true if any port call references the berth.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn is_berth_referenced(
    conn: &mut SqliteConnection,
    berth_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = port_calls::table
        .filter(port_calls::berth_id.eq(berth_id))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("is_berth_referenced: {e}")))?;
    Ok(count > 0)
}
