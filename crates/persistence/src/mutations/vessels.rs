// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vessel mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use portlink_domain::Vessel;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::VesselRecord;
use crate::diesel_schema::vessels;
use crate::error::PersistenceError;
use crate::queries::vessels::get_vessel;

/// Inserts a vessel.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the IMO number is taken,
/// or another error if the insert fails.
pub fn create_vessel(conn: &mut SqliteConnection, vessel: &Vessel) -> Result<Vessel, PersistenceError> {
    diesel::insert_into(vessels::table)
        .values(VesselRecord::from(vessel))
        .execute(conn)?;

    let vessel_id: i64 = get_last_insert_rowid(conn)?;
    info!(vessel_id, imo_number = %vessel.imo_number, "Created vessel");

    get_vessel(conn, vessel_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("vessel {vessel_id} after insert")))
}

/// Replaces every column of an existing vessel.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_vessel(
    conn: &mut SqliteConnection,
    vessel_id: i64,
    vessel: &Vessel,
) -> Result<Option<Vessel>, PersistenceError> {
    let updated: usize = diesel::update(vessels::table.filter(vessels::vessel_id.eq(vessel_id)))
        .set(VesselRecord::from(vessel))
        .execute(conn)?;

    if updated == 0 {
        return Ok(None);
    }

    info!(vessel_id, "Updated vessel");
    get_vessel(conn, vessel_id)
}

/// Deletes a vessel and, by cascade, its port calls.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_vessel(conn: &mut SqliteConnection, vessel_id: i64) -> Result<bool, PersistenceError> {
    let deleted: usize =
        diesel::delete(vessels::table.filter(vessels::vessel_id.eq(vessel_id))).execute(conn)?;

    if deleted > 0 {
        info!(vessel_id, "Deleted vessel");
    }
    Ok(deleted > 0)
}
