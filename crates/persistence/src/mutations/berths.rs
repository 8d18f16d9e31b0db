// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Berth mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use portlink_domain::Berth;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::BerthRecord;
use crate::diesel_schema::berths;
use crate::error::PersistenceError;
use crate::queries::berths::{get_berth, is_berth_referenced};

/// Inserts a berth.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the berth code is taken,
/// or another error if the insert fails.
pub fn create_berth(conn: &mut SqliteConnection, berth: &Berth) -> Result<Berth, PersistenceError> {
    diesel::insert_into(berths::table)
        .values(BerthRecord::from(berth))
        .execute(conn)?;

    let berth_id: i64 = get_last_insert_rowid(conn)?;
    info!(berth_id, berth_code = %berth.berth_code, "Created berth");

    get_berth(conn, berth_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("berth {berth_id} after insert")))
}

/// Replaces every column of an existing berth.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_berth(
    conn: &mut SqliteConnection,
    berth_id: i64,
    berth: &Berth,
) -> Result<Option<Berth>, PersistenceError> {
    let updated: usize = diesel::update(berths::table.filter(berths::berth_id.eq(berth_id)))
        .set(BerthRecord::from(berth))
        .execute(conn)?;

    if updated == 0 {
        return Ok(None);
    }

    info!(berth_id, status = %berth.status, "Updated berth");
    get_berth(conn, berth_id)
}

/// Deletes a berth that no port call references.
///
/// # Errors
///
/// Returns `PersistenceError::BerthReferenced` if port calls still use the
/// berth, or another error if the delete fails.
pub fn delete_berth(conn: &mut SqliteConnection, berth_id: i64) -> Result<bool, PersistenceError> {
    if is_berth_referenced(conn, berth_id)? {
        return Err(PersistenceError::BerthReferenced { berth_id });
    }

    let deleted: usize =
        diesel::delete(berths::table.filter(berths::berth_id.eq(berth_id))).execute(conn)?;

    if deleted > 0 {
        info!(berth_id, "Deleted berth");
    }
    Ok(deleted > 0)
}
