// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Port call mutations.
//!
//! These functions write rows as given. Booking rules are enforced by the
//! caller before a write reaches this layer.

use diesel::SqliteConnection;
use diesel::prelude::*;
use portlink_domain::PortCall;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::PortCallRecord;
use crate::diesel_schema::port_calls;
use crate::error::PersistenceError;
use crate::queries::port_calls::get_port_call;

/// Inserts a port call.
///
/// # Errors
///
/// Returns an error if a timestamp cannot be formatted, a foreign key is
/// violated or the insert fails.
pub fn create_port_call(
    conn: &mut SqliteConnection,
    port_call: &PortCall,
) -> Result<PortCall, PersistenceError> {
    let record: PortCallRecord<'_> = PortCallRecord::try_from(port_call)?;
    diesel::insert_into(port_calls::table)
        .values(&record)
        .execute(conn)?;

    let port_call_id: i64 = get_last_insert_rowid(conn)?;
    info!(
        port_call_id,
        vessel_id = port_call.vessel_id,
        berth_id = port_call.berth_id,
        status = %port_call.status,
        "Created port call"
    );

    get_port_call(conn, port_call_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("port call {port_call_id} after insert")))
}

/// Replaces every column of an existing port call.
///
/// # Errors
///
/// Returns an error if a timestamp cannot be formatted or the update fails.
pub fn update_port_call(
    conn: &mut SqliteConnection,
    port_call_id: i64,
    port_call: &PortCall,
) -> Result<Option<PortCall>, PersistenceError> {
    let record: PortCallRecord<'_> = PortCallRecord::try_from(port_call)?;
    let updated: usize =
        diesel::update(port_calls::table.filter(port_calls::port_call_id.eq(port_call_id)))
            .set(&record)
            .execute(conn)?;

    if updated == 0 {
        return Ok(None);
    }

    info!(port_call_id, status = %port_call.status, "Updated port call");
    get_port_call(conn, port_call_id)
}

/// Deletes a port call.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_port_call(
    conn: &mut SqliteConnection,
    port_call_id: i64,
) -> Result<bool, PersistenceError> {
    let deleted: usize =
        diesel::delete(port_calls::table.filter(port_calls::port_call_id.eq(port_call_id)))
            .execute(conn)?;

    if deleted > 0 {
        info!(port_call_id, "Deleted port call");
    }
    Ok(deleted > 0)
}
