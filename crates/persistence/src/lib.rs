// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Portlink.
//!
//! Vessels, berths and port calls are stored in `SQLite` through Diesel.
//! `Persistence` is the synchronous adapter owning one connection;
//! `SqliteStore` shares it behind a `tokio::sync::Mutex` and implements the
//! async `EntityStore` used by the booking core.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` opens a fresh shared-cache in-memory
//! database per call, so tests never observe each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use portlink_domain::{
    Berth, BerthStatus, PortCall, PortCallDetails, PortCallStatus, UtcTimestamp, Vessel,
    VesselStatus, VesselType,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod seed;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use queries::Page;
pub use seed::seed_demo_data;
pub use store::SqliteStore;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Synchronous persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter with a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_portlink_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter backed by a database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Vessels
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_vessel(&mut self, vessel_id: i64) -> Result<Option<Vessel>, PersistenceError> {
        queries::vessels::get_vessel(&mut self.conn, vessel_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_vessel_by_imo(&mut self, imo_number: &str) -> Result<Option<Vessel>, PersistenceError> {
        queries::vessels::get_vessel_by_imo(&mut self.conn, imo_number)
    }

    /// Lists vessels ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_vessels(
        &mut self,
        status: Option<VesselStatus>,
        vessel_type: Option<VesselType>,
        page: Page,
    ) -> Result<Vec<Vessel>, PersistenceError> {
        queries::vessels::list_vessels(&mut self.conn, status, vessel_type, page)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_vessels(
        &mut self,
        status: Option<VesselStatus>,
        vessel_type: Option<VesselType>,
    ) -> Result<i64, PersistenceError> {
        queries::vessels::count_vessels(&mut self.conn, status, vessel_type)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` for a duplicate IMO number.
    pub fn create_vessel(&mut self, vessel: &Vessel) -> Result<Vessel, PersistenceError> {
        mutations::vessels::create_vessel(&mut self.conn, vessel)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` for a duplicate IMO number.
    pub fn update_vessel(
        &mut self,
        vessel_id: i64,
        vessel: &Vessel,
    ) -> Result<Option<Vessel>, PersistenceError> {
        mutations::vessels::update_vessel(&mut self.conn, vessel_id, vessel)
    }

    /// Deletes a vessel together with its port calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_vessel(&mut self, vessel_id: i64) -> Result<bool, PersistenceError> {
        mutations::vessels::delete_vessel(&mut self.conn, vessel_id)
    }

    // ========================================================================
    // Berths
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_berth(&mut self, berth_id: i64) -> Result<Option<Berth>, PersistenceError> {
        queries::berths::get_berth(&mut self.conn, berth_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_berth_by_code(&mut self, berth_code: &str) -> Result<Option<Berth>, PersistenceError> {
        queries::berths::get_berth_by_code(&mut self.conn, berth_code)
    }

    /// Lists berths ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_berths(
        &mut self,
        status: Option<BerthStatus>,
        page: Page,
    ) -> Result<Vec<Berth>, PersistenceError> {
        queries::berths::list_berths(&mut self.conn, status, page)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_berths(&mut self, status: Option<BerthStatus>) -> Result<i64, PersistenceError> {
        queries::berths::count_berths(&mut self.conn, status)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_available_berths(&mut self) -> Result<Vec<Berth>, PersistenceError> {
        queries::berths::list_available_berths(&mut self.conn)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` for a duplicate berth code.
    pub fn create_berth(&mut self, berth: &Berth) -> Result<Berth, PersistenceError> {
        mutations::berths::create_berth(&mut self.conn, berth)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` for a duplicate berth code.
    pub fn update_berth(
        &mut self,
        berth_id: i64,
        berth: &Berth,
    ) -> Result<Option<Berth>, PersistenceError> {
        mutations::berths::update_berth(&mut self.conn, berth_id, berth)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::BerthReferenced` while port calls use the
    /// berth.
    pub fn delete_berth(&mut self, berth_id: i64) -> Result<bool, PersistenceError> {
        mutations::berths::delete_berth(&mut self.conn, berth_id)
    }

    // ========================================================================
    // Port calls
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_port_call(&mut self, port_call_id: i64) -> Result<Option<PortCall>, PersistenceError> {
        queries::port_calls::get_port_call(&mut self.conn, port_call_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_port_call_details(
        &mut self,
        port_call_id: i64,
    ) -> Result<Option<PortCallDetails>, PersistenceError> {
        queries::port_calls::get_port_call_details(&mut self.conn, port_call_id)
    }

    /// Lists port calls ordered by estimated arrival.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_port_calls(
        &mut self,
        status: Option<PortCallStatus>,
        page: Page,
    ) -> Result<Vec<PortCallDetails>, PersistenceError> {
        queries::port_calls::list_port_calls(&mut self.conn, status, page)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_port_calls(
        &mut self,
        status: Option<PortCallStatus>,
    ) -> Result<i64, PersistenceError> {
        queries::port_calls::count_port_calls(&mut self.conn, status)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_port_calls_by_vessel(
        &mut self,
        vessel_id: i64,
    ) -> Result<Vec<PortCallDetails>, PersistenceError> {
        queries::port_calls::list_port_calls_by_vessel(&mut self.conn, vessel_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_port_calls_by_berth(
        &mut self,
        berth_id: i64,
        exclude_statuses: &[PortCallStatus],
    ) -> Result<Vec<PortCallDetails>, PersistenceError> {
        queries::port_calls::list_port_calls_by_berth(&mut self.conn, berth_id, exclude_statuses)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_upcoming_port_calls(
        &mut self,
        from: UtcTimestamp,
        limit: u32,
    ) -> Result<Vec<PortCallDetails>, PersistenceError> {
        queries::port_calls::list_upcoming_port_calls(&mut self.conn, from, limit)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_port_calls(&mut self) -> Result<Vec<PortCallDetails>, PersistenceError> {
        queries::port_calls::list_active_port_calls(&mut self.conn)
    }

    /// Inserts a port call without applying booking rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_port_call(&mut self, port_call: &PortCall) -> Result<PortCall, PersistenceError> {
        mutations::port_calls::create_port_call(&mut self.conn, port_call)
    }

    /// Replaces a port call without applying booking rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_port_call(
        &mut self,
        port_call_id: i64,
        port_call: &PortCall,
    ) -> Result<Option<PortCall>, PersistenceError> {
        mutations::port_calls::update_port_call(&mut self.conn, port_call_id, port_call)
    }

    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_port_call(&mut self, port_call_id: i64) -> Result<bool, PersistenceError> {
        mutations::port_calls::delete_port_call(&mut self.conn, port_call_id)
    }

    /// Returns true if no vessel has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn is_empty(&mut self) -> Result<bool, PersistenceError> {
        queries::vessels::is_vessel_table_empty(&mut self.conn)
    }
}
