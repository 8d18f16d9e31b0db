// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `EntityStore` over the synchronous `Persistence` adapter.

use portlink::{EntityStore, StoreError};
use portlink_domain::{Berth, PortCall, PortCallDetails, PortCallStatus, Vessel};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::Persistence;

/// Shares one `Persistence` between the booking core and other readers.
#[derive(Clone)]
pub struct SqliteStore {
    persistence: Arc<Mutex<Persistence>>,
}

impl SqliteStore {
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    /// Locks the underlying adapter for direct queries and mutations.
    pub async fn lock(&self) -> MutexGuard<'_, Persistence> {
        self.persistence.lock().await
    }
}

impl EntityStore for SqliteStore {
    async fn get_vessel(&self, vessel_id: i64) -> Result<Option<Vessel>, StoreError> {
        Ok(self.lock().await.get_vessel(vessel_id)?)
    }

    async fn get_vessel_by_imo(&self, imo_number: &str) -> Result<Option<Vessel>, StoreError> {
        Ok(self.lock().await.get_vessel_by_imo(imo_number)?)
    }

    async fn create_vessel(&self, vessel: &Vessel) -> Result<Vessel, StoreError> {
        Ok(self.lock().await.create_vessel(vessel)?)
    }

    async fn get_berth(&self, berth_id: i64) -> Result<Option<Berth>, StoreError> {
        Ok(self.lock().await.get_berth(berth_id)?)
    }

    async fn list_available_berths(&self) -> Result<Vec<Berth>, StoreError> {
        Ok(self.lock().await.list_available_berths()?)
    }

    async fn list_bookings_by_berth(
        &self,
        berth_id: i64,
        exclude_statuses: &[PortCallStatus],
    ) -> Result<Vec<PortCallDetails>, StoreError> {
        Ok(self
            .lock()
            .await
            .list_port_calls_by_berth(berth_id, exclude_statuses)?)
    }

    async fn get_booking(&self, port_call_id: i64) -> Result<Option<PortCall>, StoreError> {
        Ok(self.lock().await.get_port_call(port_call_id)?)
    }

    async fn create_booking(&self, port_call: &PortCall) -> Result<PortCall, StoreError> {
        Ok(self.lock().await.create_port_call(port_call)?)
    }

    async fn update_booking(
        &self,
        port_call_id: i64,
        port_call: &PortCall,
    ) -> Result<Option<PortCall>, StoreError> {
        Ok(self.lock().await.update_port_call(port_call_id, port_call)?)
    }

    async fn delete_booking(&self, port_call_id: i64) -> Result<bool, StoreError> {
        Ok(self.lock().await.delete_port_call(port_call_id)?)
    }
}
