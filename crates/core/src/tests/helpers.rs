// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookingService, EntityStore, EventNotifier, PortEvent, StoreError};
use portlink_domain::{
    Berth, BerthStatus, PortCall, PortCallDetails, PortCallStatus, UtcTimestamp, Vessel,
    VesselStatus, VesselType,
};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use time::macros::datetime;

#[derive(Default)]
struct MemoryState {
    vessels: BTreeMap<i64, Vessel>,
    berths: BTreeMap<i64, Berth>,
    bookings: BTreeMap<i64, PortCall>,
    next_id: i64,
}

impl MemoryState {
    const fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// An in-memory entity store.
///
/// Listing bookings yields to the scheduler before returning, so
/// concurrent validations interleave the way they would against a real
/// database.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vessel(&self, mut vessel: Vessel) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id: i64 = state.allocate_id();
        vessel.vessel_id = Some(id);
        state.vessels.insert(id, vessel);
        id
    }

    pub fn add_berth(&self, mut berth: Berth) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id: i64 = state.allocate_id();
        berth.berth_id = Some(id);
        state.berths.insert(id, berth);
        id
    }

    /// Stores a booking without running any checks.
    pub fn insert_booking(&self, mut port_call: PortCall) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id: i64 = state.allocate_id();
        port_call.port_call_id = Some(id);
        state.bookings.insert(id, port_call);
        id
    }

    pub fn set_berth_status(&self, berth_id: i64, status: BerthStatus) {
        let mut state = self.state.lock().unwrap();
        state.berths.get_mut(&berth_id).unwrap().status = status;
    }

    /// Moves a booking to another berth without running any checks.
    pub fn move_booking(&self, port_call_id: i64, berth_id: i64) {
        let mut state = self.state.lock().unwrap();
        state.bookings.get_mut(&port_call_id).unwrap().berth_id = berth_id;
    }

    pub fn booking(&self, port_call_id: i64) -> Option<PortCall> {
        self.state.lock().unwrap().bookings.get(&port_call_id).cloned()
    }

    pub fn booking_count(&self) -> usize {
        self.state.lock().unwrap().bookings.len()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(String::from("connection lost")));
        }
        Ok(())
    }
}

impl EntityStore for MemoryStore {
    async fn get_vessel(&self, vessel_id: i64) -> Result<Option<Vessel>, StoreError> {
        self.check_available()?;
        Ok(self.state.lock().unwrap().vessels.get(&vessel_id).cloned())
    }

    async fn get_vessel_by_imo(&self, imo_number: &str) -> Result<Option<Vessel>, StoreError> {
        self.check_available()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .vessels
            .values()
            .find(|vessel| vessel.imo_number == imo_number)
            .cloned())
    }

    async fn create_vessel(&self, vessel: &Vessel) -> Result<Vessel, StoreError> {
        self.check_available()?;
        let id: i64 = self.add_vessel(vessel.clone());
        Ok(self.state.lock().unwrap().vessels[&id].clone())
    }

    async fn get_berth(&self, berth_id: i64) -> Result<Option<Berth>, StoreError> {
        self.check_available()?;
        Ok(self.state.lock().unwrap().berths.get(&berth_id).cloned())
    }

    async fn list_available_berths(&self) -> Result<Vec<Berth>, StoreError> {
        self.check_available()?;
        let state = self.state.lock().unwrap();
        let mut berths: Vec<Berth> = state
            .berths
            .values()
            .filter(|berth| berth.status == BerthStatus::Available)
            .cloned()
            .collect();
        berths.sort_by(|a, b| a.berth_code.cmp(&b.berth_code));
        Ok(berths)
    }

    async fn list_bookings_by_berth(
        &self,
        berth_id: i64,
        exclude_statuses: &[PortCallStatus],
    ) -> Result<Vec<PortCallDetails>, StoreError> {
        self.check_available()?;
        let details: Vec<PortCallDetails> = {
            let state = self.state.lock().unwrap();
            let mut bookings: Vec<&PortCall> = state
                .bookings
                .values()
                .filter(|pc| pc.berth_id == berth_id && !exclude_statuses.contains(&pc.status))
                .collect();
            bookings.sort_by_key(|pc| pc.estimated_arrival);
            bookings
                .into_iter()
                .map(|pc| PortCallDetails {
                    port_call: pc.clone(),
                    vessel_name: state.vessels[&pc.vessel_id].name.clone(),
                    berth_code: state.berths[&pc.berth_id].berth_code.clone(),
                })
                .collect()
        };
        tokio::task::yield_now().await;
        Ok(details)
    }

    async fn get_booking(&self, port_call_id: i64) -> Result<Option<PortCall>, StoreError> {
        self.check_available()?;
        Ok(self.booking(port_call_id))
    }

    async fn create_booking(&self, port_call: &PortCall) -> Result<PortCall, StoreError> {
        self.check_available()?;
        let id: i64 = self.insert_booking(port_call.clone());
        Ok(self.booking(id).unwrap())
    }

    async fn update_booking(
        &self,
        port_call_id: i64,
        port_call: &PortCall,
    ) -> Result<Option<PortCall>, StoreError> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();
        Ok(state.bookings.get_mut(&port_call_id).map(|stored| {
            *stored = port_call.clone();
            stored.port_call_id = Some(port_call_id);
            stored.clone()
        }))
    }

    async fn delete_booking(&self, port_call_id: i64) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .bookings
            .remove(&port_call_id)
            .is_some())
    }
}

/// Collects published events.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<PortEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<PortEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventNotifier for RecordingNotifier {
    fn publish(&self, event: PortEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub type TestService = BookingService<MemoryStore, RecordingNotifier>;

pub fn create_test_service() -> TestService {
    BookingService::new(MemoryStore::new(), RecordingNotifier::default())
}

/// Day 1 at the given hour, UTC.
pub fn day1(hour: i64) -> UtcTimestamp {
    UtcTimestamp::new(datetime!(2026-03-02 00:00 UTC))
        .checked_add(time::Duration::hours(hour))
        .unwrap()
}

pub fn create_test_berth(code: &str, max_length: f64, max_draft: f64, status: BerthStatus) -> Berth {
    Berth::new(code, "North Terminal", max_length, max_draft, status)
}

pub fn create_test_vessel(imo: &str, name: &str, length_overall: f64, draft: f64) -> Vessel {
    Vessel::new(
        imo,
        name,
        VesselType::Container,
        "Panama",
        length_overall,
        length_overall * 0.15,
        draft,
        VesselStatus::Approaching,
    )
}

pub fn create_test_booking(
    vessel_id: i64,
    berth_id: i64,
    arrival: UtcTimestamp,
    departure: UtcTimestamp,
    status: PortCallStatus,
) -> PortCall {
    PortCall::new(vessel_id, berth_id, arrival, departure, status)
}

/// Berth B1 (400 m / 16 m) with fitting vessels V1 (395 m / 14 m) and
/// V2 (300 m / 12 m). Returns `(b1, v1, v2)`.
pub fn seed_b1_scenario(store: &MemoryStore) -> (i64, i64, i64) {
    let b1: i64 = store.add_berth(create_test_berth("B1", 400.0, 16.0, BerthStatus::Available));
    let v1: i64 = store.add_vessel(create_test_vessel("IMO9000001", "V1", 395.0, 14.0));
    let v2: i64 = store.add_vessel(create_test_vessel("IMO9000002", "V2", 300.0, 12.0));
    (b1, v1, v2)
}
