// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Mutex;

use portlink::{BookingService, EventNotifier, PortEvent};
use portlink_persistence::{Persistence, SqliteStore};

use crate::{
    BerthRequest, PortCallRequest, PortlinkService, VesselRequest, create_berth, create_vessel,
};

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<PortEvent>>,
}

impl RecordingNotifier {
    pub fn topics(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(PortEvent::topic)
            .collect()
    }
}

impl EventNotifier for RecordingNotifier {
    fn publish(&self, event: PortEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub type TestService = PortlinkService<RecordingNotifier>;

pub fn create_test_service() -> TestService {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("In-memory database should initialize");
    BookingService::new(SqliteStore::new(persistence), RecordingNotifier::default())
}

/// 2026-03-02 at the given hour, as an RFC 3339 string.
pub fn at(hour: u32) -> String {
    format!("2026-03-02T{hour:02}:00:00Z")
}

pub fn berth_request(code: &str, max_length: f64, max_draft: f64, status: &str) -> BerthRequest {
    BerthRequest {
        berth_code: code.to_string(),
        terminal_name: String::from("North Terminal"),
        max_vessel_length: max_length,
        max_draft,
        facilities: Some(String::from("Cranes: 2")),
        status: status.to_string(),
        notes: None,
    }
}

pub fn vessel_request(imo: &str, name: &str, length_overall: f64, draft: f64) -> VesselRequest {
    VesselRequest {
        imo_number: imo.to_string(),
        name: name.to_string(),
        vessel_type: String::from("container"),
        flag_country: String::from("Panama"),
        length_overall,
        beam: 40.0,
        draft,
        cargo_type: Some(String::from("Containers")),
        capacity: Some(8_000),
        status: String::from("approaching"),
        owner_company: None,
        agent_email: Some(String::from("ops@example.com")),
    }
}

pub fn port_call_request(
    vessel_id: i64,
    berth_id: i64,
    arrival_hour: u32,
    departure_hour: u32,
    status: &str,
) -> PortCallRequest {
    PortCallRequest {
        vessel_id,
        berth_id,
        estimated_arrival: at(arrival_hour),
        estimated_departure: at(departure_hour),
        actual_arrival: None,
        actual_departure: None,
        status: Some(status.to_string()),
        cargo_description: None,
        cargo_quantity: None,
        cargo_unit: None,
        notes: None,
        delay_reason: None,
        priority: None,
    }
}

/// Registers berth B1 (300m / 14m) and two vessels that fit it.
///
/// Returns `(berth_id, first_vessel_id, second_vessel_id)`.
pub async fn seed_scenario(service: &TestService) -> (i64, i64, i64) {
    let berth = create_berth(service, &berth_request("B1", 300.0, 14.0, "available"))
        .await
        .expect("Berth should register");
    let first = create_vessel(service, &vessel_request("IMO1000001", "Nordic Star", 250.0, 11.0))
        .await
        .expect("Vessel should register");
    let second = create_vessel(service, &vessel_request("IMO1000002", "Baltic Dawn", 200.0, 9.5))
        .await
        .expect("Vessel should register");

    (
        berth.berth_id.unwrap(),
        first.vessel_id.unwrap(),
        second.vessel_id.unwrap(),
    )
}
