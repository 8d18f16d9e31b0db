// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use portlink_domain::{
    Berth, BerthStatus, PortCall, PortCallStatus, UtcTimestamp, Vessel, VesselStatus, VesselType,
};
use time::macros::datetime;

/// Returns 2026-03-02 at the given hour, UTC.
pub fn day1(hour: i64) -> UtcTimestamp {
    UtcTimestamp::new(datetime!(2026-03-02 00:00 UTC))
        .checked_add(time::Duration::hours(hour))
        .expect("Valid test time")
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("In-memory database should initialize")
}

pub fn create_test_berth(code: &str, status: BerthStatus) -> Berth {
    let mut berth: Berth = Berth::new(code, "Container Terminal A", 400.0, 16.0, status);
    berth.facilities = Some(String::from("Cranes: 4"));
    berth
}

pub fn create_test_vessel(imo: &str, name: &str) -> Vessel {
    let mut vessel: Vessel = Vessel::new(
        imo,
        name,
        VesselType::Container,
        "Panama",
        300.0,
        45.0,
        12.0,
        VesselStatus::Approaching,
    );
    vessel.capacity = Some(12_000);
    vessel.agent_email = Some(String::from("agent@example.com"));
    vessel
}

/// Inserts one berth and one vessel, returning `(berth_id, vessel_id)`.
pub fn seed_berth_and_vessel(persistence: &mut Persistence) -> (i64, i64) {
    let berth: Berth = persistence
        .create_berth(&create_test_berth("B1", BerthStatus::Available))
        .expect("Berth insert should succeed");
    let vessel: Vessel = persistence
        .create_vessel(&create_test_vessel("IMO1000001", "Nordic Star"))
        .expect("Vessel insert should succeed");
    (berth.berth_id.unwrap(), vessel.vessel_id.unwrap())
}

pub fn create_test_port_call(
    vessel_id: i64,
    berth_id: i64,
    arrival_hour: i64,
    departure_hour: i64,
    status: PortCallStatus,
) -> PortCall {
    PortCall::new(
        vessel_id,
        berth_id,
        day1(arrival_hour),
        day1(departure_hour),
        status,
    )
}
