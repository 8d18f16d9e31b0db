// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Berth, BerthStatus, PortCall, PortCallDetails, PortCallStatus, UtcTimestamp, Vessel,
    VesselStatus, VesselType,
};
use time::macros::datetime;

/// Day 1 at the given hour, UTC.
pub fn day1(hour: u8) -> UtcTimestamp {
    let base: UtcTimestamp = UtcTimestamp::new(datetime!(2026-03-02 00:00 UTC));
    base.checked_add(time::Duration::hours(i64::from(hour)))
        .unwrap()
}

pub fn create_test_berth() -> Berth {
    let mut berth: Berth = Berth::new("B1", "North Terminal", 400.0, 16.0, BerthStatus::Available);
    berth.berth_id = Some(1);
    berth
}

pub fn create_test_vessel(length_overall: f64, draft: f64) -> Vessel {
    let mut vessel: Vessel = Vessel::new(
        "IMO9703291",
        "Test Vessel",
        VesselType::Container,
        "Panama",
        length_overall,
        length_overall * 0.15,
        draft,
        VesselStatus::Approaching,
    );
    vessel.vessel_id = Some(1);
    vessel
}

pub fn create_test_booking(
    id: i64,
    vessel_name: &str,
    arrival: UtcTimestamp,
    departure: UtcTimestamp,
    status: PortCallStatus,
) -> PortCallDetails {
    let mut port_call: PortCall = PortCall::new(id, 1, arrival, departure, status);
    port_call.port_call_id = Some(id);
    PortCallDetails {
        port_call,
        vessel_name: vessel_name.to_string(),
        berth_code: String::from("B1"),
    }
}
