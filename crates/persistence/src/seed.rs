// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Demo data for a fresh database.
//!
//! The rows are written directly, without booking checks, so the demo
//! keeps its two deliberately oversized vessels.

use diesel::Connection;
use portlink_domain::{
    Berth, BerthStatus, PortCall, PortCallStatus, UtcTimestamp, Vessel, VesselStatus, VesselType,
};
use time::Duration;
use tracing::info;

use crate::error::PersistenceError;
use crate::{Persistence, mutations, queries};

struct SeedBerth {
    code: &'static str,
    terminal: &'static str,
    max_length: f64,
    max_draft: f64,
    facilities: &'static str,
}

struct SeedVessel {
    name: &'static str,
    imo: &'static str,
    vessel_type: VesselType,
    flag: &'static str,
    length: f64,
    beam: f64,
    draft: f64,
    cargo_type: &'static str,
    capacity: i64,
    status: VesselStatus,
    owner: &'static str,
    email: &'static str,
}

struct SeedPortCall {
    arrival_offset_hours: i64,
    departure_offset_hours: i64,
    arrived: bool,
    status: PortCallStatus,
    cargo: &'static str,
    quantity: f64,
    unit: &'static str,
    priority: u8,
}

const BERTHS: [SeedBerth; 5] = [
    SeedBerth {
        code: "TERM-A-01",
        terminal: "Container Terminal A",
        max_length: 400.0,
        max_draft: 16.0,
        facilities: "Cranes: 4, Fuel: Yes, Water: Yes, Power: Yes",
    },
    SeedBerth {
        code: "TERM-A-02",
        terminal: "Container Terminal A",
        max_length: 400.0,
        max_draft: 16.0,
        facilities: "Cranes: 4, Fuel: Yes, Water: Yes, Power: Yes",
    },
    SeedBerth {
        code: "TERM-B-01",
        terminal: "Bulk Terminal B",
        max_length: 300.0,
        max_draft: 14.0,
        facilities: "Conveyor: Yes, Fuel: Yes, Water: Yes",
    },
    SeedBerth {
        code: "TERM-C-01",
        terminal: "Tanker Terminal C",
        max_length: 350.0,
        max_draft: 18.0,
        facilities: "Fuel: Yes, Water: Yes, Oil Pipeline: Yes",
    },
    SeedBerth {
        code: "TERM-D-01",
        terminal: "RoRo Terminal D",
        max_length: 250.0,
        max_draft: 12.0,
        facilities: "Ramp: Yes, Fuel: Yes, Water: Yes",
    },
];

const VESSELS: [SeedVessel; 5] = [
    SeedVessel {
        name: "MSC Oscar",
        imo: "IMO9801079",
        vessel_type: VesselType::Container,
        flag: "Panama",
        length: 395.4,
        beam: 59.0,
        draft: 16.0,
        cargo_type: "Containers",
        capacity: 19_224,
        status: VesselStatus::Approaching,
        owner: "Mediterranean Shipping Company",
        email: "agent@msc.com",
    },
    SeedVessel {
        name: "Maersk Triple E",
        imo: "IMO9778268",
        vessel_type: VesselType::Container,
        flag: "Denmark",
        length: 399.0,
        beam: 59.0,
        draft: 14.5,
        cargo_type: "Containers",
        capacity: 18_270,
        status: VesselStatus::Anchored,
        owner: "Maersk Line",
        email: "agent@maersk.com",
    },
    SeedVessel {
        name: "Valemax Iron Ore",
        imo: "IMO9631044",
        vessel_type: VesselType::BulkCarrier,
        flag: "Marshall Islands",
        length: 362.0,
        beam: 65.0,
        draft: 23.0,
        cargo_type: "Iron Ore",
        capacity: 400_000,
        status: VesselStatus::Approaching,
        owner: "Vale",
        email: "agent@vale.com",
    },
    SeedVessel {
        name: "TI Europe",
        imo: "IMO9282346",
        vessel_type: VesselType::Tanker,
        flag: "Belgium",
        length: 380.0,
        beam: 68.0,
        draft: 24.5,
        cargo_type: "Crude Oil",
        capacity: 441_893,
        status: VesselStatus::Docked,
        owner: "Tankers International",
        email: "agent@tankers.com",
    },
    SeedVessel {
        name: "Harmony of the Seas",
        imo: "IMO9682891",
        vessel_type: VesselType::Cruise,
        flag: "Bahamas",
        length: 362.0,
        beam: 47.4,
        draft: 9.3,
        cargo_type: "Passengers",
        capacity: 6_780,
        status: VesselStatus::Departed,
        owner: "Royal Caribbean",
        email: "agent@rccl.com",
    },
];

// The i-th port call books the i-th vessel at the i-th berth.
const PORT_CALLS: [SeedPortCall; 4] = [
    SeedPortCall {
        arrival_offset_hours: 2,
        departure_offset_hours: 26,
        arrived: false,
        status: PortCallStatus::Scheduled,
        cargo: "Mixed Containers",
        quantity: 15_000.0,
        unit: "TEU",
        priority: 2,
    },
    SeedPortCall {
        arrival_offset_hours: -1,
        departure_offset_hours: 18,
        arrived: true,
        status: PortCallStatus::Berthed,
        cargo: "Electronics & Auto Parts",
        quantity: 12_000.0,
        unit: "TEU",
        priority: 1,
    },
    SeedPortCall {
        arrival_offset_hours: 6,
        departure_offset_hours: 30,
        arrived: false,
        status: PortCallStatus::Approaching,
        cargo: "Iron Ore",
        quantity: 350_000.0,
        unit: "tons",
        priority: 3,
    },
    SeedPortCall {
        arrival_offset_hours: -12,
        departure_offset_hours: 12,
        arrived: true,
        status: PortCallStatus::InProgress,
        cargo: "Crude Oil",
        quantity: 400_000.0,
        unit: "tons",
        priority: 1,
    },
];

fn offset(now: UtcTimestamp, hours: i64) -> Result<UtcTimestamp, PersistenceError> {
    now.checked_add(Duration::hours(hours)).ok_or_else(|| {
        PersistenceError::SerializationError(format!("seed time {now} + {hours}h out of range"))
    })
}

fn build_berth(seed: &SeedBerth) -> Berth {
    let mut berth: Berth = Berth::new(
        seed.code,
        seed.terminal,
        seed.max_length,
        seed.max_draft,
        BerthStatus::Available,
    );
    berth.facilities = Some(seed.facilities.to_string());
    berth
}

fn build_vessel(seed: &SeedVessel) -> Vessel {
    let mut vessel: Vessel = Vessel::new(
        seed.imo,
        seed.name,
        seed.vessel_type,
        seed.flag,
        seed.length,
        seed.beam,
        seed.draft,
        seed.status,
    );
    vessel.cargo_type = Some(seed.cargo_type.to_string());
    vessel.capacity = Some(seed.capacity);
    vessel.owner_company = Some(seed.owner.to_string());
    vessel.agent_email = Some(seed.email.to_string());
    vessel
}

fn build_port_call(
    seed: &SeedPortCall,
    vessel_id: i64,
    berth_id: i64,
    now: UtcTimestamp,
) -> Result<PortCall, PersistenceError> {
    let arrival: UtcTimestamp = offset(now, seed.arrival_offset_hours)?;
    let departure: UtcTimestamp = offset(now, seed.departure_offset_hours)?;

    let mut port_call: PortCall = PortCall::new(vessel_id, berth_id, arrival, departure, seed.status);
    if seed.arrived {
        port_call.actual_arrival = Some(arrival);
    }
    port_call.cargo_description = Some(seed.cargo.to_string());
    port_call.cargo_quantity = Some(seed.quantity);
    port_call.cargo_unit = Some(seed.unit.to_string());
    port_call.priority = Some(seed.priority);
    Ok(port_call)
}

fn required_id(id: Option<i64>, what: &str) -> Result<i64, PersistenceError> {
    id.ok_or_else(|| PersistenceError::InitializationError(format!("seeded {what} has no id")))
}

/// Loads the demo berths, vessels and port calls into an empty database.
///
/// Port call windows are placed relative to `now`. Nothing is written if
/// any vessel already exists.
///
/// # Returns
///
/// `true` if the demo data was written.
///
/// # Errors
///
/// Returns an error if any insert fails; the whole seed is rolled back.
pub fn seed_demo_data(
    persistence: &mut Persistence,
    now: UtcTimestamp,
) -> Result<bool, PersistenceError> {
    if !persistence.is_empty()? {
        info!("Database already has vessels, skipping demo seed");
        return Ok(false);
    }

    persistence
        .conn
        .transaction::<_, PersistenceError, _>(|conn| {
            let mut berth_ids: Vec<i64> = Vec::with_capacity(BERTHS.len());
            for seed in &BERTHS {
                let berth: Berth = mutations::berths::create_berth(conn, &build_berth(seed))?;
                berth_ids.push(required_id(berth.berth_id, "berth")?);
            }

            let mut vessel_ids: Vec<i64> = Vec::with_capacity(VESSELS.len());
            for seed in &VESSELS {
                let vessel: Vessel = mutations::vessels::create_vessel(conn, &build_vessel(seed))?;
                vessel_ids.push(required_id(vessel.vessel_id, "vessel")?);
            }

            for ((seed, vessel_id), berth_id) in PORT_CALLS.iter().zip(&vessel_ids).zip(&berth_ids) {
                let port_call: PortCall = build_port_call(seed, *vessel_id, *berth_id, now)?;
                mutations::port_calls::create_port_call(conn, &port_call)?;
            }

            Ok(())
        })?;

    let vessel_count: i64 = queries::vessels::count_vessels(&mut persistence.conn, None, None)?;
    info!(
        berths = BERTHS.len(),
        vessels = vessel_count,
        port_calls = PORT_CALLS.len(),
        "Seeded demo data"
    );
    Ok(true)
}
