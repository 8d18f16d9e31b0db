// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Synthetic vessel and port call generation for the load simulator.
//!
//! Planning is a pure function of the target berth, the berth's current
//! schedule, a set of random rolls and an optional suggestion. Every
//! suggested field is optional and falls back to the rolled value when
//! absent or out of range.

use portlink_domain::{
    Berth, PortCall, PortCallStatus, UtcTimestamp, Vessel, VesselStatus, VesselType,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Duration;

const FLAG_COUNTRIES: [&str; 8] = [
    "Panama",
    "Denmark",
    "Marshall Islands",
    "Belgium",
    "Bahamas",
    "Singapore",
    "Norway",
    "United Kingdom",
];

const IMO_DIGIT_SPACE: u32 = 10_000_000;

/// Operator-supplied hints for the next simulated bookings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSuggestion {
    pub imo_number: Option<String>,
    pub vessel_name: Option<String>,
    pub vessel_type: Option<String>,
    pub flag_country: Option<String>,
    pub cargo_description: Option<String>,
    pub cargo_unit: Option<String>,
    pub cargo_quantity: Option<f64>,
    pub duration_hours: Option<i64>,
    pub priority: Option<u8>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl ScenarioSuggestion {
    #[must_use]
    pub fn imo_number(&self) -> Option<&str> {
        non_blank(self.imo_number.as_ref())
    }

    /// The suggested vessel type, ignoring unknown values.
    #[must_use]
    pub fn vessel_type(&self) -> Option<VesselType> {
        non_blank(self.vessel_type.as_ref()).and_then(|v| VesselType::from_str(v).ok())
    }

    /// The suggested stay, ignoring non-positive values.
    #[must_use]
    pub fn duration_hours(&self) -> Option<i64> {
        self.duration_hours.filter(|hours| *hours > 0)
    }

    /// The suggested priority, ignoring values outside 1-5.
    #[must_use]
    pub fn priority(&self) -> Option<u8> {
        self.priority.filter(|p| (1..=5).contains(p))
    }

    #[must_use]
    pub fn cargo_quantity(&self) -> Option<f64> {
        self.cargo_quantity.filter(|q| q.is_finite() && *q >= 0.0)
    }
}

/// The cargo a vessel type typically carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CargoProfile {
    pub description: &'static str,
    pub unit: &'static str,
    pub min_quantity: u32,
    pub max_quantity: u32,
}

#[must_use]
pub const fn cargo_profile(vessel_type: VesselType) -> CargoProfile {
    match vessel_type {
        VesselType::Container | VesselType::GeneralCargo | VesselType::Reefer => CargoProfile {
            description: "Mixed Containers",
            unit: "TEU",
            min_quantity: 500,
            max_quantity: 18_000,
        },
        VesselType::Tanker => CargoProfile {
            description: "Crude Oil",
            unit: "tons",
            min_quantity: 100_000,
            max_quantity: 450_000,
        },
        VesselType::BulkCarrier => CargoProfile {
            description: "Iron Ore",
            unit: "tons",
            min_quantity: 50_000,
            max_quantity: 350_000,
        },
        VesselType::RoRo => CargoProfile {
            description: "Vehicles",
            unit: "units",
            min_quantity: 200,
            max_quantity: 4_000,
        },
        VesselType::Cruise => CargoProfile {
            description: "Passengers",
            unit: "persons",
            min_quantity: 1_000,
            max_quantity: 7_000,
        },
    }
}

const fn simulated_vessel_name(vessel_type: VesselType) -> &'static str {
    match vessel_type {
        VesselType::Container => "Sim Container Vessel",
        VesselType::Tanker => "Sim Tanker Vessel",
        VesselType::BulkCarrier => "Sim Bulk Carrier",
        VesselType::RoRo => "Sim RoRo Vessel",
        VesselType::Cruise => "Sim Cruise Ship",
        VesselType::GeneralCargo => "Sim General Cargo Vessel",
        VesselType::Reefer => "Sim Reefer Vessel",
    }
}

/// The random inputs of one simulated booking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioRolls {
    /// Fraction of the berth's maximum length, 0.5 to 0.9.
    pub length_factor: f64,
    /// Fraction of the berth's maximum draft, 0.5 to 0.9.
    pub draft_factor: f64,
    /// Extra beam on top of 15% of length, 0 to 2 meters.
    pub beam_extra: f64,
    pub vessel_type: VesselType,
    pub flag_country: &'static str,
    /// Position within the cargo profile's quantity range, 0 to 1.
    pub cargo_fraction: f64,
    /// Gap after the berth's last departure, 30 to 180 minutes.
    pub gap_minutes: i64,
    /// Lead time when the berth is empty, 1 to 23 hours.
    pub lead_hours: i64,
    /// Length of stay, 8 to 36 hours.
    pub duration_hours: i64,
    pub priority: u8,
}

impl ScenarioRolls {
    /// Rolls every input with the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        let vessel_types: [VesselType; 7] = VesselType::ALL;
        Self {
            length_factor: rand::random::<f64>().mul_add(0.4, 0.5),
            draft_factor: rand::random::<f64>().mul_add(0.4, 0.5),
            beam_extra: rand::random::<f64>() * 2.0,
            vessel_type: vessel_types[rand::random_range(0..vessel_types.len())],
            flag_country: FLAG_COUNTRIES[rand::random_range(0..FLAG_COUNTRIES.len())],
            cargo_fraction: rand::random::<f64>(),
            gap_minutes: rand::random_range(30..=180),
            lead_hours: rand::random_range(1..=23),
            duration_hours: rand::random_range(8..=36),
            priority: rand::random_range(1..=5),
        }
    }
}

/// A planned vessel and the booking it will request.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub vessel: Vessel,
    pub estimated_arrival: UtcTimestamp,
    pub estimated_departure: UtcTimestamp,
    pub cargo_description: String,
    pub cargo_unit: String,
    pub cargo_quantity: f64,
    pub priority: u8,
}

impl Scenario {
    /// Builds the queued booking request for the stored vessel.
    #[must_use]
    pub fn port_call(&self, vessel_id: i64, berth_id: i64) -> PortCall {
        let mut port_call: PortCall = PortCall::new(
            vessel_id,
            berth_id,
            self.estimated_arrival,
            self.estimated_departure,
            PortCallStatus::Scheduled,
        );
        port_call.cargo_description = Some(self.cargo_description.clone());
        port_call.cargo_quantity = Some(self.cargo_quantity);
        port_call.cargo_unit = Some(self.cargo_unit.clone());
        port_call.priority = Some(self.priority);
        port_call
    }
}

fn round_to_centimeters(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Plans a vessel sized to fit `berth` and a window after its schedule.
///
/// # Arguments
///
/// * `berth` - The target berth
/// * `imo_number` - An IMO number not yet registered
/// * `latest_departure` - Latest departure among the berth's open bookings
/// * `now` - The current instant
/// * `rolls` - Random inputs
/// * `suggestion` - Optional operator hints
///
/// # Returns
///
/// `None` if the window would overflow the timestamp range.
#[must_use]
pub fn plan_scenario(
    berth: &Berth,
    imo_number: &str,
    latest_departure: Option<UtcTimestamp>,
    now: UtcTimestamp,
    rolls: &ScenarioRolls,
    suggestion: Option<&ScenarioSuggestion>,
) -> Option<Scenario> {
    let vessel_type: VesselType = suggestion
        .and_then(ScenarioSuggestion::vessel_type)
        .unwrap_or(rolls.vessel_type);
    let profile: CargoProfile = cargo_profile(vessel_type);

    let length_overall: f64 = round_to_centimeters(berth.max_vessel_length * rolls.length_factor);
    let draft: f64 = round_to_centimeters(berth.max_draft * rolls.draft_factor);
    let beam: f64 = round_to_centimeters(length_overall.mul_add(0.15, rolls.beam_extra));

    let name: &str = suggestion
        .and_then(|s| non_blank(s.vessel_name.as_ref()))
        .unwrap_or(simulated_vessel_name(vessel_type));
    let flag_country: &str = suggestion
        .and_then(|s| non_blank(s.flag_country.as_ref()))
        .unwrap_or(rolls.flag_country);
    let cargo_description: &str = suggestion
        .and_then(|s| non_blank(s.cargo_description.as_ref()))
        .unwrap_or(profile.description);
    let cargo_unit: &str = suggestion
        .and_then(|s| non_blank(s.cargo_unit.as_ref()))
        .unwrap_or(profile.unit);
    let rolled_quantity: f64 = (f64::from(profile.max_quantity - profile.min_quantity)
        * rolls.cargo_fraction)
        .round()
        + f64::from(profile.min_quantity);
    let cargo_quantity: f64 = suggestion
        .and_then(ScenarioSuggestion::cargo_quantity)
        .unwrap_or(rolled_quantity);

    let mut vessel: Vessel = Vessel::new(
        imo_number,
        name,
        vessel_type,
        flag_country,
        length_overall,
        beam,
        draft,
        VesselStatus::Approaching,
    );
    vessel.cargo_type = Some(cargo_description.to_string());

    // Rule: queue behind the berth's open bookings, never before now
    let estimated_arrival: UtcTimestamp = match latest_departure {
        Some(departure) => departure
            .max(now)
            .checked_add(Duration::minutes(rolls.gap_minutes))?,
        None => now.checked_add(Duration::hours(rolls.lead_hours))?,
    };
    let duration_hours: i64 = suggestion
        .and_then(ScenarioSuggestion::duration_hours)
        .unwrap_or(rolls.duration_hours);
    let estimated_departure: UtcTimestamp =
        estimated_arrival.checked_add(Duration::hours(duration_hours))?;

    Some(Scenario {
        vessel,
        estimated_arrival,
        estimated_departure,
        cargo_description: cargo_description.to_string(),
        cargo_unit: cargo_unit.to_string(),
        cargo_quantity,
        priority: suggestion
            .and_then(ScenarioSuggestion::priority)
            .unwrap_or(rolls.priority),
    })
}

/// A random `IMO` + 7 digit candidate.
#[must_use]
pub fn random_imo_number() -> String {
    format!("IMO{:07}", rand::random_range(0..IMO_DIGIT_SPACE))
}

/// A candidate derived from the clock, used after repeated collisions.
#[must_use]
pub fn fallback_imo_number(now: UtcTimestamp) -> String {
    let digits: i128 =
        now.as_offset_date_time().unix_timestamp_nanos() / 100 % i128::from(IMO_DIGIT_SPACE);
    format!("IMO{digits:07}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use super::*;
    use portlink_domain::{BerthStatus, validate_vessel_fields};
    use time::macros::datetime;

    fn now() -> UtcTimestamp {
        UtcTimestamp::new(datetime!(2026-03-02 06:00 UTC))
    }

    fn berth() -> Berth {
        Berth::new("TERM-A-01", "Container Terminal A", 400.0, 16.0, BerthStatus::Available)
    }

    fn rolls() -> ScenarioRolls {
        ScenarioRolls {
            length_factor: 0.5,
            draft_factor: 0.75,
            beam_extra: 1.0,
            vessel_type: VesselType::Tanker,
            flag_country: "Norway",
            cargo_fraction: 0.5,
            gap_minutes: 45,
            lead_hours: 3,
            duration_hours: 12,
            priority: 2,
        }
    }

    #[test]
    fn test_vessel_is_sized_from_berth() {
        let scenario: Scenario = plan_scenario(&berth(), "IMO1234567", None, now(), &rolls(), None)
            .unwrap();

        assert_eq!(scenario.vessel.length_overall, 200.0);
        assert_eq!(scenario.vessel.draft, 12.0);
        assert_eq!(scenario.vessel.beam, 31.0);
        assert!(validate_vessel_fields(&scenario.vessel).is_ok());
    }

    #[test]
    fn test_cargo_follows_vessel_type() {
        let scenario: Scenario = plan_scenario(&berth(), "IMO1234567", None, now(), &rolls(), None)
            .unwrap();

        assert_eq!(scenario.vessel.name, "Sim Tanker Vessel");
        assert_eq!(scenario.cargo_description, "Crude Oil");
        assert_eq!(scenario.cargo_unit, "tons");
        assert_eq!(scenario.cargo_quantity, 275_000.0);
        assert_eq!(scenario.vessel.cargo_type.as_deref(), Some("Crude Oil"));
    }

    #[test]
    fn test_empty_berth_uses_lead_time() {
        let scenario: Scenario = plan_scenario(&berth(), "IMO1234567", None, now(), &rolls(), None)
            .unwrap();

        assert_eq!(
            scenario.estimated_arrival,
            UtcTimestamp::new(datetime!(2026-03-02 09:00 UTC))
        );
        assert_eq!(
            scenario.estimated_departure,
            UtcTimestamp::new(datetime!(2026-03-02 21:00 UTC))
        );
    }

    #[test]
    fn test_window_queues_after_latest_departure() {
        let latest: UtcTimestamp = UtcTimestamp::new(datetime!(2026-03-02 20:00 UTC));
        let scenario: Scenario =
            plan_scenario(&berth(), "IMO1234567", Some(latest), now(), &rolls(), None).unwrap();

        assert_eq!(
            scenario.estimated_arrival,
            UtcTimestamp::new(datetime!(2026-03-02 20:45 UTC))
        );
    }

    #[test]
    fn test_past_departure_queues_after_now() {
        let latest: UtcTimestamp = UtcTimestamp::new(datetime!(2026-03-01 20:00 UTC));
        let scenario: Scenario =
            plan_scenario(&berth(), "IMO1234567", Some(latest), now(), &rolls(), None).unwrap();

        assert_eq!(
            scenario.estimated_arrival,
            UtcTimestamp::new(datetime!(2026-03-02 06:45 UTC))
        );
    }

    #[test]
    fn test_suggestion_overrides_rolls() {
        let suggestion: ScenarioSuggestion = ScenarioSuggestion {
            vessel_name: Some(String::from("Ever Given")),
            vessel_type: Some(String::from("container")),
            duration_hours: Some(5),
            priority: Some(5),
            ..ScenarioSuggestion::default()
        };
        let scenario: Scenario = plan_scenario(
            &berth(),
            "IMO1234567",
            None,
            now(),
            &rolls(),
            Some(&suggestion),
        )
        .unwrap();

        assert_eq!(scenario.vessel.name, "Ever Given");
        assert_eq!(scenario.vessel.vessel_type, VesselType::Container);
        assert_eq!(scenario.cargo_unit, "TEU");
        assert_eq!(scenario.priority, 5);
        assert_eq!(
            scenario
                .estimated_departure
                .since(scenario.estimated_arrival),
            Duration::hours(5)
        );
    }

    #[test]
    fn test_out_of_range_suggestions_are_ignored() {
        let suggestion: ScenarioSuggestion = ScenarioSuggestion {
            vessel_name: Some(String::from("   ")),
            vessel_type: Some(String::from("hovercraft")),
            cargo_quantity: Some(-4.0),
            duration_hours: Some(0),
            priority: Some(9),
            ..ScenarioSuggestion::default()
        };
        let scenario: Scenario = plan_scenario(
            &berth(),
            "IMO1234567",
            None,
            now(),
            &rolls(),
            Some(&suggestion),
        )
        .unwrap();

        assert_eq!(scenario.vessel.name, "Sim Tanker Vessel");
        assert_eq!(scenario.cargo_quantity, 275_000.0);
        assert_eq!(scenario.priority, 2);
        assert_eq!(
            scenario
                .estimated_departure
                .since(scenario.estimated_arrival),
            Duration::hours(12)
        );
    }

    #[test]
    fn test_port_call_is_queued_request() {
        let scenario: Scenario = plan_scenario(&berth(), "IMO1234567", None, now(), &rolls(), None)
            .unwrap();
        let port_call: PortCall = scenario.port_call(7, 3);

        assert_eq!(port_call.status, PortCallStatus::Scheduled);
        assert_eq!(port_call.vessel_id, 7);
        assert_eq!(port_call.berth_id, 3);
        assert_eq!(port_call.priority, Some(2));
    }

    #[test]
    fn test_rolls_stay_in_range() {
        for _ in 0..200 {
            let rolls: ScenarioRolls = ScenarioRolls::random();
            assert!((0.5..=0.9).contains(&rolls.length_factor));
            assert!((30..=180).contains(&rolls.gap_minutes));
            assert!((8..=36).contains(&rolls.duration_hours));
            assert!((1..=5).contains(&rolls.priority));
        }
    }

    #[test]
    fn test_imo_candidates_have_seven_digits() {
        let random: String = random_imo_number();
        let fallback: String = fallback_imo_number(now());

        for candidate in [random, fallback] {
            assert_eq!(candidate.len(), 10);
            assert!(candidate.starts_with("IMO"));
            assert!(candidate[3..].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
