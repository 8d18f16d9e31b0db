// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversions to domain entities.
//!
//! Enumerations are stored as their snake_case strings and timestamps as
//! fixed-width UTC text (`YYYY-MM-DDTHH:MM:SS.ffffffZ`).

use crate::diesel_schema::{berths, port_calls, vessels};
use crate::error::PersistenceError;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use portlink_domain::{Berth, PortCall, PortCallDetails, UtcTimestamp, Vessel};
use std::str::FromStr;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z");

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the year cannot be represented with four digits.
pub fn format_timestamp(value: UtcTimestamp) -> Result<String, PersistenceError> {
    value
        .as_offset_date_time()
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("format_timestamp: {e}")))
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns an error if the text is not in the storage format.
pub fn parse_timestamp(value: &str) -> Result<UtcTimestamp, PersistenceError> {
    PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)
        .map(|parsed| UtcTimestamp::new(parsed.assume_utc()))
        .map_err(|e| PersistenceError::SerializationError(format!("parse_timestamp '{value}': {e}")))
}

fn format_optional(value: Option<UtcTimestamp>) -> Result<Option<String>, PersistenceError> {
    value.map(format_timestamp).transpose()
}

fn parse_optional(value: Option<&str>) -> Result<Option<UtcTimestamp>, PersistenceError> {
    value.map(parse_timestamp).transpose()
}

fn parse_enum<T: FromStr>(column: &str, value: &str) -> Result<T, PersistenceError>
where
    T::Err: std::fmt::Display,
{
    T::from_str(value)
        .map_err(|e| PersistenceError::SerializationError(format!("{column}: {e}")))
}

/// Diesel Queryable struct for vessel rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = vessels)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VesselRow {
    pub vessel_id: i64,
    pub imo_number: String,
    pub name: String,
    pub vessel_type: String,
    pub flag_country: String,
    pub length_overall: f64,
    pub beam: f64,
    pub draft: f64,
    pub cargo_type: Option<String>,
    pub capacity: Option<i64>,
    pub status: String,
    pub owner_company: Option<String>,
    pub agent_email: Option<String>,
}

impl TryFrom<VesselRow> for Vessel {
    type Error = PersistenceError;

    fn try_from(row: VesselRow) -> Result<Self, Self::Error> {
        Ok(Self {
            vessel_id: Some(row.vessel_id),
            imo_number: row.imo_number,
            name: row.name,
            vessel_type: parse_enum("vessels.vessel_type", &row.vessel_type)?,
            flag_country: row.flag_country,
            length_overall: row.length_overall,
            beam: row.beam,
            draft: row.draft,
            cargo_type: row.cargo_type,
            capacity: row.capacity,
            status: parse_enum("vessels.status", &row.status)?,
            owner_company: row.owner_company,
            agent_email: row.agent_email,
        })
    }
}

/// Insertable/changeset form of a vessel.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = vessels)]
#[diesel(treat_none_as_null = true)]
pub struct VesselRecord<'a> {
    pub imo_number: &'a str,
    pub name: &'a str,
    pub vessel_type: &'static str,
    pub flag_country: &'a str,
    pub length_overall: f64,
    pub beam: f64,
    pub draft: f64,
    pub cargo_type: Option<&'a str>,
    pub capacity: Option<i64>,
    pub status: &'static str,
    pub owner_company: Option<&'a str>,
    pub agent_email: Option<&'a str>,
}

impl<'a> From<&'a Vessel> for VesselRecord<'a> {
    fn from(vessel: &'a Vessel) -> Self {
        Self {
            imo_number: &vessel.imo_number,
            name: &vessel.name,
            vessel_type: vessel.vessel_type.as_str(),
            flag_country: &vessel.flag_country,
            length_overall: vessel.length_overall,
            beam: vessel.beam,
            draft: vessel.draft,
            cargo_type: vessel.cargo_type.as_deref(),
            capacity: vessel.capacity,
            status: vessel.status.as_str(),
            owner_company: vessel.owner_company.as_deref(),
            agent_email: vessel.agent_email.as_deref(),
        }
    }
}

/// Diesel Queryable struct for berth rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = berths)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BerthRow {
    pub berth_id: i64,
    pub berth_code: String,
    pub terminal_name: String,
    pub max_vessel_length: f64,
    pub max_draft: f64,
    pub facilities: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

impl TryFrom<BerthRow> for Berth {
    type Error = PersistenceError;

    fn try_from(row: BerthRow) -> Result<Self, Self::Error> {
        Ok(Self {
            berth_id: Some(row.berth_id),
            berth_code: row.berth_code,
            terminal_name: row.terminal_name,
            max_vessel_length: row.max_vessel_length,
            max_draft: row.max_draft,
            facilities: row.facilities,
            status: parse_enum("berths.status", &row.status)?,
            notes: row.notes,
        })
    }
}

/// Insertable/changeset form of a berth.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = berths)]
#[diesel(treat_none_as_null = true)]
pub struct BerthRecord<'a> {
    pub berth_code: &'a str,
    pub terminal_name: &'a str,
    pub max_vessel_length: f64,
    pub max_draft: f64,
    pub facilities: Option<&'a str>,
    pub status: &'static str,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a Berth> for BerthRecord<'a> {
    fn from(berth: &'a Berth) -> Self {
        Self {
            berth_code: &berth.berth_code,
            terminal_name: &berth.terminal_name,
            max_vessel_length: berth.max_vessel_length,
            max_draft: berth.max_draft,
            facilities: berth.facilities.as_deref(),
            status: berth.status.as_str(),
            notes: berth.notes.as_deref(),
        }
    }
}

/// Diesel Queryable struct for port call rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = port_calls)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortCallRow {
    pub port_call_id: i64,
    pub vessel_id: i64,
    pub berth_id: i64,
    pub estimated_arrival: String,
    pub estimated_departure: String,
    pub actual_arrival: Option<String>,
    pub actual_departure: Option<String>,
    pub status: String,
    pub cargo_description: Option<String>,
    pub cargo_quantity: Option<f64>,
    pub cargo_unit: Option<String>,
    pub notes: Option<String>,
    pub delay_reason: Option<String>,
    pub priority: Option<i32>,
}

impl TryFrom<PortCallRow> for PortCall {
    type Error = PersistenceError;

    fn try_from(row: PortCallRow) -> Result<Self, Self::Error> {
        let priority: Option<u8> = row
            .priority
            .map(|value| {
                value.to_u8().ok_or_else(|| {
                    PersistenceError::SerializationError(format!(
                        "port_calls.priority out of range: {value}"
                    ))
                })
            })
            .transpose()?;

        Ok(Self {
            port_call_id: Some(row.port_call_id),
            vessel_id: row.vessel_id,
            berth_id: row.berth_id,
            estimated_arrival: parse_timestamp(&row.estimated_arrival)?,
            estimated_departure: parse_timestamp(&row.estimated_departure)?,
            actual_arrival: parse_optional(row.actual_arrival.as_deref())?,
            actual_departure: parse_optional(row.actual_departure.as_deref())?,
            status: parse_enum("port_calls.status", &row.status)?,
            cargo_description: row.cargo_description,
            cargo_quantity: row.cargo_quantity,
            cargo_unit: row.cargo_unit,
            notes: row.notes,
            delay_reason: row.delay_reason,
            priority,
        })
    }
}

/// A port call row joined with its vessel name and berth code.
pub type PortCallDetailsRow = (PortCallRow, String, String);

/// Converts a joined row to `PortCallDetails`.
///
/// # Errors
///
/// Returns an error if the port call row cannot be converted.
pub fn details_from_row(row: PortCallDetailsRow) -> Result<PortCallDetails, PersistenceError> {
    let (port_call, vessel_name, berth_code) = row;
    Ok(PortCallDetails {
        port_call: PortCall::try_from(port_call)?,
        vessel_name,
        berth_code,
    })
}

/// Insertable/changeset form of a port call.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = port_calls)]
#[diesel(treat_none_as_null = true)]
pub struct PortCallRecord<'a> {
    pub vessel_id: i64,
    pub berth_id: i64,
    pub estimated_arrival: String,
    pub estimated_departure: String,
    pub actual_arrival: Option<String>,
    pub actual_departure: Option<String>,
    pub status: &'static str,
    pub cargo_description: Option<&'a str>,
    pub cargo_quantity: Option<f64>,
    pub cargo_unit: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub delay_reason: Option<&'a str>,
    pub priority: Option<i32>,
}

impl<'a> TryFrom<&'a PortCall> for PortCallRecord<'a> {
    type Error = PersistenceError;

    fn try_from(port_call: &'a PortCall) -> Result<Self, Self::Error> {
        Ok(Self {
            vessel_id: port_call.vessel_id,
            berth_id: port_call.berth_id,
            estimated_arrival: format_timestamp(port_call.estimated_arrival)?,
            estimated_departure: format_timestamp(port_call.estimated_departure)?,
            actual_arrival: format_optional(port_call.actual_arrival)?,
            actual_departure: format_optional(port_call.actual_departure)?,
            status: port_call.status.as_str(),
            cargo_description: port_call.cargo_description.as_deref(),
            cargo_quantity: port_call.cargo_quantity,
            cargo_unit: port_call.cargo_unit.as_deref(),
            notes: port_call.notes.as_deref(),
            delay_reason: port_call.delay_reason.as_deref(),
            priority: port_call.priority.map(i32::from),
        })
    }
}
