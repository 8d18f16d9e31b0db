// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::PortCallStatus;
use crate::timestamp::UtcTimestamp;
use serde::{Deserialize, Serialize};

/// Entity kinds that a booking can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Vessel,
    Berth,
    PortCall,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vessel => "Vessel",
            Self::Berth => "Berth",
            Self::PortCall => "PortCall",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The physical dimension that failed a fit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Length,
    Draft,
}

impl Dimension {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Draft => "draft",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a rejected booking request.
///
/// All kinds are expected, user-facing outcomes rather than faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    NotFound,
    BerthUnavailable,
    CapacityExceeded,
    OverlappingBooking,
    InvalidTimeRange,
    InvalidInput,
    TransitionDenied,
}

impl RejectionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::BerthUnavailable => "berth_unavailable",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::OverlappingBooking => "overlapping_booking",
            Self::InvalidTimeRange => "invalid_time_range",
            Self::InvalidInput => "invalid_input",
            Self::TransitionDenied => "transition_denied",
        }
    }

    /// Suggested HTTP status for an HTTP-fronted caller.
    #[must_use]
    pub const fn http_status_hint(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::BerthUnavailable | Self::OverlappingBooking | Self::TransitionDenied => 409,
            Self::CapacityExceeded | Self::InvalidTimeRange | Self::InvalidInput => 400,
        }
    }

    /// Returns true if the same request may succeed after the client
    /// changes its input (a different window, berth or corrected value).
    #[must_use]
    pub const fn is_retryable_with_new_input(&self) -> bool {
        matches!(
            self,
            Self::OverlappingBooking | Self::InvalidTimeRange | Self::InvalidInput
        )
    }
}

impl std::fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A referenced entity does not exist.
    NotFound {
        /// The kind of entity that was looked up.
        entity: EntityKind,
        /// The id that was looked up.
        id: i64,
    },
    /// The berth is administratively unable to take bookings.
    BerthUnavailable {
        /// The berth code.
        berth_code: String,
        /// Why the berth is unavailable.
        reason: String,
    },
    /// The vessel does not physically fit the berth.
    CapacityExceeded {
        /// The berth code.
        berth_code: String,
        /// The first dimension that does not fit.
        dimension: Dimension,
        /// The vessel's value for that dimension, in meters.
        vessel_value: f64,
        /// The berth's ceiling for that dimension, in meters.
        berth_max: f64,
    },
    /// The requested window collides with a blocking booking.
    OverlappingBooking {
        /// The berth code.
        berth_code: String,
        /// Name of the vessel holding the conflicting booking.
        vessel_name: String,
        /// Estimated arrival of the conflicting booking.
        arrival: UtcTimestamp,
        /// Estimated departure of the conflicting booking.
        departure: UtcTimestamp,
    },
    /// Estimated departure is not after estimated arrival.
    InvalidTimeRange {
        /// The submitted arrival.
        arrival: UtcTimestamp,
        /// The submitted departure.
        departure: UtcTimestamp,
    },
    /// A field is missing, too long or out of range.
    InvalidField {
        /// The field name.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },
    /// A status or type string is not recognized.
    InvalidStatus {
        /// Which enumeration was being parsed.
        kind: &'static str,
        /// The unrecognized value.
        value: String,
    },
    /// A timestamp could not be parsed or formatted.
    InvalidTimestamp {
        /// The offending value.
        value: String,
        /// The parser's explanation.
        reason: String,
    },
    /// The configured transition policy refused a status change.
    InvalidStatusTransition {
        /// The current status.
        from: PortCallStatus,
        /// The requested status.
        to: PortCallStatus,
    },
}

impl DomainError {
    /// Categorizes the error for callers that render rejections.
    #[must_use]
    pub const fn kind(&self) -> RejectionKind {
        match self {
            Self::NotFound { .. } => RejectionKind::NotFound,
            Self::BerthUnavailable { .. } => RejectionKind::BerthUnavailable,
            Self::CapacityExceeded { .. } => RejectionKind::CapacityExceeded,
            Self::OverlappingBooking { .. } => RejectionKind::OverlappingBooking,
            Self::InvalidTimeRange { .. } => RejectionKind::InvalidTimeRange,
            Self::InvalidField { .. } | Self::InvalidStatus { .. } | Self::InvalidTimestamp { .. } => {
                RejectionKind::InvalidInput
            }
            Self::InvalidStatusTransition { .. } => RejectionKind::TransitionDenied,
        }
    }

    /// Suggested HTTP status for this error.
    #[must_use]
    pub const fn http_status_hint(&self) -> u16 {
        self.kind().http_status_hint()
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} with id {id} was not found"),
            Self::BerthUnavailable { berth_code, reason } => {
                write!(f, "Berth {berth_code} is not available: {reason}")
            }
            Self::CapacityExceeded {
                berth_code,
                dimension,
                vessel_value,
                berth_max,
            } => {
                write!(
                    f,
                    "Berth {berth_code} capacity exceeded: vessel {dimension} {vessel_value:.1}m exceeds berth maximum {berth_max:.1}m"
                )
            }
            Self::OverlappingBooking {
                berth_code,
                vessel_name,
                arrival,
                departure,
            } => {
                write!(
                    f,
                    "Berth {berth_code} is already occupied by vessel '{vessel_name}' from {arrival} to {departure}"
                )
            }
            Self::InvalidTimeRange { arrival, departure } => {
                write!(
                    f,
                    "Estimated departure {departure} must be after estimated arrival {arrival}"
                )
            }
            Self::InvalidField { field, reason } => write!(f, "Invalid {field}: {reason}"),
            Self::InvalidStatus { kind, value } => {
                write!(f, "Unknown {kind} '{value}'")
            }
            Self::InvalidTimestamp { value, reason } => {
                write!(f, "Invalid timestamp '{value}': {reason}")
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Port call status cannot change from {from} to {to}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
