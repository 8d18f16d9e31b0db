// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! UTC-normalized instants.
//!
//! Every schedule comparison in the booking rules happens on `UtcTimestamp`
//! values. Construction from an arbitrary offset converts to UTC, so two
//! timestamps that describe the same instant always compare equal.
//! Precision is truncated to microseconds, the resolution of storage.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime, UtcOffset};

/// An instant in time, always held at UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcTimestamp(OffsetDateTime);

impl UtcTimestamp {
    /// Creates a timestamp, converting the value to UTC.
    #[must_use]
    pub fn new(value: OffsetDateTime) -> Self {
        let utc: OffsetDateTime = value.to_offset(UtcOffset::UTC);
        let micros_only: u32 = utc.nanosecond() / 1_000 * 1_000;
        Self(utc.replace_nanosecond(micros_only).unwrap_or(utc))
    }

    /// Returns the current instant.
    #[must_use]
    pub fn now() -> Self {
        Self::new(OffsetDateTime::now_utc())
    }

    /// Parses an RFC 3339 timestamp with any offset.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if the value is not RFC 3339.
    pub fn parse_rfc3339(value: &str) -> Result<Self, DomainError> {
        OffsetDateTime::parse(value, &Rfc3339)
            .map(Self::new)
            .map_err(|e| DomainError::InvalidTimestamp {
                value: value.to_string(),
                reason: e.to_string(),
            })
    }

    /// Formats the timestamp as RFC 3339 with a `Z` suffix.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if the year cannot be
    /// represented in RFC 3339.
    pub fn to_rfc3339(&self) -> Result<String, DomainError> {
        self.0
            .format(&Rfc3339)
            .map_err(|e| DomainError::InvalidTimestamp {
                value: self.0.to_string(),
                reason: e.to_string(),
            })
    }

    /// Returns the underlying `OffsetDateTime` (offset is always UTC).
    #[must_use]
    pub const fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }

    /// Adds a duration, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        self.0.checked_add(duration).map(Self::new)
    }

    /// Returns the signed duration from `earlier` to `self`.
    #[must_use]
    pub fn since(self, earlier: Self) -> Duration {
        self.0 - earlier.0
    }
}

impl From<OffsetDateTime> for UtcTimestamp {
    fn from(value: OffsetDateTime) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.format(&Rfc3339) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for UtcTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted: String = self.to_rfc3339().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for UtcTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        Self::parse_rfc3339(&raw).map_err(serde::de::Error::custom)
    }
}
