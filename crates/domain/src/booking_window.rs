// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Berth occupancy windows.
//!
//! A booking occupies its berth over the half-open interval
//! `[arrival, departure)`. A booking that ends exactly when another
//! begins does not overlap it.

use crate::timestamp::UtcTimestamp;
use serde::{Deserialize, Serialize};
use time::Duration;

/// The estimated occupancy of a berth by one port call.
///
/// The constructor does not enforce ordering; a malformed window is
/// reported by the booking rules, after the overlap check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    arrival: UtcTimestamp,
    departure: UtcTimestamp,
}

impl BookingWindow {
    /// Creates a window from estimated arrival and departure.
    #[must_use]
    pub const fn new(arrival: UtcTimestamp, departure: UtcTimestamp) -> Self {
        Self {
            arrival,
            departure,
        }
    }

    #[must_use]
    pub const fn arrival(&self) -> UtcTimestamp {
        self.arrival
    }

    #[must_use]
    pub const fn departure(&self) -> UtcTimestamp {
        self.departure
    }

    /// Returns true if departure is strictly after arrival.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.departure > self.arrival
    }

    /// Returns true if the two half-open windows intersect.
    ///
    /// The relation is symmetric.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.arrival < other.departure && self.departure > other.arrival
    }

    /// Length of the window. Negative for malformed windows.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.departure.since(self.arrival)
    }
}
