// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Double-booking detection.
//!
//! Which existing bookings can block a proposal depends on the status of
//! the proposal: queued `Scheduled` requests may overlap each other and
//! only conflict with approved bookings, while any other proposal
//! conflicts with every booking that still holds the berth.

use crate::booking_window::BookingWindow;
use crate::status::PortCallStatus;
use crate::types::PortCallDetails;

/// The set of existing bookings a proposal must not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictScope {
    /// Every booking that is not completed or cancelled.
    AllOpen,
    /// Only approved bookings (approaching through in progress, or delayed).
    Committed,
}

impl ConflictScope {
    /// Selects the scope for a proposal with the given status.
    #[must_use]
    pub const fn for_status(proposed: PortCallStatus) -> Self {
        if proposed.is_pending() {
            Self::Committed
        } else {
            Self::AllOpen
        }
    }

    /// Returns true if an existing booking in `status` can block.
    #[must_use]
    pub const fn includes(&self, status: PortCallStatus) -> bool {
        match self {
            Self::AllOpen => !status.is_closed(),
            Self::Committed => status.is_committed(),
        }
    }

    /// Statuses a store query may filter out before the overlap test.
    #[must_use]
    pub const fn excluded_statuses(&self) -> &'static [PortCallStatus] {
        match self {
            Self::AllOpen => &[PortCallStatus::Completed, PortCallStatus::Cancelled],
            Self::Committed => &[
                PortCallStatus::Scheduled,
                PortCallStatus::Completed,
                PortCallStatus::Cancelled,
            ],
        }
    }
}

/// Finds the first existing booking that blocks the proposed window.
///
/// # Arguments
///
/// * `proposed` - The requested occupancy window
/// * `scope` - Which existing statuses can block
/// * `exclude_id` - The booking being updated, if any
/// * `existing` - Bookings at the same berth, in store order
///
/// # Returns
///
/// The first overlapping candidate, or `None` if the berth is free.
#[must_use]
pub fn find_conflicting_booking<'a>(
    proposed: &BookingWindow,
    scope: ConflictScope,
    exclude_id: Option<i64>,
    existing: &'a [PortCallDetails],
) -> Option<&'a PortCallDetails> {
    existing.iter().find(|candidate| {
        let port_call = &candidate.port_call;
        let excluded: bool = exclude_id.is_some() && port_call.port_call_id == exclude_id;
        !excluded && scope.includes(port_call.status) && port_call.window().overlaps(proposed)
    })
}
