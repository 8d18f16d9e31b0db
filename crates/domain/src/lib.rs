// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking_window;
mod conflict;
mod error;
mod status;
mod timestamp;
mod transition;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking_window::BookingWindow;
pub use conflict::{ConflictScope, find_conflicting_booking};
pub use error::{Dimension, DomainError, EntityKind, RejectionKind};
pub use status::{BerthStatus, PortCallStatus, VesselStatus, VesselType};
pub use timestamp::UtcTimestamp;
pub use transition::{TransitionPolicy, Unrestricted, ensure_transition_allowed};
pub use types::{Berth, PortCall, PortCallDetails, Vessel};
pub use validation::{
    MAX_DRAFT_METERS, MAX_PRIORITY, MAX_VESSEL_BEAM_METERS, MAX_VESSEL_LENGTH_METERS,
    MIN_PRIORITY, ensure_berth_accepts_bookings, ensure_no_overlap, ensure_valid_time_range,
    ensure_vessel_fits_berth, validate_berth_fields, validate_port_call_fields,
    validate_vessel_fields,
};
