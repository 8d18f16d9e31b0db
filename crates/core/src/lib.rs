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

mod booking;
mod error;
mod events;
mod locks;
mod store;
mod validator;

#[cfg(test)]
mod tests;

pub use booking::BookingService;
pub use error::CoreError;
pub use events::{EventNotifier, NoopNotifier, PortEvent};
pub use locks::{BerthGuard, BerthLocks};
pub use store::{EntityStore, StoreError};
pub use validator::{
    BookingRequest, BookingValidator, Rejection, ValidationOutcome, validate_booking,
};
