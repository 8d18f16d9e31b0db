// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use portlink_domain::DomainError;

/// Errors that can occur while validating or applying a booking.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The request was rejected by a booking rule. Expected and user-facing.
    Rejected(DomainError),
    /// The entity store failed. Unexpected.
    Store(StoreError),
}

impl CoreError {
    /// Returns true if this is a rule rejection rather than a fault.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "Booking rejected: {err}"),
            Self::Store(err) => write!(f, "Store failure: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Rejected(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
