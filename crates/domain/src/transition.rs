// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Port call status transitions.
//!
//! Operators may currently set any status on a port call. The decision is
//! isolated behind `TransitionPolicy` so a stricter lifecycle can be
//! plugged in without touching the booking checks.

use crate::error::DomainError;
use crate::status::PortCallStatus;

/// Decides whether a port call may move between two statuses.
pub trait TransitionPolicy: Send + Sync {
    /// Returns true if `from → to` is permitted.
    fn can_transition(&self, from: PortCallStatus, to: PortCallStatus) -> bool;
}

/// Permits every transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl TransitionPolicy for Unrestricted {
    fn can_transition(&self, _from: PortCallStatus, _to: PortCallStatus) -> bool {
        true
    }
}

/// Checks a status change against a policy.
///
/// Keeping the current status is always allowed.
///
/// # Errors
///
/// Returns `DomainError::InvalidStatusTransition` if the policy refuses.
pub fn ensure_transition_allowed<P: TransitionPolicy + ?Sized>(
    policy: &P,
    from: PortCallStatus,
    to: PortCallStatus,
) -> Result<(), DomainError> {
    if from == to || policy.can_transition(from, to) {
        Ok(())
    } else {
        Err(DomainError::InvalidStatusTransition { from, to })
    }
}
