// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validate-then-write orchestration for port calls.
//!
//! Every mutation holds the lock of the affected berth(s) across
//! validation and the store write. Events are published only after the
//! write has succeeded.

use crate::error::CoreError;
use crate::events::{EventNotifier, PortEvent};
use crate::locks::{BerthGuard, BerthLocks};
use crate::store::{EntityStore, StoreError};
use crate::validator::{BookingRequest, BookingValidator, ValidationOutcome, validate_booking};
use portlink_domain::{
    ConflictScope, DomainError, EntityKind, PortCall, PortCallStatus, TransitionPolicy,
    Unrestricted, ensure_transition_allowed, validate_port_call_fields,
};
use tracing::{debug, error, info};

/// Creates, updates, approves and deletes port calls.
pub struct BookingService<S, N, P = Unrestricted> {
    store: S,
    notifier: N,
    policy: P,
    locks: BerthLocks,
}

impl<S: EntityStore, N: EventNotifier> BookingService<S, N, Unrestricted> {
    /// Creates a service that allows any status transition.
    #[must_use]
    pub fn new(store: S, notifier: N) -> Self {
        Self::with_policy(store, notifier, Unrestricted)
    }
}

impl<S: EntityStore, N: EventNotifier, P: TransitionPolicy> BookingService<S, N, P> {
    /// Creates a service with a custom status transition policy.
    #[must_use]
    pub fn with_policy(store: S, notifier: N, policy: P) -> Self {
        Self {
            store,
            notifier,
            policy,
            locks: BerthLocks::new(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Holds the booking locks of the given berths.
    ///
    /// Callers that change a berth's status or dimensions take this guard
    /// so the change cannot interleave with a booking on that berth.
    pub async fn lock_berths(&self, berth_ids: &[i64]) -> BerthGuard {
        self.locks.lock(berth_ids).await
    }

    /// Validates and stores a new port call.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Rejected` if a field or booking rule fails, or
    /// `CoreError::Store` if the store fails.
    pub async fn create(&self, port_call: PortCall) -> Result<PortCall, CoreError> {
        let result: Result<PortCall, CoreError> = async {
            validate_port_call_fields(&port_call)?;

            let _guard: BerthGuard = self.locks.lock(&[port_call.berth_id]).await;
            BookingValidator::new(&self.store)
                .validate(&BookingRequest::from(&port_call), None)
                .await?;
            let created: PortCall = self.store.create_booking(&port_call).await?;
            Ok::<PortCall, CoreError>(created)
        }
        .await;

        let created: PortCall = log_outcome("create", None, result)?;
        info!(
            port_call_id = ?created.port_call_id,
            berth_id = created.berth_id,
            vessel_id = created.vessel_id,
            status = %created.status,
            "Port call created"
        );
        self.notifier.publish(PortEvent::PortCallCreated {
            port_call: created.clone(),
        });
        Ok(created)
    }

    /// Replaces a port call.
    ///
    /// The booking rules run again only if the vessel, the berth or the
    /// estimated window changed; status, cargo, notes, delay reason, priority and
    /// actual times are applied without re-validation. The transition
    /// policy is always consulted.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Rejected` with `NotFound` if the port call does
    /// not exist, or with the first broken rule.
    pub async fn update(
        &self,
        port_call_id: i64,
        changes: PortCall,
    ) -> Result<PortCall, CoreError> {
        let result: Result<PortCall, CoreError> = async {
            validate_port_call_fields(&changes)?;

            let before: PortCall = self.require_booking(port_call_id).await?;
            let _guard: BerthGuard = self
                .locks
                .lock(&[before.berth_id, changes.berth_id])
                .await;
            let current: PortCall = self.require_booking(port_call_id).await?;

            ensure_transition_allowed(&self.policy, current.status, changes.status)?;

            if current.schedule_differs(&changes) {
                BookingValidator::new(&self.store)
                    .validate(&BookingRequest::from(&changes), Some(port_call_id))
                    .await?;
            } else {
                debug!(port_call_id, "Schedule unchanged, skipping booking checks");
            }

            self.store
                .update_booking(port_call_id, &changes)
                .await?
                .ok_or_else(|| port_call_not_found(port_call_id))
        }
        .await;

        let updated: PortCall = log_outcome("update", Some(port_call_id), result)?;
        info!(port_call_id, status = %updated.status, "Port call updated");
        self.notifier.publish(PortEvent::PortCallUpdated {
            port_call: updated.clone(),
        });
        Ok(updated)
    }

    /// Approves a queued request by moving it to `Approaching`.
    ///
    /// Unlike a status-only update, approval always re-runs the booking
    /// rules. Other queued requests do not block an approval; approved
    /// bookings do.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Rejected` with `NotFound`, a transition refusal
    /// or the first broken rule.
    pub async fn approve(&self, port_call_id: i64) -> Result<PortCall, CoreError> {
        let result: Result<PortCall, CoreError> = async {
            let (_guard, current) = self.lock_current_berth(port_call_id).await?;

            ensure_transition_allowed(&self.policy, current.status, PortCallStatus::Approaching)?;

            let mut approved: PortCall = current;
            approved.status = PortCallStatus::Approaching;
            BookingValidator::new(&self.store)
                .validate_in_scope(
                    &BookingRequest::from(&approved),
                    ConflictScope::Committed,
                    Some(port_call_id),
                )
                .await?;

            self.store
                .update_booking(port_call_id, &approved)
                .await?
                .ok_or_else(|| port_call_not_found(port_call_id))
        }
        .await;

        let approved: PortCall = log_outcome("approve", Some(port_call_id), result)?;
        info!(port_call_id, berth_id = approved.berth_id, "Port call approved");
        self.notifier.publish(PortEvent::PortCallUpdated {
            port_call: approved.clone(),
        });
        Ok(approved)
    }

    /// Deletes a port call, freeing its slot.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Rejected` with `NotFound` if the port call does
    /// not exist, or `CoreError::Store` if the store fails.
    pub async fn delete(&self, port_call_id: i64) -> Result<(), CoreError> {
        let result: Result<(), CoreError> = async {
            if self.store.delete_booking(port_call_id).await? {
                Ok(())
            } else {
                Err(port_call_not_found(port_call_id))
            }
        }
        .await;

        log_outcome("delete", Some(port_call_id), result)?;
        info!(port_call_id, "Port call deleted");
        self.notifier
            .publish(PortEvent::PortCallDeleted { port_call_id });
        Ok(())
    }

    /// Dry-run validation; nothing is locked or written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store fails.
    pub async fn check(
        &self,
        port_call: &PortCall,
        exclude_booking_id: Option<i64>,
    ) -> Result<ValidationOutcome, StoreError> {
        validate_booking(
            &self.store,
            port_call.vessel_id,
            port_call.berth_id,
            port_call.estimated_arrival,
            port_call.estimated_departure,
            port_call.status,
            exclude_booking_id,
        )
        .await
    }

    /// Locks the berth a port call is on and returns the port call as read
    /// under that lock.
    ///
    /// A concurrent update may move the booking while this waits; the lock
    /// is then released and the new berth locked instead.
    async fn lock_current_berth(
        &self,
        port_call_id: i64,
    ) -> Result<(BerthGuard, PortCall), CoreError> {
        let mut berth_id: i64 = self.require_booking(port_call_id).await?.berth_id;
        loop {
            let guard: BerthGuard = self.locks.lock(&[berth_id]).await;
            let current: PortCall = self.require_booking(port_call_id).await?;
            if current.berth_id == berth_id {
                return Ok((guard, current));
            }
            debug!(
                port_call_id,
                from = berth_id,
                to = current.berth_id,
                "Port call moved while waiting for its berth, relocking"
            );
            berth_id = current.berth_id;
        }
    }

    async fn require_booking(&self, port_call_id: i64) -> Result<PortCall, CoreError> {
        self.store
            .get_booking(port_call_id)
            .await?
            .ok_or_else(|| port_call_not_found(port_call_id))
    }
}

fn port_call_not_found(port_call_id: i64) -> CoreError {
    CoreError::Rejected(DomainError::NotFound {
        entity: EntityKind::PortCall,
        id: port_call_id,
    })
}

/// Logs a failed operation at the level its cause deserves.
///
/// Rejections are expected outcomes; store failures are faults.
fn log_outcome<T>(
    operation: &'static str,
    port_call_id: Option<i64>,
    result: Result<T, CoreError>,
) -> Result<T, CoreError> {
    match &result {
        Ok(_) => {}
        Err(CoreError::Rejected(reason)) => {
            info!(
                operation,
                ?port_call_id,
                kind = %reason.kind(),
                "Port call {operation} rejected: {reason}"
            );
        }
        Err(CoreError::Store(err)) => {
            error!(operation, ?port_call_id, error = %err, "Port call {operation} failed");
        }
    }
    result
}
