// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use portlink::{CoreError, StoreError};
use portlink_domain::{DomainError, RejectionKind};
use portlink_persistence::PersistenceError;
use tracing::error;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A booking rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: RejectionKind,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request collides with existing data (duplicate code, referenced row).
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred. The message is safe to show to clients.
    Internal {
        /// A generic description of the failure.
        message: String,
    },
}

impl ApiError {
    /// Stable machine-readable category used in error bodies.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DomainRuleViolation { rule, .. } => rule.as_str(),
            Self::InvalidInput { .. } => "invalid_input",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal",
        }
    }

    /// HTTP status code for this error.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::DomainRuleViolation { rule, .. } => rule.http_status_hint(),
            Self::InvalidInput { .. } => 400,
            Self::ResourceNotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Internal { .. } => 500,
        }
    }

    /// The client-facing message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::DomainRuleViolation { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::Conflict { message }
            | Self::Internal { message } => message,
        }
    }

    pub(crate) fn not_found(resource_type: &str, id: i64) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: format!("{resource_type} with id {id} was not found"),
        }
    }

    pub(crate) fn internal() -> Self {
        Self::Internal {
            message: String::from(INTERNAL_MESSAGE),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::NotFound { entity, .. } => ApiError::ResourceNotFound {
            resource_type: entity.as_str().to_string(),
            message,
        },
        DomainError::InvalidField { field, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::InvalidStatus { kind, .. } => ApiError::InvalidInput {
            field: kind.replace(' ', "_"),
            message,
        },
        DomainError::InvalidTimestamp { .. } => ApiError::InvalidInput {
            field: String::from("timestamp"),
            message,
        },
        other => ApiError::DomainRuleViolation {
            rule: other.kind(),
            message,
        },
    }
}

/// Translates a store failure into an API error.
///
/// Backend detail is logged and replaced by a generic message.
#[must_use]
pub fn translate_store_error(err: StoreError) -> ApiError {
    if let StoreError::Backend(detail) = &err {
        error!(error = %detail, "Store failure");
    }
    hide_store_detail(err)
}

/// Translates a core error into an API error.
///
/// The booking service has already logged store failures, so they are
/// not logged again here.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Rejected(domain_err) => translate_domain_error(domain_err),
        CoreError::Store(store_err) => hide_store_detail(store_err),
    }
}

fn hide_store_detail(err: StoreError) -> ApiError {
    match err {
        StoreError::Conflict(message) => ApiError::Conflict { message },
        StoreError::Backend(_) => ApiError::internal(),
    }
}

/// Translates a persistence error from a direct query or mutation.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(detail) => ApiError::Conflict {
            message: format!("A record with the same unique value already exists ({detail})"),
        },
        PersistenceError::BerthReferenced { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::internal()
        }
    }
}
