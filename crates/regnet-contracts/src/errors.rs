//! # Error Types
//!
//! Every contract operation either returns its resulting record or fails
//! with exactly one [`RegistryError`]. Any error aborts the enclosing
//! transaction.

use crate::domain::access::CallerRole;
use crate::domain::entities::EntityKind;
use regnet_ledger::LedgerError;
use std::fmt;
use thiserror::Error;

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Errors raised by contract operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller's organization does not hold the role the operation requires.
    #[error("{operation}: requestor from {msp_id} is not allowed to perform this action (requires {required})")]
    Unauthorized {
        operation: &'static str,
        msp_id: String,
        required: CallerRole,
    },

    /// Expected entity or request is absent.
    #[error("{entity} not found: {key}")]
    NotFound { entity: EntityKind, key: String },

    /// Create-only write found an existing record.
    #[error("{entity} already exists: {key}")]
    AlreadyExists { entity: EntityKind, key: String },

    /// Entity is not in the state the operation requires.
    #[error("{entity} {key} is in an invalid state: {reason}")]
    InvalidState {
        entity: EntityKind,
        key: String,
        reason: String,
    },

    /// Buyer balance below the price.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    /// Recharge transaction id is not a recognized voucher.
    #[error("invalid bank transaction id: {0}")]
    InvalidVoucher(String),

    /// Caller is not the recorded owner.
    #[error("access denied: {requestor} is not the owner of the property (owner: {owner})")]
    Forbidden { requestor: String, owner: String },

    /// Stored bytes could not be decoded.
    #[error("failed to deserialize {entity} at {key}: {reason}")]
    Deserialization {
        entity: EntityKind,
        key: String,
        reason: String,
    },

    /// Entity could not be encoded.
    #[error("failed to serialize {entity}: {reason}")]
    Serialization { entity: EntityKind, reason: String },

    /// A partial key matched more than one live record.
    #[error("partial key {prefix} matches more than one {entity}")]
    AmbiguousKey { entity: EntityKind, prefix: String },

    /// Argument could not be interpreted.
    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Function is not exposed by the addressed contract.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// Ledger boundary failure.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl RegistryError {
    /// Stable classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::InvalidVoucher(_) => ErrorKind::InvalidVoucher,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Deserialization { .. } => ErrorKind::Deserialization,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::AmbiguousKey { .. } => ErrorKind::AmbiguousKey,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::UnknownFunction(_) => ErrorKind::UnknownFunction,
            Self::Ledger(_) => ErrorKind::Ledger,
        }
    }

    pub(crate) fn not_found(entity: EntityKind, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub(crate) fn already_exists(entity: EntityKind, key: impl ToString) -> Self {
        Self::AlreadyExists {
            entity,
            key: key.to_string(),
        }
    }
}

/// Classification of [`RegistryError`] used for metrics labels and matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    AlreadyExists,
    InvalidState,
    InsufficientFunds,
    InvalidVoucher,
    Forbidden,
    Deserialization,
    Serialization,
    AmbiguousKey,
    InvalidArgument,
    UnknownFunction,
    Ledger,
}

impl ErrorKind {
    /// Label form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::InvalidState => "invalid_state",
            Self::InsufficientFunds => "insufficient_funds",
            Self::InvalidVoucher => "invalid_voucher",
            Self::Forbidden => "forbidden",
            Self::Deserialization => "deserialization",
            Self::Serialization => "serialization",
            Self::AmbiguousKey => "ambiguous_key",
            Self::InvalidArgument => "invalid_argument",
            Self::UnknownFunction => "unknown_function",
            Self::Ledger => "ledger",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
