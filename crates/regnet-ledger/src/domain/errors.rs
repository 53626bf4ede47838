//! # Ledger Errors

use thiserror::Error;

/// Errors from building or parsing composite keys.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Input is not a well-formed sequence of JSON scalar tokens.
    #[error("malformed composite key {input:?}: {reason}")]
    Malformed { input: String, reason: String },

    /// A token decoded to something other than a string or integer.
    #[error("unsupported key part: {0}")]
    UnsupportedPart(String),

    /// A token is valid JSON but not in canonical form.
    #[error("non-canonical key part: {0}")]
    NonCanonical(String),

    /// Namespace is empty or contains the physical delimiter.
    #[error("invalid namespace: {0:?}")]
    InvalidNamespace(String),
}

/// Errors surfaced by the ledger boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Key could not be encoded or decoded.
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// Iterator was used after `close`.
    #[error("state iterator already closed")]
    IteratorClosed,

    /// Transaction read stale state or belongs to another ledger.
    #[error("transaction {tx_id} cannot be committed: {reason}")]
    CommitRejected { tx_id: String, reason: String },

    /// Backend failure.
    #[error("ledger backend error: {0}")]
    Backend(String),
}
