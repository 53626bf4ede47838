//! # Ledger Host (Driving Port)
//!
//! The hosting platform opens a transaction per invocation, hands the
//! contract a [`LedgerStub`], and commits or discards the write set.

use crate::domain::errors::LedgerError;
use crate::ports::stub::LedgerStub;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verified identity of the client submitting a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIdentity {
    /// Membership service provider id of the client's organization.
    pub msp_id: String,
}

impl ClientIdentity {
    /// Identity belonging to the given organization.
    pub fn new(msp_id: impl Into<String>) -> Self {
        Self {
            msp_id: msp_id.into(),
        }
    }
}

/// Summary of a committed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReceipt {
    /// Transaction identifier.
    pub tx_id: String,
    /// Ledger height after the commit.
    pub height: u64,
    /// Number of keys written.
    pub puts: usize,
    /// Number of keys deleted.
    pub deletes: usize,
}

/// A ledger that executes transactions atomically.
///
/// Dropping a transaction without committing it discards its writes.
pub trait LedgerHost: Send + Sync {
    /// Transaction handle given to contract code.
    type Transaction: LedgerStub + 'static;

    /// Open a transaction for `identity`, timestamped now.
    fn begin(&self, identity: ClientIdentity) -> Self::Transaction {
        self.begin_at(identity, Utc::now())
    }

    /// Open a transaction for `identity` with an explicit timestamp.
    fn begin_at(&self, identity: ClientIdentity, timestamp: DateTime<Utc>) -> Self::Transaction;

    /// Apply every buffered write of `tx` at once.
    fn commit(&self, tx: Self::Transaction) -> Result<CommitReceipt, LedgerError>;
}
