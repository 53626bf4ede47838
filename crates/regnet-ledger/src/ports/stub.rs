//! # Transaction Stub (Driven Port)
//!
//! The view of the ledger a contract sees while one transaction executes.
//! Every read and write made through a stub belongs to that transaction and
//! becomes visible to other transactions only when the host commits it.

use crate::domain::errors::LedgerError;
use crate::domain::key::CompositeKey;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A single record returned by a partial-key scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Full composite key of the record (without namespace).
    pub key: CompositeKey,
    /// Stored bytes.
    pub value: Vec<u8>,
}

/// Cursor over the results of a partial-key scan.
///
/// Callers must `close` the iterator once they are done with it, on success
/// and on error paths alike.
#[async_trait]
pub trait StateIterator: Send {
    /// Next record in key order, or `None` when the scan is exhausted.
    async fn next(&mut self) -> Result<Option<LedgerEntry>, LedgerError>;

    /// Release the scan.
    async fn close(self: Box<Self>) -> Result<(), LedgerError>;
}

/// Ledger access for one executing transaction.
///
/// ## Implementation Notes
///
/// - Writes are buffered by the host and applied all-or-nothing on commit.
/// - Reads observe the transaction's own earlier writes.
/// - Scans iterate in ascending physical-key order.
#[async_trait]
pub trait LedgerStub: Send + Sync {
    /// Read the value stored at an exact key.
    async fn get_state(
        &self,
        namespace: &str,
        key: &CompositeKey,
    ) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write a value at an exact key, overwriting any previous value.
    async fn put_state(
        &self,
        namespace: &str,
        key: &CompositeKey,
        value: Vec<u8>,
    ) -> Result<(), LedgerError>;

    /// Remove the value at an exact key. Removing an absent key is a no-op.
    async fn delete_state(&self, namespace: &str, key: &CompositeKey) -> Result<(), LedgerError>;

    /// Scan every record whose key starts with `partial`.
    async fn get_state_by_partial_key(
        &self,
        namespace: &str,
        partial: &CompositeKey,
    ) -> Result<Box<dyn StateIterator>, LedgerError>;

    /// Transaction identifier assigned by the host.
    fn tx_id(&self) -> &str;

    /// Timestamp assigned to the transaction by the submitting client.
    fn tx_timestamp(&self) -> DateTime<Utc>;

    /// Organization (MSP) identifier of the invoking client.
    fn creator_msp_id(&self) -> &str;
}
