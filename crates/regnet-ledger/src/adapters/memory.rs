//! # In-Memory Ledger
//!
//! Transactional world state held in memory. Used by tests and by the
//! development host. Each transaction buffers its writes in a private write
//! set; `commit` applies the whole set under a single lock, so other
//! transactions observe either all of it or none of it.
//!
//! Commit also validates the read set: every committed value the transaction
//! read, and every committed range it scanned, must be unchanged. Otherwise
//! the commit is rejected and nothing is applied, so concurrent transactions
//! touching the same keys behave as if they ran one after another.

use crate::domain::errors::LedgerError;
use crate::domain::key::CompositeKey;
use crate::ports::host::{ClientIdentity, CommitReceipt, LedgerHost};
use crate::ports::stub::{LedgerEntry, LedgerStub, StateIterator};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

type WorldState = BTreeMap<String, Vec<u8>>;
type RangeSnapshot = Vec<(String, Vec<u8>)>;

fn committed_range(world: &WorldState, prefix: &str) -> RangeSnapshot {
    world
        .range(prefix.to_string()..)
        .take_while(|(physical, _)| physical.starts_with(prefix))
        .map(|(physical, value)| (physical.clone(), value.clone()))
        .collect()
}

fn describe_physical(physical: &str) -> String {
    match CompositeKey::from_physical(physical) {
        Ok((namespace, key)) => format!("{namespace}/{key}"),
        Err(_) => physical.escape_debug().to_string(),
    }
}

/// Buffered write in a transaction's write set.
#[derive(Clone, Debug, PartialEq, Eq)]
enum PendingWrite {
    Put(Vec<u8>),
    Delete,
}

#[derive(Debug, Default)]
struct Shared {
    world: RwLock<WorldState>,
    height: RwLock<u64>,
}

// =============================================================================
// LEDGER
// =============================================================================

/// In-memory ledger host.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLedger {
    shared: Arc<Shared>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed records across all namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.world.read().len()
    }

    /// Returns true if nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.world.read().is_empty()
    }

    /// Number of committed transactions.
    #[must_use]
    pub fn height(&self) -> u64 {
        *self.shared.height.read()
    }

    /// Committed value at an exact key, bypassing any transaction.
    pub fn committed_state(
        &self,
        namespace: &str,
        key: &CompositeKey,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        let physical = key.to_physical(namespace)?;
        Ok(self.shared.world.read().get(&physical).cloned())
    }

    /// Committed keys within a namespace, in order.
    pub fn committed_keys(&self, namespace: &str) -> Result<Vec<CompositeKey>, LedgerError> {
        let prefix = CompositeKey::default().to_physical(namespace)?;
        let world = self.shared.world.read();
        world
            .range(prefix.clone()..)
            .take_while(|(physical, _)| physical.starts_with(&prefix))
            .map(|(physical, _)| {
                CompositeKey::from_physical(physical)
                    .map(|(_, key)| key)
                    .map_err(LedgerError::from)
            })
            .collect()
    }
}

impl LedgerHost for InMemoryLedger {
    type Transaction = MemoryTransaction;

    fn begin_at(&self, identity: ClientIdentity, timestamp: DateTime<Utc>) -> MemoryTransaction {
        let tx_id = Uuid::new_v4().to_string();
        debug!(tx_id = %tx_id, msp_id = %identity.msp_id, "Transaction opened");
        MemoryTransaction {
            shared: Arc::clone(&self.shared),
            tx_id,
            timestamp,
            identity,
            writes: Mutex::new(BTreeMap::new()),
            reads: Mutex::new(BTreeMap::new()),
            scans: Mutex::new(Vec::new()),
        }
    }

    fn commit(&self, tx: MemoryTransaction) -> Result<CommitReceipt, LedgerError> {
        if !Arc::ptr_eq(&self.shared, &tx.shared) {
            return Err(LedgerError::CommitRejected {
                tx_id: tx.tx_id,
                reason: "transaction was opened on a different ledger".to_string(),
            });
        }

        let writes = tx.writes.into_inner();
        let reads = tx.reads.into_inner();
        let scans = tx.scans.into_inner();
        let mut puts = 0;
        let mut deletes = 0;

        let mut world = self.shared.world.write();

        for (physical, observed) in &reads {
            if world.get(physical) != observed.as_ref() {
                debug!(tx_id = %tx.tx_id, "Read conflict");
                return Err(LedgerError::CommitRejected {
                    tx_id: tx.tx_id,
                    reason: format!("read conflict on {}", describe_physical(physical)),
                });
            }
        }
        for (prefix, observed) in &scans {
            if committed_range(&world, prefix) != *observed {
                debug!(tx_id = %tx.tx_id, "Range conflict");
                return Err(LedgerError::CommitRejected {
                    tx_id: tx.tx_id,
                    reason: format!("range conflict under {}", describe_physical(prefix)),
                });
            }
        }

        let mut height = self.shared.height.write();
        for (physical, write) in writes {
            match write {
                PendingWrite::Put(value) => {
                    world.insert(physical, value);
                    puts += 1;
                }
                PendingWrite::Delete => {
                    world.remove(&physical);
                    deletes += 1;
                }
            }
        }
        *height += 1;

        debug!(tx_id = %tx.tx_id, puts, deletes, height = *height, "Transaction committed");

        Ok(CommitReceipt {
            tx_id: tx.tx_id,
            height: *height,
            puts,
            deletes,
        })
    }
}

// =============================================================================
// TRANSACTION
// =============================================================================

/// A transaction against an [`InMemoryLedger`].
///
/// Dropping it without committing discards the write set.
#[derive(Debug)]
pub struct MemoryTransaction {
    shared: Arc<Shared>,
    tx_id: String,
    timestamp: DateTime<Utc>,
    identity: ClientIdentity,
    writes: Mutex<BTreeMap<String, PendingWrite>>,
    // Committed values observed outside the write set, by physical key.
    reads: Mutex<BTreeMap<String, Option<Vec<u8>>>>,
    scans: Mutex<Vec<(String, RangeSnapshot)>>,
}

impl MemoryTransaction {
    /// Number of keys with a buffered write.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.writes.lock().len()
    }

    /// Merge the write set over committed state for every key under `prefix`.
    fn merged_scan(&self, prefix: &str) -> Vec<(String, Vec<u8>)> {
        let committed = committed_range(&self.shared.world.read(), prefix);
        let writes = self.writes.lock();

        let mut merged: BTreeMap<String, Vec<u8>> = committed.iter().cloned().collect();
        self.scans.lock().push((prefix.to_string(), committed));

        for (physical, write) in writes
            .range(prefix.to_string()..)
            .take_while(|(physical, _)| physical.starts_with(prefix))
        {
            match write {
                PendingWrite::Put(value) => {
                    merged.insert(physical.clone(), value.clone());
                }
                PendingWrite::Delete => {
                    merged.remove(physical);
                }
            }
        }

        merged.into_iter().collect()
    }
}

#[async_trait]
impl LedgerStub for MemoryTransaction {
    async fn get_state(
        &self,
        namespace: &str,
        key: &CompositeKey,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        let physical = key.to_physical(namespace)?;
        if let Some(write) = self.writes.lock().get(&physical) {
            return Ok(match write {
                PendingWrite::Put(value) => Some(value.clone()),
                PendingWrite::Delete => None,
            });
        }
        let committed = self.shared.world.read().get(&physical).cloned();
        self.reads
            .lock()
            .entry(physical)
            .or_insert_with(|| committed.clone());
        Ok(committed)
    }

    async fn put_state(
        &self,
        namespace: &str,
        key: &CompositeKey,
        value: Vec<u8>,
    ) -> Result<(), LedgerError> {
        let physical = key.to_physical(namespace)?;
        self.writes.lock().insert(physical, PendingWrite::Put(value));
        Ok(())
    }

    async fn delete_state(&self, namespace: &str, key: &CompositeKey) -> Result<(), LedgerError> {
        let physical = key.to_physical(namespace)?;
        self.writes.lock().insert(physical, PendingWrite::Delete);
        Ok(())
    }

    async fn get_state_by_partial_key(
        &self,
        namespace: &str,
        partial: &CompositeKey,
    ) -> Result<Box<dyn StateIterator>, LedgerError> {
        let prefix = partial.to_physical(namespace)?;
        let entries = self
            .merged_scan(&prefix)
            .into_iter()
            .map(|(physical, value)| {
                let (_, key) = CompositeKey::from_physical(&physical)?;
                Ok(LedgerEntry { key, value })
            })
            .collect::<Result<VecDeque<_>, LedgerError>>()?;

        Ok(Box::new(MemoryStateIterator {
            entries,
            closed: false,
        }))
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn tx_timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn creator_msp_id(&self) -> &str {
        &self.identity.msp_id
    }
}

// =============================================================================
// ITERATOR
// =============================================================================

/// Snapshot iterator returned by [`MemoryTransaction`] scans.
#[derive(Debug)]
pub struct MemoryStateIterator {
    entries: VecDeque<LedgerEntry>,
    closed: bool,
}

#[async_trait]
impl StateIterator for MemoryStateIterator {
    async fn next(&mut self) -> Result<Option<LedgerEntry>, LedgerError> {
        if self.closed {
            return Err(LedgerError::IteratorClosed);
        }
        Ok(self.entries.pop_front())
    }

    async fn close(mut self: Box<Self>) -> Result<(), LedgerError> {
        self.closed = true;
        self.entries.clear();
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
