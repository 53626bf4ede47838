//! # regnet-ledger
//!
//! Ledger boundary for the property registration network.
//!
//! ## Role in System
//!
//! - **Key Codec**: reversible composite keys shared by every entity namespace
//! - **Driven Port**: `LedgerStub`, the per-transaction view given to contracts
//! - **Driving Port**: `LedgerHost`, begin/commit of atomic transactions
//! - **Adapter**: `InMemoryLedger`, a transactional in-memory world state
//!
//! ## Guarantees
//!
//! | Guarantee | Enforcement Location |
//! |-----------|---------------------|
//! | Key encoding is injective and reversible | `domain/key.rs` - `CompositeKey::encode` / `decode` |
//! | Partial scans match whole parts only | `domain/key.rs` - `CompositeKey::to_physical` |
//! | All writes of a transaction commit together | `adapters/memory.rs` - `LedgerHost::commit` |
//! | Uncommitted transactions leave no trace | `adapters/memory.rs` - write set dropped with the transaction |
//! | Stale reads never commit | `adapters/memory.rs` - read set and scanned ranges validated at commit |
//!
//! ## Usage Example
//!
//! ```ignore
//! use regnet_ledger::prelude::*;
//!
//! let ledger = InMemoryLedger::new();
//! let tx = ledger.begin(ClientIdentity::new("usersMSP"));
//! tx.put_state("ns", &CompositeKey::new(["a"]), b"v".to_vec()).await?;
//! ledger.commit(tx)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod domain;
pub mod ports;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{InMemoryLedger, MemoryStateIterator, MemoryTransaction};
    pub use crate::domain::{CompositeKey, KeyError, KeyPart, LedgerError, PART_SEPARATOR};
    pub use crate::ports::{
        ClientIdentity, CommitReceipt, LedgerEntry, LedgerHost, LedgerStub, StateIterator,
    };
}

pub use prelude::*;
