//! # Entity Stores
//!
//! Typed access to one entity namespace through the transaction stub.
//!
//! ## Semantics
//!
//! | Operation | Absent key | Present key |
//! |-----------|------------|-------------|
//! | `put` | writes | overwrites |
//! | `insert_new` | writes | `AlreadyExists` |
//! | `get` | `NotFound` | decoded record |
//! | `delete` | `NotFound` | removes |
//!
//! Partial-key lookups return the single live match and reject ambiguity.
//! Every scan is closed before returning, whatever the outcome.

mod property;
mod request;

use crate::domain::entities::{LedgerEntity, Property, Request, User};
use crate::errors::RegistryError;
use regnet_ledger::{CompositeKey, LedgerStub, StateIterator};
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Store of user records.
pub type UserStore<'a, L> = LedgerStore<'a, L, User>;
/// Store of pending requests.
pub type RequestStore<'a, L> = LedgerStore<'a, L, Request>;
/// Store of registered properties.
pub type PropertyStore<'a, L> = LedgerStore<'a, L, Property>;

/// Access to the records of entity class `E` within one transaction.
pub struct LedgerStore<'a, L: ?Sized, E> {
    stub: &'a L,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, L, E> LedgerStore<'a, L, E>
where
    L: LedgerStub + ?Sized,
    E: LedgerEntity,
{
    /// Store bound to `stub`.
    pub fn new(stub: &'a L) -> Self {
        Self {
            stub,
            _entity: PhantomData,
        }
    }

    /// Write `entity` under its key, overwriting any previous record.
    pub async fn put(&self, entity: &E) -> Result<(), RegistryError> {
        let key = entity.key();
        let bytes = serde_json::to_vec(entity).map_err(|e| RegistryError::Serialization {
            entity: E::KIND,
            reason: e.to_string(),
        })?;
        debug!(entity = %E::KIND, key = %key, "Writing record");
        self.stub.put_state(E::NAMESPACE, &key, bytes).await?;
        Ok(())
    }

    /// Write `entity` only if its key is unused.
    pub async fn insert_new(&self, entity: &E) -> Result<(), RegistryError> {
        let key = entity.key();
        if self.exists(&key).await? {
            return Err(RegistryError::already_exists(E::KIND, key));
        }
        self.put(entity).await
    }

    /// Whether a record is stored at `key`.
    pub async fn exists(&self, key: &CompositeKey) -> Result<bool, RegistryError> {
        Ok(self.stub.get_state(E::NAMESPACE, key).await?.is_some())
    }

    /// The record at `key`, if any.
    pub async fn find(&self, key: &CompositeKey) -> Result<Option<E>, RegistryError> {
        match self.stub.get_state(E::NAMESPACE, key).await? {
            Some(bytes) => decode::<E>(key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// The record at `key`.
    pub async fn get(&self, key: &CompositeKey) -> Result<E, RegistryError> {
        self.find(key)
            .await?
            .ok_or_else(|| RegistryError::not_found(E::KIND, key))
    }

    /// The single record whose key starts with `prefix`.
    pub async fn get_by_partial_key(&self, prefix: &CompositeKey) -> Result<E, RegistryError> {
        let mut matches = self.scan_matching(prefix, |_| true, 2).await?;
        match matches.len() {
            0 => Err(RegistryError::not_found(E::KIND, prefix)),
            1 => Ok(matches.remove(0)),
            _ => {
                warn!(entity = %E::KIND, prefix = %prefix, "Partial key matched several records");
                Err(RegistryError::AmbiguousKey {
                    entity: E::KIND,
                    prefix: prefix.encode(),
                })
            }
        }
    }

    /// Remove the record at `key`, which must exist.
    pub async fn delete(&self, key: &CompositeKey) -> Result<(), RegistryError> {
        if !self.exists(key).await? {
            return Err(RegistryError::not_found(E::KIND, key));
        }
        debug!(entity = %E::KIND, key = %key, "Deleting record");
        self.stub.delete_state(E::NAMESPACE, key).await?;
        Ok(())
    }

    /// Records under `prefix` accepted by `filter`, stopping after `limit`.
    pub(crate) async fn scan_matching<F>(
        &self,
        prefix: &CompositeKey,
        filter: F,
        limit: usize,
    ) -> Result<Vec<E>, RegistryError>
    where
        F: Fn(&E) -> bool + Send + Sync,
    {
        let mut iter = self.stub.get_state_by_partial_key(E::NAMESPACE, prefix).await?;
        let collected = collect_matches(&mut *iter, &filter, limit).await;
        let closed = iter.close().await;
        let matches = collected?;
        closed?;
        Ok(matches)
    }
}

async fn collect_matches<E, F>(
    iter: &mut dyn StateIterator,
    filter: &F,
    limit: usize,
) -> Result<Vec<E>, RegistryError>
where
    E: LedgerEntity,
    F: Fn(&E) -> bool + Send + Sync,
{
    let mut matches = Vec::new();
    while matches.len() < limit {
        let Some(entry) = iter.next().await? else {
            break;
        };
        let entity = decode::<E>(&entry.key, &entry.value)?;
        if filter(&entity) {
            matches.push(entity);
        }
    }
    Ok(matches)
}

fn decode<E: LedgerEntity>(key: &CompositeKey, bytes: &[u8]) -> Result<E, RegistryError> {
    serde_json::from_slice(bytes).map_err(|e| RegistryError::Deserialization {
        entity: E::KIND,
        key: key.encode(),
        reason: e.to_string(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
