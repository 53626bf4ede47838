//! Lookups specific to pending requests.

use super::LedgerStore;
use crate::domain::entities::{EntityKind, Request, RequestKind};
use crate::errors::RegistryError;
use regnet_ledger::{CompositeKey, LedgerStub};

impl<L: LedgerStub + ?Sized> LedgerStore<'_, L, Request> {
    /// The pending property registration request for `property_id`.
    ///
    /// User requests share the namespace; a user named like a property id
    /// never matches.
    pub async fn find_property_request(&self, property_id: &str) -> Result<Request, RegistryError> {
        let prefix = CompositeKey::new([property_id]);
        let mut matches = self
            .scan_matching(&prefix, |r| is_property_request_for(r, property_id), 2)
            .await?;
        match matches.len() {
            0 => Err(RegistryError::not_found(EntityKind::Request, &prefix)),
            1 => Ok(matches.remove(0)),
            _ => Err(RegistryError::AmbiguousKey {
                entity: EntityKind::Request,
                prefix: prefix.encode(),
            }),
        }
    }

    /// Whether any property registration request for `property_id` is pending.
    pub async fn has_pending_property_request(
        &self,
        property_id: &str,
    ) -> Result<bool, RegistryError> {
        let prefix = CompositeKey::new([property_id]);
        let matches = self
            .scan_matching(&prefix, |r| is_property_request_for(r, property_id), 1)
            .await?;
        Ok(!matches.is_empty())
    }

    /// The pending user registration request for `(name, aadharNumber)`.
    pub async fn find_user_request(
        &self,
        name: &str,
        aadhar_number: &str,
    ) -> Result<Request, RegistryError> {
        let key = Request::user_key_for(name, aadhar_number);
        match self.find(&key).await? {
            Some(request) if request.kind() == RequestKind::User => Ok(request),
            _ => Err(RegistryError::not_found(EntityKind::Request, &key)),
        }
    }
}

fn is_property_request_for(request: &Request, property_id: &str) -> bool {
    request.kind() == RequestKind::Property && request.property_id.as_deref() == Some(property_id)
}
