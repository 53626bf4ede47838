//! Lookups specific to properties.

use super::LedgerStore;
use crate::domain::entities::Property;
use crate::errors::RegistryError;
use regnet_ledger::LedgerStub;

impl<L: LedgerStub + ?Sized> LedgerStore<'_, L, Property> {
    /// The active listing of `property_id`, whoever owns it.
    pub async fn find_by_id(&self, property_id: &str) -> Result<Property, RegistryError> {
        self.get_by_partial_key(&Property::id_prefix(property_id))
            .await
    }

    /// Whether any owner currently holds `property_id`.
    pub async fn id_in_use(&self, property_id: &str) -> Result<bool, RegistryError> {
        let found = self
            .scan_matching(
                &Property::id_prefix(property_id),
                |p: &Property| p.property_id == property_id,
                1,
            )
            .await?;
        Ok(!found.is_empty())
    }
}
