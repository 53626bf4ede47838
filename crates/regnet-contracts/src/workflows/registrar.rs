//! Registrar operations.

use crate::config::RegistryConfig;
use crate::domain::access::CallerRole;
use crate::domain::entities::{EntityKind, LedgerEntity, Property, User};
use crate::errors::RegistryError;
use crate::ports::inbound::RegistrarContractApi;
use crate::stores::{PropertyStore, RequestStore, UserStore};
use async_trait::async_trait;
use regnet_ledger::LedgerStub;
use tracing::{info, instrument};

/// The registrar contract bound to one transaction.
pub struct RegistrarWorkflow<'a, L: ?Sized> {
    stub: &'a L,
    config: &'a RegistryConfig,
    users: UserStore<'a, L>,
    requests: RequestStore<'a, L>,
    properties: PropertyStore<'a, L>,
}

impl<'a, L: LedgerStub + ?Sized> RegistrarWorkflow<'a, L> {
    /// Workflow executing against `stub`.
    pub fn new(stub: &'a L, config: &'a RegistryConfig) -> Self {
        Self {
            stub,
            config,
            users: UserStore::new(stub),
            requests: RequestStore::new(stub),
            properties: PropertyStore::new(stub),
        }
    }

    fn authorize(&self, operation: &'static str) -> Result<(), RegistryError> {
        self.config
            .access
            .authorize(self.stub.creator_msp_id(), CallerRole::Registrar, operation)
    }
}

#[async_trait]
impl<'a, L: LedgerStub + ?Sized> RegistrarContractApi for RegistrarWorkflow<'a, L> {
    #[instrument(skip(self))]
    async fn approve_user(&self, name: &str, aadhar_number: &str) -> Result<User, RegistryError> {
        self.authorize("approveNewUser")?;

        let user_key = User::key_for(name, aadhar_number);
        if self.users.exists(&user_key).await? {
            return Err(RegistryError::already_exists(EntityKind::User, user_key));
        }

        let request = self.requests.find_user_request(name, aadhar_number).await?;
        let user = User::from_request(&request, self.stub.tx_timestamp());
        self.users.insert_new(&user).await?;
        self.requests.delete(&request.key()).await?;

        info!(key = %user_key, "User approved");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn view_user(&self, name: &str, aadhar_number: &str) -> Result<User, RegistryError> {
        self.authorize("viewUser")?;
        self.users.get(&User::key_for(name, aadhar_number)).await
    }

    #[instrument(skip(self))]
    async fn approve_property_registration(
        &self,
        property_id: &str,
    ) -> Result<Property, RegistryError> {
        self.authorize("approvePropertyRegistration")?;

        let request = self.requests.find_property_request(property_id).await?;
        let property_key = Property::key_for(property_id, &request.name, &request.aadhar_number);
        if self.properties.exists(&property_key).await? {
            return Err(RegistryError::already_exists(EntityKind::Property, property_key));
        }
        if self.properties.id_in_use(property_id).await? {
            return Err(RegistryError::already_exists(
                EntityKind::Property,
                Property::id_prefix(property_id),
            ));
        }

        let property = Property::from_request(&request)?;
        self.properties.insert_new(&property).await?;
        self.requests.delete(&request.key()).await?;

        info!(key = %property_key, price = property.price, "Property registered");
        Ok(property)
    }

    #[instrument(skip(self))]
    async fn view_property(
        &self,
        name: &str,
        aadhar_number: &str,
        property_id: &str,
    ) -> Result<Property, RegistryError> {
        self.authorize("viewProperty")?;
        self.properties
            .get(&Property::key_for(property_id, name, aadhar_number))
            .await
    }
}

// =============================================================================
// TESTS
// =============================================================================
