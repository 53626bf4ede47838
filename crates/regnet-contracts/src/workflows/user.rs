//! Applicant operations.

use crate::config::RegistryConfig;
use crate::domain::access::CallerRole;
use crate::domain::entities::{
    EntityKind, LedgerEntity, Property, PropertyStatus, Request, User,
};
use crate::errors::RegistryError;
use crate::ports::inbound::UserContractApi;
use crate::stores::{PropertyStore, RequestStore, UserStore};
use async_trait::async_trait;
use regnet_ledger::LedgerStub;
use tracing::{info, instrument, warn};

/// The user contract bound to one transaction.
pub struct UserWorkflow<'a, L: ?Sized> {
    stub: &'a L,
    config: &'a RegistryConfig,
    users: UserStore<'a, L>,
    requests: RequestStore<'a, L>,
    properties: PropertyStore<'a, L>,
}

impl<'a, L: LedgerStub + ?Sized> UserWorkflow<'a, L> {
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
            .authorize(self.stub.creator_msp_id(), CallerRole::Applicant, operation)
    }
}

#[async_trait]
impl<'a, L: LedgerStub + ?Sized> UserContractApi for UserWorkflow<'a, L> {
    #[instrument(skip(self))]
    async fn request_registration(
        &self,
        name: &str,
        aadhar_number: &str,
        email_id: &str,
        phone_number: &str,
    ) -> Result<Request, RegistryError> {
        self.authorize("requestNewUser")?;

        let user_key = User::key_for(name, aadhar_number);
        if self.users.exists(&user_key).await? {
            return Err(RegistryError::already_exists(EntityKind::User, user_key));
        }

        let request = Request::new_user(
            name,
            aadhar_number,
            email_id,
            phone_number,
            self.stub.tx_timestamp(),
        );
        self.requests.insert_new(&request).await?;

        info!(key = %request.key(), "User registration requested");
        Ok(request)
    }

    #[instrument(skip(self))]
    async fn recharge(
        &self,
        name: &str,
        aadhar_number: &str,
        transaction_id: &str,
    ) -> Result<User, RegistryError> {
        self.authorize("rechargeAccount")?;

        let mut user = self.users.get(&User::key_for(name, aadhar_number)).await?;
        let amount = self.config.vouchers.amount_for(transaction_id)?;
        user.credit(amount)?;
        self.users.put(&user).await?;

        info!(amount, balance = user.upgrad_coins, "Account recharged");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn view_user(&self, name: &str, aadhar_number: &str) -> Result<User, RegistryError> {
        self.authorize("viewUser")?;
        self.users.get(&User::key_for(name, aadhar_number)).await
    }

    #[instrument(skip(self))]
    async fn request_property_registration(
        &self,
        name: &str,
        aadhar_number: &str,
        property_id: &str,
        price: u64,
    ) -> Result<Request, RegistryError> {
        self.authorize("propertyRegistrationRequest")?;

        let request_key = Request::property_key_for(property_id, name, aadhar_number);
        if self.requests.exists(&request_key).await? {
            return Err(RegistryError::already_exists(EntityKind::Request, request_key));
        }

        // Applicant must already be registered.
        self.view_user(name, aadhar_number).await?;

        // Partial-key lookups by property id rely on these two.
        if self.requests.has_pending_property_request(property_id).await? {
            return Err(RegistryError::already_exists(
                EntityKind::Request,
                Property::id_prefix(property_id),
            ));
        }
        if self.properties.id_in_use(property_id).await? {
            return Err(RegistryError::already_exists(
                EntityKind::Property,
                Property::id_prefix(property_id),
            ));
        }

        let request = Request::new_property(
            name,
            aadhar_number,
            property_id,
            price,
            self.stub.tx_timestamp(),
        );
        self.requests.insert_new(&request).await?;

        info!(key = %request_key, price, "Property registration requested");
        Ok(request)
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

    #[instrument(skip(self))]
    async fn update_property_status(
        &self,
        name: &str,
        aadhar_number: &str,
        property_id: &str,
        status: &str,
    ) -> Result<Property, RegistryError> {
        self.authorize("updateProperty")?;

        let mut property = self
            .properties
            .get(&Property::key_for(property_id, name, aadhar_number))
            .await?;
        if !property.is_owned_by(name, aadhar_number) {
            warn!(owner = %property.owner, "Status change by non-owner rejected");
            return Err(RegistryError::Forbidden {
                requestor: Property::owner_key_for(property_id, name, aadhar_number),
                owner: property.owner,
            });
        }

        property.status = status.parse::<PropertyStatus>()?;
        self.properties.put(&property).await?;

        info!(status = %property.status, "Property status updated");
        Ok(property)
    }

    #[instrument(skip(self))]
    async fn purchase_property(
        &self,
        property_id: &str,
        buyer_name: &str,
        buyer_aadhar_number: &str,
    ) -> Result<Property, RegistryError> {
        self.authorize("purchaseProperty")?;

        let mut buyer = self
            .users
            .get(&User::key_for(buyer_name, buyer_aadhar_number))
            .await?;
        let listing = self.properties.find_by_id(property_id).await?;
        let mut seller = self
            .users
            .get(&User::key_for(&listing.name, &listing.aadhar_number))
            .await?;

        if listing.status != PropertyStatus::OnSale {
            return Err(RegistryError::InvalidState {
                entity: EntityKind::Property,
                key: listing.key().encode(),
                reason: format!("status is {}, not {}", listing.status, PropertyStatus::OnSale),
            });
        }
        if buyer.key() == seller.key() {
            return Err(RegistryError::InvalidState {
                entity: EntityKind::Property,
                key: listing.key().encode(),
                reason: "buyer already owns this property".to_string(),
            });
        }

        buyer.debit(listing.price)?;
        seller.credit(listing.price)?;
        self.users.put(&buyer).await?;
        self.users.put(&seller).await?;

        let transferred = listing.transfer_to(buyer_name, buyer_aadhar_number);
        self.properties.delete(&listing.key()).await?;
        self.properties.insert_new(&transferred).await?;

        info!(
            from = %listing.owner,
            to = %transferred.owner,
            price = listing.price,
            "Property transferred"
        );
        Ok(transferred)
    }
}

// =============================================================================
// TESTS
// =============================================================================
