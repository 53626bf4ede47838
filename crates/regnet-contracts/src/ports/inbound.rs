//! # Driving Ports (API - Inbound)
//!
//! The operations each contract exposes. One call is one ledger
//! transaction; any error leaves the ledger untouched once the host
//! discards the transaction.

use crate::domain::entities::{Property, Request, User};
use crate::errors::RegistryError;
use async_trait::async_trait;

// =============================================================================
// USER CONTRACT
// =============================================================================

/// Operations available to applicants.
#[async_trait]
pub trait UserContractApi: Send + Sync {
    /// File a user registration request.
    async fn request_registration(
        &self,
        name: &str,
        aadhar_number: &str,
        email_id: &str,
        phone_number: &str,
    ) -> Result<Request, RegistryError>;

    /// Top up a registered user's balance with a bank voucher.
    async fn recharge(
        &self,
        name: &str,
        aadhar_number: &str,
        transaction_id: &str,
    ) -> Result<User, RegistryError>;

    /// Fetch a registered user.
    async fn view_user(&self, name: &str, aadhar_number: &str) -> Result<User, RegistryError>;

    /// File a property registration request for a registered user.
    async fn request_property_registration(
        &self,
        name: &str,
        aadhar_number: &str,
        property_id: &str,
        price: u64,
    ) -> Result<Request, RegistryError>;

    /// Fetch a property by id and owner.
    async fn view_property(
        &self,
        name: &str,
        aadhar_number: &str,
        property_id: &str,
    ) -> Result<Property, RegistryError>;

    /// Change the listing status of an owned property.
    async fn update_property_status(
        &self,
        name: &str,
        aadhar_number: &str,
        property_id: &str,
        status: &str,
    ) -> Result<Property, RegistryError>;

    /// Buy a listed property, settling the price between both balances.
    async fn purchase_property(
        &self,
        property_id: &str,
        buyer_name: &str,
        buyer_aadhar_number: &str,
    ) -> Result<Property, RegistryError>;
}

// =============================================================================
// REGISTRAR CONTRACT
// =============================================================================

/// Operations available to the registrar.
#[async_trait]
pub trait RegistrarContractApi: Send + Sync {
    /// Turn a pending user request into a registered user.
    async fn approve_user(&self, name: &str, aadhar_number: &str) -> Result<User, RegistryError>;

    /// Fetch a registered user.
    async fn view_user(&self, name: &str, aadhar_number: &str) -> Result<User, RegistryError>;

    /// Turn the pending request for `property_id` into a registered property.
    async fn approve_property_registration(
        &self,
        property_id: &str,
    ) -> Result<Property, RegistryError>;

    /// Fetch a property by id and owner.
    async fn view_property(
        &self,
        name: &str,
        aadhar_number: &str,
        property_id: &str,
    ) -> Result<Property, RegistryError>;
}
