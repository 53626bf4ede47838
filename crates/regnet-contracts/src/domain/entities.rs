//! # Core Domain Entities
//!
//! The three record types kept on the ledger. Each derives its identity key
//! from its own fields; ownership of a property is part of its key.

use crate::errors::RegistryError;
use chrono::{DateTime, Utc};
use regnet_ledger::CompositeKey;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// NAMESPACES
// =============================================================================

/// Namespace of user records.
pub const USER_NAMESPACE: &str = "org.property-registration-network.regnet.lists.user";
/// Namespace of pending requests, both user and property shaped.
pub const REQUEST_NAMESPACE: &str = "org.property-registration-network.regnet.lists.request";
/// Namespace of registered properties.
pub const PROPERTY_NAMESPACE: &str = "org.property-registration-network.regnet.lists.property";

/// Entity class, used in error context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Request,
    Property,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Request => "request",
            Self::Property => "property",
        })
    }
}

/// A record stored under its own composite key in a fixed namespace.
pub trait LedgerEntity: Serialize + DeserializeOwned + Send + Sync {
    /// Entity class.
    const KIND: EntityKind;
    /// Ledger namespace holding every record of this class.
    const NAMESPACE: &'static str;

    /// Identity key derived from the record's fields.
    fn key(&self) -> CompositeKey;
}

// =============================================================================
// USER
// =============================================================================

/// A registered participant with an internal coin balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub aadhar_number: String,
    pub email_id: String,
    pub phone_number: String,
    /// Balance; changes only through recharge or purchase settlement.
    pub upgrad_coins: u64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Key of the user `(name, aadharNumber)`.
    pub fn key_for(name: &str, aadhar_number: &str) -> CompositeKey {
        CompositeKey::new([name, aadhar_number])
    }

    /// Build a user from its approved registration request.
    pub fn from_request(request: &Request, created_at: DateTime<Utc>) -> Self {
        Self {
            name: request.name.clone(),
            aadhar_number: request.aadhar_number.clone(),
            email_id: request.email_id.clone().unwrap_or_default(),
            phone_number: request.phone_number.clone().unwrap_or_default(),
            upgrad_coins: 0,
            created_at,
        }
    }

    /// Add `amount` to the balance.
    pub fn credit(&mut self, amount: u64) -> Result<(), RegistryError> {
        self.upgrad_coins =
            self.upgrad_coins
                .checked_add(amount)
                .ok_or_else(|| RegistryError::InvalidArgument {
                    name: "amount",
                    reason: format!("crediting {amount} overflows balance {}", self.upgrad_coins),
                })?;
        Ok(())
    }

    /// Remove `amount` from the balance.
    pub fn debit(&mut self, amount: u64) -> Result<(), RegistryError> {
        self.upgrad_coins = self.upgrad_coins.checked_sub(amount).ok_or(
            RegistryError::InsufficientFunds {
                required: amount,
                available: self.upgrad_coins,
            },
        )?;
        Ok(())
    }
}

impl LedgerEntity for User {
    const KIND: EntityKind = EntityKind::User;
    const NAMESPACE: &'static str = USER_NAMESPACE;

    fn key(&self) -> CompositeKey {
        Self::key_for(&self.name, &self.aadhar_number)
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// Shape of a pending request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    /// "Register me as a user", keyed `(name, aadharNumber)`.
    User,
    /// "Register this property", keyed `(propertyId, name, aadharNumber)`.
    Property,
}

/// A pending ask, consumed by exactly one registrar approval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub name: String,
    pub aadhar_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Request {
    /// A user registration request.
    pub fn new_user(
        name: impl Into<String>,
        aadhar_number: impl Into<String>,
        email_id: impl Into<String>,
        phone_number: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            aadhar_number: aadhar_number.into(),
            email_id: Some(email_id.into()),
            phone_number: Some(phone_number.into()),
            property_id: None,
            price: None,
            status: None,
            owner: None,
            created_at,
        }
    }

    /// A property registration request on behalf of `(name, aadharNumber)`.
    pub fn new_property(
        name: impl Into<String>,
        aadhar_number: impl Into<String>,
        property_id: impl Into<String>,
        price: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        let aadhar_number = aadhar_number.into();
        let property_id = property_id.into();
        let owner = Property::owner_key_for(&property_id, &name, &aadhar_number);
        Self {
            name,
            aadhar_number,
            email_id: None,
            phone_number: None,
            property_id: Some(property_id),
            price: Some(price),
            status: None,
            owner: Some(owner),
            created_at,
        }
    }

    /// Key of a user request.
    pub fn user_key_for(name: &str, aadhar_number: &str) -> CompositeKey {
        CompositeKey::new([name, aadhar_number])
    }

    /// Key of a property request.
    pub fn property_key_for(property_id: &str, name: &str, aadhar_number: &str) -> CompositeKey {
        CompositeKey::new([property_id, name, aadhar_number])
    }

    /// Shape of this request, decided by the presence of a property id.
    pub fn kind(&self) -> RequestKind {
        if self.property_id.is_some() {
            RequestKind::Property
        } else {
            RequestKind::User
        }
    }
}

impl LedgerEntity for Request {
    const KIND: EntityKind = EntityKind::Request;
    const NAMESPACE: &'static str = REQUEST_NAMESPACE;

    fn key(&self) -> CompositeKey {
        match &self.property_id {
            Some(property_id) => {
                Self::property_key_for(property_id, &self.name, &self.aadhar_number)
            }
            None => Self::user_key_for(&self.name, &self.aadhar_number),
        }
    }
}

// =============================================================================
// PROPERTY
// =============================================================================

/// Listing status of a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyStatus {
    #[serde(rename = "registered")]
    Registered,
    #[serde(rename = "onSale")]
    OnSale,
}

impl PropertyStatus {
    /// Wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::OnSale => "onSale",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Self::Registered),
            "onSale" => Ok(Self::OnSale),
            other => Err(RegistryError::InvalidArgument {
                name: "status",
                reason: format!("unrecognized property status {other:?}"),
            }),
        }
    }
}

/// A registered property, keyed by its id and current owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub property_id: String,
    pub name: String,
    pub aadhar_number: String,
    pub price: u64,
    pub status: PropertyStatus,
    /// Encoded key of the current `(propertyId, name, aadharNumber)`.
    pub owner: String,
}

impl Property {
    /// Key of the property `propertyId` owned by `(name, aadharNumber)`.
    pub fn key_for(property_id: &str, name: &str, aadhar_number: &str) -> CompositeKey {
        CompositeKey::new([property_id, name, aadhar_number])
    }

    /// Owner string recorded for `(propertyId, name, aadharNumber)`.
    pub fn owner_key_for(property_id: &str, name: &str, aadhar_number: &str) -> String {
        Self::key_for(property_id, name, aadhar_number).encode()
    }

    /// Partial key matching every owner of `propertyId`.
    pub fn id_prefix(property_id: &str) -> CompositeKey {
        CompositeKey::new([property_id])
    }

    /// Build a registered property from an approved property request.
    pub fn from_request(request: &Request) -> Result<Self, RegistryError> {
        let (Some(property_id), Some(price)) = (&request.property_id, request.price) else {
            return Err(RegistryError::InvalidState {
                entity: EntityKind::Request,
                key: request.key().encode(),
                reason: "not a property registration request".to_string(),
            });
        };
        Ok(Self {
            property_id: property_id.clone(),
            name: request.name.clone(),
            aadhar_number: request.aadhar_number.clone(),
            price,
            status: PropertyStatus::Registered,
            owner: Self::owner_key_for(property_id, &request.name, &request.aadhar_number),
        })
    }

    /// Whether `(name, aadharNumber)` is the recorded owner.
    pub fn is_owned_by(&self, name: &str, aadhar_number: &str) -> bool {
        self.owner == Self::owner_key_for(&self.property_id, name, aadhar_number)
    }

    /// The record this property becomes once `(name, aadharNumber)` buys it.
    pub fn transfer_to(&self, name: &str, aadhar_number: &str) -> Self {
        Self {
            property_id: self.property_id.clone(),
            name: name.to_string(),
            aadhar_number: aadhar_number.to_string(),
            price: self.price,
            status: PropertyStatus::Registered,
            owner: Self::owner_key_for(&self.property_id, name, aadhar_number),
        }
    }
}

impl LedgerEntity for Property {
    const KIND: EntityKind = EntityKind::Property;
    const NAMESPACE: &'static str = PROPERTY_NAMESPACE;

    fn key(&self) -> CompositeKey {
        Self::key_for(&self.property_id, &self.name, &self.aadhar_number)
    }
}

// =============================================================================
// TESTS
// =============================================================================
