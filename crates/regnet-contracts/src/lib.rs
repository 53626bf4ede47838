//! # Property Registration Contracts
//!
//! Business logic of a land-registration ledger: applicants request user and
//! property registrations, the registrar approves them, owners list their
//! properties and buyers purchase listings with an internal coin balance.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  RegistryService   (one invocation = one transaction)   │
//! ├─────────────────────────────────────────────────────────┤
//! │  router            contract:function + string args      │
//! ├──────────────────────────┬──────────────────────────────┤
//! │  UserWorkflow            │  RegistrarWorkflow           │
//! ├──────────────────────────┴──────────────────────────────┤
//! │  UserStore · RequestStore · PropertyStore               │
//! ├─────────────────────────────────────────────────────────┤
//! │  LedgerStub        (regnet-ledger)                      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Entity Lifecycle
//!
//! | From | Operation | To |
//! |------|-----------|----|
//! | nothing | `requestNewUser` | user request |
//! | user request | `approveNewUser` | user (0 coins) |
//! | user | `propertyRegistrationRequest` | property request |
//! | property request | `approvePropertyRegistration` | property, `registered` |
//! | `registered` | `updateProperty` | `onSale` |
//! | `onSale` | `purchaseProperty` | property under buyer's key, `registered` |
//!
//! Property ownership is part of the key. A purchase deletes the seller's
//! record and inserts the buyer's within the same transaction.

#![allow(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;
pub mod stores;
pub mod workflows;

/// Commonly used items.
pub mod prelude {
    pub use crate::adapters::router::{
        dispatch, ContractName, Invocation, REGISTRAR_CONTRACT, USER_CONTRACT,
    };
    pub use crate::config::RegistryConfig;
    pub use crate::domain::access::{AccessPolicy, CallerRole};
    pub use crate::domain::entities::{
        EntityKind, LedgerEntity, Property, PropertyStatus, Request, RequestKind, User,
        PROPERTY_NAMESPACE, REQUEST_NAMESPACE, USER_NAMESPACE,
    };
    pub use crate::domain::vouchers::VoucherTable;
    pub use crate::errors::{ErrorKind, RegistryError};
    pub use crate::ports::inbound::{RegistrarContractApi, UserContractApi};
    pub use crate::service::{InvocationOutcome, RegistryService, ServiceStats};
    pub use crate::stores::{LedgerStore, PropertyStore, RequestStore, UserStore};
    pub use crate::workflows::{RegistrarWorkflow, UserWorkflow};
}

pub use prelude::*;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
