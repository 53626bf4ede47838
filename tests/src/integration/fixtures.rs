//! # Test Harness
//!
//! Drives a [`RegistryService`] over an [`InMemoryLedger`] the way clients
//! would: contract function names and string arguments.

use chrono::{DateTime, Utc};
use regnet_contracts::{
    ContractName, Invocation, RegistryConfig, RegistryError, RegistryService, User,
    USER_NAMESPACE,
};
use regnet_ledger::{ClientIdentity, CompositeKey, InMemoryLedger};
use serde_json::Value;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// MSP id of applicants under the default policy.
pub const APPLICANT_MSP: &str = "usersMSP";
/// MSP id of the registrar under the default policy.
pub const REGISTRAR_MSP: &str = "registrarMSP";

/// A service plus a monotonically advancing client clock.
pub struct Harness {
    pub service: RegistryService<InMemoryLedger>,
    clock: AtomicI64,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        regnet_telemetry::init_test_tracing();
        Self {
            service: RegistryService::new(Arc::new(InMemoryLedger::new()), RegistryConfig::default()),
            clock: AtomicI64::new(1_700_000_000),
        }
    }

    pub fn ledger(&self) -> &InMemoryLedger {
        self.service.host()
    }

    /// Next client timestamp, one second after the previous one.
    pub fn tick(&self) -> DateTime<Utc> {
        let secs = self.clock.fetch_add(1, Ordering::SeqCst);
        DateTime::from_timestamp(secs, 0).expect("timestamp in range")
    }

    pub async fn call(
        &self,
        msp_id: &str,
        contract: ContractName,
        function: &str,
        args: &[&str],
    ) -> Result<Value, RegistryError> {
        let invocation = Invocation::new(contract, function, args.iter().copied());
        let at = self.tick();
        self.service
            .submit_at(ClientIdentity::new(msp_id), at, &invocation)
            .await
            .map(|outcome| outcome.value)
    }

    pub async fn user(&self, function: &str, args: &[&str]) -> Result<Value, RegistryError> {
        self.call(APPLICANT_MSP, ContractName::User, function, args).await
    }

    pub async fn registrar(&self, function: &str, args: &[&str]) -> Result<Value, RegistryError> {
        self.call(REGISTRAR_MSP, ContractName::Registrar, function, args)
            .await
    }

    /// Request, approve and recharge a user with the given vouchers.
    pub async fn register_user(&self, name: &str, aadhar: &str, vouchers: &[&str]) {
        let email = format!("{}@example.com", name.to_lowercase());
        self.user("requestNewUser", &[name, email.as_str(), "555-0100", aadhar])
            .await
            .unwrap();
        self.registrar("approveNewUser", &[name, aadhar]).await.unwrap();
        for voucher in vouchers {
            self.user("rechargeAccount", &[name, aadhar, voucher])
                .await
                .unwrap();
        }
    }

    /// Request and approve a property for an already registered owner.
    pub async fn register_property(&self, name: &str, aadhar: &str, property_id: &str, price: u64) {
        let price = price.to_string();
        self.user("propertyRegistrationRequest", &[name, aadhar, property_id, price.as_str()])
            .await
            .unwrap();
        self.registrar("approvePropertyRegistration", &[property_id])
            .await
            .unwrap();
    }

    /// Put a property on sale.
    pub async fn list(&self, name: &str, aadhar: &str, property_id: &str) {
        self.user("updateProperty", &[name, aadhar, property_id, "onSale"])
            .await
            .unwrap();
    }

    /// Committed balance of a user, read directly from the ledger.
    pub fn balance(&self, name: &str, aadhar: &str) -> u64 {
        let bytes = self
            .ledger()
            .committed_state(USER_NAMESPACE, &User::key_for(name, aadhar))
            .unwrap()
            .expect("user exists");
        serde_json::from_slice::<User>(&bytes).unwrap().upgrad_coins
    }

    /// Committed keys of a namespace.
    pub fn keys(&self, namespace: &str) -> Vec<CompositeKey> {
        self.ledger().committed_keys(namespace).unwrap()
    }
}
