//! Registry configuration.

use crate::domain::access::{AccessPolicy, DEFAULT_APPLICANT_MSP, DEFAULT_REGISTRAR_MSP};
use crate::domain::vouchers::VoucherTable;

/// Settings shared by every invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Organization to role mapping.
    pub access: AccessPolicy,
    /// Recognized recharge vouchers.
    pub vouchers: VoucherTable,
}

impl RegistryConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// - `REGNET_APPLICANT_MSP`: MSP id of end users
    /// - `REGNET_REGISTRAR_MSP`: MSP id of the registrar
    pub fn from_env() -> Self {
        let applicant_msp = std::env::var("REGNET_APPLICANT_MSP")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_APPLICANT_MSP.to_string());
        let registrar_msp = std::env::var("REGNET_REGISTRAR_MSP")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REGISTRAR_MSP.to_string());

        Self {
            access: AccessPolicy {
                applicant_msp,
                registrar_msp,
            },
            vouchers: VoucherTable::default(),
        }
    }
}
