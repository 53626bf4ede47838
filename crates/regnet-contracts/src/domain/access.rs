//! # Caller Authorization
//!
//! Maps the invoking organization to a closed set of roles.

use crate::errors::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Default MSP id of end users.
pub const DEFAULT_APPLICANT_MSP: &str = "usersMSP";
/// Default MSP id of the registrar organization.
pub const DEFAULT_REGISTRAR_MSP: &str = "registrarMSP";

/// Role a caller acts in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerRole {
    /// End users requesting registrations and trading properties.
    Applicant,
    /// The land registrar approving users and properties.
    Registrar,
}

impl fmt::Display for CallerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Applicant => "applicant",
            Self::Registrar => "registrar",
        })
    }
}

/// Which organization holds which role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessPolicy {
    pub applicant_msp: String,
    pub registrar_msp: String,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            applicant_msp: DEFAULT_APPLICANT_MSP.to_string(),
            registrar_msp: DEFAULT_REGISTRAR_MSP.to_string(),
        }
    }
}

impl AccessPolicy {
    /// Role held by `msp_id`, if any.
    pub fn resolve(&self, msp_id: &str) -> Option<CallerRole> {
        if msp_id == self.registrar_msp {
            Some(CallerRole::Registrar)
        } else if msp_id == self.applicant_msp {
            Some(CallerRole::Applicant)
        } else {
            None
        }
    }

    /// Fail unless `msp_id` holds `required`.
    pub fn authorize(
        &self,
        msp_id: &str,
        required: CallerRole,
        operation: &'static str,
    ) -> Result<(), RegistryError> {
        match self.resolve(msp_id) {
            Some(role) if role == required => Ok(()),
            _ => {
                warn!(operation, msp_id, %required, "Caller rejected");
                Err(RegistryError::Unauthorized {
                    operation,
                    msp_id: msp_id.to_string(),
                    required,
                })
            }
        }
    }
}
