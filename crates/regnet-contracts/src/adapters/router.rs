//! # Invocation Router
//!
//! Maps a named contract function with string arguments onto the workflow
//! operations and renders the result as JSON.
//!
//! Functions are addressed as `<contract>:<function>`, for example
//! `org.property-registration-network.regnet.user:requestNewUser`.

use crate::config::RegistryConfig;
use crate::domain::entities::LedgerEntity;
use crate::errors::RegistryError;
use crate::ports::inbound::{RegistrarContractApi, UserContractApi};
use crate::workflows::{RegistrarWorkflow, UserWorkflow};
use regnet_ledger::LedgerStub;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Name of the contract serving applicants.
pub const USER_CONTRACT: &str = "org.property-registration-network.regnet.user";
/// Name of the contract serving the registrar.
pub const REGISTRAR_CONTRACT: &str = "org.property-registration-network.regnet.registrar";

/// Addressable contracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractName {
    User,
    Registrar,
}

impl ContractName {
    /// Fully-qualified name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => USER_CONTRACT,
            Self::Registrar => REGISTRAR_CONTRACT,
        }
    }

    /// Functions exposed by this contract.
    pub fn functions(self) -> &'static [&'static str] {
        match self {
            Self::User => &[
                "instantiate",
                "requestNewUser",
                "rechargeAccount",
                "viewUser",
                "propertyRegistrationRequest",
                "viewProperty",
                "updateProperty",
                "purchaseProperty",
            ],
            Self::Registrar => &[
                "instantiate",
                "approveNewUser",
                "viewUser",
                "approvePropertyRegistration",
                "viewProperty",
            ],
        }
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            USER_CONTRACT => Ok(Self::User),
            REGISTRAR_CONTRACT => Ok(Self::Registrar),
            other => Err(RegistryError::UnknownFunction(other.to_string())),
        }
    }
}

/// One contract call as submitted by a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub contract: ContractName,
    pub function: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Call `function` on `contract`.
    pub fn new<I, S>(contract: ContractName, function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contract,
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a `<contract>:<function>` name.
    pub fn parse<I, S>(qualified: &str, args: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (contract, function) = qualified
            .rsplit_once(':')
            .ok_or_else(|| RegistryError::UnknownFunction(qualified.to_string()))?;
        Ok(Self::new(contract.parse()?, function, args))
    }

    /// `<contract>:<function>`.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.contract, self.function)
    }
}

/// Execute `invocation` against the transaction behind `stub`.
pub async fn dispatch<L>(
    stub: &L,
    config: &RegistryConfig,
    invocation: &Invocation,
) -> Result<Value, RegistryError>
where
    L: LedgerStub + ?Sized,
{
    debug!(
        function = %invocation.qualified_name(),
        args = invocation.args.len(),
        "Dispatching invocation"
    );
    match invocation.contract {
        ContractName::User => {
            route_user(
                &UserWorkflow::new(stub, config),
                &invocation.function,
                &invocation.args,
            )
            .await
        }
        ContractName::Registrar => {
            route_registrar(
                &RegistrarWorkflow::new(stub, config),
                &invocation.function,
                &invocation.args,
            )
            .await
        }
    }
}

async fn route_user<W>(workflow: &W, function: &str, args: &[String]) -> Result<Value, RegistryError>
where
    W: UserContractApi + ?Sized,
{
    match function {
        "instantiate" => {
            expect_args::<0>(function, args)?;
            info!(contract = USER_CONTRACT, "Contract instantiated");
            Ok(Value::Null)
        }
        "requestNewUser" => {
            let [name, email_id, phone_number, aadhar_number] = expect_args::<4>(function, args)?;
            to_json(
                workflow
                    .request_registration(name, aadhar_number, email_id, phone_number)
                    .await?,
            )
        }
        "rechargeAccount" => {
            let [name, aadhar_number, transaction_id] = expect_args::<3>(function, args)?;
            to_json(workflow.recharge(name, aadhar_number, transaction_id).await?)
        }
        "viewUser" => {
            let [name, aadhar_number] = expect_args::<2>(function, args)?;
            to_json(workflow.view_user(name, aadhar_number).await?)
        }
        "propertyRegistrationRequest" => {
            let [name, aadhar_number, property_id, price] = expect_args::<4>(function, args)?;
            let price = parse_price(price)?;
            to_json(
                workflow
                    .request_property_registration(name, aadhar_number, property_id, price)
                    .await?,
            )
        }
        "viewProperty" => {
            let [name, aadhar_number, property_id] = expect_args::<3>(function, args)?;
            to_json(workflow.view_property(name, aadhar_number, property_id).await?)
        }
        "updateProperty" => {
            let [name, aadhar_number, property_id, status] = expect_args::<4>(function, args)?;
            to_json(
                workflow
                    .update_property_status(name, aadhar_number, property_id, status)
                    .await?,
            )
        }
        "purchaseProperty" => {
            let [property_id, buyer_name, buyer_aadhar_number] = expect_args::<3>(function, args)?;
            to_json(
                workflow
                    .purchase_property(property_id, buyer_name, buyer_aadhar_number)
                    .await?,
            )
        }
        other => Err(RegistryError::UnknownFunction(format!("{USER_CONTRACT}:{other}"))),
    }
}

async fn route_registrar<W>(
    workflow: &W,
    function: &str,
    args: &[String],
) -> Result<Value, RegistryError>
where
    W: RegistrarContractApi + ?Sized,
{
    match function {
        "instantiate" => {
            expect_args::<0>(function, args)?;
            info!(contract = REGISTRAR_CONTRACT, "Contract instantiated");
            Ok(Value::Null)
        }
        "approveNewUser" => {
            let [name, aadhar_number] = expect_args::<2>(function, args)?;
            to_json(workflow.approve_user(name, aadhar_number).await?)
        }
        "viewUser" => {
            let [name, aadhar_number] = expect_args::<2>(function, args)?;
            to_json(workflow.view_user(name, aadhar_number).await?)
        }
        "approvePropertyRegistration" => {
            let [property_id] = expect_args::<1>(function, args)?;
            to_json(workflow.approve_property_registration(property_id).await?)
        }
        "viewProperty" => {
            let [name, aadhar_number, property_id] = expect_args::<3>(function, args)?;
            to_json(workflow.view_property(name, aadhar_number, property_id).await?)
        }
        other => Err(RegistryError::UnknownFunction(format!(
            "{REGISTRAR_CONTRACT}:{other}"
        ))),
    }
}

fn expect_args<'a, const N: usize>(
    function: &str,
    args: &'a [String],
) -> Result<[&'a str; N], RegistryError> {
    if args.len() != N {
        return Err(RegistryError::InvalidArgument {
            name: "args",
            reason: format!("{function} takes {N} arguments, got {}", args.len()),
        });
    }
    Ok(std::array::from_fn(|i| args[i].as_str()))
}

/// Parse a price argument as a non-negative integer.
pub fn parse_price(raw: &str) -> Result<u64, RegistryError> {
    raw.parse::<u64>().map_err(|e| RegistryError::InvalidArgument {
        name: "price",
        reason: format!("{raw:?}: {e}"),
    })
}

fn to_json<E: LedgerEntity>(entity: E) -> Result<Value, RegistryError> {
    serde_json::to_value(entity).map_err(|e| RegistryError::Serialization {
        entity: E::KIND,
        reason: e.to_string(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
