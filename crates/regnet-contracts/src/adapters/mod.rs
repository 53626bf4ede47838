//! # Adapters Layer
//!
//! Entry points that turn raw invocations into workflow calls.

pub mod router;

pub use router::{dispatch, parse_price, ContractName, Invocation, REGISTRAR_CONTRACT, USER_CONTRACT};
