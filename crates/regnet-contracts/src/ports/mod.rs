//! # Ports Layer
//!
//! Driving ports implemented by the workflows. The driven side is the
//! ledger stub from `regnet-ledger`.

pub mod inbound;

pub use inbound::*;
