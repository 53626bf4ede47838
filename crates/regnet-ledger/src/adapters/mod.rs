//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete ledger hosts. Production deployments plug in the platform's
//! ledger behind the same ports.

pub mod memory;

pub use memory::*;
