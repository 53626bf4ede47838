//! # Ports Layer (Middle Hexagon)
//!
//! - **Driven Port**: `LedgerStub` - what contract code may do inside a transaction
//! - **Driving Port**: `LedgerHost` - how a host opens and commits transactions
//! - No concrete implementations in this module

pub mod host;
pub mod stub;

pub use host::*;
pub use stub::*;
