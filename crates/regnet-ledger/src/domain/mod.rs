//! # Domain Layer (Inner Hexagon)
//!
//! Pure key types and errors. No I/O.

pub mod errors;
pub mod key;

pub use errors::*;
pub use key::*;
