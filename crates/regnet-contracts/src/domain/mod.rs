//! # Domain Layer
//!
//! Entity records, caller roles and the voucher table. Pure data and rules,
//! no ledger access.

pub mod access;
pub mod entities;
pub mod vouchers;

pub use access::*;
pub use entities::*;
pub use vouchers::*;
