//! # Workflows
//!
//! One workflow per contract, built per transaction around an explicit
//! ledger handle. Every operation authorizes the caller before any read.

mod registrar;
mod user;

pub use registrar::RegistrarWorkflow;
pub use user::UserWorkflow;
