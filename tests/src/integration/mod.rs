//! Cross-crate scenarios run through the service boundary.

pub mod fixtures;

mod atomicity;
mod authorization;
mod concurrency;
mod lifecycle;
mod observability;
