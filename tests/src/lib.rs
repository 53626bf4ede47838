//! # Property Registration Network Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Whole invocations through RegistryService
//!     ├── fixtures.rs   # Harness and seeding helpers
//!     ├── lifecycle.rs  # Request → approve → list → purchase
//!     ├── atomicity.rs  # Failed invocations leave no trace
//!     ├── authorization.rs
//!     ├── concurrency.rs
//!     └── observability.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p regnet-tests
//! cargo test -p regnet-tests integration::lifecycle
//!
//! # Benchmarks
//! cargo bench -p regnet-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
