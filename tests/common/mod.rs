//! Shared test utilities for holonet integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod builders;
pub mod fake_catalog;

pub use builders::*;
pub use fake_catalog::FakeCatalog;
