//! holonet-upstream — HTTP access to the upstream catalog.
//!
//! [`HttpUpstream`] implements [`holonet_core::Upstream`] over a shared
//! `reqwest` connection pool. One call is one attempt; retry policy, if any,
//! belongs to the caller.

mod client;

pub use client::{ClientError, HttpUpstream};
