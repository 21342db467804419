//! Chat session storage for SchoolCatch.
//!
//! Sessions live in memory for the lifetime of the process. The store is an
//! injected trait object so the API layer and tests can share or replace it.

pub mod store;
