//! Observability setup shared by the SchoolCatch binaries.

pub mod tracing_setup;
