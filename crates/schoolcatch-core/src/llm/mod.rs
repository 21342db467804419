//! LLM provider abstractions for SchoolCatch.
//!
//! This module defines the core traits for LLM provider integration:
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
