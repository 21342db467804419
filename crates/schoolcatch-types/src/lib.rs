//! Shared domain types for SchoolCatch.
//!
//! This crate contains the core domain types used across the SchoolCatch
//! chatbot: chat sessions and turns, LLM request/stream shapes, notice
//! documents, the academic term anchor, FAQ keys, configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod faq;
pub mod llm;
pub mod notice;
pub mod term;
