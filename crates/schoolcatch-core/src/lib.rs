//! Business logic and port traits for SchoolCatch.
//!
//! This crate defines the "ports" (provider, embedder, index and repository
//! traits) that the infrastructure layer implements, and the RAG pipeline
//! built on top of them. It depends only on `schoolcatch-types` -- never on
//! `schoolcatch-infra` or any network/database crate.

pub mod chat;
pub mod faq;
pub mod llm;
pub mod notice;
pub mod rag;
pub mod retrieval;

#[cfg(test)]
pub(crate) mod testing;
