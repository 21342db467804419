//! Infrastructure layer for SchoolCatch.
//!
//! Contains implementations of the ports defined in `schoolcatch-core`: the
//! OpenAI-compatible chat provider, the embeddings client, the Pinecone
//! index client, and the SQL notice repository. Also loads configuration.

pub mod config;
pub mod embedding;
pub mod llm;
pub mod sql;
pub mod vector;

#[cfg(test)]
pub(crate) mod testing;
