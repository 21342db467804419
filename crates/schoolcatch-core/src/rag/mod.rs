//! Retrieval-augmented answering over university notices.

pub mod chain;
pub mod composer;
pub mod examples;
pub mod prompt;
pub mod retriever;
pub mod rewriter;
