//! Vector index clients.

pub mod pinecone;
