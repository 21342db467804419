//! Ports for the retrieval step: text embedding and similarity search over
//! the notice index. Implementations (OpenAI embeddings, Pinecone) live in
//! schoolcatch-infra.

pub mod box_embedder;
pub mod embedder;
pub mod index;
