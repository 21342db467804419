//! Text embedding clients implementing the core `Embedder` trait.

pub mod openai;
