//! Recommended notices: a small keyword lookup over the relational notices
//! table, independent of the RAG chain.

pub mod repository;
pub mod service;
