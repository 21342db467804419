//! HTTP request handlers.

pub mod chat;
pub mod faq;
pub mod notice;
pub mod session;
