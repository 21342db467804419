//! Interactive terminal chat.

pub mod banner;
pub mod commands;
pub mod loop_runner;
pub mod renderer;
