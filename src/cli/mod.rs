//! CLI command handlers
//!
//! Each subcommand is implemented in its own module.

pub mod classify;
pub mod config;
pub mod helpers;
pub mod lexicon;
pub mod log;
pub mod shell;
pub mod status;
