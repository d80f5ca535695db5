//! CLI module for the relmodel binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
