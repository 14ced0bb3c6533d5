//! CLI command handlers
//!
//! Handlers for the subcommands that are not part of the main pipeline.

pub mod doctor;
