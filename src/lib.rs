//! # runbuild - configure, compile, smoke-test
//!
//! `runbuild` drives the everyday loop of a CMake-based C/C++ project:
//! make sure `build/` exists, configure and compile with all CPU cores, then
//! run every example binary once.
//!
//! ## Quick Start
//!
//! ```bash
//! # from the project root (next to CMakeLists.txt and examples/)
//! runbuild
//!
//! # fail the process when a step or example fails
//! runbuild --strict
//! ```
//!
//! ## Module Organization
//!
//! - [`build`] - The pipeline: layout, build tool invocation, case discovery and execution
//! - [`config`] - Configuration parsing (`runbuild.toml`)
//! - [`commands`] - Auxiliary CLI command handlers

/// The build-and-smoke-test pipeline.
pub mod build;

/// Auxiliary CLI command handlers.
pub mod commands;

/// Configuration file parsing (`runbuild.toml`).
pub mod config;

/// Terminal UI utilities (tables).
pub mod ui;
