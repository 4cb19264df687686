//! # Maturity application library
//!
//! The CLI, the HTTP API and the configuration layer, exposed as a library
//! so the binary and the integration tests share one build.

pub mod api;
pub mod cli;
pub mod config;
pub mod edit;
