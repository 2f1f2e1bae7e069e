//! CLI utilities for the market build tools
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Logging initialisation

#![warn(missing_docs)]

pub mod logging;
pub mod output;
