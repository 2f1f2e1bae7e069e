//! Core utilities for the market build tools
//!
//! This crate provides functionality shared by the platform crates and CLIs:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML project configuration with defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use market_core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(None, Path::new(".")).expect("invalid .market-build.toml");
//! println!("Building {}", config.schema.android.application_id);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{exit_codes, Error, ErrorCode, Result};
