//! Core types and shared functionality for pustaka.
//!
//! This crate provides:
//! - Layered application configuration
//! - The unified error taxonomy and the user-facing notices it maps to

pub mod config;
pub mod error;

pub use config::{AppConfig, ConfigError};
pub use error::{Error, Notice};
