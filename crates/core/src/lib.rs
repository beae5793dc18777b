//! Core types and shared functionality for fetchgate.
//!
//! This crate provides:
//! - The request/result data model
//! - Unified error types
//! - The JSON response formatter
//! - Configuration structures

pub mod config;
pub mod error;
pub mod model;
pub mod response;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::{FetchRequest, FetchResult};
pub use response::{SerializedResponse, format};
