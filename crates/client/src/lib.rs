//! Client code for fetchgate.
//!
//! This crate provides the URL denylist and the two outbound fetchers
//! (HTTP library and external command) shared by the server and CLI.

pub mod fetch;

pub use fetch::{BLOCKED_MESSAGE, CommandConfig, CommandFetcher, CommandOutput, FetchClient, FetchConfig, validate};
