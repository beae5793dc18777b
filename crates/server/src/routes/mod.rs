//! HTTP route handlers.

pub mod command;
pub mod curl;
pub mod health;
