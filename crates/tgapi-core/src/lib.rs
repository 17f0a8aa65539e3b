//! Typed client core for the Telegram Bot HTTP API.
//!
//! This crate is transport-agnostic: it owns the wire rules, the response
//! envelope and the request plumbing, and talks to the network through the
//! [`transport::Transport`] port implemented in adapter crates.

pub mod bot;
pub mod client;
pub mod codec;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod logging;
pub mod query;
pub mod transport;
pub mod types;

pub use bot::Bot;
pub use client::WebApiClient;
pub use config::Config;
pub use envelope::ApiResponse;
pub use errors::{Error, RequestError, RequestErrorKind, Result};
