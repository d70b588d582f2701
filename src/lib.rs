//! Build and deliver stack-smashing payloads to WebSocket services.
//!

/// Message-oriented transport for talking to the target service.
pub mod connection;

/// Crate-wide error type.
pub mod error;

/// One-shot payload delivery against a configured target.
pub mod poc;

pub mod util;
