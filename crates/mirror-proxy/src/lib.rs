//! Mirror Cache upstream transport
//!
//! This crate provides the `Transport` trait the decision engine sends
//! requests through, and the reqwest-based implementation that talks to
//! the real upstream API.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{HttpTransport, HttpTransportConfig};
pub use error::TransportError;
pub use transport::{Transport, UpstreamRequest, UpstreamResponse};
