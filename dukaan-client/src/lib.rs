//! Dukaan Client - HTTP client for the shop management API
//!
//! Provides network-based HTTP calls to the remote REST API. The client
//! holds an optional bearer token; endpoints that require authentication
//! fail with [`ClientError::Unauthorized`] when the server rejects it.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::client::{CheckUserResponse, MessageResponse, SessionRequest, SessionResponse};
