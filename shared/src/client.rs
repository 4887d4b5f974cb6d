//! Client-related types shared across the workspace
//!
//! Request/response types for the unauthenticated auth endpoints, plus
//! the generic message body most mutation endpoints answer with.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Phone existence check request (`POST /api/check-user`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckUserRequest {
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

/// Phone existence check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckUserResponse {
    pub exists: bool,
}

/// Session exchange request (`POST /api/session`)
///
/// Phone, password, and OTP travel together; the server decides whether
/// this is a login or a registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub password: String,
    pub otp: String,
}

/// Session exchange response
///
/// `token` is opaque to the client; `has_shop` routes the caller to
/// either shop setup or the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
    #[serde(default)]
    pub has_shop: bool,
}

// =============================================================================
// Generic responses
// =============================================================================

/// Generic `{"message": …}` body returned by most mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
