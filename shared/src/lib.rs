//! Shared types for the dukaan workspace
//!
//! Wire-level domain types used by both the HTTP client and the
//! application layer: models, request/response DTOs, deserialization
//! helpers for the API's loosely-typed JSON, and utility functions.

pub mod client;
pub mod de;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Model re-exports (for convenient access)
pub use models::{
    BillDetails, BillLine, BillStatus, BillSummary, Customer, Item, PriceTier, Shop, StockAction,
};
