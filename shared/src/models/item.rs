//! Item Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::de;

/// Inventory item entity
///
/// Decimal columns arrive stringified from `/api/items` but as plain
/// numbers from `/api/customer-prices`; the lenient deserializers accept
/// both. `custom_price` is populated only after merging a customer-price
/// lookup for the currently entered customer phone number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    pub cost_price: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    pub wholesale_price: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    pub retail_price: Option<f64>,
    #[serde(deserialize_with = "de::decimal")]
    pub stock_quantity: f64,
    #[serde(default)]
    pub si_unit: Option<String>,
    /// Per-customer override price, present only after a customer-price merge.
    #[serde(default, deserialize_with = "de::opt_decimal")]
    pub custom_price: Option<f64>,
}

/// Create item payload (`POST /api/create-items`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemCreate {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wholesale_price: Option<f64>,
    #[validate(range(min = 0.0, message = "Retail price cannot be negative"))]
    pub retail_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub si_unit: Option<String>,
}

/// Update item payload (`PUT /api/items/:id`)
///
/// The endpoint replaces the full field set rather than patching, so the
/// payload mirrors [`ItemCreate`] with the same required fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemUpdate {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wholesale_price: Option<f64>,
    #[validate(range(min = 0.0, message = "Retail price cannot be negative"))]
    pub retail_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub si_unit: Option<String>,
}

/// Item list response (`GET /api/items`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse {
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Customer price lookup response (`GET /api/customer-prices`)
///
/// `customer_items` repeats the subset of `items` that carries a
/// `custom_price` for the looked-up customer; it is empty when the phone
/// number matches no customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPricesResponse {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub customer_items: Vec<Item>,
}

/// Price tier used to derive a default unit price for a bill line.
///
/// Wire names match the item columns they select, as the original
/// dropdown encoded them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceTier {
    #[default]
    #[serde(rename = "retail_price")]
    Retail,
    #[serde(rename = "wholesale_price")]
    Wholesale,
    #[serde(rename = "cost_price")]
    Cost,
    #[serde(rename = "customer_specific")]
    CustomerSpecific,
}

/// Stock adjustment intent (`PATCH /api/items/:id/stock`)
///
/// The client only ever sends an intent, never a computed absolute count;
/// the server applies the increment/decrement atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockAction {
    Increment,
    Decrement,
}

/// Stock adjustment request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustRequest {
    pub action: StockAction,
}

/// Stock adjustment response; carries the authoritative new count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(deserialize_with = "crate::de::decimal")]
    pub new_stock_quantity: f64,
}
