//! Shop Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::de;

/// Shop entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub gstin: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Create shop payload (`POST /api/shop`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShopCreate {
    #[validate(length(min = 1, message = "Shop name is required"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Shop lookup response (`GET /api/shop`); 404 means no shop yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopResponse {
    pub shop: Shop,
}

/// Create shop response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShopResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(deserialize_with = "de::id")]
    pub shop_id: String,
}

/// Shop name lookup (`GET /api/homepage`); `shopName` is null when the
/// account owns no shop record yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomepageResponse {
    #[serde(rename = "shopName", default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
