//! Stock adjustment control
//!
//! Single-unit increment/decrement against one item. No optimistic
//! updates: the displayed quantity changes only after the server confirms
//! the new value. Decrement at zero is blocked locally before any request;
//! the server still owns the authoritative floor, so the client never
//! computes or pushes an absolute count.

use dukaan_client::{ClientError, HttpClient};
use shared::models::{Item, StockAction};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StockError {
    /// Local guard: the displayed quantity is already at zero.
    #[error("Stock cannot be less than zero")]
    AtFloor,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Stock state for one item row
#[derive(Debug, Clone)]
pub struct StockControl {
    item_id: String,
    quantity: f64,
}

impl StockControl {
    pub fn new(item: &Item) -> Self {
        Self {
            item_id: item.id.clone(),
            quantity: item.stock_quantity,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Last server-confirmed quantity
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Whether the decrement control is enabled
    pub fn can_decrement(&self) -> bool {
        self.quantity > 0.0
    }

    pub async fn increment(&mut self, client: &HttpClient) -> Result<f64, StockError> {
        self.adjust(client, StockAction::Increment).await
    }

    /// Decrement by one unit. Blocked locally at zero — no request fires.
    pub async fn decrement(&mut self, client: &HttpClient) -> Result<f64, StockError> {
        if !self.can_decrement() {
            return Err(StockError::AtFloor);
        }
        self.adjust(client, StockAction::Decrement).await
    }

    async fn adjust(&mut self, client: &HttpClient, action: StockAction) -> Result<f64, StockError> {
        let confirmed = client.adjust_stock(&self.item_id, action).await?;
        tracing::debug!(item = %self.item_id, ?action, confirmed, "stock adjusted");
        self.quantity = confirmed;
        Ok(confirmed)
    }
}
