//! Bill Models
//!
//! Persisted bills are a read model: the server assigns identity,
//! timestamp, and totals, and the client never recomputes `totalAmount`
//! for display. Draft submission payloads live here too.
//!
//! Field casing follows the wire exactly: this API mixes camelCase
//! (`totalAmount`, `createdAt`, `amountPaid`) with snake_case
//! (`customer_name`) in the same objects.

use serde::{Deserialize, Serialize};

use super::Item;
use crate::de;

/// Payment status of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Paid,
    Unpaid,
    Partial,
}

/// Bill list entry (`GET /api/bills`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillSummary {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub customer_id: Option<String>,
    /// Server substitutes "Walk-in" when the bill has no customer.
    pub customer_name: String,
    #[serde(rename = "totalAmount", deserialize_with = "de::decimal")]
    pub total_amount: f64,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub status: BillStatus,
    #[serde(rename = "amountPaid", default, deserialize_with = "de::decimal")]
    pub amount_paid: f64,
}

impl BillSummary {
    /// Outstanding balance; only meaningful for partially paid bills.
    pub fn remaining(&self) -> Option<f64> {
        match self.status {
            BillStatus::Partial => Some(self.total_amount - self.amount_paid),
            _ => None,
        }
    }
}

/// One line of a persisted bill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillLine {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "de::decimal")]
    pub quantity: f64,
    #[serde(deserialize_with = "de::decimal")]
    pub price: f64,
}

/// Full bill detail (`GET /api/bills/:id`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillDetails {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub customer_id: Option<String>,
    pub customer_name: String,
    #[serde(rename = "totalAmount", deserialize_with = "de::decimal")]
    pub total_amount: f64,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub status: BillStatus,
    #[serde(rename = "amountPaid", default, deserialize_with = "de::decimal")]
    pub amount_paid: f64,
    #[serde(default)]
    pub items: Vec<BillLine>,
}

/// Bill list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillsResponse {
    #[serde(default)]
    pub bills: Vec<BillSummary>,
}

/// One draft line as submitted (`POST /api/create-bill`)
///
/// `id` is the client-local row id (never persisted); the full selected
/// item object rides along because the server reads `item.id` from it.
/// Rows where no item was picked serialize with `item: null` and are
/// rejected server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillLinePayload {
    pub id: u64,
    pub item: Option<Item>,
    pub quantity: f64,
    pub price: f64,
}

/// Draft bill submission payload (`POST /api/create-bill`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBillRequest {
    #[serde(rename = "customerName")]
    pub customer_name: String,
    #[serde(rename = "customerPhone")]
    pub customer_phone: String,
    #[serde(rename = "billItems")]
    pub bill_items: Vec<BillLinePayload>,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    pub status: BillStatus,
    /// Present only for `status = partial`; omitted entirely otherwise.
    #[serde(rename = "amountPaid", skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<f64>,
}

/// Create bill response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBillResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(deserialize_with = "de::id")]
    pub bill_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_wire_casing() {
        let json = r#"{
            "id": "0b6e9a2e-1f0a-4ab9-9a4e-111111111111",
            "customer_id": 3,
            "customer_name": "Asha",
            "totalAmount": 150.0,
            "createdAt": "2025-11-02T10:15:00",
            "status": "partial",
            "amountPaid": 100.0
        }"#;
        let bill: BillSummary = serde_json::from_str(json).unwrap();
        assert_eq!(bill.customer_id.as_deref(), Some("3"));
        assert_eq!(bill.remaining(), Some(50.0));
    }

    #[test]
    fn remaining_only_for_partial() {
        let json = r#"{
            "id": "x",
            "customer_id": null,
            "customer_name": "Walk-in",
            "totalAmount": 99.0,
            "createdAt": "2025-11-02T10:15:00",
            "status": "paid",
            "amountPaid": 99.0
        }"#;
        let bill: BillSummary = serde_json::from_str(json).unwrap();
        assert_eq!(bill.remaining(), None);
    }

    #[test]
    fn amount_paid_omitted_unless_partial() {
        let request = CreateBillRequest {
            customer_name: String::new(),
            customer_phone: String::new(),
            bill_items: Vec::new(),
            total_amount: 150.0,
            status: BillStatus::Paid,
            amount_paid: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("amountPaid").is_none());
        assert_eq!(json["totalAmount"], 150.0);

        let request = CreateBillRequest {
            status: BillStatus::Partial,
            amount_paid: Some(100.0),
            ..request
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["amountPaid"], 100.0);
    }
}
