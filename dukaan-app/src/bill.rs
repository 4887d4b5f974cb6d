//! Bill draft builder and pricing engine
//!
//! A draft is a mutable list of line rows plus a selected price tier,
//! payment status, and (for partial payments) an amount paid. Totals are
//! derived purely from current state; no server round trip is needed to
//! know the running total. The server assigns identity and persists the
//! bill on submission.

use dukaan_client::{ClientError, HttpClient};
use shared::models::{
    BillLinePayload, BillStatus, CreateBillRequest, CreateBillResponse, CustomerPricesResponse,
    Item, PriceTier,
};
use shared::util::{is_complete_phone, sanitize_phone};
use thiserror::Error;

/// Draft submission errors
#[derive(Debug, Error)]
pub enum BillError {
    /// Local validation; no request was sent.
    #[error("Phone number must be 10 digits.")]
    InvalidCustomerPhone,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Derive the default unit price for an item under a tier.
///
/// `customer_specific` uses the item's per-customer override and falls
/// back to the retail price when no override exists for that item.
/// Missing price columns derive to zero, matching how the form left the
/// price field at 0 for items without the selected tier's price.
pub fn derive_default_price(item: &Item, tier: PriceTier) -> f64 {
    match tier {
        PriceTier::Retail => item.retail_price.unwrap_or(0.0),
        PriceTier::Wholesale => item.wholesale_price.unwrap_or(0.0),
        PriceTier::Cost => item.cost_price.unwrap_or(0.0),
        PriceTier::CustomerSpecific => item
            .custom_price
            .or(item.retail_price)
            .unwrap_or(0.0),
    }
}

/// Merge a customer-price lookup into the plain item list.
///
/// Returns the annotated items and whether any override exists; callers
/// switch the draft to the customer-specific tier when it does, matching
/// the form's auto-switch on a recognized phone number.
pub fn merge_customer_prices(response: CustomerPricesResponse) -> (Vec<Item>, bool) {
    let has_overrides = !response.customer_items.is_empty();
    let mut items = response.items;
    for item in &mut items {
        if let Some(custom) = response
            .customer_items
            .iter()
            .find(|ci| ci.id == item.id)
            .and_then(|ci| ci.custom_price)
        {
            item.custom_price = Some(custom);
        }
    }
    (items, has_overrides)
}

/// One draft line
#[derive(Debug, Clone)]
pub struct LineRow {
    row_id: u64,
    pub item: Option<Item>,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineRow {
    /// Client-local identity; never persisted.
    pub fn row_id(&self) -> u64 {
        self.row_id
    }

    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Draft bill under construction
#[derive(Debug, Clone)]
pub struct BillDraft {
    customer_name: String,
    customer_phone: String,
    rows: Vec<LineRow>,
    tier: PriceTier,
    status: BillStatus,
    amount_paid: f64,
    next_row_id: u64,
}

impl Default for BillDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl BillDraft {
    /// Fresh draft: one empty row at quantity 1, retail tier, paid status.
    pub fn new() -> Self {
        let mut draft = Self {
            customer_name: String::new(),
            customer_phone: String::new(),
            rows: Vec::new(),
            tier: PriceTier::Retail,
            status: BillStatus::Paid,
            amount_paid: 0.0,
            next_row_id: 0,
        };
        draft.add_row();
        draft
    }

    pub fn rows(&self) -> &[LineRow] {
        &self.rows
    }

    pub fn tier(&self) -> PriceTier {
        self.tier
    }

    pub fn status(&self) -> BillStatus {
        self.status
    }

    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    pub fn amount_paid(&self) -> f64 {
        self.amount_paid
    }

    /// Append an empty row and return its id.
    pub fn add_row(&mut self) -> u64 {
        let row_id = self.next_row_id;
        self.next_row_id += 1;
        self.rows.push(LineRow {
            row_id,
            item: None,
            quantity: 1.0,
            unit_price: 0.0,
        });
        row_id
    }

    pub fn remove_row(&mut self, row_id: u64) {
        self.rows.retain(|row| row.row_id != row_id);
    }

    fn row_mut(&mut self, row_id: u64) -> Option<&mut LineRow> {
        self.rows.iter_mut().find(|row| row.row_id == row_id)
    }

    /// Select (or clear) the item of one row.
    ///
    /// Re-derives that row's unit price from the current tier. Only this
    /// row is touched — contrast with [`BillDraft::set_tier`], which
    /// re-derives every row. The asymmetry is deliberate: item selection
    /// must not disturb hand-edited prices on other rows.
    pub fn set_item(&mut self, row_id: u64, item: Option<Item>) {
        let tier = self.tier;
        if let Some(row) = self.row_mut(row_id) {
            row.unit_price = item
                .as_ref()
                .map(|item| derive_default_price(item, tier))
                .unwrap_or(0.0);
            row.item = item;
        }
    }

    /// Set a row's quantity, clamped to >= 0 (negative input coerces to 0).
    pub fn set_quantity(&mut self, row_id: u64, quantity: f64) {
        if let Some(row) = self.row_mut(row_id) {
            row.quantity = clamp_non_negative(quantity);
        }
    }

    /// Manually edit a row's unit price, clamped to >= 0.
    ///
    /// The edit stands until that row's item changes or the tier changes
    /// again (last writer wins per row).
    pub fn set_unit_price(&mut self, row_id: u64, price: f64) {
        if let Some(row) = self.row_mut(row_id) {
            row.unit_price = clamp_non_negative(price);
        }
    }

    /// Switch the price tier and re-derive the unit price of EVERY row
    /// with a selected item, overwriting manual edits.
    ///
    /// Intentional: tier selection always wins, so retail -> wholesale ->
    /// retail restores retail prices even on rows the user hand-edited in
    /// between. Keep this global and [`BillDraft::set_item`] per-row;
    /// making them uniform changes user-visible behavior.
    pub fn set_tier(&mut self, tier: PriceTier) {
        self.tier = tier;
        for row in &mut self.rows {
            if let Some(item) = &row.item {
                row.unit_price = derive_default_price(item, tier);
            }
        }
    }

    pub fn set_status(&mut self, status: BillStatus) {
        self.status = status;
    }

    /// Amount received so far; only meaningful for partial status.
    pub fn set_amount_paid(&mut self, amount: f64) {
        self.amount_paid = clamp_non_negative(amount);
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    /// Customer phone field input; non-digits stripped, capped at ten.
    pub fn set_customer_phone(&mut self, raw: &str) {
        self.customer_phone = sanitize_phone(raw);
    }

    /// Running total: sum of quantity x unit price over all rows,
    /// recomputed from scratch on every call.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(LineRow::line_total).sum()
    }

    /// Outstanding balance. Overpayment is accepted, so this can go
    /// negative; rejecting or clamping it is a server-side decision.
    pub fn remaining(&self) -> f64 {
        self.total() - self.amount_paid
    }

    /// Build the submission payload.
    ///
    /// Fails locally (no network call) when the customer phone is
    /// non-empty but not exactly ten digits; an empty phone is an
    /// anonymous cash sale. `amountPaid` is included only for partial
    /// status — omitted entirely otherwise, not zeroed.
    pub fn payload(&self) -> Result<CreateBillRequest, BillError> {
        if !self.customer_phone.is_empty() && !is_complete_phone(&self.customer_phone) {
            return Err(BillError::InvalidCustomerPhone);
        }

        Ok(CreateBillRequest {
            customer_name: self.customer_name.clone(),
            customer_phone: self.customer_phone.clone(),
            bill_items: self
                .rows
                .iter()
                .map(|row| BillLinePayload {
                    id: row.row_id,
                    item: row.item.clone(),
                    quantity: row.quantity,
                    price: row.unit_price,
                })
                .collect(),
            total_amount: self.total(),
            status: self.status,
            amount_paid: match self.status {
                BillStatus::Partial => Some(self.amount_paid),
                _ => None,
            },
        })
    }

    /// Submit the draft.
    ///
    /// Takes `&self`: on failure the draft is untouched so the user can
    /// correct and resubmit; on success the caller drops the draft and
    /// refreshes the persisted bill list.
    pub async fn submit(&self, client: &HttpClient) -> Result<CreateBillResponse, BillError> {
        let payload = self.payload()?;
        let response = client.create_bill(&payload).await?;
        tracing::debug!(bill_id = %response.bill_id, total = payload.total_amount, "bill created");
        Ok(response)
    }
}

fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
