//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use validator::Validate;

use shared::client::{
    CheckUserRequest, CheckUserResponse, MessageResponse, SessionRequest, SessionResponse,
};
use shared::models::{
    BillDetails, BillSummary, BillsResponse, CreateBillRequest, CreateBillResponse,
    CreateCustomerResponse, CreateShopResponse, Customer, CustomerCreate, CustomerPricesResponse,
    CustomerUpdate, CustomersResponse, HomepageResponse, Item, ItemCreate, ItemUpdate,
    ItemsResponse, Shop, ShopCreate, ShopResponse, StockAction, StockAdjustRequest,
    StockAdjustResponse,
};
use shared::util::{is_complete_phone, mask_phone};

/// Error body shape the server answers with on failures.
///
/// Most endpoints use `{"error": ...}`; the auth middleware answers with
/// `{"message": ...}` instead.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for making network requests to the shop API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the authentication token in place (after session exchange)
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drop the authentication token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_header() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        }
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.apply_auth(self.client.get(self.url(path)));
        Self::handle_response(request.send().await?).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.apply_auth(self.client.post(self.url(path)).json(body));
        Self::handle_response(request.send().await?).await
    }

    /// Make a PUT request with JSON body
    async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.apply_auth(self.client.put(self.url(path)).json(body));
        Self::handle_response(request.send().await?).await
    }

    /// Make a PATCH request with JSON body
    async fn patch<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.apply_auth(self.client.patch(self.url(path)).json(body));
        Self::handle_response(request.send().await?).await
    }

    /// Make a DELETE request
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.apply_auth(self.client.delete(self.url(path)));
        Self::handle_response(request.send().await?).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.error.or(body.message))
                .unwrap_or_else(|| "Something went wrong. Please try again.".to_string());

            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                _ => Err(ClientError::Api {
                    status: status.as_u16(),
                    message,
                }),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Auth API ==========

    /// Check whether a phone number belongs to a registered account
    pub async fn check_user(&self, phone_number: &str) -> ClientResult<bool> {
        if !is_complete_phone(phone_number) {
            return Err(ClientError::Validation(
                "A valid 10-digit phone number is required".to_string(),
            ));
        }

        let request = CheckUserRequest {
            phone_number: phone_number.to_string(),
        };
        let response: CheckUserResponse = self.post("/check-user", &request).await?;
        tracing::debug!(phone = %mask_phone(phone_number), exists = response.exists, "user existence check");
        Ok(response.exists)
    }

    /// Exchange phone, password, and OTP for a session token
    pub async fn create_session(
        &self,
        phone_number: &str,
        password: &str,
        otp: &str,
    ) -> ClientResult<SessionResponse> {
        let request = SessionRequest {
            phone_number: phone_number.to_string(),
            password: password.to_string(),
            otp: otp.to_string(),
        };
        let response: SessionResponse = self.post("/session", &request).await?;
        tracing::debug!(phone = %mask_phone(phone_number), has_shop = response.has_shop, "session created");
        Ok(response)
    }

    // ========== Shop API ==========

    /// Fetch the current user's shop; `None` if no shop is registered yet
    pub async fn shop(&self) -> ClientResult<Option<Shop>> {
        match self.get::<ShopResponse>("/shop").await {
            Ok(response) => Ok(Some(response.shop)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Register a shop for the current user
    pub async fn create_shop(&self, shop: &ShopCreate) -> ClientResult<CreateShopResponse> {
        shop.validate()?;
        self.post("/shop", shop).await
    }

    /// Fetch only the shop name; `None` if no shop is registered yet
    pub async fn shop_name(&self) -> ClientResult<Option<String>> {
        match self.get::<HomepageResponse>("/homepage").await {
            Ok(response) => Ok(response.shop_name),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    // ========== Items API ==========

    /// List the shop's items
    pub async fn items(&self) -> ClientResult<Vec<Item>> {
        let response: ItemsResponse = self.get("/items").await?;
        Ok(response.items)
    }

    /// Create an item
    pub async fn create_item(&self, item: &ItemCreate) -> ClientResult<()> {
        item.validate()?;
        let _: MessageResponse = self.post("/create-items", item).await?;
        Ok(())
    }

    /// Update an item (full field replacement)
    pub async fn update_item(&self, item_id: &str, item: &ItemUpdate) -> ClientResult<()> {
        item.validate()?;
        let _: MessageResponse = self.put(&format!("/items/{}", item_id), item).await?;
        Ok(())
    }

    /// Delete an item
    pub async fn delete_item(&self, item_id: &str) -> ClientResult<()> {
        let _: MessageResponse = self.delete(&format!("/items/{}", item_id)).await?;
        Ok(())
    }

    /// Adjust an item's stock by one unit and return the server-confirmed
    /// new quantity.
    ///
    /// Only the intent travels over the wire; the server owns the
    /// arithmetic, so concurrent adjustments cannot lose updates.
    pub async fn adjust_stock(&self, item_id: &str, action: StockAction) -> ClientResult<f64> {
        let request = StockAdjustRequest { action };
        let response: StockAdjustResponse = self
            .patch(&format!("/items/{}/stock", item_id), &request)
            .await?;
        Ok(response.new_stock_quantity)
    }

    // ========== Pricing API ==========

    /// Fetch the item list annotated with a customer's override prices
    pub async fn customer_prices(
        &self,
        phone_number: &str,
    ) -> ClientResult<CustomerPricesResponse> {
        if !is_complete_phone(phone_number) {
            return Err(ClientError::Validation(
                "A 10-digit phone number is required".to_string(),
            ));
        }
        self.get(&format!("/customer-prices?phone_number={}", phone_number))
            .await
    }

    // ========== Bills API ==========

    /// List persisted bills
    pub async fn bills(&self) -> ClientResult<Vec<BillSummary>> {
        let response: BillsResponse = self.get("/bills").await?;
        Ok(response.bills)
    }

    /// Fetch one bill with its line items
    pub async fn bill(&self, bill_id: &str) -> ClientResult<BillDetails> {
        self.get(&format!("/bills/{}", bill_id)).await
    }

    /// Submit a draft bill
    pub async fn create_bill(&self, bill: &CreateBillRequest) -> ClientResult<CreateBillResponse> {
        self.post("/create-bill", bill).await
    }

    /// Delete a bill, optionally restocking its items
    pub async fn delete_bill(&self, bill_id: &str, restore_items: bool) -> ClientResult<()> {
        let _: MessageResponse = self
            .delete(&format!(
                "/bills/{}?restore_items={}",
                bill_id, restore_items
            ))
            .await?;
        Ok(())
    }

    // ========== Customers API ==========

    /// List the shop's customers
    pub async fn customers(&self) -> ClientResult<Vec<Customer>> {
        let response: CustomersResponse = self.get("/customers").await?;
        Ok(response.customers)
    }

    /// Create a customer
    pub async fn create_customer(
        &self,
        customer: &CustomerCreate,
    ) -> ClientResult<CreateCustomerResponse> {
        if customer.is_empty() {
            return Err(ClientError::Validation(
                "At least one field (name, phone, email, or address) is required.".to_string(),
            ));
        }
        customer.validate()?;
        self.post("/customers", customer).await
    }

    /// Update a customer
    pub async fn update_customer(
        &self,
        customer_id: &str,
        customer: &CustomerUpdate,
    ) -> ClientResult<()> {
        customer.validate()?;
        let _: MessageResponse = self
            .put(&format!("/customers/{}", customer_id), customer)
            .await?;
        Ok(())
    }

    /// Delete a customer
    pub async fn delete_customer(&self, customer_id: &str) -> ClientResult<()> {
        let _: MessageResponse = self.delete(&format!("/customers/{}", customer_id)).await?;
        Ok(())
    }
}
