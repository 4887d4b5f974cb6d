//! Process-wide application context
//!
//! Holds the two pieces of state shared across views: the session token
//! (inside the HTTP client) and the shop identity cache. Lifecycle is
//! deliberately simple: populated on bootstrap, cleared on logout,
//! otherwise immutable between refreshes.

use thiserror::Error;
use tokio::sync::RwLock;

use dukaan_client::{ClientError, HttpClient};
use shared::models::{Shop, ShopCreate};

use crate::config::AppConfig;
use crate::route::Route;
use crate::session::{SessionStore, SessionStoreError};

#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

#[derive(Debug)]
struct ContextInner {
    client: HttpClient,
    shop: Option<Shop>,
    has_shop: Option<bool>,
}

/// Shared session + shop identity state
pub struct AppContext {
    store: SessionStore,
    inner: RwLock<ContextInner>,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: SessionStore::new(&config.data_dir),
            inner: RwLock::new(ContextInner {
                client: config.client_config().build_http_client(),
                shop: None,
                has_shop: None,
            }),
        }
    }

    /// Restore a stored session and populate the shop cache.
    ///
    /// A missing shop (404) is a normal state, not an error: the caller
    /// routes to shop setup. A rejected token clears the stored session.
    /// Other failures leave the shop state unknown and surface the error.
    pub async fn bootstrap(&self) -> Result<(), ContextError> {
        let Some(token) = self.store.load()? else {
            return Ok(());
        };

        {
            let mut inner = self.inner.write().await;
            inner.client.set_token(&token);
        }

        match self.refresh_shop().await {
            Ok(_) => Ok(()),
            Err(ContextError::Client(ClientError::Unauthorized)) => {
                tracing::info!("Stored session rejected, logging out");
                self.logout().await
            }
            Err(e) => Err(e),
        }
    }

    /// Exchange verified credentials + OTP code for a session.
    ///
    /// Persists the token and seeds the has-shop flag from the server's
    /// response. Returns whether the account already owns a shop, which
    /// routes the caller to setup or the dashboard.
    pub async fn complete_login(
        &self,
        phone: &str,
        password: &str,
        otp_code: &str,
    ) -> Result<bool, ContextError> {
        let response = {
            let inner = self.inner.read().await;
            inner.client.create_session(phone, password, otp_code).await?
        };

        self.store.save(&response.token)?;
        let mut inner = self.inner.write().await;
        inner.client.set_token(&response.token);
        inner.has_shop = Some(response.has_shop);
        inner.shop = None;
        Ok(response.has_shop)
    }

    /// Re-fetch the shop record and update the cache.
    pub async fn refresh_shop(&self) -> Result<Option<Shop>, ContextError> {
        let shop = {
            let inner = self.inner.read().await;
            inner.client.shop().await?
        };

        let mut inner = self.inner.write().await;
        inner.has_shop = Some(shop.is_some());
        inner.shop = shop.clone();
        Ok(shop)
    }

    /// Register a shop for the current account and cache it.
    pub async fn create_shop(&self, shop: &ShopCreate) -> Result<(), ContextError> {
        {
            let inner = self.inner.read().await;
            inner.client.create_shop(shop).await?;
        }
        self.refresh_shop().await?;
        Ok(())
    }

    /// Drop the session: stored token, client token, and shop cache.
    pub async fn logout(&self) -> Result<(), ContextError> {
        self.store.clear()?;
        let mut inner = self.inner.write().await;
        inner.client.clear_token();
        inner.shop = None;
        inner.has_shop = None;
        Ok(())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.client.token().is_some()
    }

    pub async fn has_shop(&self) -> Option<bool> {
        self.inner.read().await.has_shop
    }

    pub async fn shop(&self) -> Option<Shop> {
        self.inner.read().await.shop.clone()
    }

    pub async fn shop_name(&self) -> Option<String> {
        self.inner.read().await.shop.as_ref().map(|s| s.name.clone())
    }

    /// Two-letter header badge derived from the shop name.
    pub async fn initials(&self) -> String {
        match self.shop_name().await {
            Some(name) => initials_of(&name),
            None => "SN".to_string(),
        }
    }

    /// A client carrying the current token, for view-level requests.
    pub async fn client(&self) -> HttpClient {
        self.inner.read().await.client.clone()
    }

    /// Resolve a location fragment against the current session state.
    pub async fn resolve_route(&self, hash: &str) -> Route {
        let inner = self.inner.read().await;
        Route::parse(hash).resolve(inner.client.token().is_some(), inner.has_shop)
    }
}

/// First letters of the first two words, or the first two characters of a
/// single-word name, uppercased. Falls back to "SN".
fn initials_of(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => "SN".to_string(),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [first, second, ..] => {
            let mut initials = String::new();
            initials.extend(first.chars().next());
            initials.extend(second.chars().next());
            initials.to_uppercase()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_from_shop_name() {
        assert_eq!(initials_of("Sharma General Store"), "SG");
        assert_eq!(initials_of("Dukaan"), "DU");
        assert_eq!(initials_of("  "), "SN");
        assert_eq!(initials_of("k"), "K");
    }
}
