//! Fragment-based routing
//!
//! The URL fragment is the sole navigation mechanism. A stored session
//! token and the has-shop flag gate which fragment resolves to which
//! view.

/// Application views addressable by URL fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    Login,
    Otp,
    ShopSetup,
    #[default]
    Home,
    Items,
    Bills,
    Customers,
}

impl Route {
    /// Parse a location fragment. Unknown fragments fall back to home.
    pub fn parse(hash: &str) -> Self {
        let hash = hash.to_ascii_lowercase();
        if hash.contains("#/items") {
            Route::Items
        } else if hash.contains("#/bills") {
            Route::Bills
        } else if hash.contains("#/customers") {
            Route::Customers
        } else if hash.contains("#/shop-setup") {
            Route::ShopSetup
        } else if hash.contains("#/otp") {
            Route::Otp
        } else if hash.contains("#/login") {
            Route::Login
        } else {
            Route::Home
        }
    }

    /// Canonical fragment for this route
    pub fn fragment(&self) -> &'static str {
        match self {
            Route::Login => "#/login",
            Route::Otp => "#/otp",
            Route::ShopSetup => "#/shop-setup",
            Route::Home => "#/home",
            Route::Items => "#/items",
            Route::Bills => "#/bills",
            Route::Customers => "#/customers",
        }
    }

    /// Gate the requested route on session state.
    ///
    /// Without a token everything resolves to login (the OTP view is only
    /// reachable programmatically mid-flow, never by fragment restore).
    /// With a token but no shop record, everything resolves to shop
    /// setup; auth fragments resolve to home once authenticated.
    pub fn resolve(self, authenticated: bool, has_shop: Option<bool>) -> Route {
        if !authenticated {
            return Route::Login;
        }
        if has_shop == Some(false) {
            return Route::ShopSetup;
        }
        match self {
            Route::Login | Route::Otp => Route::Home,
            other => other,
        }
    }
}
