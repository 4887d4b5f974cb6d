//! Dukaan App - client-side application core
//!
//! Everything the UI shell needs that is not presentation: the
//! phone-verification and OTP state machines, the bill draft pricing
//! engine, stock adjustment guards, fragment routing, and the
//! process-wide session/shop context with its file-backed token store.
//!
//! The crate talks to the network only through [`dukaan_client`]; every
//! state machine here is pure and testable without I/O.

pub mod auth;
pub mod bill;
pub mod config;
pub mod context;
pub mod route;
pub mod session;
pub mod stock;

pub use auth::{
    AuthError, AuthEvent, AuthFlow, OtpInput, PhoneAuth, PhoneVerification, UserLookup,
    VerifiedCredentials,
};
pub use bill::{derive_default_price, merge_customer_prices, BillDraft, BillError, LineRow};
pub use config::AppConfig;
pub use context::{AppContext, ContextError};
pub use route::Route;
pub use session::{SessionStore, SessionStoreError};
pub use stock::{StockControl, StockError};
