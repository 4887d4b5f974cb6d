//! Phone/OTP authentication flow
//!
//! The flow is a pure state machine ([`machine`]) driven by an async
//! debounce driver ([`driver`]), plus the 4-slot OTP input ([`otp`]).
//! Network access goes through the [`UserLookup`] seam so every
//! transition is testable without a server.

pub mod driver;
pub mod machine;
pub mod otp;

pub use driver::{AuthFlow, UserLookup, VerifiedCredentials};
pub use machine::{AuthEvent, PhoneAuth, PhoneVerification, DEBOUNCE_MILLIS};
pub use otp::OtpInput;

use dukaan_client::ClientError;
use thiserror::Error;

/// Validation and flow errors for the auth screens.
///
/// Messages are user-presentable and mirror what the forms showed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("A valid 10-digit phone number is required")]
    IncompletePhone,

    #[error("Password must be at least 8 characters long.")]
    PasswordTooShort,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Please enter a 4-digit OTP.")]
    OtpIncomplete,

    /// The phone number changed while a submission was in flight.
    #[error("Phone number changed, please try again.")]
    Interrupted,

    /// Remote failure; the operation is retryable by resubmitting.
    #[error(transparent)]
    Client(#[from] ClientError),
}
