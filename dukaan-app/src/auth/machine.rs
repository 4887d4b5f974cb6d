//! Phone verification state machine
//!
//! Tracks whether the entered phone number belongs to a known account
//! (login: password only) or a new one (signup: password + confirmation).
//! Every keystroke that changes the phone field resets the machine to
//! `Idle` and bumps the generation counter; events stamped with an older
//! generation are discarded, so a slow existence-check response can never
//! overwrite state derived from newer input.

use shared::util::{is_complete_phone, sanitize_phone};

use super::AuthError;

/// Debounce delay before the existence check fires, in milliseconds.
pub const DEBOUNCE_MILLIS: u64 = 500;

/// Verification state for the currently entered phone number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneVerification {
    /// Nothing resolved for the current input
    #[default]
    Idle,
    /// Existence check in flight
    Checking { generation: u64 },
    /// Account exists; password only
    KnownUser,
    /// No account; password + confirmation
    NewUser,
}

/// Events the reducer consumes
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// Raw phone field input (unsanitized)
    PhoneEdited(String),
    /// The debounce timer for `generation` fired without further edits
    DebounceElapsed { generation: u64 },
    /// The existence check for `generation` resolved
    CheckResolved { generation: u64, exists: bool },
    /// The existence check for `generation` failed (retryable)
    CheckFailed { generation: u64, message: String },
}

/// Phone verification reducer state
#[derive(Debug, Default)]
pub struct PhoneAuth {
    phone: String,
    state: PhoneVerification,
    generation: u64,
    error: Option<String>,
}

impl PhoneAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn state(&self) -> PhoneVerification {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Last retryable error message, cleared on the next edit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a debounced check should be armed for the current input.
    ///
    /// Returns the generation the check must be stamped with.
    pub fn wants_check(&self) -> Option<u64> {
        (self.state == PhoneVerification::Idle && is_complete_phone(&self.phone))
            .then_some(self.generation)
    }

    /// Apply one event. Pure with respect to I/O; the driver owns timers
    /// and network.
    pub fn apply(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::PhoneEdited(raw) => {
                let sanitized = sanitize_phone(&raw);
                if sanitized == self.phone {
                    return;
                }
                self.phone = sanitized;
                self.generation += 1;
                self.state = PhoneVerification::Idle;
                self.error = None;
            }
            AuthEvent::DebounceElapsed { generation } => {
                if generation == self.generation
                    && self.state == PhoneVerification::Idle
                    && is_complete_phone(&self.phone)
                {
                    self.state = PhoneVerification::Checking { generation };
                }
            }
            AuthEvent::CheckResolved { generation, exists } => {
                if generation == self.generation {
                    self.state = if exists {
                        PhoneVerification::KnownUser
                    } else {
                        PhoneVerification::NewUser
                    };
                    self.error = None;
                }
            }
            AuthEvent::CheckFailed {
                generation,
                message,
            } => {
                if generation == self.generation {
                    // Treated as "unknown": force re-entry or resubmission.
                    self.state = PhoneVerification::Idle;
                    self.error = Some(message);
                }
            }
        }
    }

    /// Validate a password submission against the resolved state.
    ///
    /// Local-only: violations never trigger a network call. Callers must
    /// resolve `Idle`/`Checking` (the driver does it synchronously on
    /// submit) before validating.
    pub fn validate_submission(&self, password: &str, confirm: &str) -> Result<(), AuthError> {
        if !is_complete_phone(&self.phone) {
            return Err(AuthError::IncompletePhone);
        }
        if password.chars().count() < 8 {
            return Err(AuthError::PasswordTooShort);
        }
        if self.state == PhoneVerification::NewUser && password != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}
