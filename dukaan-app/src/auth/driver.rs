//! Async driver for the phone verification machine
//!
//! Owns the debounce timer and the existence-check requests. The timer is
//! cancelled by every fresh keystroke; an already in-flight request is not
//! aborted, its result is simply discarded by the generation guard in the
//! reducer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use dukaan_client::{ClientResult, HttpClient};
use shared::util::{is_complete_phone, mask_phone};

use super::machine::{AuthEvent, PhoneAuth, PhoneVerification, DEBOUNCE_MILLIS};
use super::AuthError;

/// Seam for the phone existence check
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn user_exists(&self, phone: &str) -> ClientResult<bool>;
}

#[async_trait]
impl UserLookup for HttpClient {
    async fn user_exists(&self, phone: &str) -> ClientResult<bool> {
        self.check_user(phone).await
    }
}

/// Output of a successful submission, handed to the OTP stage.
#[derive(Debug, Clone)]
pub struct VerifiedCredentials {
    pub phone: String,
    pub password: String,
}

/// Debounced phone verification flow
pub struct AuthFlow<L: UserLookup + 'static> {
    machine: Arc<Mutex<PhoneAuth>>,
    lookup: Arc<L>,
    cancel: Mutex<CancellationToken>,
}

impl<L: UserLookup + 'static> AuthFlow<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            machine: Arc::new(Mutex::new(PhoneAuth::new())),
            lookup: Arc::new(lookup),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    pub async fn state(&self) -> PhoneVerification {
        self.machine.lock().await.state()
    }

    pub async fn phone(&self) -> String {
        self.machine.lock().await.phone().to_string()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.machine.lock().await.error().map(str::to_string)
    }

    /// Feed a phone field keystroke.
    ///
    /// Cancels any pending debounce and, when the sanitized input reaches
    /// ten digits, arms a fresh one that runs the existence check.
    pub async fn on_phone_input(&self, raw: &str) {
        let wants_check = {
            let mut machine = self.machine.lock().await;
            machine.apply(AuthEvent::PhoneEdited(raw.to_string()));
            machine.wants_check()
        };

        let token = {
            let mut cancel = self.cancel.lock().await;
            cancel.cancel();
            *cancel = CancellationToken::new();
            cancel.clone()
        };

        let Some(generation) = wants_check else {
            return;
        };

        let machine = Arc::clone(&self.machine);
        let lookup = Arc::clone(&self.lookup);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(Duration::from_millis(DEBOUNCE_MILLIS)) => {}
            }

            let phone = {
                let mut m = machine.lock().await;
                m.apply(AuthEvent::DebounceElapsed { generation });
                match m.state() {
                    PhoneVerification::Checking { .. } => m.phone().to_string(),
                    _ => return,
                }
            };

            tracing::debug!(phone = %mask_phone(&phone), "debounced existence check");
            let event = match lookup.user_exists(&phone).await {
                Ok(exists) => AuthEvent::CheckResolved { generation, exists },
                Err(e) => AuthEvent::CheckFailed {
                    generation,
                    message: e.to_string(),
                },
            };
            machine.lock().await.apply(event);
        });
    }

    /// Submit the password form.
    ///
    /// If the existence check has not resolved yet, it is performed
    /// synchronously first; an already resolved state is not re-checked.
    /// Validation violations fail locally without a network call.
    pub async fn submit(
        &self,
        password: &str,
        confirm: &str,
    ) -> Result<VerifiedCredentials, AuthError> {
        let (state, phone, generation) = {
            let machine = self.machine.lock().await;
            (
                machine.state(),
                machine.phone().to_string(),
                machine.generation(),
            )
        };

        if !is_complete_phone(&phone) {
            return Err(AuthError::IncompletePhone);
        }

        if !matches!(
            state,
            PhoneVerification::KnownUser | PhoneVerification::NewUser
        ) {
            let exists = self.lookup.user_exists(&phone).await?;
            let mut machine = self.machine.lock().await;
            if machine.generation() != generation {
                return Err(AuthError::Interrupted);
            }
            machine.apply(AuthEvent::CheckResolved { generation, exists });
        }

        let machine = self.machine.lock().await;
        machine.validate_submission(password, confirm)?;
        Ok(VerifiedCredentials {
            phone,
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct MockLookup {
        exists: bool,
        fail: AtomicBool,
        delay_ms: u64,
        calls: std::sync::Mutex<Vec<String>>,
    }

    impl MockLookup {
        fn returning(exists: bool) -> Self {
            Self {
                exists,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserLookup for Arc<MockLookup> {
        async fn user_exists(&self, phone: &str) -> ClientResult<bool> {
            self.calls.lock().unwrap().push(phone.to_string());
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(dukaan_client::ClientError::Validation("down".into()));
            }
            Ok(self.exists)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_resolves_known_user() {
        let mock = Arc::new(MockLookup::returning(true));
        let flow = AuthFlow::new(Arc::clone(&mock));

        flow.on_phone_input("9876543210").await;
        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MILLIS + 100)).await;

        assert_eq!(flow.state().await, PhoneVerification::KnownUser);
        assert_eq!(mock.calls(), vec!["9876543210".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_before_debounce_never_checks_abandoned_value() {
        let mock = Arc::new(MockLookup::returning(true));
        let flow = AuthFlow::new(Arc::clone(&mock));

        flow.on_phone_input("9876543210").await;
        // Edit before the 500ms window elapses
        flow.on_phone_input("987654321").await;
        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MILLIS * 4)).await;

        assert!(mock.calls().is_empty());
        assert_eq!(flow.state().await, PhoneVerification::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_stale_response_does_not_overwrite_newer_input() {
        let mock = Arc::new(MockLookup {
            exists: true,
            delay_ms: 1_000,
            ..Default::default()
        });
        let flow = AuthFlow::new(Arc::clone(&mock));

        flow.on_phone_input("9876543210").await;
        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MILLIS + 100)).await;
        // Check is in flight; the user keeps typing.
        flow.on_phone_input("1234567890").await;
        tokio::time::sleep(Duration::from_millis(5_000)).await;

        // The stale result for the first number was discarded; the second
        // number got its own check.
        assert_eq!(mock.calls().len(), 2);
        assert_eq!(flow.state().await, PhoneVerification::KnownUser);
        assert_eq!(flow.phone().await, "1234567890");
    }

    #[tokio::test(start_paused = true)]
    async fn check_failure_surfaces_retryable_error() {
        let mock = Arc::new(MockLookup::returning(true));
        mock.fail.store(true, Ordering::SeqCst);
        let flow = AuthFlow::new(Arc::clone(&mock));

        flow.on_phone_input("9876543210").await;
        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MILLIS + 100)).await;

        assert_eq!(flow.state().await, PhoneVerification::Idle);
        assert!(flow.last_error().await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_before_debounce_checks_synchronously() {
        let mock = Arc::new(MockLookup::returning(false));
        let flow = AuthFlow::new(Arc::clone(&mock));

        flow.on_phone_input("9876543210").await;
        // Submit immediately: the debounced check has not fired yet.
        let creds = flow.submit("abcd1234", "abcd1234").await.unwrap();

        assert_eq!(creds.phone, "9876543210");
        assert_eq!(creds.password, "abcd1234");
        assert_eq!(flow.state().await, PhoneVerification::NewUser);
        assert_eq!(mock.calls(), vec!["9876543210".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn resolved_state_is_not_rechecked_on_submit() {
        let mock = Arc::new(MockLookup::returning(true));
        let flow = AuthFlow::new(Arc::clone(&mock));

        flow.on_phone_input("9876543210").await;
        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MILLIS + 100)).await;
        assert_eq!(mock.calls().len(), 1);

        flow.submit("abcd1234", "").await.unwrap();
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn signup_validation_failures_stay_local() {
        let mock = Arc::new(MockLookup::returning(false));
        let flow = AuthFlow::new(Arc::clone(&mock));

        flow.on_phone_input("9876543210").await;
        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MILLIS + 100)).await;
        let calls_after_check = mock.calls().len();

        let err = flow.submit("abcd1234", "mismatch").await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));

        let err = flow.submit("short", "short").await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordTooShort));

        assert_eq!(mock.calls().len(), calls_after_check);
    }

    #[tokio::test]
    async fn incomplete_phone_fails_submit_without_lookup() {
        let mock = Arc::new(MockLookup::returning(true));
        let flow = AuthFlow::new(Arc::clone(&mock));

        flow.on_phone_input("98765").await;
        let err = flow.submit("abcd1234", "abcd1234").await.unwrap_err();
        assert!(matches!(err, AuthError::IncompletePhone));
        assert!(mock.calls().is_empty());
    }
}
