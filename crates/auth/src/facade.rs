//! Auth operations facade.

use skillsight_core::EmailAddress;

use crate::error::AuthError;
use crate::provider::IdentityProvider;
use crate::session::SessionStore;

/// Minimum password length accepted by the provider; checked here first to
/// save a round trip.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Outcome of a federated sign-in attempt.
///
/// Dismissing the popup is a deliberate user action, not a failure, so
/// callers get an explicit `Cancelled` instead of a swallowed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    Completed,
    Cancelled,
}

/// Thin credential operations over the identity provider.
///
/// Operations resolve with no session data on success; the [`SessionStore`]
/// is updated out-of-band by the provider's notification. Failures come back
/// as normalized [`AuthError`]s and are also recorded on the store, so raw
/// provider codes never escape this type.
#[derive(Clone)]
pub struct AuthOperations<P> {
    provider: P,
    store: SessionStore,
}

impl<P: IdentityProvider> AuthOperations<P> {
    pub fn new(provider: P, store: SessionStore) -> Self {
        Self { provider, store }
    }

    /// Sign in with email + password. Both must be non-empty.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(self.record(AuthError::InvalidCredentials));
        }
        match self.provider.sign_in_with_email(email, password).await {
            Ok(_) => Ok(()),
            Err(err) => Err(self.record(AuthError::from_provider(&err))),
        }
    }

    /// Create an account and sign in.
    pub async fn sign_up(&self, email: &EmailAddress, password: &str) -> Result<(), AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(self.record(AuthError::WeakPassword));
        }
        match self.provider.sign_up_with_email(email.as_str(), password).await {
            Ok(_) => Ok(()),
            Err(err) => Err(self.record(AuthError::from_provider(&err))),
        }
    }

    /// Run the federated (Google) sign-in flow.
    ///
    /// Configuration is probed client-side first; a provider call with a
    /// placeholder API key would only fail opaquely later.
    pub async fn google_sign_in(&self) -> Result<SignInOutcome, AuthError> {
        if !self.provider.has_valid_configuration() {
            return Err(self.record(AuthError::ConfigurationError(
                "API key is missing or a placeholder".to_string(),
            )));
        }
        match self.provider.sign_in_with_federated_provider().await {
            Ok(_) => Ok(SignInOutcome::Completed),
            Err(err) if err.is_user_cancelled() => {
                tracing::debug!("federated sign-in cancelled by user");
                Ok(SignInOutcome::Cancelled)
            }
            Err(err) => Err(self.record(AuthError::from_provider(&err))),
        }
    }

    /// Dispatch a password-reset email.
    ///
    /// Account existence is never revealed: an unknown-account response maps
    /// to silent success.
    pub async fn reset_password(&self, email: &EmailAddress) -> Result<(), AuthError> {
        match self.provider.send_password_reset(email.as_str()).await {
            Ok(()) => Ok(()),
            Err(err) => match AuthError::from_provider(&err) {
                AuthError::AccountNotFound => Ok(()),
                mapped => Err(self.record(mapped)),
            },
        }
    }

    /// Clear the session. Never fails from the caller's perspective; the
    /// provider contract guarantees the local session is gone, and remote
    /// failures are only logged.
    pub async fn logout(&self) {
        if let Err(err) = self.provider.sign_out().await {
            tracing::warn!(code = err.code(), "remote sign-out failed: {err}");
        }
    }

    fn record(&self, error: AuthError) -> AuthError {
        self.store.record_error(error.clone());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{FederatedOutcome, InMemoryProvider, ProviderError};
    use crate::session::SessionStatus;

    fn harness() -> (
        AuthOperations<InMemoryProvider>,
        InMemoryProvider,
        SessionStore,
        crate::provider::ListenerGuard,
    ) {
        let provider = InMemoryProvider::new();
        let store = SessionStore::new();
        let subscription = store.attach(&provider);
        (
            AuthOperations::new(provider.clone(), store.clone()),
            provider,
            store,
            subscription,
        )
    }

    #[tokio::test]
    async fn login_establishes_a_session_observable_through_the_store() {
        let (ops, provider, store, _subscription) = harness();
        let identity = provider.register_account("a@b.com", "secret");

        ops.login("a@b.com", "secret").await.unwrap();

        let session = store.snapshot();
        assert_eq!(session.status, SessionStatus::Authenticated);
        assert_eq!(session.identity, Some(identity));
    }

    #[tokio::test]
    async fn failed_login_maps_the_code_and_leaves_the_session_alone() {
        let (ops, provider, store, _subscription) = harness();
        provider.register_account("a@b.com", "secret");
        let before = store.status();

        let err = ops.login("a@b.com", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(store.status(), before);
        assert!(store.current_identity().is_none());
        assert_eq!(store.snapshot().last_error, Some(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_empty_credentials_without_calling_the_provider() {
        let (ops, provider, _store, _subscription) = harness();
        provider.register_account("a@b.com", "secret");

        assert_eq!(ops.login("", "secret").await.unwrap_err(), AuthError::InvalidCredentials);
        assert_eq!(ops.login("a@b.com", "").await.unwrap_err(), AuthError::InvalidCredentials);
        assert!(provider.current_identity().is_none());
    }

    /// One case per row of the provider-code mapping table.
    #[tokio::test]
    async fn login_maps_every_documented_provider_code() {
        let table = [
            ("auth/invalid-api-key", AuthError::ConfigurationError("invalid API key".to_string())),
            ("auth/api-key-not-valid", AuthError::ConfigurationError("invalid API key".to_string())),
            (
                "auth/configuration-not-found",
                AuthError::ConfigurationError("auth domain or project not found".to_string()),
            ),
            ("auth/user-not-found", AuthError::AccountNotFound),
            ("auth/wrong-password", AuthError::InvalidCredentials),
            ("auth/invalid-credential", AuthError::InvalidCredentials),
            ("auth/email-already-in-use", AuthError::EmailAlreadyInUse),
            ("auth/weak-password", AuthError::WeakPassword),
            ("auth/operation-not-allowed", AuthError::OperationNotAllowed),
            ("auth/network-request-failed", AuthError::NetworkFailure),
            ("auth/some-new-code", AuthError::Unknown("raw message".to_string())),
        ];

        for (code, expected) in table {
            let (ops, provider, _store, _subscription) = harness();
            provider.register_account("a@b.com", "secret");
            provider.fail_next(code, "raw message");

            let err = ops.login("a@b.com", "secret").await.unwrap_err();
            assert_eq!(err, expected, "code {code}");
        }
    }

    #[tokio::test]
    async fn sign_up_surfaces_existing_accounts_and_weak_passwords() {
        let (ops, provider, _store, _subscription) = harness();
        provider.register_account("taken@b.com", "secret");
        let email = EmailAddress::parse("taken@b.com").unwrap();

        let err = ops.sign_up(&email, "longenough").await.unwrap_err();
        assert_eq!(err, AuthError::EmailAlreadyInUse);

        // Too short is caught before the provider sees the request.
        let fresh = EmailAddress::parse("new@b.com").unwrap();
        let err = ops.sign_up(&fresh, "short").await.unwrap_err();
        assert_eq!(err, AuthError::WeakPassword);
        assert!(provider.current_identity().is_none());
    }

    #[tokio::test]
    async fn sign_up_establishes_a_session() {
        let (ops, _provider, store, _subscription) = harness();
        let email = EmailAddress::parse("new@b.com").unwrap();

        ops.sign_up(&email, "longenough").await.unwrap();
        assert_eq!(store.status(), SessionStatus::Authenticated);
        assert_eq!(
            store.current_identity().map(|identity| identity.email),
            Some("new@b.com".to_string())
        );
    }

    #[tokio::test]
    async fn google_sign_in_requires_valid_configuration() {
        let (ops, provider, store, _subscription) = harness();
        provider.set_config_valid(false);

        let err = ops.google_sign_in().await.unwrap_err();
        assert!(matches!(err, AuthError::ConfigurationError(_)));
        // The provider was never called.
        assert!(provider.current_identity().is_none());
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn google_sign_in_cancellation_is_silent() {
        let (ops, provider, store, _subscription) = harness();
        provider.set_federated_outcome(FederatedOutcome::Cancelled);

        let outcome = ops.google_sign_in().await.unwrap();
        assert_eq!(outcome, SignInOutcome::Cancelled);
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
        assert!(store.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn google_sign_in_real_failures_still_surface() {
        let (ops, provider, _store, _subscription) = harness();
        provider.set_federated_outcome(FederatedOutcome::Failure(ProviderError::new(
            "auth/network-request-failed",
            "offline",
        )));

        let err = ops.google_sign_in().await.unwrap_err();
        assert_eq!(err, AuthError::NetworkFailure);
    }

    #[tokio::test]
    async fn google_sign_in_completes_and_authenticates() {
        let (ops, _provider, store, _subscription) = harness();

        let outcome = ops.google_sign_in().await.unwrap();
        assert_eq!(outcome, SignInOutcome::Completed);
        assert_eq!(store.status(), SessionStatus::Authenticated);
    }

    #[tokio::test]
    async fn reset_password_never_reveals_account_existence() {
        let (ops, _provider, store, _subscription) = harness();
        let email = EmailAddress::parse("nobody@b.com").unwrap();

        // Provider answers "user not found"; the caller sees success.
        ops.reset_password(&email).await.unwrap();
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
        assert!(store.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn reset_password_propagates_network_failures() {
        let (ops, provider, _store, _subscription) = harness();
        provider.register_account("a@b.com", "secret");
        provider.fail_next("auth/network-request-failed", "offline");
        let email = EmailAddress::parse("a@b.com").unwrap();

        let err = ops.reset_password(&email).await.unwrap_err();
        assert_eq!(err, AuthError::NetworkFailure);
    }

    #[tokio::test]
    async fn reset_password_does_not_establish_a_session() {
        let (ops, provider, store, _subscription) = harness();
        provider.register_account("a@b.com", "secret");

        ops.reset_password(&EmailAddress::parse("a@b.com").unwrap()).await.unwrap();
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn logout_clears_the_session() {
        let (ops, provider, store, _subscription) = harness();
        provider.register_account("a@b.com", "secret");
        ops.login("a@b.com", "secret").await.unwrap();

        ops.logout().await;
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
        assert!(store.current_identity().is_none());
    }

    #[tokio::test]
    async fn logout_clears_the_session_even_when_the_provider_fails() {
        let (ops, provider, store, _subscription) = harness();
        provider.register_account("a@b.com", "secret");
        ops.login("a@b.com", "secret").await.unwrap();

        provider.fail_next("auth/network-request-failed", "offline");
        ops.logout().await;
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
        assert!(store.current_identity().is_none());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let (ops, _provider, store, _subscription) = harness();
        ops.logout().await;
        let after_first = store.snapshot();

        ops.logout().await;
        assert_eq!(store.snapshot(), after_first);
        assert!(after_first.last_error.is_none());
    }
}
