//! Identity provider boundary.
//!
//! The hosted identity backend (sign-in, sign-up, password reset, federated
//! flows, session persistence) lives behind [`IdentityProvider`].
//! Implementations swap freely: the app binds the real provider SDK, tests
//! use [`InMemoryProvider`].

use thiserror::Error;

use crate::identity::Identity;

pub mod in_memory;

pub use in_memory::{FederatedOutcome, InMemoryProvider};

/// Raw error surfaced by a provider implementation.
///
/// `code` is the provider's own vocabulary (`auth/wrong-password`, ...). It is
/// mapped onto [`crate::AuthError`] by the operations facade and must not leak
/// past it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ProviderError {
    code: String,
    message: String,
}

impl ProviderError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this error means the user dismissed a federated sign-in flow.
    pub fn is_user_cancelled(&self) -> bool {
        matches!(
            self.code.as_str(),
            "auth/popup-closed-by-user" | "auth/cancelled-popup-request" | "auth/user-cancelled"
        )
    }
}

/// Callback invoked on every session change.
///
/// `Some` carries the signed-in identity, `None` means signed out.
pub type SessionListener = Box<dyn Fn(Option<Identity>)>;

/// RAII registration handle; dropping it releases the registration so the
/// callback can no longer fire into disposed state.
pub struct ListenerGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard that releases nothing, for registrations with process lifetime.
    pub fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl core::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("armed", &self.release.is_some())
            .finish()
    }
}

/// Boundary to the hosted identity provider.
///
/// Implementations own credential handling and session-token persistence; the
/// application only ever observes the session through [`on_session_changed`]
/// notifications, delivered in order on the UI event loop.
///
/// Contract:
/// - A newly registered listener receives the current session state as its
///   first notification (possibly immediately).
/// - `sign_out` clears the local session and emits a `None` notification even
///   when remote revocation fails; the failure is still returned so callers
///   can log it.
///
/// Futures are not `Send`: everything here runs on the single-threaded UI
/// event loop.
///
/// [`on_session_changed`]: IdentityProvider::on_session_changed
#[async_trait::async_trait(?Send)]
pub trait IdentityProvider {
    /// Exchange email + password for a session.
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError>;

    /// Create an account and establish a session.
    async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError>;

    /// Run the federated (Google) sign-in flow.
    async fn sign_in_with_federated_provider(&self) -> Result<Identity, ProviderError>;

    /// Dispatch a password-reset email. Does not establish a session.
    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError>;

    /// Terminate the session. See the trait contract for local-state rules.
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Register for session-change notifications.
    fn on_session_changed(&self, listener: SessionListener) -> ListenerGuard;

    /// Whether the client holds usable configuration (e.g. a real API key).
    /// Checked before starting flows that would otherwise fail opaquely.
    fn has_valid_configuration(&self) -> bool;
}
