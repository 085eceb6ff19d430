//! In-memory identity provider for tests/dev.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::identity::Identity;
use crate::provider::{IdentityProvider, ListenerGuard, ProviderError, SessionListener};

/// Scripted result of the next federated sign-in.
#[derive(Debug, Clone)]
pub enum FederatedOutcome {
    /// The flow completes and signs in (creating the account if needed).
    Success { email: String },
    /// The user dismisses the popup.
    Cancelled,
    /// The flow fails with this raw provider error.
    Failure(ProviderError),
}

struct AccountRecord {
    password: String,
    identity: Identity,
}

struct ProviderState {
    accounts: HashMap<String, AccountRecord>,
    current: Option<Identity>,
    listeners: Vec<(u64, Rc<dyn Fn(Option<Identity>)>)>,
    next_listener_id: u64,
    next_uid: u64,
    forced_failure: Option<ProviderError>,
    federated: FederatedOutcome,
    config_valid: bool,
}

/// Deterministic in-memory provider.
///
/// - No IO, no real credentials; accounts live in a map, uids are `user-N`.
/// - Error codes the account registry cannot produce (network failures,
///   disabled sign-in methods, ...) are injected with [`fail_next`].
/// - Matches the real provider's observable behavior: a new listener is
///   immediately told the current state, and sign-out always clears the local
///   session.
///
/// [`fail_next`]: InMemoryProvider::fail_next
#[derive(Clone)]
pub struct InMemoryProvider {
    inner: Rc<RefCell<ProviderState>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ProviderState {
                accounts: HashMap::new(),
                current: None,
                listeners: Vec::new(),
                next_listener_id: 0,
                next_uid: 0,
                forced_failure: None,
                federated: FederatedOutcome::Success {
                    email: "federated@example.com".to_string(),
                },
                config_valid: true,
            })),
        }
    }

    /// Seed an account without going through sign-up.
    pub fn register_account(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Identity {
        let email = email.into();
        let identity = self.mint_identity(&email);
        self.inner.borrow_mut().accounts.insert(
            email,
            AccountRecord {
                password: password.into(),
                identity: identity.clone(),
            },
        );
        identity
    }

    /// Force the next credential operation to fail with this raw code.
    pub fn fail_next(&self, code: impl Into<String>, message: impl Into<String>) {
        self.inner.borrow_mut().forced_failure = Some(ProviderError::new(code, message));
    }

    /// Script the outcome of federated sign-ins.
    pub fn set_federated_outcome(&self, outcome: FederatedOutcome) {
        self.inner.borrow_mut().federated = outcome;
    }

    pub fn set_config_valid(&self, valid: bool) {
        self.inner.borrow_mut().config_valid = valid;
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.inner.borrow().current.clone()
    }

    fn mint_identity(&self, email: &str) -> Identity {
        let mut state = self.inner.borrow_mut();
        state.next_uid += 1;
        Identity {
            id: format!("user-{}", state.next_uid).parse().expect("non-empty uid"),
            email: email.to_string(),
            display_name: None,
        }
    }

    fn take_forced_failure(&self) -> Option<ProviderError> {
        self.inner.borrow_mut().forced_failure.take()
    }

    fn set_session(&self, identity: Option<Identity>) {
        self.inner.borrow_mut().current = identity.clone();
        self.notify(identity);
    }

    fn notify(&self, identity: Option<Identity>) {
        // Snapshot the listener list first so callbacks may re-borrow state.
        let listeners: Vec<Rc<dyn Fn(Option<Identity>)>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(identity.clone());
        }
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for InMemoryProvider {
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError> {
        if let Some(err) = self.take_forced_failure() {
            return Err(err);
        }

        let identity = {
            let state = self.inner.borrow();
            let account = state
                .accounts
                .get(email)
                .ok_or_else(|| ProviderError::new("auth/user-not-found", "no account for this email"))?;
            if account.password != password {
                return Err(ProviderError::new("auth/wrong-password", "wrong password"));
            }
            account.identity.clone()
        };

        self.set_session(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError> {
        if let Some(err) = self.take_forced_failure() {
            return Err(err);
        }
        if self.inner.borrow().accounts.contains_key(email) {
            return Err(ProviderError::new(
                "auth/email-already-in-use",
                "an account already exists for this email",
            ));
        }
        if password.chars().count() < 6 {
            return Err(ProviderError::new("auth/weak-password", "password is too short"));
        }

        let identity = self.register_account(email, password);
        self.set_session(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in_with_federated_provider(&self) -> Result<Identity, ProviderError> {
        if let Some(err) = self.take_forced_failure() {
            return Err(err);
        }

        let outcome = self.inner.borrow().federated.clone();
        match outcome {
            FederatedOutcome::Success { email } => {
                let existing = self
                    .inner
                    .borrow()
                    .accounts
                    .get(&email)
                    .map(|account| account.identity.clone());
                let identity =
                    existing.unwrap_or_else(|| self.register_account(email.clone(), String::new()));
                self.set_session(Some(identity.clone()));
                Ok(identity)
            }
            FederatedOutcome::Cancelled => Err(ProviderError::new(
                "auth/popup-closed-by-user",
                "the popup was closed before completing sign in",
            )),
            FederatedOutcome::Failure(err) => Err(err),
        }
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        if let Some(err) = self.take_forced_failure() {
            return Err(err);
        }
        // The raw provider does reveal unknown accounts; suppression is the
        // facade's job.
        if !self.inner.borrow().accounts.contains_key(email) {
            return Err(ProviderError::new("auth/user-not-found", "no account for this email"));
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let forced = self.take_forced_failure();
        // Local session goes away no matter what the remote said.
        self.set_session(None);
        match forced {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn on_session_changed(&self, listener: SessionListener) -> ListenerGuard {
        let listener: Rc<dyn Fn(Option<Identity>)> = Rc::from(listener);
        let (id, current) = {
            let mut state = self.inner.borrow_mut();
            let id = state.next_listener_id;
            state.next_listener_id += 1;
            state.listeners.push((id, listener.clone()));
            (id, state.current.clone())
        };

        // Late subscribers converge on the current state right away.
        listener(current);

        let weak: Weak<RefCell<ProviderState>> = Rc::downgrade(&self.inner);
        ListenerGuard::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    fn has_valid_configuration(&self) -> bool {
        self.inner.borrow().config_valid
    }
}
