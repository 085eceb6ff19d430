//! Session state store.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::error::AuthError;
use crate::identity::Identity;
use crate::provider::{IdentityProvider, ListenerGuard};

/// Authentication status of the client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Waiting for the provider's first notification. Render a placeholder,
    /// never redirect, so a restored session does not flash through the
    /// entry page.
    Initializing,
    Unauthenticated,
    Authenticated,
}

/// Snapshot of the current session.
///
/// Invariant: `status == Authenticated` exactly when `identity` is `Some`.
/// The store is the only producer of these, so the invariant holds by
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub identity: Option<Identity>,
    pub status: SessionStatus,
    pub last_error: Option<AuthError>,
}

impl Session {
    fn initializing() -> Self {
        Self {
            identity: None,
            status: SessionStatus::Initializing,
            last_error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}

type SessionChanged = dyn Fn(&Session);

struct StoreInner {
    state: RefCell<Session>,
    listeners: RefCell<Vec<(u64, Rc<SessionChanged>)>>,
    next_listener_id: Cell<u64>,
}

/// Single source of truth for "who is logged in right now".
///
/// Identity and status have exactly one writer: the provider's session-change
/// callback, wired up by [`attach`]. Everything else reads snapshots or
/// subscribes. All access happens on the UI event loop, hence plain interior
/// mutability instead of locks; handles are cheap clones of one shared store.
///
/// [`attach`]: SessionStore::attach
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<StoreInner>,
}

impl SessionStore {
    /// A fresh store in `Initializing` status.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(Session::initializing()),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
            }),
        }
    }

    /// Wire this store to a provider's notification channel.
    ///
    /// Keep the returned guard alive for as long as the store should track
    /// the provider; dropping it releases the registration so notifications
    /// can no longer reach a disposed store.
    pub fn attach<P: IdentityProvider + ?Sized>(&self, provider: &P) -> ListenerGuard {
        let store = self.clone();
        provider.on_session_changed(Box::new(move |identity| store.apply_notification(identity)))
    }

    /// Apply one provider notification: update identity/status atomically and
    /// clear any stale error, then fan the new snapshot out to listeners in
    /// registration order.
    fn apply_notification(&self, identity: Option<Identity>) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            state.status = if identity.is_some() {
                SessionStatus::Authenticated
            } else {
                SessionStatus::Unauthenticated
            };
            state.identity = identity;
            state.last_error = None;
            state.clone()
        };
        tracing::debug!(status = ?snapshot.status, "session changed");
        self.notify(&snapshot);
    }

    /// Record a failed auth operation. Identity and status are untouched;
    /// only the provider callback may move those.
    pub fn record_error(&self, error: AuthError) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            state.last_error = Some(error);
            state.clone()
        };
        self.notify(&snapshot);
    }

    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.inner.state.borrow().status
    }

    /// Current identity, if any. Synchronous, callable from render paths.
    pub fn current_identity(&self) -> Option<Identity> {
        self.inner.state.borrow().identity.clone()
    }

    /// Observe every subsequent state change. The guard releases on drop.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> ListenerGuard {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let weak: Weak<StoreInner> = Rc::downgrade(&self.inner);
        ListenerGuard::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .listeners
                    .borrow_mut()
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    fn notify(&self, snapshot: &Session) {
        // Snapshot the listener list first so callbacks may subscribe or
        // read the store without hitting an active borrow.
        let listeners: Vec<Rc<SessionChanged>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(snapshot);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::provider::InMemoryProvider;

    fn identity(uid: &str) -> Identity {
        Identity {
            id: uid.parse().unwrap(),
            email: format!("{uid}@example.com"),
            display_name: None,
        }
    }

    #[test]
    fn starts_initializing() {
        let store = SessionStore::new();
        let session = store.snapshot();
        assert_eq!(session.status, SessionStatus::Initializing);
        assert!(session.identity.is_none());
        assert!(session.last_error.is_none());
    }

    #[test]
    fn notifications_move_status_and_clear_errors() {
        let store = SessionStore::new();
        store.record_error(AuthError::NetworkFailure);
        assert!(store.snapshot().last_error.is_some());

        store.apply_notification(Some(identity("u1")));
        let session = store.snapshot();
        assert_eq!(session.status, SessionStatus::Authenticated);
        assert_eq!(session.identity.as_ref().map(|i| i.id.as_str()), Some("u1"));
        assert!(session.last_error.is_none());

        store.apply_notification(None);
        let session = store.snapshot();
        assert_eq!(session.status, SessionStatus::Unauthenticated);
        assert!(session.identity.is_none());
    }

    #[test]
    fn listeners_see_one_state_per_notification_in_order() {
        let store = SessionStore::new();
        let seen: Rc<RefCell<Vec<SessionStatus>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _guard = store.subscribe(move |session| sink.borrow_mut().push(session.status));

        store.apply_notification(Some(identity("u1")));
        store.apply_notification(None);
        store.apply_notification(Some(identity("u2")));

        assert_eq!(
            *seen.borrow(),
            vec![
                SessionStatus::Authenticated,
                SessionStatus::Unauthenticated,
                SessionStatus::Authenticated,
            ]
        );
    }

    #[test]
    fn dropped_subscription_stops_observing() {
        let store = SessionStore::new();
        let seen: Rc<RefCell<Vec<SessionStatus>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let guard = store.subscribe(move |session| sink.borrow_mut().push(session.status));

        store.apply_notification(Some(identity("u1")));
        drop(guard);
        store.apply_notification(None);

        assert_eq!(*seen.borrow(), vec![SessionStatus::Authenticated]);
    }

    #[tokio::test]
    async fn detached_store_ignores_later_provider_notifications() {
        let provider = InMemoryProvider::new();
        let store = SessionStore::new();
        let guard = store.attach(&provider);
        assert_eq!(store.status(), SessionStatus::Unauthenticated);

        drop(guard);
        provider.register_account("a@b.com", "secret");
        provider.sign_in_with_email("a@b.com", "secret").await.unwrap();

        // The provider moved on; the detached store did not.
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
    }

    proptest! {
        /// For every sequence of provider notifications, the session is
        /// authenticated exactly when the most recent one carried an identity.
        #[test]
        fn status_tracks_the_latest_notification(
            seq in prop::collection::vec(prop::option::of("[a-z][a-z0-9]{0,7}"), 1..32)
        ) {
            let store = SessionStore::new();
            for entry in &seq {
                store.apply_notification(entry.as_deref().map(identity));
            }

            let expect_signed_in = seq.last().unwrap().is_some();
            prop_assert_eq!(
                store.status() == SessionStatus::Authenticated,
                expect_signed_in
            );
            prop_assert_eq!(store.current_identity().is_some(), expect_signed_in);
            prop_assert!(store.snapshot().last_error.is_none());
        }
    }
}
