//! End-to-end session flows over the public API: provider → store → guard.

use skillsight_auth::{
    AuthError, AuthOperations, IdentityProvider, InMemoryProvider, RouteDecision, SessionStatus,
    SessionStore, decide,
};

fn signed_out_app() -> (
    AuthOperations<InMemoryProvider>,
    InMemoryProvider,
    SessionStore,
    skillsight_auth::ListenerGuard,
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
async fn sign_in_unlocks_guarded_navigation() {
    let (ops, provider, store, _subscription) = signed_out_app();
    let identity = provider.register_account("a@b.com", "secret");

    // Before sign-in, /dashboard bounces to the entry page.
    assert_eq!(decide(store.status()), RouteDecision::RedirectToEntry);

    ops.login("a@b.com", "secret").await.unwrap();

    let session = store.snapshot();
    assert_eq!(session.status, SessionStatus::Authenticated);
    assert_eq!(session.identity, Some(identity));
    assert_eq!(decide(store.status()), RouteDecision::Render);
}

#[tokio::test]
async fn a_failed_attempt_keeps_guarded_routes_locked() {
    let (ops, provider, store, _subscription) = signed_out_app();
    provider.register_account("a@b.com", "secret");

    let err = ops.login("a@b.com", "wrong").await.unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
    assert_eq!(decide(store.status()), RouteDecision::RedirectToEntry);
}

#[tokio::test]
async fn logout_locks_guarded_routes_again() {
    let (ops, provider, store, _subscription) = signed_out_app();
    provider.register_account("a@b.com", "secret");
    ops.login("a@b.com", "secret").await.unwrap();
    assert_eq!(decide(store.status()), RouteDecision::Render);

    ops.logout().await;
    assert_eq!(decide(store.status()), RouteDecision::RedirectToEntry);
}

#[tokio::test]
async fn a_restored_provider_session_is_picked_up_on_attach() {
    let provider = InMemoryProvider::new();
    provider.register_account("a@b.com", "secret");
    provider.sign_in_with_email("a@b.com", "secret").await.unwrap();

    // Fresh store, as on an app reload: the provider still holds a session.
    let store = SessionStore::new();
    assert_eq!(decide(store.status()), RouteDecision::Pending);

    let _subscription = store.attach(&provider);
    assert_eq!(store.status(), SessionStatus::Authenticated);
    assert_eq!(decide(store.status()), RouteDecision::Render);
}
