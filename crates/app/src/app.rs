//! Application shell: router, session wiring, and the route guard.

use leptos::*;
use leptos_router::*;

use skillsight_auth::{
    AuthOperations, RouteDecision, SessionStore, decide,
};
use skillsight_client::{AnalysisClient, AnalysisReport};

use crate::context::{AppContext, use_app_context};
use crate::firebase::FirebaseAuth;
use crate::layout::Layout;
use crate::pages::{AnalyzePage, DashboardPage, LoginPage, ResultsPage};

/// Analysis service base URL, compiled in at build time.
fn api_base_url() -> &'static str {
    option_env!("SKILLSIGHT_API_BASE_URL").unwrap_or("http://localhost:8000")
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    match FirebaseAuth::from_window() {
        Some(provider) => view! { <Shell provider=provider/> }.into_view(),
        None => view! {
            <div class="config-error">
                "Authentication is unavailable: the Firebase SDK did not load. "
                "Check the script tags and configuration in index.html."
            </div>
        }
        .into_view(),
    }
}

/// Everything below requires a bound provider: session store, context, routes.
#[component]
fn Shell(provider: FirebaseAuth) -> impl IntoView {
    let store = SessionStore::new();
    let session = create_rw_signal(store.snapshot());

    // Bridge store updates into the reactive graph, and the provider's
    // notifications into the store. Both registrations are released when the
    // shell unmounts so nothing fires into disposed state.
    let store_subscription = store.subscribe(move |snapshot| session.set(snapshot.clone()));
    let provider_subscription = store.attach(&provider);
    on_cleanup(move || {
        drop(provider_subscription);
        drop(store_subscription);
    });

    provide_context(AppContext {
        session,
        auth: AuthOperations::new(provider, store),
        analysis: AnalysisClient::new(api_base_url()),
        report: create_rw_signal(None::<AnalysisReport>),
    });

    view! {
        <Router>
            <Routes>
                <Route path="/" view=LoginPage/>
                <Route
                    path="/dashboard"
                    view=|| view! { <RequireSession><Layout><DashboardPage/></Layout></RequireSession> }
                />
                <Route
                    path="/analyze"
                    view=|| view! { <RequireSession><Layout><AnalyzePage/></Layout></RequireSession> }
                />
                <Route
                    path="/results"
                    view=|| view! { <RequireSession><Layout><ResultsPage/></Layout></RequireSession> }
                />
                <Route path="/*any" view=|| view! { <Redirect path="/"/> }/>
            </Routes>
        </Router>
    }
}

/// Route guard: renders its children only for an authenticated session.
///
/// While the session is still initializing a neutral placeholder is shown
/// instead of redirecting, so a restored session does not flash through the
/// login page.
#[component]
fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let session = use_app_context().session;

    move || match decide(session.get().status) {
        RouteDecision::Pending => view! {
            <div class="session-pending">"Loading..."</div>
        }
        .into_view(),
        RouteDecision::RedirectToEntry => view! { <Redirect path="/"/> }.into_view(),
        RouteDecision::Render => children().into_view(),
    }
}
