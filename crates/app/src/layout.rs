//! Shared chrome around the guarded pages: top navigation and logout.

use leptos::*;
use leptos_router::*;

use crate::context::use_app_context;

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let ctx = use_app_context();
    let session = ctx.session;
    let navigate = use_navigate();

    let auth = ctx.auth.clone();
    let on_logout = move |_| {
        let auth = auth.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            auth.logout().await;
            navigate("/", Default::default());
        });
    };

    view! {
        <div class="app">
            <nav class="topbar">
                <A href="/dashboard" class="brand">"SkillSight"</A>
                <div class="nav-links">
                    <A href="/dashboard">"Dashboard"</A>
                    <A href="/analyze">"New Analysis"</A>
                </div>
                <div class="user-menu">
                    {move || {
                        session.get().identity.map(|identity| {
                            view! {
                                <div class="user-details">
                                    <span class="user-name">{identity.label().to_string()}</span>
                                    <span class="user-email">{identity.email.clone()}</span>
                                </div>
                            }
                        })
                    }}
                    <button class="logout" on:click=on_logout>"Logout"</button>
                </div>
            </nav>

            <main class="content">{children()}</main>

            <footer class="footer">
                <span>"SkillSight"</span>
                <span class="tagline">"Skill gap analysis for your next role"</span>
            </footer>
        </div>
    }
}
