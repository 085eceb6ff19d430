//! Entry page: sign in / sign up / reset, plus federated sign-in.

use leptos::*;
use leptos_router::*;

use skillsight_auth::SignInOutcome;
use skillsight_core::EmailAddress;

use crate::context::use_app_context;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    let is_login = create_rw_signal(true);
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let is_loading = create_rw_signal(false);
    let error = create_rw_signal(None::<String>);
    let message = create_rw_signal(None::<String>);

    let auth = ctx.auth.clone();
    let nav = navigate.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }
        error.set(None);
        message.set(None);
        is_loading.set(true);

        let auth = auth.clone();
        let nav = nav.clone();
        spawn_local(async move {
            let outcome = if is_login.get_untracked() {
                auth.login(&email.get_untracked(), &password.get_untracked())
                    .await
                    .map_err(|err| err.to_string())
            } else {
                match EmailAddress::parse(email.get_untracked()) {
                    Ok(parsed) => auth
                        .sign_up(&parsed, &password.get_untracked())
                        .await
                        .map_err(|err| err.to_string()),
                    Err(err) => Err(err.to_string()),
                }
            };

            match outcome {
                // Navigating unmounts this page; write nothing after it.
                Ok(()) => nav("/dashboard", Default::default()),
                Err(text) => {
                    error.set(Some(text));
                    is_loading.set(false);
                }
            }
        });
    };

    let auth_google = ctx.auth.clone();
    let nav_google = navigate.clone();
    let on_google = move |_| {
        if is_loading.get_untracked() {
            return;
        }
        error.set(None);
        message.set(None);
        is_loading.set(true);

        let auth = auth_google.clone();
        let nav = nav_google.clone();
        spawn_local(async move {
            match auth.google_sign_in().await {
                // Navigating unmounts this page; write nothing after it.
                Ok(SignInOutcome::Completed) => nav("/dashboard", Default::default()),
                // Backing out of the popup is not an error; stay put quietly.
                Ok(SignInOutcome::Cancelled) => is_loading.set(false),
                Err(err) => {
                    error.set(Some(err.to_string()));
                    is_loading.set(false);
                }
            }
        });
    };

    let auth_reset = ctx.auth.clone();
    let on_forgot = move |_| {
        if is_loading.get_untracked() {
            return;
        }
        error.set(None);
        message.set(None);

        let parsed = match EmailAddress::parse(email.get_untracked()) {
            Ok(parsed) => parsed,
            Err(_) => {
                error.set(Some("enter your email address first".to_string()));
                return;
            }
        };

        is_loading.set(true);
        let auth = auth_reset.clone();
        spawn_local(async move {
            match auth.reset_password(&parsed).await {
                Ok(()) => {
                    message.set(Some("password reset email sent, check your inbox".to_string()));
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1 class="brand">"SkillSight"</h1>
                <h2>{move || if is_login.get() { "Welcome Back" } else { "Create Account" }}</h2>
                <p class="subtitle">
                    {move || {
                        if is_login.get() {
                            "Sign in to continue your skill journey"
                        } else {
                            "Join us to start analyzing your skills"
                        }
                    }}
                </p>

                <button type="button" class="google" disabled=move || is_loading.get() on:click=on_google>
                    {move || if is_login.get() { "Sign in with Google" } else { "Sign up with Google" }}
                </button>

                <div class="divider">"or use your email"</div>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Email Address"</label>
                        <input
                            id="email"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    {move || {
                        error.get().map(|text| view! { <div class="error-panel">{text}</div> })
                    }}
                    {move || {
                        message.get().map(|text| view! { <div class="message-panel">{text}</div> })
                    }}

                    {move || {
                        is_login.get().then(|| view! {
                            <button type="button" class="link forgot" on:click=on_forgot.clone()>
                                "Forgot password?"
                            </button>
                        })
                    }}

                    <button type="submit" class="primary" disabled=move || is_loading.get()>
                        {move || {
                            if is_loading.get() {
                                "Processing..."
                            } else if is_login.get() {
                                "Sign In"
                            } else {
                                "Create Account"
                            }
                        }}
                    </button>
                </form>

                <p class="switch-mode">
                    {move || {
                        if is_login.get() {
                            "Don't have an account?"
                        } else {
                            "Already have an account?"
                        }
                    }}
                    <button
                        type="button"
                        class="link"
                        on:click=move |_| {
                            is_login.update(|value| *value = !*value);
                            error.set(None);
                            message.set(None);
                        }
                    >
                        {move || if is_login.get() { "Sign up" } else { "Sign in" }}
                    </button>
                </p>
            </div>
        </div>
    }
}
