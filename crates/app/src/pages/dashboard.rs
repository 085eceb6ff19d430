//! Landing page after sign-in.

use leptos::*;
use leptos_router::*;

use crate::context::use_app_context;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_app_context().session;

    view! {
        <div class="dashboard">
            <header class="greeting">
                <h1>
                    {move || {
                        session
                            .get()
                            .identity
                            .map(|identity| format!("Welcome back, {}", identity.label()))
                            .unwrap_or_else(|| "Welcome".to_string())
                    }}
                </h1>
                <p>"Find out how your skills stack up against your next role."</p>
            </header>

            <div class="cards">
                <div class="card">
                    <h3>"Skill Gap Analysis"</h3>
                    <p>"Compare your current skills against a target job title and see what is missing."</p>
                    <A href="/analyze" class="cta">"Start a new analysis"</A>
                </div>
                <div class="card">
                    <h3>"Resume Insights"</h3>
                    <p>"Upload your resume and let the analysis run on the extracted text instead of a manual list."</p>
                    <A href="/analyze" class="cta">"Analyze my resume"</A>
                </div>
                <div class="card">
                    <h3>"Learning Paths"</h3>
                    <p>"Every report comes with recommendations for closing the gaps it finds."</p>
                    <A href="/analyze" class="cta">"See recommendations"</A>
                </div>
            </div>
        </div>
    }
}
