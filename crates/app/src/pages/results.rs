//! Analysis report view.

use leptos::*;
use leptos_router::*;

use skillsight_client::AnalysisReport;

use crate::context::use_app_context;

#[component]
pub fn ResultsPage() -> impl IntoView {
    let report = use_app_context().report;

    // Reached directly with nothing to show: go pick a role first.
    move || match report.get() {
        None => view! { <Redirect path="/analyze"/> }.into_view(),
        Some(report) => view! { <Report report=report/> }.into_view(),
    }
}

#[component]
fn Report(report: AnalysisReport) -> impl IntoView {
    view! {
        <div class="results-page">
            <h1>"Skill Gap Analysis"</h1>

            <div class="summary">
                <span class="role">{report.target_role.clone()}</span>
                <span class="score">{format!("{:.0}% match", report.match_score)}</span>
                {report.generated_at.map(|timestamp| {
                    view! {
                        <span class="generated-at">
                            {timestamp.format("generated %Y-%m-%d %H:%M UTC").to_string()}
                        </span>
                    }
                })}
            </div>

            <section class="matched">
                <h2>"Skills You Already Have"</h2>
                {if report.matched_skills.is_empty() {
                    view! { <p class="empty">"No overlapping skills were found."</p> }.into_view()
                } else {
                    view! {
                        <ul>
                            {report
                                .matched_skills
                                .iter()
                                .map(|skill| view! { <li>{skill.clone()}</li> })
                                .collect_view()}
                        </ul>
                    }
                    .into_view()
                }}
            </section>

            <section class="missing">
                <h2>"Skills To Learn"</h2>
                {if report.missing_skills.is_empty() {
                    view! { <p class="empty">"Nothing missing. You cover this role."</p> }.into_view()
                } else {
                    view! {
                        <ul>
                            {report
                                .missing_skills
                                .iter()
                                .map(|skill| view! { <li>{skill.clone()}</li> })
                                .collect_view()}
                        </ul>
                    }
                    .into_view()
                }}
            </section>

            {(!report.recommendations.is_empty()).then(|| {
                view! {
                    <section class="recommendations">
                        <h2>"Recommended Next Steps"</h2>
                        <ul>
                            {report
                                .recommendations
                                .iter()
                                .map(|rec| {
                                    view! {
                                        <li class="recommendation">
                                            <span class="skill">{rec.skill.clone()}</span>
                                            <p>{rec.reason.clone()}</p>
                                            {(!rec.resources.is_empty()).then(|| {
                                                view! {
                                                    <ul class="resources">
                                                        {rec
                                                            .resources
                                                            .iter()
                                                            .map(|url| {
                                                                view! {
                                                                    <li>
                                                                        <a href=url.clone() target="_blank">
                                                                            {url.clone()}
                                                                        </a>
                                                                    </li>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </ul>
                                                }
                                            })}
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    </section>
                }
            })}

            <div class="actions">
                <A href="/analyze" class="cta">"Run another analysis"</A>
                <A href="/dashboard">"Back to Dashboard"</A>
            </div>
        </div>
    }
}
