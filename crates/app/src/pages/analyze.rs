//! Analysis form: manual skill entry or resume upload.

use leptos::*;
use leptos_router::*;
use wasm_bindgen::JsCast;

use skillsight_client::AnalyzeRequest;
use skillsight_core::parse_skill_list;

use crate::context::use_app_context;

const TARGET_ROLES: [&str; 6] = [
    "Full Stack Developer",
    "Data Scientist",
    "DevOps Engineer",
    "Cybersecurity Analyst",
    "Python Developer",
    "UI/UX Designer",
];

const EXPERIENCE_LEVELS: [(&str, &str); 4] = [
    ("0-1", "0-1 years (Entry Level)"),
    ("1-3", "1-3 years (Junior)"),
    ("3-5", "3-5 years (Mid-Level)"),
    ("5+", "5+ years (Senior)"),
];

const EXAMPLE_SKILLS: [&str; 6] = ["JavaScript", "React", "Node.js", "Python", "SQL", "Git"];

/// Upload cap for resume files.
const MAX_RESUME_BYTES: f64 = 5.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Manual,
    Resume,
}

#[component]
pub fn AnalyzePage() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    let session = ctx.session;
    let report = ctx.report;

    let mode = create_rw_signal(InputMode::Manual);
    let target_role = create_rw_signal(String::new());
    let experience = create_rw_signal(String::new());
    let job_description = create_rw_signal(String::new());
    let your_skills = create_rw_signal(String::new());
    let resume_text = create_rw_signal(String::new());
    let is_analyzing = create_rw_signal(false);
    let is_parsing = create_rw_signal(false);
    let upload_error = create_rw_signal(None::<String>);
    let submit_error = create_rw_signal(None::<String>);

    let client_submit = ctx.analysis.clone();
    let nav_submit = navigate.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if is_analyzing.get_untracked() {
            return;
        }
        // The route guard only renders this page authenticated.
        let Some(identity) = session.get_untracked().identity else {
            return;
        };
        submit_error.set(None);
        is_analyzing.set(true);

        let request = AnalyzeRequest {
            target_role: target_role.get_untracked(),
            skills: match mode.get_untracked() {
                InputMode::Manual => parse_skill_list(&your_skills.get_untracked()),
                InputMode::Resume => Vec::new(),
            },
            resume_text: match mode.get_untracked() {
                InputMode::Resume => resume_text.get_untracked(),
                InputMode::Manual => String::new(),
            },
            firebase_uid: identity.id,
        };

        let client = client_submit.clone();
        let nav = nav_submit.clone();
        spawn_local(async move {
            match client.analyze(&request).await {
                Ok(result) => {
                    // The report lives in app context, so it survives the
                    // navigation that unmounts this page. Write nothing
                    // page-local after navigating.
                    report.set(Some(result));
                    nav("/results", Default::default());
                }
                Err(err) => {
                    submit_error.set(Some(err.to_string()));
                    is_analyzing.set(false);
                }
            }
        });
    };

    let client_upload = ctx.analysis.clone();
    let nav_back = navigate.clone();

    view! {
        <div class="analyze-page">
            <button type="button" class="link back" on:click=move |_| nav_back("/dashboard", Default::default())>
                "Back to Dashboard"
            </button>
            <h1>"Skill Gap Analysis"</h1>
            <p class="subtitle">"Tell us where you want to go and what you already know."</p>

            <div class="tabs">
                <button
                    type="button"
                    class="tab"
                    class:active=move || mode.get() == InputMode::Manual
                    on:click=move |_| mode.set(InputMode::Manual)
                >
                    "Manual Entry"
                </button>
                <button
                    type="button"
                    class="tab"
                    class:active=move || mode.get() == InputMode::Resume
                    on:click=move |_| mode.set(InputMode::Resume)
                >
                    "Resume Upload"
                </button>
            </div>

            <form on:submit=on_submit>
                <div class="form-row">
                    <div class="form-group">
                        <label for="target-role">"Target Job Title *"</label>
                        <select
                            id="target-role"
                            prop:value=move || target_role.get()
                            on:change=move |ev| target_role.set(event_target_value(&ev))
                            required
                        >
                            <option value="">"Select a target role"</option>
                            {TARGET_ROLES
                                .iter()
                                .map(|role| view! { <option value=*role>{*role}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="experience">"Years of Experience *"</label>
                        <select
                            id="experience"
                            prop:value=move || experience.get()
                            on:change=move |ev| experience.set(event_target_value(&ev))
                            required
                        >
                            <option value="">"Select experience level"</option>
                            {EXPERIENCE_LEVELS
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </select>
                    </div>
                </div>

                {move || match mode.get() {
                    InputMode::Manual => view! {
                        <div class="manual-entry">
                            <div class="form-group">
                                <label for="job-description">"Job Description / Required Skills *"</label>
                                <textarea
                                    id="job-description"
                                    rows="6"
                                    placeholder="Paste the job description or list the required skills..."
                                    prop:value=move || job_description.get()
                                    on:input=move |ev| job_description.set(event_target_value(&ev))
                                />
                            </div>

                            <div class="form-group">
                                <label for="your-skills">"Your Current Skills *"</label>
                                <textarea
                                    id="your-skills"
                                    rows="6"
                                    placeholder="List your skills separated by commas..."
                                    prop:value=move || your_skills.get()
                                    on:input=move |ev| your_skills.set(event_target_value(&ev))
                                />
                                <div class="chips">
                                    <span>"Quick add:"</span>
                                    {EXAMPLE_SKILLS
                                        .iter()
                                        .map(|skill| {
                                            view! {
                                                <button
                                                    type="button"
                                                    class="chip"
                                                    on:click=move |_| {
                                                        your_skills.update(|current| {
                                                            if !current.is_empty()
                                                                && !current.trim_end().ends_with(',')
                                                            {
                                                                current.push_str(", ");
                                                            }
                                                            current.push_str(skill);
                                                        });
                                                    }
                                                >
                                                    {format!("+ {skill}")}
                                                </button>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </div>
                        </div>
                    }
                    .into_view(),
                    InputMode::Resume => {
                        let client = client_upload.clone();
                        let on_file = move |ev: ev::Event| {
                            let Some(input) = ev
                                .target()
                                .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
                            else {
                                return;
                            };
                            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                                return;
                            };
                            if file.size() > MAX_RESUME_BYTES {
                                upload_error.set(Some("file is larger than 5 MB".to_string()));
                                return;
                            }

                            is_parsing.set(true);
                            upload_error.set(None);
                            let client = client.clone();
                            spawn_local(async move {
                                match read_file_bytes(&file).await {
                                    Ok(bytes) => match client.parse_resume(file.name(), bytes).await {
                                        Ok(text) => resume_text.set(text),
                                        Err(err) => upload_error.set(Some(err.to_string())),
                                    },
                                    Err(_) => {
                                        upload_error
                                            .set(Some("could not read the selected file".to_string()));
                                    }
                                }
                                is_parsing.set(false);
                            });
                        };

                        view! {
                            <div class="resume-entry">
                                <div class="upload-box">
                                    <input
                                        type="file"
                                        id="resume-file"
                                        accept=".pdf,.docx,.txt"
                                        on:change=on_file
                                        disabled=move || is_parsing.get()
                                    />
                                    <p>
                                        {move || {
                                            if is_parsing.get() {
                                                "Processing your resume..."
                                            } else {
                                                "Upload a resume (PDF, DOCX or TXT, max 5 MB)"
                                            }
                                        }}
                                    </p>
                                </div>

                                {move || {
                                    upload_error
                                        .get()
                                        .map(|text| view! { <div class="error-panel">{text}</div> })
                                }}

                                <div class="form-group">
                                    <label for="resume-text">"Extracted Resume Text *"</label>
                                    <textarea
                                        id="resume-text"
                                        rows="10"
                                        placeholder="Upload your resume above or paste your text here..."
                                        prop:value=move || resume_text.get()
                                        on:input=move |ev| resume_text.set(event_target_value(&ev))
                                    />
                                </div>
                            </div>
                        }
                        .into_view()
                    }
                }}

                {move || {
                    submit_error.get().map(|text| view! { <div class="error-panel">{text}</div> })
                }}

                <div class="form-actions">
                    <button type="submit" class="primary" disabled=move || is_analyzing.get()>
                        {move || if is_analyzing.get() { "Analyzing..." } else { "Analyze Skills" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, wasm_bindgen::JsValue> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
