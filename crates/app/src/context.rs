//! App-wide context handed to every page.

use leptos::{RwSignal, expect_context};

use skillsight_auth::{AuthOperations, Session};
use skillsight_client::{AnalysisClient, AnalysisReport};

use crate::firebase::FirebaseAuth;

/// Everything a page needs: the reactive session, the auth facade, the
/// analysis client, and the report handed from `/analyze` to `/results`.
#[derive(Clone)]
pub struct AppContext {
    pub session: RwSignal<Session>,
    pub auth: AuthOperations<FirebaseAuth>,
    pub analysis: AnalysisClient,
    pub report: RwSignal<Option<AnalysisReport>>,
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
