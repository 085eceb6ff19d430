//! HTTP client for the analysis service.

use reqwest::multipart;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{AnalysisReport, AnalyzeRequest, ErrorBody, ParsedResume};

/// Analysis service failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never completed (DNS, connection, CORS, offline).
    #[error("could not reach the analysis service: {0}")]
    Network(String),

    /// The service answered with a non-2xx status; `message` is the `error`
    /// field of the body when present.
    #[error("analysis service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The service answered 2xx with a body we could not decode.
    #[error("malformed response from the analysis service: {0}")]
    Decode(String),
}

/// Client for the skill-analysis backend.
///
/// Works natively and on wasm (reqwest rides `fetch` there). One instance per
/// app; cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    base_url: String,
    http: reqwest::Client,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            http: reqwest::Client::new(),
        }
    }

    /// Submit a skill-gap analysis request.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisReport, ApiError> {
        let url = format!("{}/api/analyze/", self.base_url);
        tracing::debug!(target_role = %request.target_role, "submitting analysis request");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode(response).await
    }

    /// Upload a resume file for text extraction.
    ///
    /// Returns the extracted plain text; the caller decides what to do with
    /// it (the analyze page puts it in an editable text area).
    pub async fn parse_resume(
        &self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let url = format!("{}/api/parse-resume/", self.base_url);
        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name(file_name.into()));

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let parsed: ParsedResume = decode(response).await?;
        Ok(parsed.text)
    }
}

/// Turn a response into the expected body, or the service's `{ "error": … }`
/// into an [`ApiError::Api`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        tracing::warn!(status = status.as_u16(), %message, "analysis service rejected request");
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

fn normalize_base_url(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        assert_eq!(normalize_base_url("http://localhost:8000/".to_string()), "http://localhost:8000");
        assert_eq!(normalize_base_url("http://localhost:8000".to_string()), "http://localhost:8000");
        assert_eq!(normalize_base_url("http://api.example.com//".to_string()), "http://api.example.com");
    }
}
