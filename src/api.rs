//! HTTP plumbing for the question-paper backend: a thin client holding the
//! base URL and shared connection pool, plus the normalization of non-2xx
//! JSON responses into application errors.

use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: Url) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::internal("http_client".to_string(), e.to_string()))?;
        Ok(Self { base, http })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base
            .join(path)
            .map_err(|e| AppError::internal("bad_endpoint".to_string(), format!("{}: {}", path, e)))
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

/// Pull the human-readable `message` field out of a JSON error body.
pub(crate) fn message_from_json(v: &Value) -> Option<String> {
    v.get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
}

/// Collapse a non-2xx response into one error with a readable message: the
/// body's `message` field when present, the status line otherwise. 401s keep
/// their own class so callers can tell an expired credential from any other
/// backend failure.
pub(crate) fn http_failure(status: StatusCode, body: Option<&Value>) -> AppError {
    let msg = body
        .and_then(message_from_json)
        .unwrap_or_else(|| status_text(status));
    if status == StatusCode::UNAUTHORIZED {
        AppError::auth("unauthorized".to_string(), msg)
    } else {
        AppError::transport(format!("http_{}", status.as_u16()), msg)
    }
}

/// Non-empty textual form of a status code.
pub(crate) fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => status.to_string(),
    }
}
