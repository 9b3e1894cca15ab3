//! Artifact retrieval: build and validate a generation request, submit it
//! expecting a binary payload, and collapse the inherently ambiguous server
//! response (PDF on success, JSON error body on failure, possibly under a
//! binary content type) into exactly one [`ArtifactResponse`].

use std::io::Write;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::{status_text, ApiClient};
use crate::error::{AppError, AppResult};
use crate::session::{auth_headers, SessionStore};
use crate::subjects::Subject;

/// Used when the content-disposition header is absent or unparsable.
pub const FALLBACK_FILENAME: &str = "question_paper.pdf";

const FAILURE_PREFIX: &str = "Failed to generate paper.";
const UNKNOWN_ERROR: &str = "Unknown error.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub subject_id: i64,
    pub subject_name: String,
    pub total_marks: i64,
}

impl GenerationRequest {
    /// Build a request for a subject chosen from the loaded list, resolving
    /// the subject name the backend wants alongside the id.
    pub fn for_subject(subjects: &[Subject], subject_id: i64, total_marks: i64) -> Self {
        let subject_name = subjects
            .iter()
            .find(|s| s.id == subject_id)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        Self {
            subject_id,
            subject_name,
            total_marks,
        }
    }

    /// Client-side validation, run before any network call. The subject must
    /// be present in the list loaded at submission time.
    pub fn validate(&self, subjects: &[Subject]) -> AppResult<()> {
        if self.subject_id <= 0 {
            return Err(AppError::validation(
                "no_subject".to_string(),
                "Please select a subject.".to_string(),
            ));
        }
        if !subjects.iter().any(|s| s.id == self.subject_id) {
            return Err(AppError::validation(
                "unknown_subject".to_string(),
                format!("Subject {} is not in the loaded subject list.", self.subject_id),
            ));
        }
        if self.subject_name.trim().is_empty() {
            return Err(AppError::validation(
                "no_subject_name".to_string(),
                "Could not find name for selected subject ID.".to_string(),
            ));
        }
        if self.total_marks <= 0 {
            return Err(AppError::validation(
                "bad_marks".to_string(),
                "Total marks must be greater than 0.".to_string(),
            ));
        }
        Ok(())
    }
}

/// The single outcome of a generation run. Exactly one variant per
/// invocation; callers never branch on transport success separately.
#[derive(Debug)]
pub enum ArtifactResponse {
    /// The backend returned the PDF and it was delivered under `path`.
    BinarySuccess {
        filename: String,
        bytes: Vec<u8>,
        path: PathBuf,
    },
    /// Every other terminal branch, with a non-empty readable message.
    TypedError { message: String },
}

impl ArtifactResponse {
    /// Typed-error constructor that enforces the non-empty-message invariant.
    pub fn error<S: Into<String>>(msg: S) -> Self {
        let message = msg.into();
        let message = if message.trim().is_empty() {
            format!("{} {}", FAILURE_PREFIX, UNKNOWN_ERROR)
        } else {
            message
        };
        ArtifactResponse::TypedError { message }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ArtifactResponse::BinarySuccess { .. })
    }
}

// filename= or filename*=, quoted or bare. The bare branch stops at the next
// parameter separator.
static FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"filename[^;=\n]*=(?:"([^"\n]*)"|'([^'\n]*)'|([^;\n]*))"#).expect("filename regex")
});

/// Extract the attachment filename from a content-disposition header value,
/// stripping surrounding quotes. Falls back to [`FALLBACK_FILENAME`] when the
/// header is absent, not an attachment, or unparsable.
pub fn filename_from_disposition(disposition: Option<&str>) -> String {
    let Some(d) = disposition else {
        return FALLBACK_FILENAME.to_string();
    };
    if !d.contains("attachment") {
        return FALLBACK_FILENAME.to_string();
    }
    let Some(caps) = FILENAME_RE.captures(d) else {
        return FALLBACK_FILENAME.to_string();
    };
    let raw = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
        .unwrap_or("");
    let cleaned = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    if cleaned.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }
    sanitize_filename(cleaned)
}

/// The header is server-controlled input; keep only the basename so a
/// crafted value cannot escape the download directory.
fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(name)
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        FALLBACK_FILENAME.to_string()
    } else {
        base.to_string()
    }
}

/// Collapse a non-2xx response into the message shown to the user. The body
/// was requested in binary mode, so a JSON error arrives as raw bytes whose
/// declared content type says JSON: read it as text, parse it, and take its
/// `message` field. A failed parse falls back to the status text; the result
/// is never empty.
pub fn failure_message(status: StatusCode, content_type: Option<&str>, body: &[u8]) -> String {
    let mut msg = FAILURE_PREFIX.to_string();
    let declared_json = content_type.map(|t| t.contains("json")).unwrap_or(false);

    let parsed = if declared_json || !body.is_empty() {
        serde_json::from_slice::<serde_json::Value>(body).ok()
    } else {
        None
    };
    let detail = match parsed.as_ref().and_then(crate::api::message_from_json) {
        Some(m) => m,
        None => status_text(status),
    };
    if detail.is_empty() {
        msg.push(' ');
        msg.push_str(UNKNOWN_ERROR);
    } else {
        msg.push(' ');
        msg.push_str(&detail);
    }
    msg
}

/// Builds, submits and resolves one generation request. At most one request
/// is in flight per invocation; the caller keeps its submit control disabled
/// while a run is outstanding.
pub struct ArtifactRetrievalWorkflow<'a> {
    api: &'a ApiClient,
    store: &'a SessionStore,
    download_dir: PathBuf,
}

impl<'a> ArtifactRetrievalWorkflow<'a> {
    pub fn new(api: &'a ApiClient, store: &'a SessionStore, download_dir: &Path) -> Self {
        Self {
            api,
            store,
            download_dir: download_dir.to_path_buf(),
        }
    }

    /// Single return contract: every path through here, including validation
    /// and delivery failures, resolves to exactly one [`ArtifactResponse`].
    pub async fn run(&self, request: &GenerationRequest, subjects: &[Subject]) -> ArtifactResponse {
        if let Err(e) = request.validate(subjects) {
            return ArtifactResponse::error(e.message().to_string());
        }

        let url = match self.api.endpoint("/api/papers/generate") {
            Ok(u) => u,
            Err(e) => return ArtifactResponse::error(format!("{} {}", FAILURE_PREFIX, e.message())),
        };
        let headers = auth_headers(self.store.load().as_ref());
        let resp = match self
            .api
            .http()
            .post(url)
            .headers(headers)
            .json(request)
            .send()
            .await
        {
            Ok(r) => r,
            // Network-level failure: no response to classify.
            Err(e) => return ArtifactResponse::error(format!("{} {}", FAILURE_PREFIX, e)),
        };

        let status = resp.status();
        if status.is_success() {
            let disposition = resp
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let bytes = match resp.bytes().await {
                Ok(b) => b.to_vec(),
                Err(e) => return ArtifactResponse::error(format!("{} {}", FAILURE_PREFIX, e)),
            };
            let filename = filename_from_disposition(disposition.as_deref());
            match self.deliver(&filename, &bytes) {
                Ok(path) => {
                    info!("paper delivered to {}", path.display());
                    ArtifactResponse::BinarySuccess {
                        filename,
                        bytes,
                        path,
                    }
                }
                Err(e) => {
                    warn!("paper generated but delivery failed: {}", e);
                    ArtifactResponse::error(format!(
                        "Paper generated, but failed to initiate download. {}",
                        e.message()
                    ))
                }
            }
        } else {
            let content_type = resp
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let body = resp.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            ArtifactResponse::error(failure_message(status, content_type.as_deref(), &body))
        }
    }

    /// Write the artifact through a scoped temp file in the target directory
    /// and atomically persist it under its final name. The temp handle is
    /// removed on every exit path, so a failed write or persist leaves no
    /// partial download dangling.
    fn deliver(&self, filename: &str, bytes: &[u8]) -> AppResult<PathBuf> {
        std::fs::create_dir_all(&self.download_dir)
            .map_err(|e| AppError::delivery("download_dir".to_string(), e.to_string()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.download_dir)
            .map_err(|e| AppError::delivery("temp_file".to_string(), e.to_string()))?;
        tmp.write_all(bytes)
            .map_err(|e| AppError::delivery("write".to_string(), e.to_string()))?;
        let target = self.download_dir.join(filename);
        tmp.persist(&target)
            .map_err(|e| AppError::delivery("persist".to_string(), e.error.to_string()))?;
        Ok(target)
    }
}
