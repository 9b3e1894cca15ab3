//! Subject lookup collaborator. The subject CRUD screens themselves are
//! outside this client's remit; only the listing needed to populate a
//! generation request lives here.

use serde::{Deserialize, Serialize};

use crate::api::{http_failure, ApiClient};
use crate::error::{AppError, AppResult};
use crate::session::{auth_headers, SessionStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// GET /api/subjects with the current credential headers.
pub async fn list_subjects(api: &ApiClient, store: &SessionStore) -> AppResult<Vec<Subject>> {
    let url = api.endpoint("/api/subjects")?;
    let resp = api
        .http()
        .get(url)
        .headers(auth_headers(store.load().as_ref()))
        .send()
        .await
        .map_err(|e| AppError::transport("subjects_send".to_string(), e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.json::<serde_json::Value>().await.ok();
        return Err(http_failure(status, body.as_ref()));
    }
    resp.json::<Vec<Subject>>()
        .await
        .map_err(|e| AppError::transport("subjects_body".to_string(), e.to_string()))
}
