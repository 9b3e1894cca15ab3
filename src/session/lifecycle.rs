use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::{http_failure, message_from_json, ApiClient};
use crate::error::{AppError, AppResult};

use super::record::Session;
use super::role::Role;
use super::store::SessionStore;

#[derive(Debug, Serialize)]
struct SigninBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SigninResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Serialize)]
struct SignupBody<'a> {
    username: &'a str,
    password: &'a str,
    role: &'a str,
}

/// Login, registration and logout flows. The only component that creates or
/// destroys the persisted session record.
pub struct SessionLifecycle<'a> {
    api: &'a ApiClient,
    store: &'a SessionStore,
}

impl<'a> SessionLifecycle<'a> {
    pub fn new(api: &'a ApiClient, store: &'a SessionStore) -> Self {
        Self { api, store }
    }

    /// POST /api/auth/signin. `Ok(Some(_))` means a session was built and
    /// persisted. `Ok(None)` is the silent integration gap: the backend
    /// answered 2xx without a usable token, so nothing was stored and no
    /// error is raised; callers that need a session check the store
    /// afterwards. HTTP failures come back as a normalized error message and
    /// persist nothing.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Option<Session>> {
        let url = self.api.endpoint("/api/auth/signin")?;
        let resp = self
            .api
            .http()
            .post(url)
            .json(&SigninBody { username, password })
            .send()
            .await
            .map_err(|e| AppError::transport("signin_send".to_string(), e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.json::<serde_json::Value>().await.ok();
            return Err(http_failure(status, body.as_ref()));
        }

        let body: SigninResponse = resp.json().await.map_err(|e| {
            AppError::transport(
                "signin_body".to_string(),
                format!("unreadable signin response: {}", e),
            )
        })?;
        let Some(token) = body.token.filter(|t| !t.is_empty()) else {
            warn!("signin succeeded but the response carried no token; no session stored");
            return Ok(None);
        };

        let mut roles = HashSet::new();
        if let Some(raw) = body.role.as_deref() {
            match Role::from_wire(raw) {
                Some(role) => {
                    roles.insert(role);
                }
                None => debug!("signin response carried unrecognised role '{}'", raw),
            }
        }
        let session = Session {
            token,
            user_id: body.id.unwrap_or(0),
            username: body.username.unwrap_or_else(|| username.to_string()),
            roles,
        };
        self.store.save(&session)?;
        info!("login ok user={} roles={}", session.username, session.roles.len());
        Ok(Some(session))
    }

    /// POST /api/auth/signup with a single selected role. Never creates a
    /// session; the caller follows up with a login. Returns the backend's
    /// confirmation message.
    pub async fn register(&self, username: &str, password: &str, role: Role) -> AppResult<String> {
        let url = self.api.endpoint("/api/auth/signup")?;
        let resp = self
            .api
            .http()
            .post(url)
            .json(&SignupBody {
                username,
                password,
                role: role.as_wire_str(),
            })
            .send()
            .await
            .map_err(|e| AppError::transport("signup_send".to_string(), e.to_string()))?;

        let status = resp.status();
        let body = resp.json::<serde_json::Value>().await.ok();
        if !status.is_success() {
            return Err(http_failure(status, body.as_ref()));
        }
        Ok(body
            .as_ref()
            .and_then(message_from_json)
            .unwrap_or_else(|| "Registration successful!".to_string()))
    }

    /// Clears the persisted record. Purely local, no server round-trip, and
    /// always succeeds.
    pub fn logout(&self) {
        self.store.clear();
        info!("logged out");
    }
}
