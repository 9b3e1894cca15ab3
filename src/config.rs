//! Runtime configuration resolved from environment variables, with CLI flags
//! layered on top by the binary. Defaults keep a zero-config local setup
//! working against a backend on localhost.

use std::path::PathBuf;

use reqwest::Url;

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_STATE_DIR: &str = "state";
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the question-paper backend.
    pub api_base: Url,
    /// Directory holding the persisted session record.
    pub state_dir: PathBuf,
    /// Directory generated PDFs are delivered into.
    pub download_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let api = std::env::var("PAPERGEN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let state_dir = std::env::var("PAPERGEN_STATE_DIR").unwrap_or_else(|_| DEFAULT_STATE_DIR.to_string());
        let download_dir = std::env::var("PAPERGEN_DOWNLOAD_DIR").unwrap_or_else(|_| DEFAULT_DOWNLOAD_DIR.to_string());
        Self::build(&api, &state_dir, &download_dir)
    }

    pub fn build(api: &str, state_dir: &str, download_dir: &str) -> AppResult<Self> {
        let api_base = Url::parse(api)
            .map_err(|e| AppError::validation("bad_api_url".to_string(), format!("invalid API base URL '{}': {}", api, e)))?;
        Ok(Self {
            api_base,
            state_dir: PathBuf::from(state_dir),
            download_dir: PathBuf::from(download_dir),
        })
    }
}
