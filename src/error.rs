//! Unified application error model for the papergen client.
//! One enum covers every failure class the client distinguishes, from local
//! validation through transport faults to delivery problems after a
//! successful generation.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    /// Client-side request validation failed; no network call was made.
    Validation { code: String, message: String },
    /// The backend rejected the credentials (401-class).
    Auth { code: String, message: String },
    /// A binary-mode request came back with a JSON error body.
    AmbiguousServer { code: String, message: String },
    /// Network-level failure with no usable response.
    Transport { code: String, message: String },
    /// The artifact was generated but could not be saved locally.
    Delivery { code: String, message: String },
    /// Persisted session data was unreadable; self-healed, never user-facing.
    CorruptedState { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::Validation { code, .. }
            | AppError::Auth { code, .. }
            | AppError::AmbiguousServer { code, .. }
            | AppError::Transport { code, .. }
            | AppError::Delivery { code, .. }
            | AppError::CorruptedState { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. }
            | AppError::Auth { message, .. }
            | AppError::AmbiguousServer { message, .. }
            | AppError::Transport { message, .. }
            | AppError::Delivery { message, .. }
            | AppError::CorruptedState { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn validation<S: Into<String>>(code: S, msg: S) -> Self { AppError::Validation { code: code.into(), message: msg.into() } }
    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn ambiguous<S: Into<String>>(code: S, msg: S) -> Self { AppError::AmbiguousServer { code: code.into(), message: msg.into() } }
    pub fn transport<S: Into<String>>(code: S, msg: S) -> Self { AppError::Transport { code: code.into(), message: msg.into() } }
    pub fn delivery<S: Into<String>>(code: S, msg: S) -> Self { AppError::Delivery { code: code.into(), message: msg.into() } }
    pub fn corrupted<S: Into<String>>(code: S, msg: S) -> Self { AppError::CorruptedState { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Whether this failure class is surfaced to the user at all.
    /// Validation is shown inline by the caller; corrupted state is
    /// self-healed and only logged.
    pub fn user_visible(&self) -> bool {
        !matches!(self, AppError::CorruptedState { .. })
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;
