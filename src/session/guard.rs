use std::collections::HashSet;

use tracing::warn;

use super::role::Role;
use super::store::SessionStore;

/// Roles a guarded screen accepts, any one of which is sufficient. Built
/// fresh at each navigation; never persisted.
#[derive(Debug, Clone)]
pub struct GuardSpec {
    pub required: HashSet<Role>,
}

impl GuardSpec {
    pub fn any_of<I: IntoIterator<Item = Role>>(roles: I) -> Self {
        Self {
            required: roles.into_iter().collect(),
        }
    }
}

/// Authorization state derived from the current session for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    AuthenticatedUnauthorized,
    AuthenticatedAuthorized,
}

/// What the caller does with the guarded screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// No session: send the user to the login entry point. The guarded
    /// content is never rendered.
    RedirectLogin,
    /// Identity known but role missing: fall to the neutral dashboard, not
    /// to login and not to an error screen.
    RedirectHome,
    Render,
}

impl AuthState {
    pub fn decision(self) -> GuardDecision {
        match self {
            AuthState::Anonymous => GuardDecision::RedirectLogin,
            AuthState::AuthenticatedUnauthorized => GuardDecision::RedirectHome,
            AuthState::AuthenticatedAuthorized => GuardDecision::Render,
        }
    }
}

/// Derive the authorization state for one navigation. Reads the store fresh
/// every time so a login or logout earlier in the process is always observed;
/// nothing is cached between evaluations and repeated calls with an unchanged
/// session give the same answer.
pub fn state_for(store: &SessionStore, spec: &GuardSpec) -> AuthState {
    let Some(session) = store.load() else {
        return AuthState::Anonymous;
    };
    if session.has_any_role(&spec.required) {
        AuthState::AuthenticatedAuthorized
    } else {
        warn!(
            "user {} lacks the roles required for this screen",
            session.username
        );
        AuthState::AuthenticatedUnauthorized
    }
}

/// Evaluate the gate for one navigation to a guarded screen.
pub fn evaluate(store: &SessionStore, spec: &GuardSpec) -> GuardDecision {
    state_for(store, spec).decision()
}
