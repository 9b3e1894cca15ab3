use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::role::Role;

/// The client's record of an authenticated identity: bearer credential,
/// identity fields and the granted role set. Zero or one exists per process;
/// it is owned by the [`super::SessionStore`] and every consumer works on a
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub roles: HashSet<Role>,
}

impl Session {
    pub fn has_any_role(&self, required: &HashSet<Role>) -> bool {
        self.roles.iter().any(|r| required.contains(r))
    }
}

/// On-disk JSON shape of the persisted session record. Role strings are kept
/// verbatim on disk so records written by a newer client with extra roles
/// still load here; unrecognised strings are dropped from the typed set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl From<&Session> for StoredUser {
    fn from(s: &Session) -> Self {
        let mut roles: Vec<String> = s.roles.iter().map(|r| r.as_wire_str().to_string()).collect();
        roles.sort();
        StoredUser {
            access_token: s.token.clone(),
            id: s.user_id,
            username: s.username.clone(),
            roles,
        }
    }
}

impl From<StoredUser> for Session {
    fn from(stored: StoredUser) -> Self {
        let mut roles = HashSet::new();
        for raw in &stored.roles {
            match Role::from_wire(raw) {
                Some(r) => {
                    roles.insert(r);
                }
                None => tracing::debug!("ignoring unrecognised stored role '{}'", raw),
            }
        }
        Session {
            token: stored.access_token,
            user_id: stored.id,
            username: stored.username,
            roles,
        }
    }
}
