use std::fmt::{Display, Formatter};

/// Closed set of authorization capabilities a session may hold. Role checks
/// are set membership, never string comparison; wire strings only appear at
/// the (de)serialization edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Faculty,
}

impl Role {
    /// Parse a backend role string. Unknown values map to `None`: a role the
    /// client does not recognise grants no special privilege and is never an
    /// error.
    pub fn from_wire(s: &str) -> Option<Role> {
        match s {
            "ROLE_ADMIN" => Some(Role::Admin),
            "ROLE_FACULTY" => Some(Role::Faculty),
            _ => None,
        }
    }

    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::Faculty => "ROLE_FACULTY",
        }
    }

    /// Short label for screens, without the ROLE_ prefix.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Faculty => "Faculty",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        assert_eq!(Role::from_wire("ROLE_ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_wire("ROLE_FACULTY"), Some(Role::Faculty));
        assert_eq!(Role::from_wire(Role::Admin.as_wire_str()), Some(Role::Admin));
    }

    #[test]
    fn unknown_roles_grant_nothing() {
        assert_eq!(Role::from_wire("ROLE_SUPERUSER"), None);
        assert_eq!(Role::from_wire("admin"), None);
        assert_eq!(Role::from_wire(""), None);
    }
}
