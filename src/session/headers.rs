use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use super::record::Session;

/// Derive the authorization headers for an outgoing request. Pure function of
/// its input: an absent session or an empty token yields an empty map and the
/// backend answers with its own 401; the client never pre-empts server-side
/// authorization. A present credential yields exactly one
/// `Authorization: Bearer <token>` entry.
pub fn auth_headers(session: Option<&Session>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let Some(s) = session else { return headers };
    if s.token.is_empty() {
        return headers;
    }
    // A token with non-header-safe bytes cannot be sent; treat it like an
    // absent credential rather than failing the request locally.
    if let Ok(v) = HeaderValue::from_str(&format!("Bearer {}", s.token)) {
        headers.insert(AUTHORIZATION, v);
    }
    headers
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn session_with_token(token: &str) -> Session {
        Session {
            token: token.to_string(),
            user_id: 1,
            username: "u".to_string(),
            roles: HashSet::new(),
        }
    }

    #[test]
    fn bearer_header_for_valid_session() {
        let s = session_with_token("abc123");
        let h = auth_headers(Some(&s));
        assert_eq!(h.len(), 1);
        assert_eq!(h.get(AUTHORIZATION).unwrap(), "Bearer abc123");
    }

    #[test]
    fn absent_session_yields_empty_map() {
        let h = auth_headers(None);
        assert!(h.is_empty());
        assert!(h.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn empty_token_yields_empty_map() {
        let s = session_with_token("");
        assert!(auth_headers(Some(&s)).is_empty());
    }

    #[test]
    fn unsendable_token_yields_empty_map() {
        let s = session_with_token("line\nbreak");
        assert!(auth_headers(Some(&s)).is_empty());
    }
}
