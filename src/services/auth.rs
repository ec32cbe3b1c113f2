//! Login checks

use crate::error::AuthError;
use crate::model::session::{Role, Session};

/// Checks a username/password pair and opens a session
pub trait Authenticator {
    fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError>;
}

/// Fixed credential table used by the demo build
pub struct StaticAuthenticator {
    credentials: Vec<(String, String, Role)>,
}

impl Default for StaticAuthenticator {
    fn default() -> Self {
        Self::new(vec![
            ("GROUP E", "FICT123", Role::Admin),
            ("librarian", "librarian123", Role::Librarian),
            ("member", "member123", Role::Member),
        ])
    }
}

impl StaticAuthenticator {
    pub fn new(credentials: Vec<(&str, &str, Role)>) -> Self {
        Self {
            credentials: credentials
                .into_iter()
                .map(|(u, p, r)| (u.to_string(), p.to_string(), r))
                .collect(),
        }
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        self.credentials
            .iter()
            .find(|(u, p, _)| u == username && p == password)
            .map(|(u, _, role)| Session::new(u.clone(), *role))
            .ok_or(AuthError::InvalidCredentials)
    }
}
