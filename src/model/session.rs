//! Logged-in user and role gating

use super::ui::Screen;
use crate::error::AuthError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Librarian,
    Member,
}

impl Role {
    /// Admins and librarians
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Librarian)
    }

    pub fn can_open(&self, screen: Screen) -> bool {
        !screen.is_staff_only() || self.is_staff()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Librarian => write!(f, "librarian"),
            Role::Member => write!(f, "member"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn authorize(&self, screen: Screen) -> Result<(), AuthError> {
        if self.role.can_open(screen) {
            Ok(())
        } else {
            Err(AuthError::AccessDenied)
        }
    }

    /// Gate for catalog mutations
    pub fn require_staff(&self) -> Result<(), AuthError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(AuthError::AccessDenied)
        }
    }

    /// Screens shown in the navigation bar for this role
    pub fn visible_screens(&self) -> Vec<Screen> {
        Screen::all()
            .into_iter()
            .filter(|s| self.role.can_open(*s))
            .collect()
    }
}
