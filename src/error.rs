//! Error types for the catalog, authentication, seed import and reports

use thiserror::Error;

/// Errors raised by catalog queries and mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A form field is missing or malformed
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: u32 },

    /// The request is well-formed but the current state forbids it
    #[error("{0}")]
    BusinessRule(String),

    /// Seed data breaks a store invariant
    #[error("Inconsistent catalog data: {0}")]
    Integrity(String),
}

impl CatalogError {
    pub fn required(field: &'static str, label: &str) -> Self {
        CatalogError::Validation {
            field,
            message: format!("{} is required", label),
        }
    }

    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        CatalogError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Form field key the error refers to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CatalogError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Errors raised while logging in or opening a gated screen
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please enter both username and password")]
    MissingCredentials,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Only administrators and librarians can access this section.")]
    AccessDenied,
}

/// Errors raised while importing a seed directory
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to open {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("{file}: {message}")]
    BadValue { file: String, message: String },
}

/// Errors raised by the report screen
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Exporting report as {0}...\n\nFeature under development.")]
    ExportUnavailable(String),

    #[error("Printing report...\n\nFeature under development.")]
    PrintUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_message_names_field() {
        let err = CatalogError::required("title", "Title");
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(err.field(), Some("title"));
    }

    #[test]
    fn test_not_found_has_no_field() {
        let err = CatalogError::NotFound {
            entity: "Loan",
            id: 42,
        };
        assert_eq!(err.to_string(), "Loan #42 not found");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_access_denied_message() {
        assert_eq!(
            AuthError::AccessDenied.to_string(),
            "Only administrators and librarians can access this section."
        );
    }
}
