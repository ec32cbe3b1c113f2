//! Services behind the screens
//!
//! - `catalog` - in-memory catalog store with queries and validated mutations
//! - `auth` - login checks behind the `Authenticator` trait
//! - `reports` - report generation (sample output) and export stubs
//! - `seed` - built-in sample data
//! - `import` - CSV seed directory loading

pub mod auth;
pub mod catalog;
pub mod import;
pub mod reports;
pub mod seed;

pub use auth::{Authenticator, StaticAuthenticator};
pub use catalog::{
    BookQuery, CatalogStats, CatalogStore, GenreFilter, IssueLoan, NewBook, NewMember,
    ReturnBook, ReturnCondition, StatusFilter,
};
pub use reports::{DateRange, ExportFormat, ReportKind, ReportRequest};
