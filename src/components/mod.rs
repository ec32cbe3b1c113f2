//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod books;
pub mod confirm_dialog;
pub mod dashboard;
pub mod filter_dialog;
pub mod fines;
pub mod form_dialog;
pub mod help_dialog;
pub mod layout;
pub mod loans;
pub mod login;
pub mod members;
pub mod message_dialog;
pub mod navigation;
pub mod reports;
pub mod table;

pub use books::BooksComponent;
pub use confirm_dialog::ConfirmDialog;
pub use dashboard::DashboardComponent;
pub use filter_dialog::BookFilterDialog;
pub use fines::FinesComponent;
pub use form_dialog::FormDialog;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use loans::LoansComponent;
pub use login::LoginComponent;
pub use members::MembersComponent;
pub use message_dialog::MessageDialog;
pub use reports::ReportsComponent;
