//! Action enum - All possible application actions
//!
//! Components turn key events into Actions; the App applies them to state.

use crate::model::fine::FineStatus;
use crate::model::ui::Screen;
use crate::services::{ExportFormat, GenreFilter, StatusFilter};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for the clock
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────
    /// Check the credentials typed on the login screen
    SubmitLogin,
    /// Ask before logging out
    OpenLogoutDialog,
    /// Drop the session and return to the login screen
    Logout,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextItem,
    PrevItem,
    FirstItem,
    LastItem,
    /// Move to the next screen the role may open
    NextScreen,
    PrevScreen,
    /// Jump to a screen, subject to role gating
    GoToScreen(Screen),
    /// Cycle the loan sub-tabs
    NextSubTab,
    PrevSubTab,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    /// Close the current modal
    CloseModal,
    ModalUp,
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Search and Filter
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,
    OpenBookFilter,
    SetBookFilter(StatusFilter, GenreFilter),
    /// Reset search term and filters
    ClearBookFilters,

    // ─────────────────────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────────────────────
    OpenAddBook,
    OpenRegisterMember,
    /// Open the issue form, optionally preselecting a book
    OpenIssueLoan(Option<u32>),
    OpenReturnBook,
    OpenReportRange,
    /// Submit the form on top of the modal stack
    SubmitForm,

    // ─────────────────────────────────────────────────────────────────────────
    // Catalog
    // ─────────────────────────────────────────────────────────────────────────
    EditBook,
    RequestDeleteBook,
    ConfirmDeleteBook(u32),
    BorrowBook,
    SetFineStatus(FineStatus),

    // ─────────────────────────────────────────────────────────────────────────
    // Reports
    // ─────────────────────────────────────────────────────────────────────────
    GenerateReport,
    ExportReport(ExportFormat),
    PrintReport,

    // ─────────────────────────────────────────────────────────────────────────
    // Member Shortcuts
    // ─────────────────────────────────────────────────────────────────────────
    ShowMyLoans,
    ShowMyFines,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SubmitLogin => write!(f, "SubmitLogin"),
            Action::OpenLogoutDialog => write!(f, "OpenLogoutDialog"),
            Action::Logout => write!(f, "Logout"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::NextScreen => write!(f, "NextScreen"),
            Action::PrevScreen => write!(f, "PrevScreen"),
            Action::GoToScreen(screen) => write!(f, "GoToScreen({})", screen.name()),
            Action::NextSubTab => write!(f, "NextSubTab"),
            Action::PrevSubTab => write!(f, "PrevSubTab"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::OpenBookFilter => write!(f, "OpenBookFilter"),
            Action::SetBookFilter(status, genre) => {
                write!(f, "SetBookFilter({}, {})", status, genre)
            }
            Action::ClearBookFilters => write!(f, "ClearBookFilters"),
            Action::OpenAddBook => write!(f, "OpenAddBook"),
            Action::OpenRegisterMember => write!(f, "OpenRegisterMember"),
            Action::OpenIssueLoan(Some(id)) => write!(f, "OpenIssueLoan({})", id),
            Action::OpenIssueLoan(None) => write!(f, "OpenIssueLoan"),
            Action::OpenReturnBook => write!(f, "OpenReturnBook"),
            Action::OpenReportRange => write!(f, "OpenReportRange"),
            Action::SubmitForm => write!(f, "SubmitForm"),
            Action::EditBook => write!(f, "EditBook"),
            Action::RequestDeleteBook => write!(f, "RequestDeleteBook"),
            Action::ConfirmDeleteBook(id) => write!(f, "ConfirmDeleteBook({})", id),
            Action::BorrowBook => write!(f, "BorrowBook"),
            Action::SetFineStatus(status) => write!(f, "SetFineStatus({})", status),
            Action::GenerateReport => write!(f, "GenerateReport"),
            Action::ExportReport(format) => write!(f, "ExportReport({})", format),
            Action::PrintReport => write!(f, "PrintReport"),
            Action::ShowMyLoans => write!(f, "ShowMyLoans"),
            Action::ShowMyFines => write!(f, "ShowMyFines"),
        }
    }
}
