//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! Business rules live in the catalog store; the App routes keys, checks
//! roles and turns store results into dialogs and activity entries.

use crate::action::Action;
use crate::component::Component;
use crate::components::navigation::{draw_footer, draw_header};
use crate::components::table::Step;
use crate::components::{
    calculate_main_layout, BookFilterDialog, BooksComponent, ConfirmDialog, DashboardComponent,
    FinesComponent, FormDialog, HelpDialog, LoansComponent, LoginComponent, MembersComponent,
    MessageDialog, ReportsComponent,
};
use crate::config::Config;
use crate::error::{AuthError, CatalogError};
use crate::model::activity::ActivityLog;
use crate::model::domain::DomainState;
use crate::model::fine::FineStatus;
use crate::model::form::{FormKind, FormState};
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::{AppMode, Screen};
use crate::services::{
    reports, Authenticator, CatalogStore, DateRange, IssueLoan, NewBook, NewMember, ReturnBook,
    ReturnCondition, StaticAuthenticator,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, text::Span, Frame};

const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What a successful form submission reports back
struct Submitted {
    message: Option<Modal>,
    activity: Option<(&'static str, String)>,
}

impl Submitted {
    fn new(message: Modal, action: &'static str, details: String) -> Self {
        Self {
            message: Some(message),
            activity: Some((action, details)),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Root application component
pub struct App {
    /// Login screen or the logged-in UI
    pub mode: AppMode,

    /// Screen shown in the body
    pub screen: Screen,

    /// Catalog, activity log and session
    pub domain: DomainState,

    /// Modal overlays, top receives input
    pub modals: ModalStack,

    /// Checks login credentials
    authenticator: Box<dyn Authenticator>,

    pub config: Config,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Footer clock, refreshed on tick
    pub clock: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub login: LoginComponent,
    pub dashboard: DashboardComponent,
    pub books: BooksComponent,
    pub members: MembersComponent,
    pub loans: LoansComponent,
    pub fines: FinesComponent,
    pub reports: ReportsComponent,
    pub filter_dialog: BookFilterDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App on the login screen
    pub fn new(config: Config, store: CatalogStore, activity: ActivityLog) -> App {
        let today = Local::now().date_naive();
        App {
            mode: AppMode::Login,
            screen: Screen::Dashboard,
            domain: DomainState::new(store, activity),
            modals: ModalStack::new(),
            authenticator: Box::new(StaticAuthenticator::default()),
            config,
            should_quit: false,
            clock: Local::now().format(CLOCK_FORMAT).to_string(),
            login: LoginComponent::new(),
            dashboard: DashboardComponent::new(),
            books: BooksComponent::new(),
            members: MembersComponent::new(),
            loans: LoansComponent::new(),
            fines: FinesComponent::new(),
            reports: ReportsComponent::new(today),
            filter_dialog: BookFilterDialog::new(),
            help_dialog: HelpDialog::default(),
        }
    }

    /// Replace the credential check
    pub fn with_authenticator(mut self, authenticator: Box<dyn Authenticator>) -> App {
        self.authenticator = authenticator;
        self
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────

    fn submit_login(&mut self) {
        match self
            .authenticator
            .authenticate(&self.login.username, &self.login.password)
        {
            Ok(session) => {
                tracing::info!(user = %session.username, role = %session.role, "Login succeeded");
                self.dashboard.set_role(session.role);
                self.domain.session = Some(session);
                self.mode = AppMode::Running;
                self.screen = Screen::Dashboard;
                self.login.reset();
            }
            Err(e) => {
                tracing::warn!(user = %self.login.username.trim(), "Login failed: {}", e);
                self.login.fail(e.to_string());
            }
        }
    }

    fn logout(&mut self) {
        tracing::info!(user = %self.domain.username(), "Logged out");
        self.domain.session = None;
        self.modals.clear();
        self.mode = AppMode::Login;
        self.screen = Screen::Dashboard;
        self.login.reset();
        self.books = BooksComponent::new();
        self.members = MembersComponent::new();
        self.loans = LoansComponent::new();
        self.fines = FinesComponent::new();
        self.reports = ReportsComponent::new(self.today());
    }

    /// Show Access Denied and log it
    fn deny(&mut self, error: AuthError, what: &str) {
        tracing::warn!(user = %self.domain.username(), "Access denied: {}", what);
        self.modals.push(Modal::error("Access Denied", error.to_string()));
    }

    /// True when the current user may change the catalog
    fn require_staff(&mut self, what: &str) -> bool {
        let result = match self.domain.session {
            Some(ref session) => session.require_staff(),
            None => Err(AuthError::AccessDenied),
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                self.deny(e, what);
                false
            }
        }
    }

    fn go_to_screen(&mut self, screen: Screen) {
        let result = match self.domain.session {
            Some(ref session) => session.authorize(screen),
            None => Err(AuthError::AccessDenied),
        };
        match result {
            Ok(()) => self.screen = screen,
            Err(e) => self.deny(e, screen.name()),
        }
    }

    /// Step through the screens the role may open
    fn cycle_screen(&mut self, forward: bool) {
        let screens = match self.domain.session {
            Some(ref session) => session.visible_screens(),
            None => return,
        };
        if screens.is_empty() {
            return;
        }
        let current = screens.iter().position(|s| *s == self.screen).unwrap_or(0);
        let next = if forward {
            (current + 1) % screens.len()
        } else {
            (current + screens.len() - 1) % screens.len()
        };
        self.screen = screens[next];
    }

    fn step_selection(&mut self, step: Step) {
        let store = &self.domain.store;
        match self.screen {
            Screen::Dashboard => self.dashboard.step(step),
            Screen::Books => {
                let len = self.books.visible(store).len();
                self.books.step(len, step);
            }
            Screen::Members => self.members.step(store.list_members().len(), step),
            Screen::Loans => {
                let len = self.loans.visible(store).len();
                self.loans.step(len, step);
            }
            Screen::Fines => self.fines.step(store.list_fines().len(), step),
            Screen::Reports => self.reports.step(step),
        }
    }

    fn record(&mut self, action: &str, details: &str) {
        self.domain.record(Local::now(), action, details);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────────────────────

    fn open_form(&mut self, form: FormState, what: &str) {
        if self.require_staff(what) {
            self.modals.push(Modal::Form(form));
        }
    }

    fn submit_form(&mut self) {
        let Some(form) = self.modals.top_form_mut().map(|f| f.clone()) else {
            return;
        };
        if form.kind != FormKind::ReportRange && !self.require_staff(&form.title) {
            return;
        }

        let result = self.apply_form(&form);
        match result {
            Ok(submitted) => {
                self.modals.pop();
                if let Some((action, details)) = submitted.activity {
                    self.record(action, &details);
                }
                if let Some(message) = submitted.message {
                    self.modals.push(message);
                }
            }
            Err(e) => {
                tracing::warn!(form = %form.title, "Rejected: {}", e);
                if let Some(open) = self.modals.top_form_mut() {
                    open.set_error(e.to_string(), e.field());
                }
            }
        }
    }

    /// Hand the form values to the catalog
    fn apply_form(&mut self, form: &FormState) -> Result<Submitted, CatalogError> {
        let value = |key: &str| form.value(key).to_string();
        let today = self.today();

        match form.kind {
            FormKind::AddBook => {
                let book = self.domain.store.add_book(NewBook {
                    isbn: value("isbn"),
                    title: value("title"),
                    author: value("author"),
                    publisher: value("publisher"),
                    publication_year: value("year"),
                    genre: value("genre"),
                    total_copies: value("copies"),
                    location_code: value("location"),
                    description: value("description"),
                })?;
                Ok(Submitted::new(
                    Modal::success("Success", "Book added successfully!"),
                    "Added Book",
                    format!("{} - {}", book.title, book.author),
                ))
            }
            FormKind::RegisterMember => {
                let member = self.domain.store.register_member(NewMember {
                    first_name: value("first_name"),
                    last_name: value("last_name"),
                    email: value("email"),
                    phone: value("phone"),
                    address: value("address"),
                    membership_type: value("membership_type"),
                    username: value("username"),
                    password: value("password"),
                })?;
                Ok(Submitted::new(
                    Modal::success(
                        "Success",
                        format!(
                            "Member registered successfully!\nMembership Number: {}",
                            member.membership_number
                        ),
                    ),
                    "Registered Member",
                    format!("{} ({})", member.name, member.membership_number),
                ))
            }
            FormKind::IssueLoan => {
                let loan = self.domain.store.issue_loan(
                    IssueLoan {
                        member_id: value("member"),
                        book_id: value("book"),
                        duration_days: value("duration"),
                    },
                    today,
                )?;
                Ok(Submitted::new(
                    Modal::success(
                        "Success",
                        format!(
                            "Loan issued successfully!\nDue Date: {}",
                            loan.due_date.format("%Y-%m-%d")
                        ),
                    ),
                    "Issued Loan",
                    format!("{} borrowed '{}'", loan.member_name, loan.book_title),
                ))
            }
            FormKind::ReturnBook => {
                let outcome = self.domain.store.return_book(
                    ReturnBook {
                        loan_id: value("loan_id"),
                        condition: value("condition"),
                    },
                    today,
                )?;
                let fine = outcome.fine.as_ref().map(|f| f.amount.to_string()).unwrap_or_default();
                let message = match outcome.condition {
                    ReturnCondition::Damaged => Modal::warning(
                        "Damage Fine",
                        format!("Book returned in damaged condition.\nFine applied: {}", fine),
                    ),
                    ReturnCondition::Lost => Modal::warning(
                        "Lost Book",
                        format!("Book marked as lost.\nReplacement fine: {}", fine),
                    ),
                    ReturnCondition::Good | ReturnCondition::Fair => {
                        Modal::success("Success", "Book returned successfully!")
                    }
                };
                Ok(Submitted::new(
                    message,
                    "Returned Book",
                    outcome.loan.book_title.clone(),
                ))
            }
            FormKind::ReportRange => {
                self.reports.range = DateRange::parse(&value("from"), &value("to"))?;
                Ok(Submitted {
                    message: None,
                    activity: None,
                })
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Catalog Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn edit_book(&mut self) {
        match self.books.selected_book(&self.domain.store) {
            Some(book) => {
                let body = format!("Edit book ID: {}\n\nFeature under development.", book.id);
                self.modals.push(Modal::info("Edit Book", body));
            }
            None => self
                .modals
                .push(Modal::warning("Warning", "Please select a book to edit")),
        }
    }

    fn request_delete_book(&mut self) {
        if !self.require_staff("delete book") {
            return;
        }
        let modal = match self.books.selected_book(&self.domain.store) {
            Some(book) => Modal::DeleteBookConfirm {
                book_id: book.id,
                title: book.title.clone(),
            },
            None => Modal::warning("Warning", "Please select a book to delete"),
        };
        self.modals.push(modal);
    }

    fn confirm_delete_book(&mut self, book_id: u32) {
        self.modals.pop();
        if !self.require_staff("delete book") {
            return;
        }
        match self.domain.store.delete_book(book_id) {
            Ok(book) => {
                self.record("Deleted Book", &format!("{} - {}", book.title, book.author));
                self.modals
                    .push(Modal::success("Success", "Book deleted successfully"));
            }
            Err(e) => {
                tracing::warn!(book_id, "Delete rejected: {}", e);
                self.modals.push(Modal::error("Error", e.to_string()));
            }
        }
    }

    /// Borrowing opens the issue form with the selected book preselected
    fn borrow_book(&mut self) -> Option<Action> {
        match self.books.selected_book(&self.domain.store) {
            None => {
                self.modals
                    .push(Modal::warning("Warning", "Please select a book to borrow"));
                None
            }
            Some(book) if !book.is_available() => {
                let body = format!("'{}' is not available for borrowing.", book.title);
                tracing::warn!(book_id = book.id, "Borrow rejected: no copies available");
                self.modals.push(Modal::error("Not Available", body));
                None
            }
            Some(book) => Some(Action::OpenIssueLoan(Some(book.id))),
        }
    }

    fn set_fine_status(&mut self, status: FineStatus) {
        if !self.require_staff("update fine") {
            return;
        }
        let Some(fine_id) = self.fines.selected_fine(&self.domain.store).map(|f| f.fine_id) else {
            self.modals
                .push(Modal::warning("Warning", "Please select a fine"));
            return;
        };
        match self.domain.store.update_fine_status(fine_id, status) {
            Ok(fine) => {
                let details = format!("Fine #{} marked as {}", fine.fine_id, fine.status);
                self.record("Updated Fine", &details);
                self.modals.push(Modal::success("Update Fine", details));
            }
            Err(e) => {
                tracing::warn!(fine_id, "Fine update rejected: {}", e);
                self.modals.push(Modal::error("Update Fine", e.to_string()));
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key Routing
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm | Modal::LogoutConfirm | Modal::DeleteBookConfirm { .. } => {
                Ok(ConfirmDialog::handle_confirm_key(modal, key))
            }
            Modal::Message { .. } => Ok(MessageDialog::handle_message_key(key)),
            Modal::BookFilter => self.filter_dialog.handle_key_event(key),
            Modal::Form(_) => Ok(self
                .modals
                .top_form_mut()
                .and_then(|form| FormDialog::handle_form_key(form, key))),
            Modal::Help { .. } => self.help_dialog.handle_key_event(key),
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    /// Keys that work on every screen
    fn handle_global_key_event(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Tab => Some(Action::NextScreen),
            KeyCode::BackTab => Some(Action::PrevScreen),
            KeyCode::Char(c @ '1'..='6') => Screen::from_digit(c).map(Action::GoToScreen),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('L') => Some(Action::OpenLogoutDialog),
            _ => None,
        }
    }

    fn current_help_hints(&self) -> Vec<Span<'static>> {
        match self.screen {
            Screen::Dashboard => self.dashboard.help_hints(),
            Screen::Books => self.books.help_hints(),
            Screen::Members => self.members.help_hints(),
            Screen::Loans => self.loans.help_hints(),
            Screen::Fines => self.fines.help_hints(),
            Screen::Reports => self.reports.help_hints(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        tracing::debug!(
            books = self.domain.store.list_books().len(),
            members = self.domain.store.list_members().len(),
            "App initialised"
        );
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        match self.mode {
            AppMode::Login => self.login.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    return self.handle_modal_key_event(&modal, key);
                }
                if self.screen == Screen::Books && self.books.search_mode {
                    return self.handle_search_key_event(key);
                }
                if let Some(action) = self.handle_global_key_event(key) {
                    return Ok(Some(action));
                }
                match self.screen {
                    Screen::Dashboard => self.dashboard.handle_key_event(key),
                    Screen::Books => self.books.handle_key_event(key),
                    Screen::Members => self.members.handle_key_event(key),
                    Screen::Loans => self.loans.handle_key_event(key),
                    Screen::Fines => self.fines.handle_key_event(key),
                    Screen::Reports => self.reports.handle_key_event(key),
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.clock = Local::now().format(CLOCK_FORMAT).to_string();
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                tracing::info!("Quitting");
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Session
            // ─────────────────────────────────────────────────────────────────
            Action::SubmitLogin => self.submit_login(),
            Action::OpenLogoutDialog => self.modals.push(Modal::LogoutConfirm),
            Action::Logout => self.logout(),

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem | Action::PrevItem | Action::FirstItem | Action::LastItem => {
                if let Some(step) = Step::from_action(&action) {
                    self.step_selection(step);
                }
            }
            Action::NextScreen => self.cycle_screen(true),
            Action::PrevScreen => self.cycle_screen(false),
            Action::GoToScreen(screen) => self.go_to_screen(screen),
            Action::NextSubTab | Action::PrevSubTab => {
                self.loans.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp | Action::ModalDown => {}

            // ─────────────────────────────────────────────────────────────────
            // Search and Filter (delegate to BooksComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode
            | Action::ExitSearchMode
            | Action::SearchInput(_)
            | Action::SearchBackspace => {
                self.books.update(action)?;
            }
            Action::OpenBookFilter => {
                self.filter_dialog
                    .open(self.domain.store.genres(), &self.books.query);
                self.modals.push(Modal::BookFilter);
            }
            Action::SetBookFilter(_, _) | Action::ClearBookFilters => {
                if self.modals.top() == Some(&Modal::BookFilter) {
                    self.modals.pop();
                }
                self.books.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Forms
            // ─────────────────────────────────────────────────────────────────
            Action::OpenAddBook => self.open_form(FormState::add_book(), "add book"),
            Action::OpenRegisterMember => {
                self.open_form(FormState::register_member(), "register member")
            }
            Action::OpenIssueLoan(book_id) => {
                let form = FormState::issue_loan(
                    self.domain.store.list_members(),
                    self.domain.store.list_books(),
                    book_id,
                    self.config.loan_duration_days,
                );
                self.open_form(form, "issue loan");
            }
            Action::OpenReturnBook => {
                let loan_id = if self.screen == Screen::Loans {
                    self.loans
                        .selected_loan(&self.domain.store)
                        .filter(|l| l.status.is_open())
                        .map(|l| l.loan_id)
                } else {
                    None
                };
                self.open_form(FormState::return_book(loan_id), "return book");
            }
            Action::OpenReportRange => {
                let range = self.reports.range;
                self.modals
                    .push(Modal::Form(FormState::report_range(range.from, range.to)));
            }
            Action::SubmitForm => self.submit_form(),

            // ─────────────────────────────────────────────────────────────────
            // Catalog
            // ─────────────────────────────────────────────────────────────────
            Action::EditBook => self.edit_book(),
            Action::RequestDeleteBook => self.request_delete_book(),
            Action::ConfirmDeleteBook(book_id) => self.confirm_delete_book(book_id),
            Action::BorrowBook => return Ok(self.borrow_book()),
            Action::SetFineStatus(status) => self.set_fine_status(status),

            // ─────────────────────────────────────────────────────────────────
            // Reports
            // ─────────────────────────────────────────────────────────────────
            Action::GenerateReport => {
                let request = self.reports.request();
                self.reports.set_output(reports::generate(&request));
                self.record("Generated Report", &format!("{} ({})", request.kind, request.range));
            }
            Action::ExportReport(format) => {
                if let Err(e) = reports::export(&self.reports.request(), format) {
                    self.modals.push(Modal::info("Export Report", e.to_string()));
                }
            }
            Action::PrintReport => {
                if let Err(e) = reports::print(&self.reports.request()) {
                    self.modals.push(Modal::info("Print Report", e.to_string()));
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Member Shortcuts
            // ─────────────────────────────────────────────────────────────────
            Action::ShowMyLoans => self.modals.push(Modal::info(
                "My Loans",
                "Showing your current loans...\n\nFeature under development.",
            )),
            Action::ShowMyFines => self.modals.push(Modal::info(
                "My Fines",
                "Showing your fines...\n\nFeature under development.",
            )),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if self.mode == AppMode::Login {
            return self.login.draw(frame, area);
        }

        let layout = calculate_main_layout(area);
        if let Some(ref session) = self.domain.session {
            draw_header(frame, layout.header, session, self.screen);
        }

        let store = &self.domain.store;
        match self.screen {
            Screen::Dashboard => self.dashboard.draw_with_data(
                frame,
                layout.body,
                &store.stats(),
                self.domain.activity.entries(),
            )?,
            Screen::Books => self.books.draw_with_store(frame, layout.body, store)?,
            Screen::Members => self.members.draw_with_store(frame, layout.body, store)?,
            Screen::Loans => self.loans.draw_with_store(frame, layout.body, store)?,
            Screen::Fines => self.fines.draw_with_store(frame, layout.body, store)?,
            Screen::Reports => self.reports.draw(frame, layout.body)?,
        }

        draw_footer(frame, layout.footer, self.current_help_hints(), &self.clock);

        // Modals are drawn bottom to top
        for modal in self.modals.iter() {
            match modal {
                Modal::QuitConfirm | Modal::LogoutConfirm | Modal::DeleteBookConfirm { .. } => {
                    ConfirmDialog::draw_with_modal(frame, area, modal)
                }
                Modal::Message { title, body, kind } => {
                    MessageDialog::draw_with_message(frame, area, title, body, *kind)
                }
                Modal::BookFilter => self.filter_dialog.draw(frame, area)?,
                Modal::Form(form) => FormDialog::draw_with_form(frame, area, form),
                Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::loan::LoanStatus;
    use crate::model::modal::MessageKind;
    use crate::model::session::Role;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        App::new(
            Config::default(),
            CatalogStore::sample().unwrap(),
            ActivityLog::sample(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        let mut action = app.handle_key_event(KeyEvent::from(code)).unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn login(app: &mut App, username: &str, password: &str) {
        type_text(app, username);
        press(app, KeyCode::Tab);
        type_text(app, password);
        press(app, KeyCode::Enter);
    }

    fn logged_in(username: &str, password: &str) -> App {
        let mut app = app();
        login(&mut app, username, password);
        assert_eq!(app.mode, AppMode::Running);
        app
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal
            .draw(|frame| {
                app.draw(frame, frame.area()).unwrap();
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn top_message(app: &App) -> Option<(String, MessageKind)> {
        match app.modals.top() {
            Some(Modal::Message { title, kind, .. }) => Some((title.clone(), *kind)),
            _ => None,
        }
    }

    #[test]
    fn test_login_as_admin() {
        let app = logged_in("GROUP E", "FICT123");
        let session = app.domain.session.as_ref().unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn test_bad_login_stays_on_login_screen() {
        let mut app = app();
        login(&mut app, "member", "nope");
        assert_eq!(app.mode, AppMode::Login);
        assert!(app.domain.session.is_none());
        assert_eq!(
            app.login.error.as_deref(),
            Some("Invalid username or password")
        );
    }

    #[test]
    fn test_empty_login_asks_for_both_fields() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.login.error.as_deref(),
            Some("Please enter both username and password")
        );
    }

    #[test]
    fn test_member_denied_members_screen() {
        let mut app = logged_in("member", "member123");
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(
            top_message(&app),
            Some(("Access Denied".to_string(), MessageKind::Error))
        );
    }

    #[test]
    fn test_member_quick_actions_never_deny() {
        let mut app = logged_in("member", "member123");
        let labels: Vec<&str> = app.dashboard.quick_actions.iter().map(|q| q.label).collect();
        assert_eq!(labels, vec!["Search Books", "My Loans", "My Fines"]);

        for i in 0..labels.len() {
            app.screen = Screen::Dashboard;
            app.modals.clear();
            app.dashboard.list_state.select(Some(i));
            press(&mut app, KeyCode::Enter);
            assert_ne!(
                top_message(&app),
                Some(("Access Denied".to_string(), MessageKind::Error)),
                "quick action {}",
                labels[i]
            );
        }

        app.screen = Screen::Dashboard;
        app.modals.clear();
        press(&mut app, KeyCode::Char('G'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(
            top_message(&app),
            Some(("My Fines".to_string(), MessageKind::Info))
        );
    }

    #[test]
    fn test_librarian_opens_members_screen() {
        let mut app = logged_in("librarian", "librarian123");
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.screen, Screen::Members);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_tab_skips_staff_screens_for_member() {
        let mut app = logged_in("member", "member123");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.screen, Screen::Loans);
    }

    #[test]
    fn test_add_book_through_form() {
        let mut app = logged_in("GROUP E", "FICT123");
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "9780441172719");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Dune");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Frank Herbert");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.domain.store.list_books().len(), 21);
        assert_eq!(
            top_message(&app),
            Some(("Success".to_string(), MessageKind::Success))
        );
        assert_eq!(app.domain.activity.entries()[0].action, "Added Book");
        assert_eq!(app.domain.activity.entries()[0].user, "GROUP E");
    }

    #[test]
    fn test_add_book_without_title_keeps_form_open() {
        let mut app = logged_in("GROUP E", "FICT123");
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "9780441172719");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.domain.store.list_books().len(), 20);
        let form = app.modals.top_form_mut().unwrap();
        assert_eq!(form.error.as_deref(), Some("Title is required"));
        assert_eq!(form.focused().map(|f| f.key), Some("title"));
    }

    #[test]
    fn test_member_cannot_open_add_book() {
        let mut app = logged_in("member", "member123");
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(
            top_message(&app),
            Some(("Access Denied".to_string(), MessageKind::Error))
        );
    }

    #[test]
    fn test_borrow_unavailable_book() {
        let mut app = logged_in("librarian", "librarian123");
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(
            top_message(&app),
            Some(("Not Available".to_string(), MessageKind::Error))
        );
    }

    #[test]
    fn test_borrow_opens_issue_form_with_book() {
        let mut app = logged_in("librarian", "librarian123");
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('b'));
        let form = app.modals.top_form_mut().unwrap();
        assert_eq!(form.kind, FormKind::IssueLoan);
        assert_eq!(form.value("book"), "1");
        assert_eq!(form.value("duration"), "14");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.domain.store.book(1).unwrap().available_copies, 2);
        assert_eq!(app.domain.store.list_loans(LoanStatus::Active).len(), 11);
    }

    #[test]
    fn test_return_lost_book_from_loans_screen() {
        let mut app = logged_in("librarian", "librarian123");
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.domain.store.loan(101).unwrap().status, LoanStatus::Returned);
        assert_eq!(app.domain.store.book(1).unwrap().total_copies, 4);
        assert_eq!(
            top_message(&app),
            Some(("Lost Book".to_string(), MessageKind::Warning))
        );
    }

    #[test]
    fn test_delete_book_needs_confirmation() {
        let mut app = logged_in("GROUP E", "FICT123");
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('G'));
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(
            app.modals.top(),
            Some(Modal::DeleteBookConfirm { book_id: 20, .. })
        ));
        press(&mut app, KeyCode::Char('n'));
        assert!(app.modals.is_empty());
        assert_eq!(app.domain.store.list_books().len(), 20);
    }

    #[test]
    fn test_search_mode_captures_keys() {
        let mut app = logged_in("member", "member123");
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "q1");
        assert!(!app.should_quit);
        assert_eq!(app.books.query.term, "q1");
        press(&mut app, KeyCode::Esc);
        assert!(!app.books.search_mode);
    }

    #[test]
    fn test_waive_pending_fine() {
        let mut app = logged_in("GROUP E", "FICT123");
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.domain.store.fine(1).unwrap().status, FineStatus::Waived);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(
            top_message(&app),
            Some(("Update Fine".to_string(), MessageKind::Error))
        );
    }

    #[test]
    fn test_report_range_validation() {
        let mut app = logged_in("GROUP E", "FICT123");
        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Char('d'));
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "2025-13-01");
        press(&mut app, KeyCode::Enter);
        let form = app.modals.top_form_mut().unwrap();
        assert_eq!(
            form.error.as_deref(),
            Some("From date must be a date in YYYY-MM-DD format")
        );
    }

    #[test]
    fn test_generate_and_export_report() {
        let mut app = logged_in("GROUP E", "FICT123");
        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Enter);
        assert!(app.reports.output.is_some());
        press(&mut app, KeyCode::Char('x'));
        match app.modals.top() {
            Some(Modal::Message { body, .. }) => {
                assert!(body.starts_with("Exporting report as CSV..."))
            }
            other => panic!("unexpected modal {:?}", other),
        }
    }

    #[test]
    fn test_quit_and_logout_confirmations() {
        let mut app = logged_in("member", "member123");
        press(&mut app, KeyCode::Char('L'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.mode, AppMode::Login);
        assert!(app.domain.session.is_none());

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_dashboard_and_modal() {
        let mut app = logged_in("GROUP E", "FICT123");
        let text = render(&mut app);
        assert!(text.contains("Total Books"));
        assert!(text.contains("Quick Actions"));
        assert!(text.contains("Recent Activity"));
        assert!(text.contains("GROUP E (admin)"));

        press(&mut app, KeyCode::Char('q'));
        let text = render(&mut app);
        assert!(text.contains("Are you sure you want to quit?"));
    }

    #[test]
    fn test_render_every_screen() {
        let mut app = logged_in("librarian", "librarian123");
        for (digit, marker) in [
            ('2', "Search books..."),
            ('3', "MEM1012"),
            ('4', "Active Loans"),
            ('5', "Average Fine"),
            ('6', "Overdue Books Report"),
        ] {
            press(&mut app, KeyCode::Char(digit));
            let text = render(&mut app);
            assert!(text.contains(marker), "screen {} missing {}", digit, marker);
        }
    }

    #[test]
    fn test_custom_authenticator() {
        let auth = StaticAuthenticator::new(vec![("desk", "pw", Role::Librarian)]);
        let mut app = app().with_authenticator(Box::new(auth));
        login(&mut app, "desk", "pw");
        assert_eq!(app.domain.session.as_ref().map(|s| s.role), Some(Role::Librarian));
    }
}
