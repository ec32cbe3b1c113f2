//! Form state for the add/register/issue/return/report dialogs
//!
//! A form is an ordered list of fields. Text fields collect typed input,
//! choice fields cycle through a fixed option list. Submitting hands the
//! raw values to the catalog, which owns all validation.

use super::book::Book;
use super::member::{Member, MemberStatus, MembershipType};
use chrono::NaiveDate;

pub const GENRES: [&str; 7] = [
    "Fiction",
    "Non-Fiction",
    "Science",
    "Technology",
    "Biography",
    "History",
    "Mystery",
];

pub const RETURN_CONDITIONS: [&str; 4] = ["Good", "Fair", "Damaged", "Lost"];

/// Which operation a form submits to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    AddBook,
    RegisterMember,
    IssueLoan,
    ReturnBook,
    ReportRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    fn plain(label: &str) -> Self {
        Self::new(label, label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    /// Rendered as asterisks
    Secret,
    Choice(Vec<ChoiceOption>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: String,
    pub required: bool,
    pub kind: FieldKind,
    pub value: String,
    /// Selected option for choice fields
    pub selected: usize,
}

impl FormField {
    fn text(key: &'static str, label: &str, required: bool) -> Self {
        Self {
            key,
            label: label.to_string(),
            required,
            kind: FieldKind::Text,
            value: String::new(),
            selected: 0,
        }
    }

    fn secret(key: &'static str, label: &str) -> Self {
        Self {
            kind: FieldKind::Secret,
            ..Self::text(key, label, true)
        }
    }

    fn choice(key: &'static str, label: &str, options: Vec<ChoiceOption>) -> Self {
        Self {
            kind: FieldKind::Choice(options),
            ..Self::text(key, label, true)
        }
    }

    fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Label with a trailing `*` on required fields
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{}*", self.label)
        } else {
            self.label.clone()
        }
    }

    /// Value handed to the catalog
    pub fn current_value(&self) -> &str {
        match &self.kind {
            FieldKind::Choice(options) => options
                .get(self.selected)
                .map(|o| o.value.as_str())
                .unwrap_or(""),
            _ => &self.value,
        }
    }

    /// Text drawn in the dialog
    pub fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Text => self.value.clone(),
            FieldKind::Secret => "*".repeat(self.value.chars().count()),
            FieldKind::Choice(options) => options
                .get(self.selected)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| "(none)".to_string()),
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
    /// Last validation error, shown under the fields
    pub error: Option<String>,
}

impl FormState {
    fn new(kind: FormKind, title: &str, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            fields,
            focus: 0,
            error: None,
        }
    }

    pub fn add_book() -> Self {
        Self::new(
            FormKind::AddBook,
            "Add New Book",
            vec![
                FormField::text("isbn", "ISBN", true),
                FormField::text("title", "Title", true),
                FormField::text("author", "Author", true),
                FormField::text("publisher", "Publisher", false),
                FormField::text("year", "Publication Year", false),
                FormField::choice(
                    "genre",
                    "Genre",
                    GENRES.iter().map(|g| ChoiceOption::plain(g)).collect(),
                ),
                FormField::text("copies", "Total Copies", true).with_value("1"),
                FormField::text("location", "Location Code", false),
                FormField::text("description", "Description", false),
            ],
        )
    }

    pub fn register_member() -> Self {
        Self::new(
            FormKind::RegisterMember,
            "Register New Member",
            vec![
                FormField::text("first_name", "First Name", true),
                FormField::text("last_name", "Last Name", true),
                FormField::text("email", "Email", true),
                FormField::text("phone", "Phone", false),
                FormField::text("address", "Address", false),
                FormField::choice(
                    "membership_type",
                    "Membership Type",
                    MembershipType::all()
                        .iter()
                        .map(|t| ChoiceOption::plain(&t.to_string()))
                        .collect(),
                ),
                FormField::text("username", "Username", true),
                FormField::secret("password", "Password"),
            ],
        )
    }

    /// Member and book pickers list active members and books with a copy on
    /// the shelf. `book_id` preselects a book when borrowing from the books screen.
    pub fn issue_loan(
        members: &[Member],
        books: &[Book],
        book_id: Option<u32>,
        duration_days: u32,
    ) -> Self {
        let member_options: Vec<ChoiceOption> = members
            .iter()
            .filter(|m| m.status == MemberStatus::Active)
            .map(|m| {
                ChoiceOption::new(
                    format!("{} ({})", m.name, m.membership_number),
                    m.id.to_string(),
                )
            })
            .collect();
        let book_options: Vec<ChoiceOption> = books
            .iter()
            .filter(|b| b.is_available())
            .map(|b| ChoiceOption::new(format!("{} - {}", b.title, b.author), b.id.to_string()))
            .collect();
        let preselected = book_id
            .and_then(|id| book_options.iter().position(|o| o.value == id.to_string()))
            .unwrap_or(0);

        let mut book_field = FormField::choice("book", "Book", book_options);
        book_field.selected = preselected;

        Self::new(
            FormKind::IssueLoan,
            "Issue New Loan",
            vec![
                FormField::choice("member", "Member", member_options),
                book_field,
                FormField::text("duration", "Loan Duration (days)", true)
                    .with_value(duration_days.to_string()),
            ],
        )
    }

    pub fn return_book(loan_id: Option<u32>) -> Self {
        Self::new(
            FormKind::ReturnBook,
            "Return Book",
            vec![
                FormField::text("loan_id", "Loan ID", true)
                    .with_value(loan_id.map(|id| id.to_string()).unwrap_or_default()),
                FormField::choice(
                    "condition",
                    "Book Condition",
                    RETURN_CONDITIONS.iter().map(|c| ChoiceOption::plain(c)).collect(),
                ),
            ],
        )
    }

    pub fn report_range(from: NaiveDate, to: NaiveDate) -> Self {
        Self::new(
            FormKind::ReportRange,
            "Report Date Range",
            vec![
                FormField::text("from", "From (YYYY-MM-DD)", true)
                    .with_value(from.format("%Y-%m-%d").to_string()),
                FormField::text("to", "To (YYYY-MM-DD)", true)
                    .with_value(to.format("%Y-%m-%d").to_string()),
            ],
        )
    }

    /// Current value of the field with `key`, empty when there is none
    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.current_value())
            .unwrap_or("")
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Move focus to the field with `key` if the form has one
    pub fn focus_field(&mut self, key: &str) {
        if let Some(idx) = self.fields.iter().position(|f| f.key == key) {
            self.focus = idx;
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if !field.is_choice() {
                field.value.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if !field.is_choice() {
                field.value.pop();
            }
        }
    }

    /// Step the focused choice field forward or back, wrapping around
    pub fn cycle_choice(&mut self, forward: bool) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if let FieldKind::Choice(options) = &field.kind {
                let len = options.len();
                if len == 0 {
                    return;
                }
                field.selected = if forward {
                    (field.selected + 1) % len
                } else {
                    (field.selected + len - 1) % len
                };
            }
        }
    }

    /// Show an error and move focus to the offending field
    pub fn set_error(&mut self, message: impl Into<String>, field: Option<&str>) {
        self.error = Some(message.into());
        if let Some(key) = field {
            self.focus_field(key);
        }
    }
}
