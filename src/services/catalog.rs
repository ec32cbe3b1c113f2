//! In-memory catalog of books, members, loans and fines
//!
//! The store is the only place the library's rules live. Screens read it
//! through the query methods and change it through the validated mutations
//! below; every mutation either commits completely or leaves the store as
//! it was.

use crate::error::CatalogError;
use crate::model::book::{Book, BookStatus};
use crate::model::fine::{Fine, FineStatus};
use crate::model::loan::{Loan, LoanStatus};
use crate::model::member::{Member, MemberStatus, MembershipType};
use crate::model::money::Money;
use chrono::{Duration, NaiveDate};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Placeholder shown in the empty search box
pub const SEARCH_PLACEHOLDER: &str = "Search books...";

pub const DAMAGE_FINE: Money = Money::dollars(25);
pub const LOST_FINE: Money = Money::dollars(50);

/// Days a damage or replacement fine stays open before it is due
const FINE_DUE_DAYS: i64 = 14;
pub const MAX_LOAN_DAYS: u32 = 365;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

// ═══════════════════════════════════════════════════════════════════════════════
// Seed Records
// ═══════════════════════════════════════════════════════════════════════════════

/// A loan as stored in seed data. Titles and names are resolved on load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanSeed {
    pub loan_id: u32,
    pub book_id: u32,
    pub member_id: u32,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned_date: Option<NaiveDate>,
    pub status: LoanStatus,
    pub fine_amount: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FineSeed {
    pub fine_id: u32,
    pub loan_id: u32,
    pub amount: Money,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: FineStatus,
}

/// Raw records the store is built from
#[derive(Debug, Clone, Default)]
pub struct CatalogSeed {
    pub books: Vec<Book>,
    pub members: Vec<Member>,
    pub loans: Vec<LoanSeed>,
    pub fines: Vec<FineSeed>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Queries
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Available,
    Borrowed,
}

impl StatusFilter {
    pub fn all() -> Vec<StatusFilter> {
        vec![StatusFilter::All, StatusFilter::Available, StatusFilter::Borrowed]
    }

    fn matches(&self, book: &Book) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Available => book.status() == BookStatus::Available,
            StatusFilter::Borrowed => book.status() == BookStatus::Borrowed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Available => write!(f, "available"),
            StatusFilter::Borrowed => write!(f, "borrowed"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "available" => Ok(StatusFilter::Available),
            "borrowed" => Ok(StatusFilter::Borrowed),
            other => Err(format!("unknown status filter '{}'", other)),
        }
    }
}

/// `All` or a case-insensitive substring of the book's genre
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(String),
}

impl GenreFilter {
    fn matches(&self, book: &Book) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Genre(genre) => book
                .genre
                .to_lowercase()
                .contains(&genre.to_lowercase()),
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => write!(f, "all"),
            GenreFilter::Genre(genre) => write!(f, "{}", genre),
        }
    }
}

impl FromStr for GenreFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(GenreFilter::All)
        } else {
            Ok(GenreFilter::Genre(s.to_string()))
        }
    }
}

/// Search term and filters applied together by the books screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookQuery {
    pub term: String,
    pub status: StatusFilter,
    pub genre: GenreFilter,
}

impl BookQuery {
    pub fn is_filtered(&self) -> bool {
        self.status != StatusFilter::All || self.genre != GenreFilter::All
    }
}

/// Lowercased search needle, or None when the term selects everything
fn search_needle(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() || term.eq_ignore_ascii_case(SEARCH_PLACEHOLDER) {
        None
    } else {
        Some(term.to_lowercase())
    }
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total_books: usize,
    pub available_books: usize,
    pub active_loans: usize,
    pub overdue_loans: usize,
    pub active_members: usize,
    pub pending_fines: usize,
}

/// Totals shown above the fines table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FineSummary {
    pub total_pending: Money,
    pub total_paid: Money,
    pub total_waived: Money,
    pub average: Money,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Mutation Requests
// ═══════════════════════════════════════════════════════════════════════════════

/// Raw add-book form input
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub publication_year: String,
    pub genre: String,
    pub total_copies: String,
    pub location_code: String,
    pub description: String,
}

/// Raw register-member form input
#[derive(Debug, Clone, Default)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub membership_type: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct IssueLoan {
    pub member_id: String,
    pub book_id: String,
    pub duration_days: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReturnBook {
    pub loan_id: String,
    pub condition: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCondition {
    Good,
    Fair,
    Damaged,
    Lost,
}

impl ReturnCondition {
    /// Charge issued for this condition, if any
    pub fn fine(&self) -> Option<Money> {
        match self {
            ReturnCondition::Good | ReturnCondition::Fair => None,
            ReturnCondition::Damaged => Some(DAMAGE_FINE),
            ReturnCondition::Lost => Some(LOST_FINE),
        }
    }
}

impl FromStr for ReturnCondition {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "good" => Ok(ReturnCondition::Good),
            "fair" => Ok(ReturnCondition::Fair),
            "damaged" => Ok(ReturnCondition::Damaged),
            "lost" => Ok(ReturnCondition::Lost),
            _ => Err(CatalogError::invalid(
                "condition",
                "Condition must be Good, Fair, Damaged or Lost",
            )),
        }
    }
}

/// Result of a return: the closed loan and any fine it produced
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnOutcome {
    pub loan: Loan,
    pub condition: ReturnCondition,
    pub fine: Option<Fine>,
}

fn required<'a>(value: &'a str, field: &'static str, label: &str) -> Result<&'a str, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CatalogError::required(field, label))
    } else {
        Ok(value)
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// One past the highest of `ids`, or `floor + 1` when there are none
fn next_id(ids: impl Iterator<Item = u32>, floor: u32, what: &str) -> Result<u32, CatalogError> {
    ids.max()
        .unwrap_or(floor)
        .checked_add(1)
        .ok_or_else(|| CatalogError::BusinessRule(format!("No {} numbers left", what)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Catalog Store
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    books: Vec<Book>,
    members: Vec<Member>,
    loans: Vec<Loan>,
    fines: Vec<Fine>,
}

impl CatalogStore {
    /// Build a store from seed records, rejecting data that breaks the
    /// catalog invariants. Member loan counts are recomputed from the loans.
    pub fn from_seed(seed: CatalogSeed) -> Result<Self, CatalogError> {
        let CatalogSeed {
            books,
            mut members,
            loans,
            fines,
        } = seed;

        let mut seen = HashSet::new();
        for book in &books {
            if !seen.insert(book.id) {
                return Err(CatalogError::Integrity(format!("duplicate book id {}", book.id)));
            }
            if book.available_copies > book.total_copies {
                return Err(CatalogError::Integrity(format!(
                    "book {} has {} copies available but only {} in total",
                    book.id, book.available_copies, book.total_copies
                )));
            }
        }

        let mut seen = HashSet::new();
        let mut numbers = HashSet::new();
        for member in &members {
            if !seen.insert(member.id) {
                return Err(CatalogError::Integrity(format!(
                    "duplicate member id {}",
                    member.id
                )));
            }
            if !numbers.insert(member.membership_number.as_str()) {
                return Err(CatalogError::Integrity(format!(
                    "duplicate membership number {}",
                    member.membership_number
                )));
            }
        }

        let mut seen = HashSet::new();
        let mut resolved_loans = Vec::with_capacity(loans.len());
        for seed in loans {
            if !seen.insert(seed.loan_id) {
                return Err(CatalogError::Integrity(format!(
                    "duplicate loan id {}",
                    seed.loan_id
                )));
            }
            let book = books.iter().find(|b| b.id == seed.book_id).ok_or_else(|| {
                CatalogError::Integrity(format!(
                    "loan {} references missing book {}",
                    seed.loan_id, seed.book_id
                ))
            })?;
            let member = members
                .iter()
                .find(|m| m.id == seed.member_id)
                .ok_or_else(|| {
                    CatalogError::Integrity(format!(
                        "loan {} references missing member {}",
                        seed.loan_id, seed.member_id
                    ))
                })?;
            resolved_loans.push(Loan {
                loan_id: seed.loan_id,
                book_id: seed.book_id,
                member_id: seed.member_id,
                book_title: book.title.clone(),
                member_name: member.name.clone(),
                loan_date: seed.loan_date,
                due_date: seed.due_date,
                returned_date: seed.returned_date,
                status: seed.status,
                fine_amount: seed.fine_amount,
            });
        }

        let mut seen = HashSet::new();
        let mut resolved_fines = Vec::with_capacity(fines.len());
        for seed in fines {
            if !seen.insert(seed.fine_id) {
                return Err(CatalogError::Integrity(format!(
                    "duplicate fine id {}",
                    seed.fine_id
                )));
            }
            let loan = resolved_loans
                .iter()
                .find(|l| l.loan_id == seed.loan_id)
                .ok_or_else(|| {
                    CatalogError::Integrity(format!(
                        "fine {} references missing loan {}",
                        seed.fine_id, seed.loan_id
                    ))
                })?;
            resolved_fines.push(Fine {
                fine_id: seed.fine_id,
                loan_id: seed.loan_id,
                member_name: loan.member_name.clone(),
                book_title: loan.book_title.clone(),
                amount: seed.amount,
                issued_date: seed.issued_date,
                due_date: seed.due_date,
                status: seed.status,
            });
        }

        for member in &mut members {
            member.active_loans = resolved_loans
                .iter()
                .filter(|l| l.member_id == member.id && l.status.is_open())
                .count() as u32;
        }

        Ok(Self {
            books,
            members,
            loans: resolved_loans,
            fines: resolved_fines,
        })
    }

    /// Store loaded with the built-in sample data
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_seed(super::seed::sample_seed())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Books
    // ─────────────────────────────────────────────────────────────────────────

    pub fn list_books(&self) -> &[Book] {
        &self.books
    }

    pub fn search_books(&self, term: &str) -> Vec<&Book> {
        match search_needle(term) {
            None => self.books.iter().collect(),
            Some(needle) => self
                .books
                .iter()
                .filter(|b| b.matches_term(&needle))
                .collect(),
        }
    }

    pub fn filter_books(&self, status: StatusFilter, genre: &GenreFilter) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|b| status.matches(b) && genre.matches(b))
            .collect()
    }

    pub fn query_books(&self, query: &BookQuery) -> Vec<&Book> {
        let needle = search_needle(&query.term);
        self.books
            .iter()
            .filter(|b| needle.as_deref().map_or(true, |n| b.matches_term(n)))
            .filter(|b| query.status.matches(b) && query.genre.matches(b))
            .collect()
    }

    pub fn book(&self, id: u32) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Distinct genres sorted alphabetically, ignoring case
    pub fn genres(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut genres: Vec<String> = self
            .books
            .iter()
            .filter(|b| !b.genre.trim().is_empty())
            .filter(|b| seen.insert(b.genre.to_lowercase()))
            .map(|b| b.genre.clone())
            .collect();
        genres.sort_by_key(|g| g.to_lowercase());
        genres
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Members, Loans, Fines
    // ─────────────────────────────────────────────────────────────────────────

    pub fn list_members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, id: u32) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn list_loans(&self, status: LoanStatus) -> Vec<&Loan> {
        self.loans.iter().filter(|l| l.status == status).collect()
    }

    pub fn loan(&self, id: u32) -> Option<&Loan> {
        self.loans.iter().find(|l| l.loan_id == id)
    }

    pub fn list_fines(&self) -> &[Fine] {
        &self.fines
    }

    pub fn fine(&self, id: u32) -> Option<&Fine> {
        self.fines.iter().find(|f| f.fine_id == id)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_books: self.books.len(),
            available_books: self.books.iter().filter(|b| b.is_available()).count(),
            active_loans: self.list_loans(LoanStatus::Active).len(),
            overdue_loans: self.list_loans(LoanStatus::Overdue).len(),
            active_members: self
                .members
                .iter()
                .filter(|m| m.status == MemberStatus::Active)
                .count(),
            pending_fines: self
                .fines
                .iter()
                .filter(|f| f.status == FineStatus::Pending)
                .count(),
        }
    }

    pub fn fine_summary(&self) -> FineSummary {
        let total = |status: FineStatus| -> Money {
            self.fines
                .iter()
                .filter(|f| f.status == status)
                .map(|f| f.amount)
                .sum()
        };
        let amounts: Vec<Money> = self.fines.iter().map(|f| f.amount).collect();
        FineSummary {
            total_pending: total(FineStatus::Pending),
            total_paid: total(FineStatus::Paid),
            total_waived: total(FineStatus::Waived),
            average: Money::average(&amounts),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_book(&mut self, request: NewBook) -> Result<Book, CatalogError> {
        let isbn = required(&request.isbn, "isbn", "ISBN")?;
        let title = required(&request.title, "title", "Title")?;
        let author = required(&request.author, "author", "Author")?;
        let copies = required(&request.total_copies, "copies", "Total copies")?;
        let total_copies = match copies.parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(CatalogError::invalid(
                    "copies",
                    "Total copies must be a positive whole number",
                ))
            }
        };
        let publication_year = match optional(&request.publication_year) {
            None => None,
            Some(year) => Some(year.parse::<u16>().map_err(|_| {
                CatalogError::invalid("year", "Publication year must be a number")
            })?),
        };

        let book = Book {
            id: next_id(self.books.iter().map(|b| b.id), 0, "book")?,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            available_copies: total_copies,
            total_copies,
            genre: request.genre.trim().to_string(),
            publisher: optional(&request.publisher),
            publication_year,
            location_code: optional(&request.location_code),
            description: optional(&request.description),
        };
        tracing::info!(book_id = book.id, title = %book.title, "Book added");
        self.books.push(book.clone());
        Ok(book)
    }

    pub fn register_member(&mut self, request: NewMember) -> Result<Member, CatalogError> {
        let first_name = required(&request.first_name, "first_name", "First Name")?;
        let last_name = required(&request.last_name, "last_name", "Last Name")?;
        let email = required(&request.email, "email", "Email")?;
        let username = required(&request.username, "username", "Username")?;
        required(&request.password, "password", "Password")?;

        if !EMAIL_REGEX.is_match(email) {
            return Err(CatalogError::invalid(
                "email",
                "Email must be a valid address",
            ));
        }
        let taken = self.members.iter().any(|m| {
            m.username
                .as_deref()
                .is_some_and(|u| u.eq_ignore_ascii_case(username))
        });
        if taken {
            return Err(CatalogError::invalid(
                "username",
                format!("Username '{}' is already taken", username),
            ));
        }
        let membership_type = match optional(&request.membership_type) {
            None => MembershipType::Standard,
            Some(t) => t
                .parse::<MembershipType>()
                .map_err(|e: String| CatalogError::invalid("membership_type", e))?,
        };

        let serial = next_id(
            self.members.iter().filter_map(Member::membership_serial),
            1000,
            "membership",
        )?;
        let member = Member {
            id: next_id(self.members.iter().map(|m| m.id), 0, "member")?,
            name: format!("{} {}", first_name, last_name),
            membership_number: Member::membership_number_for(serial),
            email: email.to_string(),
            phone: request.phone.trim().to_string(),
            membership_type,
            active_loans: 0,
            status: MemberStatus::Active,
            address: optional(&request.address),
            username: Some(username.to_string()),
        };
        tracing::info!(
            member_id = member.id,
            membership_number = %member.membership_number,
            "Member registered"
        );
        self.members.push(member.clone());
        Ok(member)
    }

    pub fn issue_loan(&mut self, request: IssueLoan, today: NaiveDate) -> Result<Loan, CatalogError> {
        let member_id = parse_id(&request.member_id, "member", "Please select a member")?;
        let book_id = parse_id(&request.book_id, "book", "Please select a book")?;
        let duration = required(&request.duration_days, "duration", "Loan duration")?;
        let days = match duration.parse::<u32>() {
            Ok(n) if (1..=MAX_LOAN_DAYS).contains(&n) => n,
            _ => {
                return Err(CatalogError::invalid(
                    "duration",
                    format!(
                        "Loan duration must be a whole number of days between 1 and {}",
                        MAX_LOAN_DAYS
                    ),
                ))
            }
        };

        let member_idx = self
            .members
            .iter()
            .position(|m| m.id == member_id)
            .ok_or(CatalogError::NotFound {
                entity: "Member",
                id: member_id,
            })?;
        let book_idx = self
            .books
            .iter()
            .position(|b| b.id == book_id)
            .ok_or(CatalogError::NotFound {
                entity: "Book",
                id: book_id,
            })?;

        let member = &self.members[member_idx];
        if member.status != MemberStatus::Active {
            return Err(CatalogError::BusinessRule(format!(
                "{} is not an active member",
                member.name
            )));
        }
        let book = &self.books[book_idx];
        if !book.is_available() {
            return Err(CatalogError::BusinessRule(format!(
                "'{}' is not available for borrowing.",
                book.title
            )));
        }

        let loan = Loan {
            loan_id: next_id(self.loans.iter().map(|l| l.loan_id), 0, "loan")?,
            book_id,
            member_id,
            book_title: book.title.clone(),
            member_name: member.name.clone(),
            loan_date: today,
            due_date: today + Duration::days(i64::from(days)),
            returned_date: None,
            status: LoanStatus::Active,
            fine_amount: Money::ZERO,
        };

        self.books[book_idx].available_copies -= 1;
        self.members[member_idx].active_loans += 1;
        self.loans.push(loan.clone());
        tracing::info!(
            loan_id = loan.loan_id,
            book_id,
            member_id,
            due = %loan.due_date,
            "Loan issued"
        );
        Ok(loan)
    }

    pub fn return_book(
        &mut self,
        request: ReturnBook,
        today: NaiveDate,
    ) -> Result<ReturnOutcome, CatalogError> {
        let raw_id = required(&request.loan_id, "loan_id", "Loan ID")?;
        let loan_id: u32 = raw_id
            .parse()
            .map_err(|_| CatalogError::invalid("loan_id", "Loan ID must be a number"))?;
        let condition: ReturnCondition = request.condition.parse()?;

        let loan_idx = self
            .loans
            .iter()
            .position(|l| l.loan_id == loan_id)
            .ok_or(CatalogError::NotFound {
                entity: "Loan",
                id: loan_id,
            })?;
        if !self.loans[loan_idx].status.is_open() {
            return Err(CatalogError::BusinessRule(format!(
                "Loan #{} has already been returned",
                loan_id
            )));
        }
        let book_id = self.loans[loan_idx].book_id;
        let member_id = self.loans[loan_idx].member_id;
        let book_idx = self
            .books
            .iter()
            .position(|b| b.id == book_id)
            .ok_or(CatalogError::NotFound {
                entity: "Book",
                id: book_id,
            })?;

        let next_fine_id = condition
            .fine()
            .map(|_| next_id(self.fines.iter().map(|f| f.fine_id), 0, "fine"))
            .transpose()?;

        let book = &mut self.books[book_idx];
        if condition == ReturnCondition::Lost {
            book.total_copies = book.total_copies.saturating_sub(1);
            book.available_copies = book.available_copies.min(book.total_copies);
        } else {
            book.available_copies = (book.available_copies + 1).min(book.total_copies);
        }

        if let Some(member) = self.members.iter_mut().find(|m| m.id == member_id) {
            member.active_loans = member.active_loans.saturating_sub(1);
        }

        let loan = &mut self.loans[loan_idx];
        loan.status = LoanStatus::Returned;
        loan.returned_date = Some(today);

        let fine = condition.fine().zip(next_fine_id).map(|(amount, fine_id)| {
            loan.fine_amount = amount;
            Fine {
                fine_id,
                loan_id,
                member_name: loan.member_name.clone(),
                book_title: loan.book_title.clone(),
                amount,
                issued_date: today,
                due_date: today + Duration::days(FINE_DUE_DAYS),
                status: FineStatus::Pending,
            }
        });
        let loan = loan.clone();
        if let Some(ref fine) = fine {
            self.fines.push(fine.clone());
        }

        tracing::info!(
            loan_id,
            condition = ?condition,
            fine = ?fine.as_ref().map(|f| f.amount),
            "Book returned"
        );
        Ok(ReturnOutcome {
            loan,
            condition,
            fine,
        })
    }

    pub fn update_fine_status(&mut self, fine_id: u32, status: FineStatus) -> Result<Fine, CatalogError> {
        if status == FineStatus::Pending {
            return Err(CatalogError::BusinessRule(
                "A fine cannot be set back to Pending".to_string(),
            ));
        }
        let fine = self
            .fines
            .iter_mut()
            .find(|f| f.fine_id == fine_id)
            .ok_or(CatalogError::NotFound {
                entity: "Fine",
                id: fine_id,
            })?;
        if fine.status.is_settled() {
            return Err(CatalogError::BusinessRule(format!(
                "Fine #{} is already {}",
                fine_id, fine.status
            )));
        }
        fine.status = status;
        tracing::info!(fine_id, status = %status, "Fine updated");
        Ok(fine.clone())
    }

    pub fn delete_book(&mut self, id: u32) -> Result<Book, CatalogError> {
        let idx = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::NotFound { entity: "Book", id })?;
        if self.loans.iter().any(|l| l.book_id == id) {
            return Err(CatalogError::BusinessRule(format!(
                "'{}' cannot be deleted while loans reference it",
                self.books[idx].title
            )));
        }
        let book = self.books.remove(idx);
        tracing::info!(book_id = id, title = %book.title, "Book deleted");
        Ok(book)
    }
}

fn parse_id(value: &str, field: &'static str, missing: &str) -> Result<u32, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::invalid(field, missing));
    }
    value
        .parse()
        .map_err(|_| CatalogError::invalid(field, format!("'{}' is not a valid id", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CatalogStore {
        CatalogStore::sample().unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 5).unwrap()
    }

    fn ids(books: &[&Book]) -> Vec<u32> {
        books.iter().map(|b| b.id).collect()
    }

    fn new_book() -> NewBook {
        NewBook {
            isbn: "9780441172719".to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Fiction".to_string(),
            total_copies: "2".to_string(),
            ..NewBook::default()
        }
    }

    fn new_member() -> NewMember {
        NewMember {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            username: "ghopper".to_string(),
            password: "cobol".to_string(),
            membership_type: "Premium".to_string(),
            ..NewMember::default()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_sample_loads() {
        let store = store();
        assert_eq!(store.list_books().len(), 20);
        assert_eq!(store.list_members().len(), 12);
        assert_eq!(store.list_loans(LoanStatus::Active).len(), 10);
        assert_eq!(store.list_loans(LoanStatus::Overdue).len(), 8);
        assert_eq!(store.list_loans(LoanStatus::Returned).len(), 8);
        assert_eq!(store.list_fines().len(), 22);
    }

    #[test]
    fn test_active_loans_are_derived() {
        let store = store();
        for member in store.list_members() {
            let open = store
                .loans
                .iter()
                .filter(|l| l.member_id == member.id && l.status.is_open())
                .count() as u32;
            assert_eq!(member.active_loans, open, "member {}", member.id);
        }
    }

    #[test]
    fn test_seed_with_dangling_loan_is_rejected() {
        let mut seed = crate::services::seed::sample_seed();
        seed.loans[0].book_id = 999;
        assert!(matches!(
            CatalogStore::from_seed(seed),
            Err(CatalogError::Integrity(_))
        ));
    }

    #[test]
    fn test_seed_with_duplicate_membership_number_is_rejected() {
        let mut seed = crate::services::seed::sample_seed();
        seed.members[6].membership_number = seed.members[0].membership_number.clone();
        assert!(matches!(
            CatalogStore::from_seed(seed),
            Err(CatalogError::Integrity(_))
        ));
    }

    #[test]
    fn test_seed_with_too_many_available_copies_is_rejected() {
        let mut seed = crate::services::seed::sample_seed();
        seed.books[0].available_copies = seed.books[0].total_copies + 1;
        assert!(CatalogStore::from_seed(seed).is_err());
    }

    #[test]
    fn test_fine_names_resolve_through_loan() {
        let store = store();
        for fine in store.list_fines() {
            let loan = store.loan(fine.loan_id).unwrap();
            assert_eq!(fine.member_name, loan.member_name);
            assert_eq!(fine.book_title, loan.book_title);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search and Filter
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_search_returns_everything() {
        let store = store();
        assert_eq!(store.search_books("").len(), 20);
        assert_eq!(store.search_books("   ").len(), 20);
        assert_eq!(store.search_books("search books...").len(), 20);
        assert_eq!(store.search_books("Search Books...").len(), 20);
    }

    #[test]
    fn test_search_matches_title_author_isbn() {
        let store = store();
        let by_title = store.search_books("GATSBY");
        assert_eq!(ids(&by_title), vec![1, 9]);

        let by_author = store.search_books("orwell");
        assert_eq!(ids(&by_author), vec![2, 10]);

        let by_isbn = store.search_books("9780735211292");
        assert_eq!(ids(&by_isbn), vec![7, 15, 18]);

        assert!(store.search_books("no such book").is_empty());
    }

    #[test]
    fn test_search_is_repeatable() {
        let store = store();
        let first = ids(&store.search_books("harari"));
        let second = ids(&store.search_books("harari"));
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_filter_available_matches_copy_counts() {
        let store = store();
        let available = store.filter_books(StatusFilter::Available, &GenreFilter::All);
        assert!(available.iter().all(|b| b.available_copies > 0));
        let expected = store
            .list_books()
            .iter()
            .filter(|b| b.available_copies > 0)
            .count();
        assert_eq!(available.len(), expected);

        let borrowed = store.filter_books(StatusFilter::Borrowed, &GenreFilter::All);
        assert_eq!(borrowed.len() + available.len(), 20);
    }

    #[test]
    fn test_filter_genre_is_substring() {
        let store = store();
        let genre: GenreFilter = "fiction".parse().unwrap();
        let fiction = store.filter_books(StatusFilter::All, &genre);
        assert!(!fiction.is_empty());
        assert!(fiction
            .iter()
            .all(|b| b.genre.to_lowercase().contains("fiction")));
        let expected = store
            .list_books()
            .iter()
            .filter(|b| b.genre.to_lowercase().contains("fiction"))
            .count();
        assert_eq!(fiction.len(), expected);
    }

    #[test]
    fn test_query_intersects_search_and_filter() {
        let store = store();
        let query = BookQuery {
            term: "orwell".to_string(),
            status: StatusFilter::Available,
            genre: GenreFilter::All,
        };
        assert!(store.query_books(&query).is_empty());

        let query = BookQuery {
            term: "michaelides".to_string(),
            status: StatusFilter::Available,
            genre: "mystery".parse().unwrap(),
        };
        assert_eq!(ids(&store.query_books(&query)), vec![4, 12]);
    }

    #[test]
    fn test_genres_are_distinct_and_sorted() {
        let store = store();
        assert_eq!(
            store.genres(),
            vec!["Biography", "Fiction", "History", "Mystery", "Self-Help"]
        );
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("Available".parse(), Ok(StatusFilter::Available));
        assert_eq!("all".parse::<GenreFilter>(), Ok(GenreFilter::All));
        assert!("lent".parse::<StatusFilter>().is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Stats
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_stats_are_computed() {
        let stats = store().stats();
        assert_eq!(stats.total_books, 20);
        assert_eq!(stats.available_books, 12);
        assert_eq!(stats.active_loans, 10);
        assert_eq!(stats.overdue_loans, 8);
        assert_eq!(stats.active_members, 10);
        assert_eq!(stats.pending_fines, 2);
    }

    #[test]
    fn test_fine_summary() {
        let summary = store().fine_summary();
        assert_eq!(summary.total_pending, Money::from_cents(1350));
        assert_eq!(summary.total_paid, Money::from_cents(14_700));
        assert_eq!(summary.total_waived, Money::from_cents(350));
        assert_eq!(summary.average, Money::from_cents(745));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Add Book
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_add_book_assigns_id_and_copies() {
        let mut store = store();
        let book = store.add_book(new_book()).unwrap();
        assert_eq!(book.id, 21);
        assert_eq!(book.available_copies, 2);
        assert_eq!(book.status(), BookStatus::Available);
        assert_eq!(store.book(21), Some(&book));
    }

    #[test]
    fn test_add_book_without_title_leaves_store_unchanged() {
        let mut store = store();
        let before = store.list_books().to_vec();
        let err = store
            .add_book(NewBook {
                title: "  ".to_string(),
                ..new_book()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(err.field(), Some("title"));
        assert_eq!(store.list_books(), before.as_slice());
    }

    #[test]
    fn test_add_book_checks_fields_in_order() {
        let mut store = store();
        let err = store.add_book(NewBook::default()).unwrap_err();
        assert_eq!(err.to_string(), "ISBN is required");

        let err = store
            .add_book(NewBook {
                total_copies: String::new(),
                ..new_book()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Total copies is required");
    }

    #[test]
    fn test_add_book_rejects_bad_numbers() {
        let mut store = store();
        for copies in ["0", "-1", "two", "1.5"] {
            let err = store
                .add_book(NewBook {
                    total_copies: copies.to_string(),
                    ..new_book()
                })
                .unwrap_err();
            assert_eq!(err.field(), Some("copies"), "copies {:?}", copies);
        }
        let err = store
            .add_book(NewBook {
                publication_year: "nineteen".to_string(),
                ..new_book()
            })
            .unwrap_err();
        assert_eq!(err.field(), Some("year"));
        assert_eq!(store.list_books().len(), 20);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Register Member
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_register_member_assigns_next_number() {
        let mut store = store();
        let member = store.register_member(new_member()).unwrap();
        assert_eq!(member.id, 13);
        assert_eq!(member.membership_number, "MEM1013");
        assert_eq!(member.name, "Grace Hopper");
        assert_eq!(member.membership_type, MembershipType::Premium);
        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(member.active_loans, 0);
    }

    #[test]
    fn test_register_member_validation() {
        let mut store = store();
        let err = store
            .register_member(NewMember {
                first_name: String::new(),
                ..new_member()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "First Name is required");

        let err = store
            .register_member(NewMember {
                password: String::new(),
                ..new_member()
            })
            .unwrap_err();
        assert_eq!(err.field(), Some("password"));

        let err = store
            .register_member(NewMember {
                email: "not-an-email".to_string(),
                ..new_member()
            })
            .unwrap_err();
        assert_eq!(err.field(), Some("email"));
        assert_eq!(store.list_members().len(), 12);
    }

    #[test]
    fn test_register_member_rejects_taken_username() {
        let mut store = store();
        store.register_member(new_member()).unwrap();
        let err = store
            .register_member(NewMember {
                username: "GHOPPER".to_string(),
                ..new_member()
            })
            .unwrap_err();
        assert_eq!(err.field(), Some("username"));
        assert_eq!(store.list_members().len(), 13);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Loans
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_issue_loan_moves_a_copy() {
        let mut store = store();
        let loan = store
            .issue_loan(
                IssueLoan {
                    member_id: "2".to_string(),
                    book_id: "6".to_string(),
                    duration_days: "14".to_string(),
                },
                today(),
            )
            .unwrap();
        assert_eq!(loan.loan_id, 309);
        assert_eq!(loan.status, LoanStatus::Active);
        assert_eq!(loan.due_date, NaiveDate::from_ymd_opt(2025, 12, 19).unwrap());
        assert_eq!(loan.book_title, "Sapiens");
        assert_eq!(store.book(6).unwrap().available_copies, 3);
        assert_eq!(store.member(2).unwrap().active_loans, 3);
    }

    #[test]
    fn test_issue_loan_for_unavailable_book_is_rejected() {
        let mut store = store();
        let err = store
            .issue_loan(
                IssueLoan {
                    member_id: "1".to_string(),
                    book_id: "2".to_string(),
                    duration_days: "14".to_string(),
                },
                today(),
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));
        assert_eq!(err.to_string(), "'1984' is not available for borrowing.");
        assert_eq!(store.list_loans(LoanStatus::Active).len(), 10);
        assert_eq!(store.member(1).unwrap().active_loans, 2);
    }

    #[test]
    fn test_issue_loan_validates_duration_and_ids() {
        let mut store = store();
        for days in ["0", "366", "two weeks", ""] {
            let err = store
                .issue_loan(
                    IssueLoan {
                        member_id: "1".to_string(),
                        book_id: "1".to_string(),
                        duration_days: days.to_string(),
                    },
                    today(),
                )
                .unwrap_err();
            assert_eq!(err.field(), Some("duration"), "duration {:?}", days);
        }

        let err = store
            .issue_loan(
                IssueLoan {
                    member_id: "99".to_string(),
                    book_id: "1".to_string(),
                    duration_days: "7".to_string(),
                },
                today(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::NotFound {
                entity: "Member",
                id: 99
            }
        );
    }

    #[test]
    fn test_issue_loan_to_inactive_member_is_rejected() {
        let mut store = store();
        let err = store
            .issue_loan(
                IssueLoan {
                    member_id: "5".to_string(),
                    book_id: "1".to_string(),
                    duration_days: "7".to_string(),
                },
                today(),
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));
    }

    #[test]
    fn test_return_in_good_condition() {
        let mut store = store();
        let outcome = store
            .return_book(
                ReturnBook {
                    loan_id: "101".to_string(),
                    condition: "Good".to_string(),
                },
                today(),
            )
            .unwrap();
        assert_eq!(outcome.loan.status, LoanStatus::Returned);
        assert_eq!(outcome.loan.returned_date, Some(today()));
        assert!(outcome.fine.is_none());
        assert_eq!(store.book(1).unwrap().available_copies, 4);
        assert_eq!(store.member(1).unwrap().active_loans, 1);
        assert_eq!(store.list_fines().len(), 22);
    }

    #[test]
    fn test_return_damaged_issues_fine() {
        let mut store = store();
        let outcome = store
            .return_book(
                ReturnBook {
                    loan_id: "201".to_string(),
                    condition: "Damaged".to_string(),
                },
                today(),
            )
            .unwrap();
        let fine = outcome.fine.unwrap();
        assert_eq!(fine.amount, Money::dollars(25));
        assert_eq!(fine.status, FineStatus::Pending);
        assert_eq!(fine.fine_id, 24);
        assert_eq!(store.book(3).unwrap().available_copies, 3);
    }

    #[test]
    fn test_return_lost_book() {
        let mut store = store();
        let before = store.book(2).unwrap().clone();
        let outcome = store
            .return_book(
                ReturnBook {
                    loan_id: "102".to_string(),
                    condition: "Lost".to_string(),
                },
                today(),
            )
            .unwrap();
        let fine = outcome.fine.unwrap();
        assert_eq!(fine.amount.to_string(), "$50.00");
        assert_eq!(fine.status, FineStatus::Pending);
        assert_eq!(store.fine(fine.fine_id), Some(&fine));

        let after = store.book(2).unwrap();
        assert_eq!(after.total_copies, before.total_copies - 1);
        assert_eq!(after.available_copies, before.available_copies);
        assert!(after.available_copies <= after.total_copies);
    }

    #[test]
    fn test_add_book_after_highest_id_is_rejected() {
        let mut seed = crate::services::seed::sample_seed();
        let mut last = seed.books[0].clone();
        last.id = u32::MAX;
        seed.books.push(last);
        let mut store = CatalogStore::from_seed(seed).unwrap();

        let err = store.add_book(new_book()).unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));
        assert_eq!(store.list_books().len(), 21);
    }

    #[test]
    fn test_register_member_after_highest_serial_is_rejected() {
        let mut seed = crate::services::seed::sample_seed();
        seed.members[11].membership_number = format!("MEM{}", u32::MAX);
        let mut store = CatalogStore::from_seed(seed).unwrap();

        let err = store.register_member(new_member()).unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));
        assert_eq!(store.list_members().len(), 12);
    }

    #[test]
    fn test_damaged_return_without_fine_ids_changes_nothing() {
        let mut seed = crate::services::seed::sample_seed();
        seed.fines[21].fine_id = u32::MAX;
        let mut store = CatalogStore::from_seed(seed).unwrap();
        let request = |condition: &str| ReturnBook {
            loan_id: "101".to_string(),
            condition: condition.to_string(),
        };

        let err = store.return_book(request("Damaged"), today()).unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));
        assert!(store.loan(101).unwrap().status.is_open());
        assert_eq!(store.book(1).unwrap().available_copies, 3);
        assert_eq!(store.list_fines().len(), 22);

        let outcome = store.return_book(request("Good"), today()).unwrap();
        assert!(outcome.fine.is_none());
    }

    #[test]
    fn test_return_errors() {
        let mut store = store();
        let request = |id: &str| ReturnBook {
            loan_id: id.to_string(),
            condition: "Good".to_string(),
        };

        let err = store.return_book(request(""), today()).unwrap_err();
        assert_eq!(err.to_string(), "Loan ID is required");

        let err = store.return_book(request("abc"), today()).unwrap_err();
        assert_eq!(err.field(), Some("loan_id"));

        let err = store.return_book(request("999"), today()).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));

        let err = store.return_book(request("301"), today()).unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));

        let err = store
            .return_book(
                ReturnBook {
                    loan_id: "101".to_string(),
                    condition: "Soggy".to_string(),
                },
                today(),
            )
            .unwrap_err();
        assert_eq!(err.field(), Some("condition"));
        assert_eq!(store.loan(101).unwrap().status, LoanStatus::Active);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fines and Deletes
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_fine_transitions() {
        let mut store = store();
        let fine = store.update_fine_status(1, FineStatus::Paid).unwrap();
        assert_eq!(fine.status, FineStatus::Paid);

        let err = store.update_fine_status(1, FineStatus::Waived).unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));

        let err = store.update_fine_status(3, FineStatus::Pending).unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));
        assert_eq!(store.fine(3).unwrap().status, FineStatus::Pending);

        let fine = store.update_fine_status(3, FineStatus::Waived).unwrap();
        assert_eq!(fine.status, FineStatus::Waived);

        assert!(matches!(
            store.update_fine_status(17, FineStatus::Paid),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_book_rules() {
        let mut store = store();
        let err = store.delete_book(1).unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));
        assert_eq!(store.list_books().len(), 20);

        let deleted = store.delete_book(20).unwrap();
        assert_eq!(deleted.id, 20);
        assert!(store.book(20).is_none());

        assert!(matches!(
            store.delete_book(20),
            Err(CatalogError::NotFound { .. })
        ));
    }
}
