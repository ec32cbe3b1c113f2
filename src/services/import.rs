//! CSV seed import
//!
//! Reads `books.csv`, `members.csv`, `loans.csv` and `fines.csv` from a seed
//! directory. A missing file yields an empty collection; the resulting seed
//! still has to pass the store's invariant checks.

use super::catalog::{CatalogSeed, FineSeed, LoanSeed};
use crate::error::ImportError;
use crate::model::book::Book;
use crate::model::fine::FineStatus;
use crate::model::loan::LoanStatus;
use crate::model::member::{Member, MemberStatus, MembershipType};
use crate::model::money::Money;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

pub const BOOKS_FILE: &str = "books.csv";
pub const MEMBERS_FILE: &str = "members.csv";
pub const LOANS_FILE: &str = "loans.csv";
pub const FINES_FILE: &str = "fines.csv";

#[derive(Debug, Deserialize)]
struct BookRow {
    id: u32,
    title: String,
    author: String,
    isbn: String,
    available_copies: u32,
    total_copies: u32,
    genre: String,
}

#[derive(Debug, Deserialize)]
struct MemberRow {
    id: u32,
    name: String,
    membership_number: String,
    email: String,
    #[serde(default)]
    phone: String,
    membership_type: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct LoanRow {
    loan_id: u32,
    book_id: u32,
    member_id: u32,
    loan_date: NaiveDate,
    due_date: NaiveDate,
    status: String,
    #[serde(default)]
    fine_amount: String,
    #[serde(default)]
    returned_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct FineRow {
    fine_id: u32,
    loan_id: u32,
    amount: String,
    issued_date: NaiveDate,
    due_date: NaiveDate,
    status: String,
}

/// Load every seed file in `dir`
pub fn load_dir(dir: &Path) -> Result<CatalogSeed, ImportError> {
    let seed = CatalogSeed {
        books: read_file(dir, BOOKS_FILE, read_books)?,
        members: read_file(dir, MEMBERS_FILE, read_members)?,
        loans: read_file(dir, LOANS_FILE, read_loans)?,
        fines: read_file(dir, FINES_FILE, read_fines)?,
    };
    tracing::info!(
        dir = %dir.display(),
        books = seed.books.len(),
        members = seed.members.len(),
        loans = seed.loans.len(),
        fines = seed.fines.len(),
        "Loaded seed files"
    );
    Ok(seed)
}

fn read_file<T>(
    dir: &Path,
    name: &str,
    read: fn(fs::File) -> Result<Vec<T>, ImportError>,
) -> Result<Vec<T>, ImportError> {
    let path = dir.join(name);
    if !path.exists() {
        tracing::debug!(file = %path.display(), "Seed file missing, starting empty");
        return Ok(Vec::new());
    }
    let file = fs::File::open(&path).map_err(|source| ImportError::Io {
        file: name.to_string(),
        source,
    })?;
    read(file)
}

fn read_rows<T: DeserializeOwned, R: Read>(reader: R, file: &str) -> Result<Vec<T>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    reader
        .deserialize()
        .map(|row| {
            row.map_err(|source| ImportError::Csv {
                file: file.to_string(),
                source,
            })
        })
        .collect()
}

fn parse_field<T: FromStr<Err = String>>(value: &str, file: &str) -> Result<T, ImportError> {
    value.parse().map_err(|message| ImportError::BadValue {
        file: file.to_string(),
        message,
    })
}

/// Empty amounts count as zero
fn parse_money(value: &str, file: &str) -> Result<Money, ImportError> {
    if value.trim().is_empty() {
        return Ok(Money::ZERO);
    }
    parse_field(value, file)
}

pub fn read_books<R: Read>(reader: R) -> Result<Vec<Book>, ImportError> {
    let rows: Vec<BookRow> = read_rows(reader, BOOKS_FILE)?;
    Ok(rows
        .into_iter()
        .map(|row| Book {
            id: row.id,
            title: row.title,
            author: row.author,
            isbn: row.isbn,
            available_copies: row.available_copies,
            total_copies: row.total_copies,
            genre: row.genre,
            publisher: None,
            publication_year: None,
            location_code: None,
            description: None,
        })
        .collect())
}

pub fn read_members<R: Read>(reader: R) -> Result<Vec<Member>, ImportError> {
    let rows: Vec<MemberRow> = read_rows(reader, MEMBERS_FILE)?;
    rows.into_iter()
        .map(|row| {
            Ok(Member {
                id: row.id,
                name: row.name,
                membership_number: row.membership_number,
                email: row.email,
                phone: row.phone,
                membership_type: parse_field::<MembershipType>(&row.membership_type, MEMBERS_FILE)?,
                active_loans: 0,
                status: parse_field::<MemberStatus>(&row.status, MEMBERS_FILE)?,
                address: None,
                username: None,
            })
        })
        .collect()
}

pub fn read_loans<R: Read>(reader: R) -> Result<Vec<LoanSeed>, ImportError> {
    let rows: Vec<LoanRow> = read_rows(reader, LOANS_FILE)?;
    rows.into_iter()
        .map(|row| {
            let status = parse_field::<LoanStatus>(&row.status, LOANS_FILE)?;
            let returned_date = match status {
                LoanStatus::Returned => row.returned_date.or(Some(row.due_date)),
                _ => None,
            };
            Ok(LoanSeed {
                loan_id: row.loan_id,
                book_id: row.book_id,
                member_id: row.member_id,
                loan_date: row.loan_date,
                due_date: row.due_date,
                returned_date,
                status,
                fine_amount: parse_money(&row.fine_amount, LOANS_FILE)?,
            })
        })
        .collect()
}

pub fn read_fines<R: Read>(reader: R) -> Result<Vec<FineSeed>, ImportError> {
    let rows: Vec<FineRow> = read_rows(reader, FINES_FILE)?;
    rows.into_iter()
        .map(|row| {
            Ok(FineSeed {
                fine_id: row.fine_id,
                loan_id: row.loan_id,
                amount: parse_money(&row.amount, FINES_FILE)?,
                issued_date: row.issued_date,
                due_date: row.due_date,
                status: parse_field::<FineStatus>(&row.status, FINES_FILE)?,
            })
        })
        .collect()
}
