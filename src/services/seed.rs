//! Built-in sample catalog
//!
//! Twenty books, twelve members, twenty-six loans and twenty-two fines.
//! Loan titles and member names are resolved by the store on load.

use super::catalog::{CatalogSeed, FineSeed, LoanSeed};
use crate::model::book::Book;
use crate::model::fine::FineStatus;
use crate::model::loan::LoanStatus;
use crate::model::member::{Member, MemberStatus, MembershipType};
use crate::model::money::Money;
use chrono::NaiveDate;

// id, title, author, isbn, available, total, genre
const BOOKS: [(u32, &str, &str, &str, u32, u32, &str); 20] = [
    (1, "The Great Gatsby", "F. Scott Fitzgerald", "978074323565", 3, 5, "Fiction"),
    (2, "1984", "Georgy Orwell", "97804514935", 0, 3, "Fiction"),
    (3, "Kill a Mockingbird", "Harper Lee", "80061120084", 2, 4, "Fiction"),
    (4, "The Silent Patients", "Alex Michaelides", "97810301697", 1, 2, "Mystery"),
    (5, "Educated", "Tara Westover", "9780399590504", 0, 1, "Biography"),
    (6, "Sapiens", "Yuval Novah Harari", "9780062316097", 4, 5, "History"),
    (7, "Atomic Habits", "James Clear", "9780735211292", 2, 3, "Self-Help"),
    (8, "The Vinci Code", "Dan Brown", "9780307278", 0, 2, "Mystery"),
    (9, "The Great Gatsby", "F. Scott Fitzgerald", "978074323565", 3, 5, "Fiction"),
    (10, "1985", "George Orwell", "978045152435", 0, 3, "Fiction"),
    (11, "To Kill Mockingbird", "Harper Lee", "97800611284", 2, 4, "Fiction"),
    (12, "The Silence Patient", "Alex Michaelides", "978125301697", 1, 2, "Mystery"),
    (13, "Educate", "Tara Westover", "97399590504", 0, 1, "Biography"),
    (14, "Sapiens", "Yuval Noah Harari", "97800316097", 4, 5, "History"),
    (15, "Atomic Habits", "James Clear", "9780735211292", 2, 3, "Self-Help"),
    (16, "The Da Vinci Coode", "Dan Brown", "978030474278", 0, 2, "Mystery"),
    (17, "Sapiens", "Yuval Noah Harari", "97800316097", 4, 5, "History"),
    (18, "Atomic Habits", "James Clear", "9780735211292", 2, 3, "Self-Help"),
    (19, "The Da Vinci Coode", "Dan Brown", "978030474278", 0, 2, "Mystery"),
    (20, "The Da Vinci Coode", "Dan Brown", "978030474278", 0, 2, "Mystery"),
];

// id, name, email, phone, type, status
const MEMBERS: [(u32, &str, &str, &str, MembershipType, MemberStatus); 12] = [
    (1, "John Doe", "john@example.com", "555-0101", MembershipType::Premium, MemberStatus::Active),
    (2, "Jane Smith", "jane@example.com", "555-0102", MembershipType::Standard, MemberStatus::Active),
    (3, "Bob Johnson", "bob@example.com", "555-0103", MembershipType::Student, MemberStatus::Active),
    (4, "Alice Brown", "alice@example.com", "555-0104", MembershipType::Premium, MemberStatus::Active),
    (5, "Charlie Wilson", "charlie@example.com", "555-0105", MembershipType::Standard, MemberStatus::Inactive),
    (6, "Diana Miller", "diana@example.com", "555-0106", MembershipType::Student, MemberStatus::Active),
    (7, "John Doe", "john@example.com", "555-0101", MembershipType::Premium, MemberStatus::Active),
    (8, "Jane Smith", "jane@example.com", "555-0102", MembershipType::Standard, MemberStatus::Active),
    (9, "Bob Johnson", "bob@example.com", "555-0103", MembershipType::Student, MemberStatus::Active),
    (10, "Alice Brown", "alice@example.com", "555-0104", MembershipType::Premium, MemberStatus::Active),
    (11, "Charlie Wilson", "charlie@example.com", "555-0105", MembershipType::Standard, MemberStatus::Inactive),
    (12, "Diana Miller", "diana@example.com", "555-0106", MembershipType::Student, MemberStatus::Active),
];

// loan id, book id, member id
const ACTIVE_LOANS: [(u32, u32, u32); 10] = [
    (101, 1, 1),
    (102, 2, 2),
    (103, 9, 7),
    (104, 10, 8),
    (105, 5, 4),
    (106, 8, 2),
    (107, 1, 6),
    (108, 13, 10),
    (109, 16, 1),
    (110, 19, 3),
];

const OVERDUE_LOANS: [(u32, u32, u32); 8] = [
    (201, 3, 3),
    (202, 4, 4),
    (203, 11, 9),
    (204, 12, 10),
    (205, 3, 9),
    (206, 4, 4),
    (207, 11, 3),
    (208, 12, 10),
];

const RETURNED_LOANS: [(u32, u32, u32); 8] = [
    (301, 6, 5),
    (302, 7, 6),
    (303, 14, 5),
    (304, 15, 6),
    (305, 17, 5),
    (306, 18, 6),
    (307, 6, 5),
    (308, 7, 6),
];

// fine id, loan id, cents, issued, due, status
const FINES: [(u32, u32, u64, &str, &str, FineStatus); 22] = [
    (1, 201, 550, "2025-12-01", "2025-12-15", FineStatus::Pending),
    (2, 301, 300, "2025-11-28", "2025-12-12", FineStatus::Paid),
    (3, 203, 800, "2025-11-15", "2025-11-29", FineStatus::Pending),
    (4, 202, 50, "2025-11-20", "2025-12-04", FineStatus::Waived),
    (5, 303, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
    (6, 204, 50, "2025-11-20", "2025-12-04", FineStatus::Waived),
    (7, 305, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
    (8, 307, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
    (9, 206, 50, "2025-11-20", "2025-12-04", FineStatus::Waived),
    (10, 302, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
    (11, 304, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
    (12, 208, 50, "2025-11-20", "2025-12-04", FineStatus::Waived),
    (13, 306, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
    (14, 308, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
    (15, 202, 50, "2025-11-20", "2025-12-04", FineStatus::Waived),
    (16, 303, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
    (18, 305, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
    (19, 204, 50, "2025-11-20", "2025-12-04", FineStatus::Waived),
    (20, 307, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
    (21, 301, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
    (22, 206, 50, "2025-11-20", "2025-12-04", FineStatus::Waived),
    (23, 302, 1200, "2025-10-10", "2025-10-24", FineStatus::Paid),
];

/// Dates in the tables above are literals; a bad one falls back to the epoch
fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

fn loan(
    (loan_id, book_id, member_id): (u32, u32, u32),
    dates: (&str, &str),
    status: LoanStatus,
    fine_amount: Money,
) -> LoanSeed {
    let due_date = date(dates.1);
    LoanSeed {
        loan_id,
        book_id,
        member_id,
        loan_date: date(dates.0),
        due_date,
        returned_date: (status == LoanStatus::Returned).then_some(due_date),
        status,
        fine_amount,
    }
}

pub fn sample_seed() -> CatalogSeed {
    let books = BOOKS
        .iter()
        .map(|&(id, title, author, isbn, available, total, genre)| Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            available_copies: available,
            total_copies: total,
            genre: genre.to_string(),
            publisher: None,
            publication_year: None,
            location_code: None,
            description: None,
        })
        .collect();

    let members = MEMBERS
        .iter()
        .map(|&(id, name, email, phone, membership_type, status)| Member {
            id,
            name: name.to_string(),
            membership_number: Member::membership_number_for(1000 + id),
            email: email.to_string(),
            phone: phone.to_string(),
            membership_type,
            active_loans: 0,
            status,
            address: None,
            username: None,
        })
        .collect();

    let mut loans = Vec::with_capacity(26);
    for &row in &ACTIVE_LOANS {
        let dates = if row.0 % 2 == 1 {
            ("2025-12-01", "2025-12-15")
        } else {
            ("2025-11-28", "2025-12-12")
        };
        loans.push(loan(row, dates, LoanStatus::Active, Money::ZERO));
    }
    for &row in &OVERDUE_LOANS {
        let (dates, fine) = if row.0 % 2 == 1 {
            (("2025-11-15", "2025-11-29"), Money::dollars(8))
        } else {
            (("2025-11-20", "2025-12-04"), Money::from_cents(50))
        };
        loans.push(loan(row, dates, LoanStatus::Overdue, fine));
    }
    for &row in &RETURNED_LOANS {
        let dates = if row.0 % 2 == 1 {
            ("2025-10-10", "2025-10-24")
        } else {
            ("2025-10-15", "2025-10-29")
        };
        loans.push(loan(row, dates, LoanStatus::Returned, Money::ZERO));
    }

    let fines = FINES
        .iter()
        .map(|&(fine_id, loan_id, cents, issued, due, status)| FineSeed {
            fine_id,
            loan_id,
            amount: Money::from_cents(cents),
            issued_date: date(issued),
            due_date: date(due),
            status,
        })
        .collect();

    CatalogSeed {
        books,
        members,
        loans,
        fines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_dates_parse() {
        let seed = sample_seed();
        let epoch = NaiveDate::default();
        assert!(seed.loans.iter().all(|l| l.loan_date != epoch && l.due_date != epoch));
        assert!(seed.fines.iter().all(|f| f.issued_date != epoch));
    }

    #[test]
    fn test_returned_loans_carry_return_date() {
        let seed = sample_seed();
        for loan in &seed.loans {
            assert_eq!(
                loan.returned_date.is_some(),
                loan.status == LoanStatus::Returned,
                "loan {}",
                loan.loan_id
            );
        }
    }

    #[test]
    fn test_membership_numbers_are_unique() {
        let seed = sample_seed();
        let mut numbers: Vec<_> = seed.members.iter().map(|m| &m.membership_number).collect();
        numbers.sort();
        numbers.dedup();
        assert_eq!(numbers.len(), 12);
        assert_eq!(seed.members[0].membership_number, "MEM1001");
    }
}
