//! Loan records. Active, overdue and returned loans share one table.

use super::money::Money;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanStatus {
    Active,
    Overdue,
    Returned,
}

impl LoanStatus {
    pub fn all() -> Vec<LoanStatus> {
        vec![LoanStatus::Active, LoanStatus::Overdue, LoanStatus::Returned]
    }

    /// Active and overdue loans still hold a copy
    pub fn is_open(&self) -> bool {
        matches!(self, LoanStatus::Active | LoanStatus::Overdue)
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanStatus::Active => write!(f, "Active"),
            LoanStatus::Overdue => write!(f, "Overdue"),
            LoanStatus::Returned => write!(f, "Returned"),
        }
    }
}

impl FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(LoanStatus::Active),
            "overdue" => Ok(LoanStatus::Overdue),
            "returned" => Ok(LoanStatus::Returned),
            other => Err(format!("unknown loan status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub loan_id: u32,
    pub book_id: u32,
    pub member_id: u32,
    pub book_title: String,
    pub member_name: String,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned_date: Option<NaiveDate>,
    pub status: LoanStatus,
    pub fine_amount: Money,
}
