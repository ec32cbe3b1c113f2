//! Fine records

use super::money::Money;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FineStatus {
    Pending,
    Paid,
    Waived,
}

impl FineStatus {
    /// Paid and waived fines are final
    pub fn is_settled(&self) -> bool {
        !matches!(self, FineStatus::Pending)
    }
}

impl fmt::Display for FineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FineStatus::Pending => write!(f, "Pending"),
            FineStatus::Paid => write!(f, "Paid"),
            FineStatus::Waived => write!(f, "Waived"),
        }
    }
}

impl FromStr for FineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(FineStatus::Pending),
            "paid" => Ok(FineStatus::Paid),
            "waived" => Ok(FineStatus::Waived),
            other => Err(format!("unknown fine status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fine {
    pub fine_id: u32,
    pub loan_id: u32,
    pub member_name: String,
    pub book_title: String,
    pub amount: Money,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: FineStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_states() {
        assert!(!FineStatus::Pending.is_settled());
        assert!(FineStatus::Paid.is_settled());
        assert!(FineStatus::Waived.is_settled());
        assert_eq!("paid".parse(), Ok(FineStatus::Paid));
    }
}
