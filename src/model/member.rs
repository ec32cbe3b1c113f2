//! Member records

use std::fmt;
use std::str::FromStr;

const MEMBERSHIP_PREFIX: &str = "MEM";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipType {
    Standard,
    Premium,
    Student,
}

impl MembershipType {
    pub fn all() -> Vec<MembershipType> {
        vec![
            MembershipType::Standard,
            MembershipType::Premium,
            MembershipType::Student,
        ]
    }
}

impl fmt::Display for MembershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipType::Standard => write!(f, "Standard"),
            MembershipType::Premium => write!(f, "Premium"),
            MembershipType::Student => write!(f, "Student"),
        }
    }
}

impl FromStr for MembershipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(MembershipType::Standard),
            "premium" => Ok(MembershipType::Premium),
            "student" => Ok(MembershipType::Student),
            other => Err(format!("unknown membership type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberStatus::Active => write!(f, "Active"),
            MemberStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

impl FromStr for MemberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            other => Err(format!("unknown member status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: u32,
    pub name: String,
    pub membership_number: String,
    pub email: String,
    pub phone: String,
    pub membership_type: MembershipType,
    /// Count of Active and Overdue loans, kept in sync by the store
    pub active_loans: u32,
    pub status: MemberStatus,
    pub address: Option<String>,
    pub username: Option<String>,
}

impl Member {
    /// Numeric part of `MEM1004`
    pub fn membership_serial(&self) -> Option<u32> {
        self.membership_number
            .strip_prefix(MEMBERSHIP_PREFIX)
            .and_then(|n| n.parse().ok())
    }

    pub fn membership_number_for(serial: u32) -> String {
        format!("{}{}", MEMBERSHIP_PREFIX, serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_serial() {
        let member = Member {
            id: 4,
            name: "Alice Brown".to_string(),
            membership_number: "MEM1004".to_string(),
            email: "alice@example.com".to_string(),
            phone: "555-0104".to_string(),
            membership_type: MembershipType::Premium,
            active_loans: 0,
            status: MemberStatus::Active,
            address: None,
            username: None,
        };
        assert_eq!(member.membership_serial(), Some(1004));
        assert_eq!(Member::membership_number_for(1013), "MEM1013");
    }

    #[test]
    fn test_parse_enums_ignore_case() {
        assert_eq!("PREMIUM".parse(), Ok(MembershipType::Premium));
        assert_eq!(" inactive ".parse(), Ok(MemberStatus::Inactive));
        assert!("gold".parse::<MembershipType>().is_err());
    }
}
