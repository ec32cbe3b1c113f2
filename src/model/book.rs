//! Book records

use std::fmt;

/// Availability shown in the books table. Always derived from copy counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookStatus {
    Available,
    Borrowed,
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookStatus::Available => write!(f, "Available"),
            BookStatus::Borrowed => write!(f, "Borrowed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub available_copies: u32,
    pub total_copies: u32,
    pub genre: String,
    pub publisher: Option<String>,
    pub publication_year: Option<u16>,
    pub location_code: Option<String>,
    pub description: Option<String>,
}

impl Book {
    pub fn status(&self) -> BookStatus {
        if self.available_copies > 0 {
            BookStatus::Available
        } else {
            BookStatus::Borrowed
        }
    }

    pub fn is_available(&self) -> bool {
        self.status() == BookStatus::Available
    }

    /// Case-insensitive match against title, author or ISBN.
    /// `needle` must already be lowercase.
    pub fn matches_term(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
            || self.isbn.to_lowercase().contains(needle)
    }

    /// `copies available / total` label for tables
    pub fn copies_label(&self) -> String {
        format!("{}/{}", self.available_copies, self.total_copies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(available: u32, total: u32) -> Book {
        Book {
            id: 1,
            title: "The Great Gatsby".to_string(),
            author: "F. Scott Fitzgerald".to_string(),
            isbn: "978-0743273565".to_string(),
            available_copies: available,
            total_copies: total,
            genre: "Fiction".to_string(),
            publisher: None,
            publication_year: None,
            location_code: None,
            description: None,
        }
    }

    #[test]
    fn test_status_follows_copies() {
        assert_eq!(book(3, 5).status(), BookStatus::Available);
        assert_eq!(book(0, 5).status(), BookStatus::Borrowed);
        assert_eq!(book(0, 5).status().to_string(), "Borrowed");
    }

    #[test]
    fn test_matches_term() {
        let b = book(1, 1);
        assert!(b.matches_term("gatsby"));
        assert!(b.matches_term("fitzgerald"));
        assert!(b.matches_term("0743"));
        assert!(!b.matches_term("orwell"));
    }
}
