//! Report screen backend
//!
//! Reports are not computed from the catalog yet: every kind and range
//! produces the same sample overdue report. Export and print are stubs.

use crate::error::{CatalogError, ReportError};
use chrono::{Duration, NaiveDate};
use std::fmt;

/// Days covered by the default report range
pub const DEFAULT_RANGE_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    OverdueBooks,
    MonthlyCirculation,
    MemberActivity,
    PopularGenres,
    FineCollection,
    BookInventory,
}

impl ReportKind {
    pub fn all() -> Vec<ReportKind> {
        vec![
            ReportKind::OverdueBooks,
            ReportKind::MonthlyCirculation,
            ReportKind::MemberActivity,
            ReportKind::PopularGenres,
            ReportKind::FineCollection,
            ReportKind::BookInventory,
        ]
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::OverdueBooks => "Overdue Books Report",
            ReportKind::MonthlyCirculation => "Monthly Circulation",
            ReportKind::MemberActivity => "Member Activity",
            ReportKind::PopularGenres => "Popular Genres",
            ReportKind::FineCollection => "Fine Collection",
            ReportKind::BookInventory => "Book Inventory",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Pdf => write!(f, "PDF"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// The last thirty days up to and including `today`
    pub fn default_for(today: NaiveDate) -> Self {
        Self {
            from: today - Duration::days(DEFAULT_RANGE_DAYS),
            to: today,
        }
    }

    /// Parse `YYYY-MM-DD` bounds entered in the range form
    pub fn parse(from: &str, to: &str) -> Result<Self, CatalogError> {
        let from = parse_date(from, "from", "From date")?;
        let to = parse_date(to, "to", "To date")?;
        if from > to {
            return Err(CatalogError::invalid(
                "from",
                "From date must not be after To date",
            ));
        }
        Ok(Self { from, to })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.from.format("%Y-%m-%d"), self.to.format("%Y-%m-%d"))
    }
}

fn parse_date(value: &str, field: &'static str, label: &str) -> Result<NaiveDate, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::required(field, label));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CatalogError::invalid(field, format!("{} must be a date in YYYY-MM-DD format", label))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub range: DateRange,
}

/// Report body. Identical for every request.
pub fn generate(request: &ReportRequest) -> String {
    tracing::info!(kind = %request.kind, range = %request.range, "Report generated");
    SAMPLE_REPORT.to_string()
}

pub fn export(request: &ReportRequest, format: ExportFormat) -> Result<(), ReportError> {
    tracing::info!(kind = %request.kind, format = %format, "Report export requested");
    Err(ReportError::ExportUnavailable(format.to_string()))
}

pub fn print(request: &ReportRequest) -> Result<(), ReportError> {
    tracing::info!(kind = %request.kind, "Report print requested");
    Err(ReportError::PrintUnavailable)
}

const SAMPLE_REPORT: &str = "\
OVERDUE BOOKS REPORT
Generated: 2025-12-05
Period: 2025-11-01 to 2025-12-05
==================================================

Total Overdue Books: 42
Total Fines Due: $245.50

DETAILED LIST:
--------------------------------------------------
1. Member: John Doe (MEM1001)
   Book: To Kill a Mockingbird
   Due Date: 2025-11-29
   Days Overdue: 6
   Fine: $3.00

2. Member: Alice Brown (MEM1004)
   Book: The Silent Patient
   Due Date: 2025-12-04
   Days Overdue: 1
   Fine: $0.50

3. Member: Bob Johnson (MEM1003)
   Book: 1984
   Due Date: 2025-11-25
   Days Overdue: 10
   Fine: $5.00

... (39 more records)

SUMMARY:
- Most overdue book: 1984 (10 days)
- Highest fine: $12.00
- Member with most overdue books: Alice Brown (3 books)
";
