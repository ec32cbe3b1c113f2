//! Recent activity shown on the dashboard

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    /// `YYYY-MM-DD HH:MM`
    pub time: String,
    pub user: String,
    pub action: String,
    pub details: String,
}

impl ActivityEntry {
    pub fn new(time: &str, user: &str, action: &str, details: &str) -> Self {
        Self {
            time: time.to_string(),
            user: user.to_string(),
            action: action.to_string(),
            details: details.to_string(),
        }
    }
}

/// Newest-first list of activity entries
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new(entries: Vec<ActivityEntry>) -> Self {
        Self { entries }
    }

    /// Entries shipped with the built-in sample data
    pub fn sample() -> Self {
        Self::new(vec![
            ActivityEntry::new(
                "2025-12-05 10:30",
                "admin",
                "Added Book",
                "The Great Gatsby - F. Scott Fitzgerald",
            ),
            ActivityEntry::new(
                "2025-12-05 09:15",
                "librarian",
                "Issued Loan",
                "Member #1001 borrowed '1984'",
            ),
            ActivityEntry::new(
                "2025-12-05 08:45",
                "system",
                "Daily Maintenance",
                "Updated 42 overdue loans",
            ),
            ActivityEntry::new(
                "2025-12-04 16:20",
                "member",
                "Returned Book",
                "To Kill a Mockingbird",
            ),
            ActivityEntry::new(
                "2025-12-04 14:10",
                "admin",
                "Updated Member",
                "Updated membership for John Doe",
            ),
        ])
    }

    pub fn record(&mut self, entry: ActivityEntry) {
        self.entries.insert(0, entry);
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_puts_newest_first() {
        let mut log = ActivityLog::sample();
        let before = log.entries().len();
        log.record(ActivityEntry::new("2025-12-06 11:00", "admin", "Added Book", "Dune"));
        assert_eq!(log.entries().len(), before + 1);
        assert_eq!(log.entries()[0].details, "Dune");
    }
}
