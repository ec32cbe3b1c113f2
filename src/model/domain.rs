//! Domain state - business data separate from UI concerns

use super::activity::{ActivityEntry, ActivityLog};
use super::session::Session;
use crate::services::CatalogStore;
use chrono::{DateTime, Local};

/// Domain state containing all business data
pub struct DomainState {
    /// Books, members, loans and fines
    pub store: CatalogStore,

    /// Dashboard activity, newest first
    pub activity: ActivityLog,

    /// Logged-in user, None on the login screen
    pub session: Option<Session>,
}

impl DomainState {
    pub fn new(store: CatalogStore, activity: ActivityLog) -> Self {
        Self {
            store,
            activity,
            session: None,
        }
    }

    pub fn username(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.username.as_str())
            .unwrap_or("system")
    }

    /// Append an activity entry stamped with `now` and the current user
    pub fn record(&mut self, now: DateTime<Local>, action: &str, details: &str) {
        let entry = ActivityEntry::new(
            &now.format("%Y-%m-%d %H:%M").to_string(),
            self.username(),
            action,
            details,
        );
        self.activity.record(entry);
    }
}
