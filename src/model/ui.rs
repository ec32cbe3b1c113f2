//! UI state - presentation enums shared by the app and its components

/// Top-level screens reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Dashboard,
    Books,
    Members,
    Loans,
    Fines,
    Reports,
}

impl Screen {
    pub fn all() -> Vec<Screen> {
        vec![
            Screen::Dashboard,
            Screen::Books,
            Screen::Members,
            Screen::Loans,
            Screen::Fines,
            Screen::Reports,
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Books => "Books",
            Screen::Members => "Members",
            Screen::Loans => "Loans",
            Screen::Fines => "Fines",
            Screen::Reports => "Reports",
        }
    }

    /// Screen bound to a number key, `1` being the dashboard
    pub fn from_digit(c: char) -> Option<Screen> {
        let index = c.to_digit(10)?.checked_sub(1)? as usize;
        Screen::all().get(index).copied()
    }

    /// Members and reports are staff screens
    pub fn is_staff_only(&self) -> bool {
        matches!(self, Screen::Members | Screen::Reports)
    }
}

/// Main application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Login,
    Running,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_digit() {
        assert_eq!(Screen::from_digit('1'), Some(Screen::Dashboard));
        assert_eq!(Screen::from_digit('6'), Some(Screen::Reports));
        assert_eq!(Screen::from_digit('0'), None);
        assert_eq!(Screen::from_digit('7'), None);
    }
}
