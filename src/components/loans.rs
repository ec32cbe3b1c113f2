//! Loans screen with Active / Overdue / Returned sub-tabs

use crate::action::Action;
use crate::component::Component;
use crate::components::table::{
    build_table, clamp_selection, colored_cell, key_hint, step_selection, text_cell, Step,
};
use crate::model::loan::{Loan, LoanStatus};
use crate::services::CatalogStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, TableState, Tabs},
    Frame,
};

pub struct LoansComponent {
    pub active_tab: LoanStatus,
    pub table_state: TableState,
}

impl Default for LoansComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl LoansComponent {
    pub fn new() -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            active_tab: LoanStatus::Active,
            table_state,
        }
    }

    /// Switch to the next tab
    pub fn next_tab(&mut self) {
        let tabs = LoanStatus::all();
        let current = tabs.iter().position(|t| *t == self.active_tab).unwrap_or(0);
        self.active_tab = tabs[(current + 1) % tabs.len()];
        self.table_state.select(Some(0));
    }

    /// Switch to the previous tab
    pub fn previous_tab(&mut self) {
        let tabs = LoanStatus::all();
        let current = tabs.iter().position(|t| *t == self.active_tab).unwrap_or(0);
        self.active_tab = tabs[(current + tabs.len() - 1) % tabs.len()];
        self.table_state.select(Some(0));
    }

    pub fn visible<'a>(&self, store: &'a CatalogStore) -> Vec<&'a Loan> {
        store.list_loans(self.active_tab)
    }

    /// Loan under the cursor, used to prefill the return form
    pub fn selected_loan<'a>(&self, store: &'a CatalogStore) -> Option<&'a Loan> {
        let loans = self.visible(store);
        self.table_state.selected().and_then(|i| loans.get(i).copied())
    }

    pub fn step(&mut self, len: usize, step: Step) {
        self.table_state
            .select(step_selection(self.table_state.selected(), len, step));
    }

    pub fn help_hints(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        spans.extend(key_hint("h/l", "Tab", Color::Cyan));
        spans.extend(key_hint("j/k", "Navigate", Color::Cyan));
        spans.extend(key_hint("i", "Issue", Color::Green));
        spans.extend(key_hint("r", "Return", Color::Green));
        spans.extend(key_hint("?", "Help", Color::White));
        spans
    }
}

impl Component for LoansComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextSubTab),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevSubTab),
            KeyCode::Char('i') => Some(Action::OpenIssueLoan(None)),
            KeyCode::Char('r') | KeyCode::Enter => Some(Action::OpenReturnBook),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextSubTab => self.next_tab(),
            Action::PrevSubTab => self.previous_tab(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

impl LoansComponent {
    pub fn draw_with_store(&mut self, frame: &mut Frame, area: Rect, store: &CatalogStore) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(area);

        let all_tabs = LoanStatus::all();
        let titles: Vec<String> = all_tabs
            .iter()
            .map(|status| format!("{} ({})", status, store.list_loans(*status).len()))
            .collect();
        let selected = all_tabs
            .iter()
            .position(|t| *t == self.active_tab)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::BOTTOM))
            .select(selected)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        let loans = self.visible(store);
        self.table_state
            .select(clamp_selection(self.table_state.selected(), loans.len()));

        let columns = [
            ("Loan", 5),
            ("Book", 24),
            ("Member", 16),
            ("Loaned", 10),
            ("Due", 10),
            ("Returned", 10),
            ("Status", 8),
            ("Fine", 9),
        ];
        let rows = loans
            .iter()
            .map(|loan| {
                let status_color = match loan.status {
                    LoanStatus::Active => Color::Green,
                    LoanStatus::Overdue => Color::Red,
                    LoanStatus::Returned => Color::DarkGray,
                };
                let returned = loan
                    .returned_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                vec![
                    text_cell(&loan.loan_id.to_string(), 5),
                    text_cell(&loan.book_title, 24),
                    text_cell(&loan.member_name, 16),
                    text_cell(&loan.loan_date.format("%Y-%m-%d").to_string(), 10),
                    text_cell(&loan.due_date.format("%Y-%m-%d").to_string(), 10),
                    text_cell(&returned, 10),
                    colored_cell(&loan.status.to_string(), 8, status_color),
                    text_cell(&loan.fine_amount.to_string(), 9),
                ]
            })
            .collect();

        let title = format!("{} Loans", self.active_tab);
        frame.render_stateful_widget(build_table(&title, &columns, rows), chunks[1], &mut self.table_state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_tabs_wrap() {
        let mut loans = LoansComponent::new();
        loans.update(Action::PrevSubTab).unwrap();
        assert_eq!(loans.active_tab, LoanStatus::Returned);
        loans.update(Action::NextSubTab).unwrap();
        assert_eq!(loans.active_tab, LoanStatus::Active);
    }

    #[test]
    fn test_tab_partitions_loans() {
        let store = CatalogStore::sample().unwrap();
        let mut loans = LoansComponent::new();
        assert_eq!(loans.visible(&store).len(), 10);
        loans.next_tab();
        assert_eq!(loans.visible(&store).len(), 8);
        assert!(loans
            .visible(&store)
            .iter()
            .all(|l| l.status == LoanStatus::Overdue));
    }

    #[test]
    fn test_selected_loan() {
        let store = CatalogStore::sample().unwrap();
        let mut loans = LoansComponent::new();
        loans.step(10, Step::Next);
        assert_eq!(loans.selected_loan(&store).map(|l| l.loan_id), Some(102));
    }
}
