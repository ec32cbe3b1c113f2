//! Dashboard screen
//!
//! Stat cards, role-dependent quick actions and the recent activity table.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::card_row;
use crate::components::table::{build_table, step_selection, text_cell, Step};
use crate::model::activity::ActivityEntry;
use crate::model::session::Role;
use crate::model::ui::Screen;
use crate::services::CatalogStats;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Button in the quick actions panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub action: Action,
}

impl QuickAction {
    fn new(label: &'static str, action: Action) -> Self {
        Self { label, action }
    }

    /// Staff get the catalog forms and reports, members get their own shortcuts
    pub fn for_role(role: Role) -> Vec<QuickAction> {
        let mut actions = Vec::new();
        if role.is_staff() {
            actions.push(QuickAction::new("Add New Book", Action::OpenAddBook));
            actions.push(QuickAction::new("Register Member", Action::OpenRegisterMember));
            actions.push(QuickAction::new("Issue Loan", Action::OpenIssueLoan(None)));
            actions.push(QuickAction::new("Return Book", Action::OpenReturnBook));
            actions.push(QuickAction::new("View Reports", Action::GoToScreen(Screen::Reports)));
        }
        if role == Role::Member {
            actions.push(QuickAction::new("Search Books", Action::GoToScreen(Screen::Books)));
            actions.push(QuickAction::new("My Loans", Action::ShowMyLoans));
            actions.push(QuickAction::new("My Fines", Action::ShowMyFines));
        }
        actions
    }
}

/// Dashboard component
pub struct DashboardComponent {
    pub quick_actions: Vec<QuickAction>,
    pub list_state: ListState,
}

impl Default for DashboardComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardComponent {
    pub fn new() -> Self {
        Self {
            quick_actions: Vec::new(),
            list_state: ListState::default(),
        }
    }

    /// Rebuild the quick actions for a newly logged-in role
    pub fn set_role(&mut self, role: Role) {
        self.quick_actions = QuickAction::for_role(role);
        self.list_state.select(Some(0));
    }

    pub fn step(&mut self, step: Step) {
        let next = step_selection(self.list_state.selected(), self.quick_actions.len(), step);
        self.list_state.select(next);
    }

    fn selected_action(&self) -> Option<Action> {
        self.list_state
            .selected()
            .and_then(|i| self.quick_actions.get(i))
            .map(|q| q.action.clone())
    }

    pub fn help_hints(&self) -> Vec<Span<'static>> {
        use crate::components::table::key_hint;
        let mut spans = Vec::new();
        spans.extend(key_hint("j/k", "Select", Color::Cyan));
        spans.extend(key_hint("Enter", "Run action", Color::Green));
        spans.extend(key_hint("Tab/1-6", "Screens", Color::Cyan));
        spans.extend(key_hint("?", "Help", Color::White));
        spans.extend(key_hint("L", "Logout", Color::Magenta));
        spans.extend(key_hint("q", "Quit", Color::Yellow));
        spans
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for DashboardComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Enter => self.selected_action(),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if let Some(step) = Step::from_action(&action) {
            self.step(step);
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the store; see draw_with_data
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

impl DashboardComponent {
    pub fn draw_with_data(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        stats: &CatalogStats,
        activity: &[ActivityEntry],
    ) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(self.quick_actions.len() as u16 + 2),
                Constraint::Min(4),
            ])
            .split(area);

        draw_stat_cards(frame, chunks[0], stats);

        let items: Vec<ListItem> = self
            .quick_actions
            .iter()
            .map(|q| ListItem::new(Line::from(Span::raw(q.label))))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Quick Actions ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .highlight_style(crate::components::table::highlight_style())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let columns = [("Time", 17), ("User", 12), ("Action", 16), ("Details", 40)];
        let rows = activity
            .iter()
            .map(|entry| {
                vec![
                    text_cell(&entry.time, 17),
                    text_cell(&entry.user, 12),
                    text_cell(&entry.action, 16),
                    text_cell(&entry.details, 40),
                ]
            })
            .collect();
        frame.render_widget(build_table("Recent Activity", &columns, rows), chunks[2]);

        Ok(())
    }
}

fn draw_stat_cards(frame: &mut Frame, area: Rect, stats: &CatalogStats) {
    let cards = [
        ("Total Books", stats.total_books, "books", Color::Blue),
        ("Available Books", stats.available_books, "books", Color::Green),
        ("Active Loans", stats.active_loans, "loans", Color::Cyan),
        ("Overdue Loans", stats.overdue_loans, "loans", Color::Yellow),
        ("Active Members", stats.active_members, "members", Color::Gray),
        ("Pending Fines", stats.pending_fines, "fines", Color::Red),
    ];

    for ((title, value, unit, color), card_area) in cards.iter().zip(card_row(area, cards.len())) {
        let content = vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(*unit, Style::default().fg(Color::DarkGray))),
        ];
        let card = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", title)),
        );
        frame.render_widget(card, card_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_actions_by_role() {
        let labels = |role| {
            QuickAction::for_role(role)
                .into_iter()
                .map(|q| q.label)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            labels(Role::Librarian),
            vec!["Add New Book", "Register Member", "Issue Loan", "Return Book", "View Reports"]
        );
        assert_eq!(
            labels(Role::Member),
            vec!["Search Books", "My Loans", "My Fines"]
        );
    }

    #[test]
    fn test_enter_runs_selected_action() {
        let mut dashboard = DashboardComponent::new();
        dashboard.set_role(Role::Member);
        dashboard.update(Action::NextItem).unwrap();
        let action = dashboard
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap();
        assert_eq!(action, Some(Action::ShowMyLoans));
    }
}
