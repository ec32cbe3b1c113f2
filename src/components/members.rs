//! Members screen (staff only)

use crate::action::Action;
use crate::component::Component;
use crate::components::table::{
    build_table, clamp_selection, colored_cell, key_hint, step_selection, text_cell, Step,
};
use crate::model::member::MemberStatus;
use crate::services::CatalogStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Color,
    text::Span,
    widgets::TableState,
    Frame,
};

pub struct MembersComponent {
    pub table_state: TableState,
}

impl Default for MembersComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl MembersComponent {
    pub fn new() -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self { table_state }
    }

    pub fn step(&mut self, len: usize, step: Step) {
        self.table_state
            .select(step_selection(self.table_state.selected(), len, step));
    }

    pub fn help_hints(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        spans.extend(key_hint("j/k", "Navigate", Color::Cyan));
        spans.extend(key_hint("a", "Register", Color::Green));
        spans.extend(key_hint("?", "Help", Color::White));
        spans.extend(key_hint("q", "Quit", Color::Yellow));
        spans
    }

    pub fn draw_with_store(&mut self, frame: &mut Frame, area: Rect, store: &CatalogStore) -> Result<()> {
        let members = store.list_members();
        self.table_state
            .select(clamp_selection(self.table_state.selected(), members.len()));

        let columns = [
            ("ID", 4),
            ("Name", 18),
            ("Number", 9),
            ("Email", 24),
            ("Phone", 10),
            ("Type", 9),
            ("Loans", 5),
            ("Status", 8),
        ];
        let rows = members
            .iter()
            .map(|member| {
                let status_color = match member.status {
                    MemberStatus::Active => Color::Green,
                    MemberStatus::Inactive => Color::DarkGray,
                };
                vec![
                    text_cell(&member.id.to_string(), 4),
                    text_cell(&member.name, 18),
                    text_cell(&member.membership_number, 9),
                    text_cell(&member.email, 24),
                    text_cell(&member.phone, 10),
                    text_cell(&member.membership_type.to_string(), 9),
                    text_cell(&member.active_loans.to_string(), 5),
                    colored_cell(&member.status.to_string(), 8, status_color),
                ]
            })
            .collect();

        let title = format!("Members ({})", members.len());
        frame.render_stateful_widget(build_table(&title, &columns, rows), area, &mut self.table_state);
        Ok(())
    }
}

impl Component for MembersComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char('a') => Some(Action::OpenRegisterMember),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_draw_lists_membership_numbers() {
        let store = CatalogStore::sample().unwrap();
        let mut members = MembersComponent::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal
            .draw(|frame| {
                members.draw_with_store(frame, frame.area(), &store).unwrap();
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("MEM1001"));
        assert!(text.contains("Members (12)"));
    }

    #[test]
    fn test_register_key() {
        let mut members = MembersComponent::new();
        let action = members
            .handle_key_event(KeyEvent::from(KeyCode::Char('a')))
            .unwrap();
        assert_eq!(action, Some(Action::OpenRegisterMember));
    }
}
