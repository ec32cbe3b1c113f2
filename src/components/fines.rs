//! Fines screen: summary cards and the fines table

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::card_row;
use crate::components::table::{
    build_table, clamp_selection, colored_cell, key_hint, step_selection, text_cell, Step,
};
use crate::model::fine::{Fine, FineStatus};
use crate::services::CatalogStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, TableState},
    Frame,
};

pub struct FinesComponent {
    pub table_state: TableState,
}

impl Default for FinesComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl FinesComponent {
    pub fn new() -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self { table_state }
    }

    pub fn selected_fine<'a>(&self, store: &'a CatalogStore) -> Option<&'a Fine> {
        self.table_state
            .selected()
            .and_then(|i| store.list_fines().get(i))
    }

    pub fn step(&mut self, len: usize, step: Step) {
        self.table_state
            .select(step_selection(self.table_state.selected(), len, step));
    }

    pub fn help_hints(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        spans.extend(key_hint("j/k", "Navigate", Color::Cyan));
        spans.extend(key_hint("p", "Mark paid", Color::Green));
        spans.extend(key_hint("w", "Waive", Color::Yellow));
        spans.extend(key_hint("?", "Help", Color::White));
        spans
    }
}

impl Component for FinesComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char('p') => Some(Action::SetFineStatus(FineStatus::Paid)),
            KeyCode::Char('w') => Some(Action::SetFineStatus(FineStatus::Waived)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

impl FinesComponent {
    pub fn draw_with_store(&mut self, frame: &mut Frame, area: Rect, store: &CatalogStore) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)])
            .split(area);

        let summary = store.fine_summary();
        let cards = [
            ("Pending", summary.total_pending, Color::Red),
            ("Paid", summary.total_paid, Color::Green),
            ("Waived", summary.total_waived, Color::Gray),
            ("Average Fine", summary.average, Color::Cyan),
        ];
        for ((title, amount, color), card_area) in cards.iter().zip(card_row(chunks[0], cards.len())) {
            let card = Paragraph::new(Line::from(Span::styled(
                amount.to_string(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(format!(" {} ", title)),
            );
            frame.render_widget(card, card_area);
        }

        let fines = store.list_fines();
        self.table_state
            .select(clamp_selection(self.table_state.selected(), fines.len()));

        let columns = [
            ("Fine", 5),
            ("Loan", 5),
            ("Member", 16),
            ("Book", 24),
            ("Amount", 9),
            ("Issued", 10),
            ("Due", 10),
            ("Status", 8),
        ];
        let rows = fines
            .iter()
            .map(|fine| {
                let status_color = match fine.status {
                    FineStatus::Pending => Color::Red,
                    FineStatus::Paid => Color::Green,
                    FineStatus::Waived => Color::DarkGray,
                };
                vec![
                    text_cell(&fine.fine_id.to_string(), 5),
                    text_cell(&fine.loan_id.to_string(), 5),
                    text_cell(&fine.member_name, 16),
                    text_cell(&fine.book_title, 24),
                    text_cell(&fine.amount.to_string(), 9),
                    text_cell(&fine.issued_date.format("%Y-%m-%d").to_string(), 10),
                    text_cell(&fine.due_date.format("%Y-%m-%d").to_string(), 10),
                    colored_cell(&fine.status.to_string(), 8, status_color),
                ]
            })
            .collect();

        let title = format!("Fines ({})", fines.len());
        frame.render_stateful_widget(build_table(&title, &columns, rows), chunks[1], &mut self.table_state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_status_keys() {
        let mut fines = FinesComponent::new();
        let action = fines
            .handle_key_event(KeyEvent::from(KeyCode::Char('w')))
            .unwrap();
        assert_eq!(action, Some(Action::SetFineStatus(FineStatus::Waived)));
    }

    #[test]
    fn test_summary_cards_render_totals() {
        let store = CatalogStore::sample().unwrap();
        let mut fines = FinesComponent::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                fines.draw_with_store(frame, frame.area(), &store).unwrap();
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("$13.50"));
        assert!(text.contains("$147.00"));
        assert!(text.contains("$7.45"));
    }

    #[test]
    fn test_selected_fine() {
        let store = CatalogStore::sample().unwrap();
        let fines = FinesComponent::new();
        assert_eq!(fines.selected_fine(&store).map(|f| f.fine_id), Some(1));
    }
}
