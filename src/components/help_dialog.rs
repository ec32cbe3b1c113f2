//! Help dialog component
//!
//! Key bindings for every screen, scrollable with j/k.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        // Clear the area
        frame.render_widget(Clear, area);

        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let content = build_help_content();
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        // Render scrollbar if content exceeds visible area
        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

/// Build the help content with all keyboard shortcuts
fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    // Helper to add a section header
    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            Style::default().fg(Color::DarkGray),
        )));
    };

    // Helper to add a shortcut line
    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:12}", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    // Navigation
    add_section(&mut lines, "Navigation");
    add_shortcut(&mut lines, "Tab", "Next screen");
    add_shortcut(&mut lines, "Shift+Tab", "Previous screen");
    add_shortcut(&mut lines, "1-6", "Jump to screen (Dashboard..Reports)");
    add_shortcut(&mut lines, "j / ↓", "Move to next row");
    add_shortcut(&mut lines, "k / ↑", "Move to previous row");
    add_shortcut(&mut lines, "g / G", "Jump to first / last row");

    // Dashboard
    add_section(&mut lines, "Dashboard");
    add_shortcut(&mut lines, "Enter", "Run the selected quick action");

    // Books
    add_section(&mut lines, "Books");
    add_shortcut(&mut lines, "/", "Search title, author or ISBN");
    add_shortcut(&mut lines, "f", "Filter by status and genre");
    add_shortcut(&mut lines, "c", "Clear search and filters");
    add_shortcut(&mut lines, "a", "Add new book");
    add_shortcut(&mut lines, "e", "Edit selected book");
    add_shortcut(&mut lines, "d", "Delete selected book");
    add_shortcut(&mut lines, "b / Enter", "Borrow selected book");

    // Members and Loans
    add_section(&mut lines, "Members & Loans");
    add_shortcut(&mut lines, "a", "Register member (Members)");
    add_shortcut(&mut lines, "h / l", "Switch Active/Overdue/Returned");
    add_shortcut(&mut lines, "i", "Issue loan");
    add_shortcut(&mut lines, "r / Enter", "Return selected loan");

    // Fines
    add_section(&mut lines, "Fines");
    add_shortcut(&mut lines, "p", "Mark selected fine as paid");
    add_shortcut(&mut lines, "w", "Waive selected fine");

    // Reports
    add_section(&mut lines, "Reports");
    add_shortcut(&mut lines, "d", "Set date range");
    add_shortcut(&mut lines, "Enter", "Generate report");
    add_shortcut(&mut lines, "x / X", "Export as CSV / PDF");
    add_shortcut(&mut lines, "p", "Print report");

    // Forms
    add_section(&mut lines, "Forms");
    add_shortcut(&mut lines, "Tab / ↓", "Next field");
    add_shortcut(&mut lines, "Shift+Tab", "Previous field");
    add_shortcut(&mut lines, "← / →", "Change selection");
    add_shortcut(&mut lines, "Enter", "Submit");
    add_shortcut(&mut lines, "Esc", "Cancel");

    // Session
    add_section(&mut lines, "Session");
    add_shortcut(&mut lines, "?", "Show this help");
    add_shortcut(&mut lines, "L", "Logout");
    add_shortcut(&mut lines, "q", "Quit");
    add_shortcut(&mut lines, "Ctrl+c", "Quit immediately");

    // Footer
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_screen() {
        let text: String = build_help_content()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        for section in ["Dashboard", "Books", "Members & Loans", "Fines", "Reports"] {
            assert!(text.contains(section), "missing {}", section);
        }
    }

    #[test]
    fn test_close_keys() {
        let mut dialog = HelpDialog::default();
        let action = dialog.handle_key_event(KeyEvent::from(KeyCode::Char('?'))).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
    }
}
