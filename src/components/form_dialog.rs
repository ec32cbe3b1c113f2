//! Form dialog component
//!
//! Draws a `FormState` as a labelled list of inputs and edits it in place.
//! The form itself lives on the modal stack; the App hands it in.

use crate::action::Action;
use crate::components::centered_popup;
use crate::model::form::FormState;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Form dialog
#[derive(Default)]
pub struct FormDialog;

impl FormDialog {
    /// Apply a key to the form, returning an Action for Enter and Esc
    pub fn handle_form_key(form: &mut FormState, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SubmitForm),
            KeyCode::Tab | KeyCode::Down => {
                form.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focus_prev();
                None
            }
            KeyCode::Left => {
                form.cycle_choice(false);
                None
            }
            KeyCode::Right => {
                form.cycle_choice(true);
                None
            }
            KeyCode::Char(' ') if form.focused().is_some_and(|f| f.is_choice()) => {
                form.cycle_choice(true);
                None
            }
            KeyCode::Backspace => {
                form.backspace();
                form.error = None;
                None
            }
            KeyCode::Char(c) => {
                form.insert_char(c);
                form.error = None;
                None
            }
            _ => None,
        }
    }

    pub fn draw_with_form(frame: &mut Frame, area: Rect, form: &FormState) {
        let error_height = if form.error.is_some() { 2 } else { 0 };
        let height = form.fields.len() as u16 * 3 + error_height + 5;
        let popup_area = centered_popup(area, 64, height);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", form.title))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut constraints: Vec<Constraint> =
            form.fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(error_height));
        constraints.push(Constraint::Min(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in form.fields.iter().enumerate() {
            let focused = i == form.focus;
            let border = if focused { Color::Yellow } else { Color::DarkGray };

            let content = if field.is_choice() {
                Line::from(vec![
                    Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
                    Span::styled(field.display_value(), Style::default().fg(Color::White)),
                    Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
                ])
            } else if focused {
                Line::from(format!("{}_", field.display_value()))
            } else {
                Line::from(field.display_value())
            };

            let input = Paragraph::new(content).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(format!(" {} ", field.display_label())),
            );
            frame.render_widget(input, chunks[i]);
        }

        if let Some(ref error) = form.error {
            let error_line = Paragraph::new(Line::from(Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            )))
            .wrap(Wrap { trim: true });
            frame.render_widget(error_line, chunks[form.fields.len()]);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Green)),
            Span::raw("Submit  "),
            Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
            Span::raw("Next  "),
            Span::styled(" ←/→ ", Style::default().fg(Color::Cyan)),
            Span::raw("Choose  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(help, chunks[form.fields.len() + 1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(form: &mut FormState, code: KeyCode) -> Option<Action> {
        FormDialog::handle_form_key(form, KeyEvent::from(code))
    }

    #[test]
    fn test_keys_edit_and_navigate() {
        let mut form = FormState::return_book(None);
        key(&mut form, KeyCode::Char('2'));
        key(&mut form, KeyCode::Char('0'));
        key(&mut form, KeyCode::Char('1'));
        key(&mut form, KeyCode::Tab);
        key(&mut form, KeyCode::Right);
        key(&mut form, KeyCode::Right);
        assert_eq!(form.value("loan_id"), "201");
        assert_eq!(form.value("condition"), "Damaged");
        assert_eq!(key(&mut form, KeyCode::Enter), Some(Action::SubmitForm));
        assert_eq!(key(&mut form, KeyCode::Esc), Some(Action::CloseModal));
    }

    #[test]
    fn test_typing_clears_error() {
        let mut form = FormState::add_book();
        form.set_error("ISBN is required", Some("isbn"));
        key(&mut form, KeyCode::Char('9'));
        assert!(form.error.is_none());
    }

    #[test]
    fn test_draw_shows_labels_and_error() {
        let mut form = FormState::add_book();
        form.set_error("Title is required", Some("title"));
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| FormDialog::draw_with_form(frame, frame.area(), &form))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Add New Book"));
        assert!(text.contains("Title*"));
        assert!(text.contains("Error: Title is required"));
    }
}
