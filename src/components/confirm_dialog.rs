//! Yes/no confirmation dialog for quit, logout and delete

use crate::action::Action;
use crate::components::centered_popup;
use crate::model::modal::Modal;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct ConfirmDialog;

impl ConfirmDialog {
    /// Action taken when the user answers yes to `modal`
    fn confirm_action(modal: &Modal) -> Option<Action> {
        match modal {
            Modal::QuitConfirm => Some(Action::ForceQuit),
            Modal::LogoutConfirm => Some(Action::Logout),
            Modal::DeleteBookConfirm { book_id, .. } => Some(Action::ConfirmDeleteBook(*book_id)),
            _ => None,
        }
    }

    pub fn handle_confirm_key(modal: &Modal, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Self::confirm_action(modal),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        }
    }

    pub fn draw_with_modal(frame: &mut Frame, area: Rect, modal: &Modal) {
        let (title, lines, color): (&str, Vec<String>, Color) = match modal {
            Modal::LogoutConfirm => (
                " Confirm Logout ",
                vec!["Are you sure you want to logout?".to_string()],
                Color::Yellow,
            ),
            Modal::DeleteBookConfirm { title: book_title, .. } => (
                " Confirm Delete ",
                vec![
                    "Are you sure you want to delete:".to_string(),
                    format!("'{}'?", book_title),
                    String::new(),
                    "This action cannot be undone.".to_string(),
                ],
                Color::Red,
            ),
            _ => (
                " Quit? ",
                vec!["Are you sure you want to quit?".to_string()],
                Color::Yellow,
            ),
        };

        let popup_area = centered_popup(area, 48, lines.len() as u16 + 6);
        frame.render_widget(Clear, popup_area);

        let mut content = vec![Line::from("")];
        content.extend(lines.into_iter().map(|l| {
            Line::from(Span::styled(
                l,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))
        }));
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled(
                " y ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Yes  "),
            Span::styled(
                " n/Esc ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("No, cancel"),
        ]));

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title)
                    .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            )
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, popup_area);
    }
}
