//! Message dialog component
//!
//! Results, errors and "under development" notices. Any of Enter, Esc,
//! Space or q dismisses it.

use crate::action::Action;
use crate::components::centered_popup;
use crate::model::modal::MessageKind;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

#[derive(Default)]
pub struct MessageDialog;

impl MessageDialog {
    pub fn handle_message_key(key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
                Some(Action::CloseModal)
            }
            _ => None,
        }
    }

    pub fn draw_with_message(frame: &mut Frame, area: Rect, title: &str, body: &str, kind: MessageKind) {
        let color = match kind {
            MessageKind::Info => Color::Cyan,
            MessageKind::Success => Color::Green,
            MessageKind::Warning => Color::Yellow,
            MessageKind::Error => Color::Red,
        };

        let widest = body.lines().map(|l| l.width()).max().unwrap_or(0) as u16;
        let width = (widest + 6).clamp(40, 80);
        let height = body.lines().count() as u16 + 6;
        let popup_area = centered_popup(area, width, height);

        frame.render_widget(Clear, popup_area);

        let mut content = vec![Line::from("")];
        content.extend(body.lines().map(|l| {
            Line::from(Span::styled(l.to_string(), Style::default().fg(Color::White)))
        }));
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("OK"),
        ]));

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {} ", title))
                    .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}
