//! Login screen component
//!
//! Username and password entry. The credentials are checked by the App
//! through its authenticator when the user presses Enter.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Input field with focus on the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// Login screen component
#[derive(Debug)]
pub struct LoginComponent {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// Error from the last attempt
    pub error: Option<String>,
}

impl Default for LoginComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginComponent {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focus: LoginField::Username,
            error: None,
        }
    }

    /// Clear both fields, e.g. after logout
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Keep the username and clear the password after a failed attempt
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.password.clear();
        self.focus = if self.username.trim().is_empty() {
            LoginField::Username
        } else {
            LoginField::Password
        };
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

impl Component for LoginComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::ForceQuit),
            KeyCode::Enter => Some(Action::SubmitLogin),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.toggle_focus();
                None
            }
            KeyCode::Backspace => {
                self.focused_input().pop();
                self.error = None;
                None
            }
            KeyCode::Char(c) => {
                self.focused_input().push(c);
                self.error = None;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let popup_area = centered_popup(area, 52, 17);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" SmartLibrary ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .title_alignment(Alignment::Center);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Subtitle
                Constraint::Length(3), // Username
                Constraint::Length(3), // Password
                Constraint::Length(2), // Error
                Constraint::Length(2), // Demo hint
                Constraint::Min(1),    // Help
            ])
            .split(inner);

        let subtitle = Paragraph::new(Line::from(Span::styled(
            "Library Management System",
            Style::default().fg(Color::White),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(subtitle, chunks[0]);

        let username = format!("{}_", self.username);
        let password = format!("{}_", "*".repeat(self.password.chars().count()));
        self.draw_input(frame, chunks[1], " Username ", &username, LoginField::Username);
        self.draw_input(frame, chunks[2], " Password ", &password, LoginField::Password);

        if let Some(ref error) = self.error {
            let error_line = Paragraph::new(Line::from(Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(error_line, chunks[3]);
        }

        let hint = Paragraph::new(Line::from(Span::styled(
            "Demo: GROUP E / FICT123",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[4]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Green)),
            Span::raw("Login  "),
            Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
            Span::raw("Switch field  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[5]);

        Ok(())
    }
}

impl LoginComponent {
    fn draw_input(&self, frame: &mut Frame, area: Rect, title: &str, text: &str, field: LoginField) {
        let border = if self.focus == field {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        let input = Paragraph::new(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(Color::White),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title.to_string()),
        );
        frame.render_widget(input, area);
    }
}
