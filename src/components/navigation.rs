//! Navigation header and footer drawn around every screen

use crate::model::session::Session;
use crate::model::ui::Screen;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Title bar with the screens the role may open and the logged-in user
pub fn draw_header(frame: &mut Frame, area: Rect, session: &Session, current: Screen) {
    let user_label = format!(" {} ({}) ", session.username, session.role);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16),
            Constraint::Min(0),
            Constraint::Length(user_label.width() as u16 + 2),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        " SmartLibrary",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    let screens = session.visible_screens();
    let titles: Vec<String> = screens
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{} {}", digit_for(*s).unwrap_or(i + 1), s.name()))
        .collect();
    let selected = screens.iter().position(|s| *s == current).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[1]);

    let user = Paragraph::new(Line::from(Span::styled(
        user_label,
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(ratatui::layout::Alignment::Right)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(user, chunks[2]);
}

/// Number key that jumps to `screen`
fn digit_for(screen: Screen) -> Option<usize> {
    Screen::all().iter().position(|s| *s == screen).map(|i| i + 1)
}

/// Footer with version label, screen key hints and the clock
pub fn draw_footer(frame: &mut Frame, area: Rect, hints: Vec<Span<'static>>, clock: &str) {
    let version = format!(" v{} ", env!("CARGO_PKG_VERSION"));
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(version.width() as u16),
            Constraint::Min(0),
            Constraint::Length(clock.width() as u16 + 2),
        ])
        .split(area);

    let block = || {
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
    };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            version,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block()),
        chunks[0],
    );
    frame.render_widget(Paragraph::new(Line::from(hints)).block(block()), chunks[1]);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {} ", clock),
            Style::default().fg(Color::Yellow),
        )))
        .block(block()),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::session::Role;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_header(session: &Session) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 3)).unwrap();
        terminal
            .draw(|frame| draw_header(frame, frame.area(), session, Screen::Dashboard))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_member_header_hides_staff_screens() {
        let text = render_header(&Session::new("member", Role::Member));
        assert!(text.contains("Books"));
        assert!(!text.contains("Members"));
        assert!(!text.contains("Reports"));
        assert!(text.contains("member (member)"));
    }

    #[test]
    fn test_staff_header_numbers_tabs() {
        let text = render_header(&Session::new("GROUP E", Role::Admin));
        assert!(text.contains("3 Members"));
        assert!(text.contains("6 Reports"));
    }
}
