//! Shared table rendering and selection helpers
//!
//! Every catalog screen is a header row plus data rows with a highlighted
//! selection. Cells are truncated by display width so wide titles never
//! push later columns off screen.

use crate::action::Action;
use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One step of list navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
    First,
    Last,
}

impl Step {
    pub fn from_action(action: &Action) -> Option<Step> {
        match action {
            Action::NextItem => Some(Step::Next),
            Action::PrevItem => Some(Step::Prev),
            Action::FirstItem => Some(Step::First),
            Action::LastItem => Some(Step::Last),
            _ => None,
        }
    }
}

/// New selection after taking `step` in a list of `len` rows.
/// Next and Prev wrap around; an empty list has no selection.
pub fn step_selection(current: Option<usize>, len: usize, step: Step) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0).min(len - 1);
    let next = match step {
        Step::Next => (current + 1) % len,
        Step::Prev => {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        }
        Step::First => 0,
        Step::Last => len - 1,
    };
    Some(next)
}

/// Keep a selection inside a list that may have shrunk
pub fn clamp_selection(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(current.unwrap_or(0).min(len - 1))
    }
}

/// Truncate `text` to at most `max_width` display columns, ending in `…`
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn highlight_style() -> Style {
    Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Build a bordered table. `columns` pairs each header with its width.
pub fn build_table<'a>(
    title: &str,
    columns: &[(&'a str, u16)],
    rows: Vec<Vec<Cell<'a>>>,
) -> Table<'a> {
    let header = Row::new(columns.iter().map(|(name, _)| {
        Cell::from(*name).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .bottom_margin(0);

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|(_, width)| Constraint::Length(*width))
        .collect();

    let rows: Vec<Row> = rows.into_iter().map(Row::new).collect();

    Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", title))
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("▶ ")
        .column_spacing(1)
}

/// Plain text cell cut to the column width
pub fn text_cell(text: &str, width: u16) -> Cell<'static> {
    Cell::from(truncate(text, width as usize))
}

/// Text cell in a colour
pub fn colored_cell(text: &str, width: u16, color: Color) -> Cell<'static> {
    Cell::from(truncate(text, width as usize)).style(Style::default().fg(color))
}

/// A key hint for help bars: highlighted key followed by its description
pub fn key_hint(key: &str, description: &str, color: Color) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!(" {} ", key),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{} ", description)),
    ]
}
