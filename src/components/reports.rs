//! Reports screen (staff only)
//!
//! Report kind list, the selected date range, and the last generated report.

use crate::action::Action;
use crate::component::Component;
use crate::components::table::{highlight_style, key_hint, step_selection, Step};
use crate::services::{DateRange, ExportFormat, ReportKind, ReportRequest};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub struct ReportsComponent {
    pub kinds: Vec<ReportKind>,
    pub list_state: ListState,
    pub range: DateRange,
    /// Text of the last generated report
    pub output: Option<String>,
    pub output_scroll: u16,
}

impl ReportsComponent {
    pub fn new(today: NaiveDate) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            kinds: ReportKind::all(),
            list_state,
            range: DateRange::default_for(today),
            output: None,
            output_scroll: 0,
        }
    }

    pub fn selected_kind(&self) -> ReportKind {
        self.list_state
            .selected()
            .and_then(|i| self.kinds.get(i).copied())
            .unwrap_or(ReportKind::OverdueBooks)
    }

    pub fn request(&self) -> ReportRequest {
        ReportRequest {
            kind: self.selected_kind(),
            range: self.range,
        }
    }

    pub fn set_output(&mut self, text: String) {
        self.output = Some(text);
        self.output_scroll = 0;
    }

    pub fn step(&mut self, step: Step) {
        let next = step_selection(self.list_state.selected(), self.kinds.len(), step);
        self.list_state.select(next);
    }

    pub fn help_hints(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        spans.extend(key_hint("j/k", "Report", Color::Cyan));
        spans.extend(key_hint("d", "Dates", Color::Cyan));
        spans.extend(key_hint("Enter", "Generate", Color::Green));
        spans.extend(key_hint("x/X", "Export CSV/PDF", Color::Green));
        spans.extend(key_hint("p", "Print", Color::Green));
        spans.extend(key_hint("?", "Help", Color::White));
        spans
    }
}

impl Component for ReportsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char('d') => Some(Action::OpenReportRange),
            KeyCode::Enter => Some(Action::GenerateReport),
            KeyCode::Char('x') => Some(Action::ExportReport(ExportFormat::Csv)),
            KeyCode::Char('X') => Some(Action::ExportReport(ExportFormat::Pdf)),
            KeyCode::Char('p') => Some(Action::PrintReport),
            KeyCode::PageDown => {
                self.output_scroll = self.output_scroll.saturating_add(5);
                None
            }
            KeyCode::PageUp => {
                self.output_scroll = self.output_scroll.saturating_sub(5);
                None
            }
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

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(20)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(4)])
            .split(columns[0]);

        let items: Vec<ListItem> = self
            .kinds
            .iter()
            .map(|kind| ListItem::new(Line::from(kind.to_string())))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Reports ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            )
            .highlight_style(highlight_style())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, left[0], &mut self.list_state);

        let range = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("From: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    self.range.from.format("%Y-%m-%d").to_string(),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            Line::from(vec![
                Span::styled("To:   ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    self.range.to.format("%Y-%m-%d").to_string(),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Date Range "),
        );
        frame.render_widget(range, left[1]);

        let body: Vec<Line> = match self.output {
            Some(ref text) => text.lines().map(|l| Line::from(l.to_string())).collect(),
            None => vec![Line::from(Span::styled(
                "Select a report and press Enter to generate it.",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        let output = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .scroll((self.output_scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(format!(" {} ", self.selected_kind())),
            );
        frame.render_widget(output, columns[1]);

        Ok(())
    }
}
