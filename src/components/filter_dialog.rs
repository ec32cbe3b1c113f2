//! Book filter dialog component
//!
//! Two lists side by side: availability status and genre. Enter applies
//! both; `c` clears every filter and the search term.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::table::{highlight_style, step_selection, Step};
use crate::services::{BookQuery, GenreFilter, StatusFilter};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Which list receives j/k
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Status,
    Genre,
}

/// Book filter dialog
pub struct BookFilterDialog {
    pub statuses: Vec<StatusFilter>,
    /// Genre options; index 0 is "all"
    pub genres: Vec<GenreFilter>,
    pub status_state: ListState,
    pub genre_state: ListState,
    pub column: FilterColumn,
    /// Filter active when the dialog opened, marked with a dot
    current: BookQuery,
}

impl Default for BookFilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl BookFilterDialog {
    pub fn new() -> Self {
        let mut status_state = ListState::default();
        status_state.select(Some(0));
        let mut genre_state = ListState::default();
        genre_state.select(Some(0));
        Self {
            statuses: StatusFilter::all(),
            genres: vec![GenreFilter::All],
            status_state,
            genre_state,
            column: FilterColumn::Status,
            current: BookQuery::default(),
        }
    }

    /// Reset the dialog for the catalog's genres and the active query
    pub fn open(&mut self, genres: Vec<String>, current: &BookQuery) {
        self.genres = std::iter::once(GenreFilter::All)
            .chain(genres.into_iter().map(GenreFilter::Genre))
            .collect();
        self.current = current.clone();
        self.column = FilterColumn::Status;

        let status_idx = self
            .statuses
            .iter()
            .position(|s| *s == current.status)
            .unwrap_or(0);
        let genre_idx = self
            .genres
            .iter()
            .position(|g| match (g, &current.genre) {
                (GenreFilter::Genre(a), GenreFilter::Genre(b)) => a.eq_ignore_ascii_case(b),
                (a, b) => a == b,
            })
            .unwrap_or(0);
        self.status_state.select(Some(status_idx));
        self.genre_state.select(Some(genre_idx));
    }

    pub fn selected_status(&self) -> StatusFilter {
        self.status_state
            .selected()
            .and_then(|i| self.statuses.get(i).copied())
            .unwrap_or_default()
    }

    pub fn selected_genre(&self) -> GenreFilter {
        self.genre_state
            .selected()
            .and_then(|i| self.genres.get(i).cloned())
            .unwrap_or_default()
    }

    fn step(&mut self, step: Step) {
        match self.column {
            FilterColumn::Status => {
                let next = step_selection(self.status_state.selected(), self.statuses.len(), step);
                self.status_state.select(next);
            }
            FilterColumn::Genre => {
                let next = step_selection(self.genre_state.selected(), self.genres.len(), step);
                self.genre_state.select(next);
            }
        }
    }

    fn toggle_column(&mut self) {
        self.column = match self.column {
            FilterColumn::Status => FilterColumn::Genre,
            FilterColumn::Genre => FilterColumn::Status,
        };
    }
}

impl Component for BookFilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('f') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SetBookFilter(
                self.selected_status(),
                self.selected_genre(),
            )),
            KeyCode::Char('c') => Some(Action::ClearBookFilters),
            KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Char('h')
            | KeyCode::Char('l') => {
                self.toggle_column();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.step(Step::Prev);
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.step(Step::Next);
                Some(Action::ModalDown)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let list_height = self.statuses.len().max(self.genres.len()) as u16 + 2;
        let popup_area = centered_popup(area, 60, list_height + 6);
        frame.render_widget(Clear, popup_area);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Lists
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let header_text = if self.current.is_filtered() {
            format!("Current: status:{} genre:{}", self.current.status, self.current.genre)
        } else {
            "No filter active".to_string()
        };
        let header = Paragraph::new(Line::from(Span::styled(
            header_text,
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filter Books ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, main_chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[1]);

        let status_items: Vec<ListItem> = self
            .statuses
            .iter()
            .map(|s| option_item(&s.to_string(), *s == self.current.status))
            .collect();
        let genre_items: Vec<ListItem> = self
            .genres
            .iter()
            .map(|g| option_item(&g.to_string(), *g == self.current.genre))
            .collect();

        let status_list = List::new(status_items)
            .block(column_block(" Status ", self.column == FilterColumn::Status))
            .highlight_style(highlight_style())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(status_list, columns[0], &mut self.status_state);

        let genre_list = List::new(genre_items)
            .block(column_block(" Genre ", self.column == FilterColumn::Genre))
            .highlight_style(highlight_style())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(genre_list, columns[1], &mut self.genre_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Apply  "),
            Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
            Span::raw("Column  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" c ", Style::default().fg(Color::Cyan)),
            Span::raw("Clear  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, main_chunks[2]);

        Ok(())
    }
}

fn option_item(label: &str, is_current: bool) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(
            if is_current { "● " } else { "  " },
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            label.to_string(),
            if is_current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            },
        ),
    ]))
}

fn column_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title.to_string())
}
