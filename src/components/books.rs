//! Books screen
//!
//! Catalog table with incremental search and a status/genre filter.

use crate::action::Action;
use crate::component::Component;
use crate::components::table::{
    build_table, clamp_selection, colored_cell, key_hint, step_selection, text_cell, Step,
};
use crate::model::book::{Book, BookStatus};
use crate::services::catalog::SEARCH_PLACEHOLDER;
use crate::services::{BookQuery, CatalogStore, GenreFilter, StatusFilter};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, TableState},
    Frame,
};

pub struct BooksComponent {
    /// Search term and filters applied to the table
    pub query: BookQuery,
    /// Whether keys go to the search box
    pub search_mode: bool,
    pub table_state: TableState,
}

impl Default for BooksComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl BooksComponent {
    pub fn new() -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            query: BookQuery::default(),
            search_mode: false,
            table_state,
        }
    }

    /// Books currently shown, in table order
    pub fn visible<'a>(&self, store: &'a CatalogStore) -> Vec<&'a Book> {
        store.query_books(&self.query)
    }

    pub fn selected_book<'a>(&self, store: &'a CatalogStore) -> Option<&'a Book> {
        let books = self.visible(store);
        self.table_state.selected().and_then(|i| books.get(i).copied())
    }

    pub fn step(&mut self, len: usize, step: Step) {
        self.table_state
            .select(step_selection(self.table_state.selected(), len, step));
    }

    /// Keep the selection valid after the catalog or query changed
    pub fn clamp(&mut self, len: usize) {
        self.table_state
            .select(clamp_selection(self.table_state.selected(), len));
    }

    pub fn search_input(&mut self, c: char) {
        self.query.term.push(c);
        self.table_state.select(Some(0));
    }

    pub fn search_backspace(&mut self) {
        self.query.term.pop();
        self.table_state.select(Some(0));
    }

    pub fn set_filter(&mut self, status: StatusFilter, genre: GenreFilter) {
        self.query.status = status;
        self.query.genre = genre;
        self.table_state.select(Some(0));
    }

    pub fn clear_filters(&mut self) {
        self.query = BookQuery::default();
        self.search_mode = false;
        self.table_state.select(Some(0));
    }

    pub fn help_hints(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        if self.search_mode {
            spans.extend(key_hint("Esc/Enter", "Done", Color::Yellow));
            spans.extend(key_hint("Backspace", "Delete", Color::Cyan));
            return spans;
        }
        spans.extend(key_hint("/", "Search", Color::Cyan));
        spans.extend(key_hint("f", "Filter", Color::Cyan));
        spans.extend(key_hint("c", "Clear", Color::Cyan));
        spans.extend(key_hint("a", "Add", Color::Green));
        spans.extend(key_hint("e", "Edit", Color::Green));
        spans.extend(key_hint("d", "Delete", Color::Red));
        spans.extend(key_hint("b", "Borrow", Color::Green));
        spans.extend(key_hint("?", "Help", Color::White));
        spans
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for BooksComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char('f') => Some(Action::OpenBookFilter),
            KeyCode::Char('c') => Some(Action::ClearBookFilters),
            KeyCode::Char('a') => Some(Action::OpenAddBook),
            KeyCode::Char('e') => Some(Action::EditBook),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::RequestDeleteBook),
            KeyCode::Char('b') | KeyCode::Enter => Some(Action::BorrowBook),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::EnterSearchMode => self.search_mode = true,
            Action::ExitSearchMode => self.search_mode = false,
            Action::SearchInput(c) => self.search_input(c),
            Action::SearchBackspace => self.search_backspace(),
            Action::SetBookFilter(status, genre) => self.set_filter(status, genre),
            Action::ClearBookFilters => self.clear_filters(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the store; see draw_with_store
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

impl BooksComponent {
    pub fn draw_with_store(&mut self, frame: &mut Frame, area: Rect, store: &CatalogStore) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        self.draw_search_bar(frame, chunks[0]);

        let books = self.visible(store);
        self.clamp(books.len());

        let columns = [
            ("ID", 4),
            ("Title", 24),
            ("Author", 20),
            ("ISBN", 14),
            ("Copies", 7),
            ("Status", 9),
            ("Genre", 12),
        ];
        let rows = books
            .iter()
            .map(|book| {
                let status_color = match book.status() {
                    BookStatus::Available => Color::Green,
                    BookStatus::Borrowed => Color::Red,
                };
                vec![
                    text_cell(&book.id.to_string(), 4),
                    text_cell(&book.title, 24),
                    text_cell(&book.author, 20),
                    text_cell(&book.isbn, 14),
                    text_cell(&book.copies_label(), 7),
                    colored_cell(&book.status().to_string(), 9, status_color),
                    text_cell(&book.genre, 12),
                ]
            })
            .collect();

        let title = format!("Books ({} of {})", books.len(), store.list_books().len());
        let table = build_table(&title, &columns, rows);
        frame.render_stateful_widget(table, chunks[1], &mut self.table_state);
        Ok(())
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = if self.query.term.is_empty() && !self.search_mode {
            vec![Span::styled(
                SEARCH_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            )]
        } else {
            let cursor = if self.search_mode { "_" } else { "" };
            vec![Span::styled(
                format!("{}{}", self.query.term, cursor),
                Style::default().fg(Color::White),
            )]
        };

        if self.query.is_filtered() {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                format!("status:{} genre:{}", self.query.status, self.query.genre),
                Style::default().fg(Color::Magenta),
            ));
        }

        let border = if self.search_mode {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        let search = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Search ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(search, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn store() -> CatalogStore {
        CatalogStore::sample().unwrap()
    }

    #[test]
    fn test_search_narrows_and_resets_selection() {
        let store = store();
        let mut books = BooksComponent::new();
        books.step(20, Step::Last);
        for c in "orwell".chars() {
            books.update(Action::SearchInput(c)).unwrap();
        }
        assert_eq!(books.table_state.selected(), Some(0));
        let visible = books.visible(&store);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|b| b.author.to_lowercase().contains("orwell")));
    }

    #[test]
    fn test_filter_then_clear() {
        let store = store();
        let mut books = BooksComponent::new();
        books
            .update(Action::SetBookFilter(StatusFilter::Available, GenreFilter::All))
            .unwrap();
        assert_eq!(books.visible(&store).len(), 12);
        books.update(Action::ClearBookFilters).unwrap();
        assert_eq!(books.visible(&store).len(), 20);
    }

    #[test]
    fn test_selected_book_follows_table() {
        let store = store();
        let mut books = BooksComponent::new();
        books.step(20, Step::Next);
        assert_eq!(books.selected_book(&store).map(|b| b.id), Some(2));
    }

    #[test]
    fn test_draw_shows_placeholder_and_rows() {
        let store = store();
        let mut books = BooksComponent::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                books.draw_with_store(frame, frame.area(), &store).unwrap();
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains(SEARCH_PLACEHOLDER));
        assert!(text.contains("The Great Gatsby"));
        assert!(text.contains("Books (20 of 20)"));
    }

    #[test]
    fn test_keys_map_to_actions() {
        let mut books = BooksComponent::new();
        let mut key = |c| books.handle_key_event(KeyEvent::from(KeyCode::Char(c))).unwrap();
        assert_eq!(key('/'), Some(Action::EnterSearchMode));
        assert_eq!(key('b'), Some(Action::BorrowBook));
        assert_eq!(key('d'), Some(Action::RequestDeleteBook));
    }
}
