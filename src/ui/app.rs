use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
    Wrap,
};
use ratatui::Frame;
use tracing::{error, warn};

use crate::db::Library;
use crate::error::LibraryError;
use crate::models::Book;

use super::forms::{BookField, BookForm, ConfirmBookDelete, DeleteSelector, MISSING_REQUIRED};
use super::helpers::{centered_rect, read_label, surface_error, year_label};
use super::screens::BookTableScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Header space for the title and the statistics line.
const HEADER_HEIGHT: u16 = 4;
/// Rows skipped by PageUp/PageDown.
const PAGE_STEP: isize = 10;
const DUPLICATE_WARNING: &str = "This book already exists in the library!";

/// Fine-grained modes layered over the book table.
enum Mode {
    Normal,
    AddingBook(BookForm),
    SelectingDelete(DeleteSelector),
    ConfirmDelete(ConfirmBookDelete),
    Searching(SearchState),
}

/// State for an active inline search.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    library: Library,
    table: BookTableScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(library: Library, books: Vec<Book>) -> Self {
        Self {
            library,
            table: BookTableScreen::new(books),
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Route a key press to the active mode. Returns `true` when the user asked
    /// to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::SelectingDelete(selector) => self.handle_select_delete(code, selector)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                if self.table.has_filter() {
                    self.table.set_filter(None);
                    self.set_status("Search cleared.", StatusKind::Info);
                } else {
                    *exit = true;
                }
            }
            KeyCode::Up => self.table.move_selection(-1),
            KeyCode::Down => self.table.move_selection(1),
            KeyCode::PageUp => self.table.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.table.move_selection(PAGE_STEP),
            KeyCode::Home => self.table.select_first(),
            KeyCode::End => self.table.select_last(),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingBook(BookForm::default()));
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('-') | KeyCode::Delete => {
                if self.table.books.is_empty() {
                    self.set_status("No books to delete.", StatusKind::Warning);
                } else {
                    self.clear_status();
                    let focus = self.table.current_book().map(|book| book.title.clone());
                    return Ok(Mode::SelectingDelete(DeleteSelector::new(
                        &self.table.books,
                        focus.as_deref(),
                    )));
                }
            }
            KeyCode::Char('/') | KeyCode::Char('f') | KeyCode::Char('F') => {
                self.clear_status();
                let query = self.table.filter.clone().unwrap_or_default();
                return Ok(Mode::Searching(SearchState { query }));
            }
            KeyCode::Char('r') | KeyCode::Char('R') => match self.reload_books(None) {
                Ok(()) => self.set_status("Library reloaded.", StatusKind::Info),
                Err(err) => self.report_failure(&err),
            },
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => keep_open = !self.save_new_book(&mut form),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_select_delete(&mut self, code: KeyCode, mut selector: DeleteSelector) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Up => {
                selector.move_selection(-1);
                Ok(Mode::SelectingDelete(selector))
            }
            KeyCode::Down => {
                selector.move_selection(1);
                Ok(Mode::SelectingDelete(selector))
            }
            KeyCode::PageUp => {
                selector.move_selection(-PAGE_STEP);
                Ok(Mode::SelectingDelete(selector))
            }
            KeyCode::PageDown => {
                selector.move_selection(PAGE_STEP);
                Ok(Mode::SelectingDelete(selector))
            }
            KeyCode::Enter => match selector.current_title() {
                Some(title) => Ok(Mode::ConfirmDelete(ConfirmBookDelete {
                    title: title.to_string(),
                })),
                None => Ok(Mode::Normal),
            },
            _ => Ok(Mode::SelectingDelete(selector)),
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmBookDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.perform_delete(&confirm) {
                    Ok(()) => Ok(Mode::Normal),
                    Err(err) => {
                        self.report_failure(&err);
                        Ok(Mode::ConfirmDelete(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.table.set_filter(None);
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => return Ok(Mode::Normal),
            KeyCode::Up => {
                self.table.move_selection(-1);
                return Ok(Mode::Searching(state));
            }
            KeyCode::Down => {
                self.table.move_selection(1);
                return Ok(Mode::Searching(state));
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => state.query.push(ch),
            _ => return Ok(Mode::Searching(state)),
        }

        self.table.set_filter(Some(state.query.clone()));
        Ok(Mode::Searching(state))
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_book_table(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::SelectingDelete(selector) => self.draw_delete_selector(frame, area, selector),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_book_table(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(1)])
            .split(area);

        let stats = self.table.stats();
        let view_line = match &self.table.filter {
            Some(query) => format!(
                "Showing {} of {} books matching \"{}\"",
                self.table.filtered_books.len(),
                stats.total,
                query
            ),
            None => format!("Showing all {} books", stats.total),
        };
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                stats.summary(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(view_line, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Books Library Manager"),
        );
        frame.render_widget(header, chunks[0]);

        if self.table.filtered_books.is_empty() {
            let text = if self.table.books.is_empty() {
                "No books yet. Press 'a' to add one."
            } else {
                "No books match the current search."
            };
            let message = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Book List"));
            frame.render_widget(message, chunks[1]);
            return;
        }

        let header_row = Row::new(["Title", "Author", "Genre", "Year", "Read"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows = self.table.filtered_books.iter().map(|book| {
            Row::new(vec![
                Cell::from(book.title.clone()),
                Cell::from(book.author.clone()),
                Cell::from(book.genre.clone()),
                Cell::from(year_label(book.year)),
                Cell::from(read_label(book.read_status)),
            ])
        });
        let widths = [
            Constraint::Percentage(34),
            Constraint::Percentage(26),
            Constraint::Percentage(20),
            Constraint::Length(6),
            Constraint::Length(5),
        ];

        let table = Table::new(rows, widths)
            .header(header_row)
            .block(Block::default().borders(Borders::ALL).title("Book List"))
            .row_highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut state = TableState::default().with_selected(Some(self.table.selected));
        frame.render_stateful_widget(table, chunks[1], &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Search Books");
        let paragraph = Paragraph::new(Span::raw(format!("Title or author: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x =
            inner.x + "Title or author: ".len() as u16 + state.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match &self.mode {
            Mode::AddingBook(_) => &[
                ("[Tab]", " Next Field   "),
                ("[Space]", " Toggle Read   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::SelectingDelete(_) => &[
                ("[↑↓]", " Choose Title   "),
                ("[Enter]", " Delete…   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::ConfirmDelete(_) => &[("[y/Enter]", " Confirm   "), ("[n/Esc]", " Cancel")],
            Mode::Searching(_) => &[
                ("[type]", " Filter   "),
                ("[↑↓]", " Select   "),
                ("[Enter]", " Keep Filter   "),
                ("[Esc]", " Clear"),
            ],
            Mode::Normal => &[
                ("[↑↓]", " Select   "),
                ("[a]", " Add   "),
                ("[d]", " Delete   "),
                ("[/]", " Search   "),
                ("[r]", " Reload   "),
                ("[q]", " Quit"),
            ],
        };

        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(label.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add a New Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let fields = [
            ("Title", BookField::Title),
            ("Author", BookField::Author),
            ("Genre", BookField::Genre),
            ("Year", BookField::Year),
            ("Read", BookField::Read),
        ];
        let mut lines: Vec<Line> = fields
            .iter()
            .map(|(name, field)| form.build_line(name, *field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Space toggles Read • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = fields
            .iter()
            .find(|(_, field)| *field == form.active)
            .map(|(name, _)| name.len() as u16 + 2)
            .unwrap_or(0);
        let cursor_x = inner.x + prefix + form.value_len(form.active) as u16;
        let cursor_y = inner.y + form.active.row();
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_delete_selector(&self, frame: &mut Frame, area: Rect, selector: &DeleteSelector) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Select a book to delete")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let items: Vec<ListItem> = selector
            .titles
            .iter()
            .map(|title| ListItem::new(title.clone()))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::NONE))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(selector.selected));
        frame.render_stateful_widget(list, inner, &mut list_state);
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmBookDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Delete Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete '{}'?", confirm.title)),
            Line::from(""),
            Line::from(Span::styled(
                "y/Enter to delete • n/Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn report_failure(&mut self, err: &anyhow::Error) {
        error!(error = %format!("{err:#}"), "library action failed");
        self.set_status(surface_error(err), StatusKind::Error);
    }

    /// Validate the form and try to persist it. Returns `true` when the book
    /// was stored and the form can close.
    fn save_new_book(&mut self, form: &mut BookForm) -> bool {
        let book = match form.parse_inputs() {
            Ok(book) => book,
            Err(err) => {
                let message = surface_error(&err);
                form.error = Some(message.clone());
                self.set_status(message, StatusKind::Warning);
                return false;
            }
        };

        match self.library.add(book) {
            Ok(stored) => {
                if let Err(err) = self.reload_books(Some(stored.id)) {
                    self.report_failure(&err);
                } else {
                    self.set_status(
                        format!("'{}' added successfully!", stored.title),
                        StatusKind::Info,
                    );
                }
                true
            }
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "add book rejected");
                let message = match err {
                    LibraryError::DuplicateTitle { .. } => DUPLICATE_WARNING.to_string(),
                    LibraryError::Validation(_) => MISSING_REQUIRED.to_string(),
                    other => other.to_string(),
                };
                form.error = Some(message.clone());
                self.set_status(message, StatusKind::Warning);
                false
            }
            Err(err) => {
                let err = anyhow::Error::new(err).context("failed to add book");
                form.error = Some(surface_error(&err));
                self.report_failure(&err);
                false
            }
        }
    }

    fn perform_delete(&mut self, confirm: &ConfirmBookDelete) -> Result<()> {
        let removed = self
            .library
            .delete_by_title(&confirm.title)
            .context("failed to delete book")?;
        self.reload_books(None)?;
        if removed == 0 {
            self.set_status(
                format!("'{}' was already gone.", confirm.title),
                StatusKind::Info,
            );
        } else {
            self.set_status(
                format!("'{}' deleted successfully!", confirm.title),
                StatusKind::Info,
            );
        }
        Ok(())
    }

    /// Re-read the whole table after a mutation so the view never drifts from
    /// what is stored.
    fn reload_books(&mut self, focus_id: Option<i64>) -> Result<()> {
        let books = self.library.list_all().context("failed to reload books")?;
        self.table.set_books(books, focus_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBook;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::TempDir;

    fn app_with(books: &[NewBook]) -> (App, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::new(dir.path().join("library.db"));
        library.initialize().unwrap();
        for book in books {
            library.add(book.clone()).unwrap();
        }
        let loaded = library.list_all().unwrap();
        (App::new(library, loaded), dir)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn fill_form(app: &mut App, title: &str, author: &str, year: &str) {
        app.handle_key(KeyCode::Char('a')).unwrap();
        type_text(app, title);
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(app, author);
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(app, "Classic");
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(app, year);
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Char(' ')).unwrap();
    }

    fn status_text(app: &App) -> Option<(&str, StatusKind)> {
        app.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.kind))
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn add_form_persists_and_reloads() {
        let (mut app, _dir) = app_with(&[]);
        fill_form(&mut app, "Emma", "Jane Austen", "1815");
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            status_text(&app),
            Some(("'Emma' added successfully!", StatusKind::Info))
        );

        let stored = app.library.list_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].genre, "Classic");
        assert!(stored[0].read_status);
        assert_eq!(app.table.books, stored);
    }

    #[test]
    fn duplicate_title_keeps_form_open_with_warning() {
        let (mut app, _dir) = app_with(&[NewBook::new("Emma", "Jane Austen").with_year(1815)]);
        fill_form(&mut app, "Emma", "Someone Else", "1900");
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(matches!(app.mode, Mode::AddingBook(_)));
        assert_eq!(
            status_text(&app),
            Some((DUPLICATE_WARNING, StatusKind::Warning))
        );
        let stored = app.library.list_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].author, "Jane Austen");
    }

    #[test]
    fn missing_author_is_a_warning() {
        let (mut app, _dir) = app_with(&[]);
        fill_form(&mut app, "Emma", "", "1815");
        app.handle_key(KeyCode::Enter).unwrap();

        assert_eq!(
            status_text(&app),
            Some((MISSING_REQUIRED, StatusKind::Warning))
        );
        assert!(app.library.list_all().unwrap().is_empty());
    }

    #[test]
    fn delete_flow_removes_selected_title() {
        let (mut app, _dir) = app_with(&[
            NewBook::new("Dune", "Frank Herbert").with_year(1965),
            NewBook::new("Emma", "Jane Austen").with_year(1815),
        ]);
        app.handle_key(KeyCode::Down).unwrap();
        app.handle_key(KeyCode::Char('d')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(&app.mode, Mode::ConfirmDelete(c) if c.title == "Emma"));

        app.handle_key(KeyCode::Char('y')).unwrap();

        let titles: Vec<_> = app.table.books.iter().map(|b| b.title.clone()).collect();
        assert_eq!(titles, vec!["Dune".to_string()]);
        assert_eq!(
            status_text(&app),
            Some(("'Emma' deleted successfully!", StatusKind::Info))
        );
    }

    #[test]
    fn delete_can_be_cancelled() {
        let (mut app, _dir) = app_with(&[NewBook::new("Dune", "Frank Herbert").with_year(1965)]);
        app.handle_key(KeyCode::Char('d')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        app.handle_key(KeyCode::Char('n')).unwrap();

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.library.list_all().unwrap().len(), 1);
    }

    #[test]
    fn delete_on_empty_library_warns() {
        let (mut app, _dir) = app_with(&[]);
        app.handle_key(KeyCode::Char('d')).unwrap();

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            status_text(&app),
            Some(("No books to delete.", StatusKind::Warning))
        );
    }

    #[test]
    fn search_filters_live_and_esc_clears() {
        let (mut app, _dir) = app_with(&[
            NewBook::new("Dune", "Frank Herbert").with_year(1965),
            NewBook::new("Emma", "Jane Austen").with_year(1815),
        ]);
        app.handle_key(KeyCode::Char('/')).unwrap();
        type_text(&mut app, "aust");
        assert_eq!(app.table.filtered_books.len(), 1);

        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.table.filtered_books.len(), 1);

        let exit = app.handle_key(KeyCode::Esc).unwrap();
        assert!(!exit);
        assert_eq!(app.table.filtered_books.len(), 2);

        assert!(app.handle_key(KeyCode::Esc).unwrap());
    }

    #[test]
    fn draw_shows_statistics_line() {
        let (app, _dir) = app_with(&[
            NewBook::new("Dune", "Frank Herbert")
                .with_year(1965)
                .with_read_status(true),
            NewBook::new("Emma", "Jane Austen").with_year(1815),
        ]);
        let screen = render(&app);
        assert!(screen.contains("Total Books: 2"));
        assert!(screen.contains("(50.00%)"));
        assert!(screen.contains("Jane Austen"));
    }

    #[test]
    fn q_quits() {
        let (mut app, _dir) = app_with(&[]);
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }
}
