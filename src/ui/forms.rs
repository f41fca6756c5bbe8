use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::catalog::{is_plausible_year, MAX_YEAR, MIN_YEAR};
use crate::models::{Book, NewBook};

/// Warning shown when either required field is blank.
pub(crate) const MISSING_REQUIRED: &str = "Please enter at least Title and Author!";

/// Internal representation of the "add book" form fields.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) genre: String,
    pub(crate) year: String,
    pub(crate) read: bool,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form, in focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Genre,
    Year,
    Read,
}

impl BookField {
    fn next(self) -> Self {
        match self {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Genre,
            BookField::Genre => BookField::Year,
            BookField::Year => BookField::Read,
            BookField::Read => BookField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            BookField::Title => BookField::Read,
            BookField::Author => BookField::Title,
            BookField::Genre => BookField::Author,
            BookField::Year => BookField::Genre,
            BookField::Read => BookField::Year,
        }
    }

    /// Row of the field inside the form popup.
    pub(crate) fn row(self) -> u16 {
        match self {
            BookField::Title => 0,
            BookField::Author => 1,
            BookField::Genre => 2,
            BookField::Year => 3,
            BookField::Read => 4,
        }
    }
}

impl BookForm {
    pub(crate) fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    /// Append a character to the active field, validating allowed input. On the
    /// checkbox a space or `x` flips the read flag instead.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::Title => self.title.push(ch),
            BookField::Author => self.author.push(ch),
            BookField::Genre => self.genre.push(ch),
            BookField::Year => {
                if !ch.is_ascii_digit() || self.year.len() >= 4 {
                    return false;
                }
                self.year.push(ch);
            }
            BookField::Read => {
                if ch == ' ' || ch.eq_ignore_ascii_case(&'x') {
                    self.read = !self.read;
                } else {
                    return false;
                }
            }
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.error = None;
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Genre => {
                self.genre.pop();
            }
            BookField::Year => {
                self.year.pop();
            }
            BookField::Read => {}
        }
    }

    /// Validate and normalize the inputs before they go to the database.
    pub(crate) fn parse_inputs(&self) -> Result<NewBook> {
        let title = self.title.trim();
        let author = self.author.trim();
        if title.is_empty() || author.is_empty() {
            return Err(anyhow!(MISSING_REQUIRED));
        }

        let year_raw = self.year.trim();
        if year_raw.is_empty() {
            return Err(anyhow!("Publication year is required."));
        }
        let year = year_raw
            .parse::<i64>()
            .context("Publication year must be a number.")?;
        if !is_plausible_year(year) {
            return Err(anyhow!(
                "Publication year must be between {MIN_YEAR} and {MAX_YEAR}."
            ));
        }

        Ok(NewBook::new(title, author)
            .with_genre(self.genre.trim())
            .with_year(year)
            .with_read_status(self.read))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: BookField) -> Line<'static> {
        let is_active = self.active == field;

        let (value, placeholder) = match field {
            BookField::Title => (&self.title, "<required>".to_string()),
            BookField::Author => (&self.author, "<required>".to_string()),
            BookField::Genre => (&self.genre, "<optional>".to_string()),
            BookField::Year => (&self.year, format!("<{MIN_YEAR}-{MAX_YEAR}>")),
            BookField::Read => return self.checkbox_line(field_name, is_active),
        };

        let display = if value.is_empty() {
            placeholder
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    fn checkbox_line(&self, field_name: &str, is_active: bool) -> Line<'static> {
        let checkbox = if self.read { "[x]" } else { "[ ]" };
        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(checkbox, style),
        ])
    }

    /// Character count of the requested field, used to place the cursor.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Title => self.title.chars().count(),
            BookField::Author => self.author.chars().count(),
            BookField::Genre => self.genre.chars().count(),
            BookField::Year => self.year.chars().count(),
            BookField::Read => 1,
        }
    }
}

/// Pick-a-title list shown before a delete is confirmed.
pub(crate) struct DeleteSelector {
    pub(crate) titles: Vec<String>,
    pub(crate) selected: usize,
}

impl DeleteSelector {
    /// Build the selector from the full book list, preselecting `focus` when it
    /// is present.
    pub(crate) fn new(books: &[Book], focus: Option<&str>) -> Self {
        let titles: Vec<String> = books.iter().map(|book| book.title.clone()).collect();
        let selected = focus
            .and_then(|title| titles.iter().position(|candidate| candidate == title))
            .unwrap_or(0);
        Self { titles, selected }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.titles.is_empty() {
            return;
        }
        let last = self.titles.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn current_title(&self) -> Option<&str> {
        self.titles.get(self.selected).map(String::as_str)
    }
}

/// Final yes/no step before a title is removed.
pub(crate) struct ConfirmBookDelete {
    pub(crate) title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> BookForm {
        BookForm {
            title: "  Dune ".into(),
            author: "Frank Herbert".into(),
            genre: "Science Fiction ".into(),
            year: "1965".into(),
            read: true,
            ..BookForm::default()
        }
    }

    #[test]
    fn parse_inputs_trims_and_converts() {
        let book = filled_form().parse_inputs().unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.genre, "Science Fiction");
        assert_eq!(book.year, 1965);
        assert!(book.read_status);
    }

    #[test]
    fn missing_author_is_reported() {
        let mut form = filled_form();
        form.author = "   ".into();
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), MISSING_REQUIRED);
    }

    #[test]
    fn year_out_of_range_is_reported() {
        let mut form = filled_form();
        form.year = "999".into();
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Publication year must be between 1000 and 2025."
        );
    }

    #[test]
    fn year_field_accepts_only_four_digits() {
        let mut form = BookForm {
            active: BookField::Year,
            ..BookForm::default()
        };
        assert!(!form.push_char('a'));
        for ch in "19650".chars() {
            form.push_char(ch);
        }
        assert_eq!(form.year, "1965");
    }

    #[test]
    fn focus_cycles_through_every_field() {
        let mut form = BookForm::default();
        for _ in 0..5 {
            form.focus_next();
        }
        assert_eq!(form.active, BookField::Title);
        form.focus_previous();
        assert_eq!(form.active, BookField::Read);
    }

    #[test]
    fn space_toggles_read_checkbox() {
        let mut form = BookForm {
            active: BookField::Read,
            ..BookForm::default()
        };
        assert!(form.push_char(' '));
        assert!(form.read);
        assert!(!form.push_char('q'));
        assert!(form.read);
    }

    #[test]
    fn backspace_clears_stale_error() {
        let mut form = filled_form();
        form.error = Some(MISSING_REQUIRED.to_string());
        form.backspace();
        assert!(form.error.is_none());
        assert_eq!(form.title, "  Dune");
    }

    #[test]
    fn delete_selector_preselects_focus() {
        let books = vec![
            NewBook::new("Dune", "Frank Herbert").into_book(1),
            NewBook::new("Emma", "Jane Austen").into_book(2),
        ];
        let mut selector = DeleteSelector::new(&books, Some("Emma"));
        assert_eq!(selector.current_title(), Some("Emma"));

        selector.move_selection(5);
        assert_eq!(selector.current_title(), Some("Emma"));
        selector.move_selection(-5);
        assert_eq!(selector.current_title(), Some("Dune"));
    }
}
