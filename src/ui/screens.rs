use crate::catalog::{filter_books, LibraryStats};
use crate::models::Book;

/// The full book list plus the filtered view the table actually renders.
pub(crate) struct BookTableScreen {
    pub(crate) books: Vec<Book>,
    pub(crate) filtered_books: Vec<Book>,
    pub(crate) filter: Option<String>,
    pub(crate) selected: usize,
}

impl BookTableScreen {
    pub(crate) fn new(books: Vec<Book>) -> Self {
        let mut screen = Self {
            filtered_books: Vec::new(),
            books,
            filter: None,
            selected: 0,
        };
        screen.apply_filter();
        screen
    }

    pub(crate) fn apply_filter(&mut self) {
        self.filtered_books = match &self.filter {
            Some(query) => filter_books(&self.books, query),
            None => self.books.clone(),
        };
        self.ensure_in_bounds();
    }

    pub(crate) fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter.filter(|query| !query.is_empty());
        self.apply_filter();
    }

    pub(crate) fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Replace the backing list after a reload, keeping the active filter and
    /// moving the selection onto `focus_id` when it is visible.
    pub(crate) fn set_books(&mut self, books: Vec<Book>, focus_id: Option<i64>) {
        self.books = books;
        self.apply_filter();
        if let Some(id) = focus_id {
            if let Some(idx) = self.filtered_books.iter().position(|book| book.id == id) {
                self.selected = idx;
            }
        }
    }

    pub(crate) fn current_book(&self) -> Option<&Book> {
        self.filtered_books.get(self.selected)
    }

    /// Statistics always cover the whole library, not just the filtered view.
    pub(crate) fn stats(&self) -> LibraryStats {
        LibraryStats::from_books(&self.books)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.filtered_books.is_empty() {
            return;
        }
        let len = self.filtered_books.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.filtered_books.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.filtered_books.is_empty() {
            self.selected = self.filtered_books.len() - 1;
        }
    }

    fn ensure_in_bounds(&mut self) {
        if self.filtered_books.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered_books.len() {
            self.selected = self.filtered_books.len() - 1;
        }
    }
}
