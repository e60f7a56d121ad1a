//! In-memory library collection and its derived views.
//!
//! The collection mirrors the most recent successful server response plus any
//! server-confirmed insertions and deletions. Filtering and statistics are
//! recomputed on every call; nothing derived is stored.

use serde::{Deserialize, Serialize};

use crate::book::{Book, BookStatus};

/// Status half of the filter control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BookStatus),
}

impl StatusFilter {
    fn matches(&self, status: BookStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(want) => *want == status,
        }
    }

    /// Display label for the filter control.
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(status) => status.label(),
        }
    }
}

/// Transient filter criteria; a derived view, never part of library state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub query: String,
}

impl FilterCriteria {
    /// Whether a book passes the status check and the case-insensitive
    /// title/author substring check.
    pub fn matches(&self, book: &Book) -> bool {
        if !self.status.matches(book.status) {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        book.title.to_lowercase().contains(&needle) || book.author.to_lowercase().contains(&needle)
    }
}

/// Counts of books per reading status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadingStats {
    pub read: usize,
    pub reading: usize,
    pub to_read: usize,
}

impl ReadingStats {
    pub fn total(&self) -> usize {
        self.read + self.reading + self.to_read
    }
}

/// Ordered collection of the user's books for the current session.
///
/// Owned exclusively by the view controller; presentation reads it through
/// shared references.
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    books: Vec<Book>,
}

impl LibraryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with a fresh server response.
    pub fn replace(&mut self, books: Vec<Book>) {
        self.books = books;
    }

    /// Insert a server-confirmed new book at the front of the collection.
    pub fn insert_front(&mut self, book: Book) {
        self.books.insert(0, book);
    }

    /// Apply a server-confirmed deletion. Returns whether a record matched.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.books.len();
        self.books.retain(|book| book.id != id);
        self.books.len() != before
    }

    /// Drop every record (session teardown).
    pub fn clear(&mut self) {
        self.books.clear();
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Lazy filtered view over the collection, in collection order.
    /// Restartable: each call walks the books afresh.
    pub fn filtered<'a>(
        &'a self,
        criteria: &'a FilterCriteria,
    ) -> impl Iterator<Item = &'a Book> + 'a {
        self.books.iter().filter(move |book| criteria.matches(book))
    }

    /// One-pass status counts for the profile dashboard.
    pub fn stats(&self) -> ReadingStats {
        self.books
            .iter()
            .fold(ReadingStats::default(), |mut stats, book| {
                match book.status {
                    BookStatus::Read => stats.read += 1,
                    BookStatus::Reading => stats.reading += 1,
                    BookStatus::ToRead => stats.to_read += 1,
                }
                stats
            })
    }
}
