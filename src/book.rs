use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{BookId, MemberId};

/// Circulation status of a single book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BookStatus {
    /// Book is on the shelf and can be issued
    #[default]
    Available,
    /// Book is checked out by a member
    Borrowed(MemberId),
}

impl BookStatus {
    /// Get a human-readable description of the status
    #[must_use]
    pub fn get_description(self) -> String {
        match self {
            Self::Available => "Available".to_string(),
            Self::Borrowed(member) => format!("Borrowed by member {member}"),
        }
    }
}

/// A book held by the library
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Catalog identifier
    pub id: BookId,
    /// Title as entered
    pub title: String,
    /// Author as entered
    pub author: String,
    /// Free-text ISBN, never validated
    pub isbn: String,
    /// Whether the book is on the shelf, and who has it otherwise
    pub status: BookStatus,
}

impl Book {
    /// Create an available book
    #[must_use]
    pub fn new(id: BookId, title: &str, author: &str, isbn: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            status: BookStatus::Available,
        }
    }

    /// Whether the book can be issued
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Member currently holding the book, if any
    #[must_use]
    pub fn borrower(&self) -> Option<MemberId> {
        match self.status {
            BookStatus::Available => None,
            BookStatus::Borrowed(member) => Some(member),
        }
    }

    /// Case-insensitive substring match against title or author.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} by {} ({})", self.id, self.title, self.author, self.status.get_description())
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookStatus};
    use crate::ids::{BookId, MemberId};

    #[test]
    fn new_book_is_available_without_borrower() {
        let book = Book::new(BookId(1001), "Dune", "Frank Herbert", "978-0441013593");
        assert!(book.is_available());
        assert_eq!(book.borrower(), None);
    }

    #[test]
    fn borrowed_status_names_the_borrower() {
        let mut book = Book::new(BookId(1001), "Dune", "Frank Herbert", "");
        book.status = BookStatus::Borrowed(MemberId(4));
        assert!(!book.is_available());
        assert_eq!(book.borrower(), Some(MemberId(4)));
        assert_eq!(book.status.get_description(), "Borrowed by member 4");
    }

    #[test]
    fn matching_ignores_case_on_both_fields() {
        let book = Book::new(BookId(1001), "The Great Gatsby", "F. Scott Fitzgerald", "");
        assert!(book.matches("great"));
        assert!(book.matches("fitz"));
        assert!(!book.matches("xyz"));
    }
}
