use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    book::{Book, BookStatus},
    error::Exhausted,
    ids::BookId,
};

/// Id given to the first book of a fresh catalog
pub const DEFAULT_FIRST_BOOK_ID: BookId = BookId(1001);

/// Every book the library holds, keyed by id
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Books in ascending id order
    books: BTreeMap<BookId, Book>,
    /// Id handed to the next book, `None` once the range is used up
    next_id: Option<BookId>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_BOOK_ID)
    }
}

impl Catalog {
    /// Create an empty catalog whose first book gets `first_id`
    #[must_use]
    pub fn new(first_id: BookId) -> Self {
        Self { books: BTreeMap::new(), next_id: Some(first_id) }
    }

    /// Register a new, available book and return its id
    ///
    /// # Errors
    ///
    /// Returns `Exhausted::BookIds` once every id up to `u32::MAX` has been
    /// handed out. The catalog is left untouched.
    pub fn add_book(&mut self, title: &str, author: &str, isbn: &str) -> Result<BookId, Exhausted> {
        let id = self.next_id.ok_or(Exhausted::BookIds)?;
        self.next_id = id.next();
        self.books.insert(id, Book::new(id, title, author, isbn));
        debug!(book = %id, title, "book catalogued");
        Ok(id)
    }

    /// Look up a book
    #[must_use]
    pub fn find(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id)
    }

    /// Books whose title or author contains `query`, ignoring case.
    ///
    /// Results come back in ascending id order. An empty query matches
    /// every book.
    #[must_use]
    pub fn search_by_title_or_author(&self, query: &str) -> Vec<&Book> {
        let needle = query.to_lowercase();
        self.books.values().filter(|book| book.matches(&needle)).collect()
    }

    /// Overwrite the circulation status of a book.
    ///
    /// Returns `false` if no such book exists.
    pub fn set_availability(&mut self, id: BookId, status: BookStatus) -> bool {
        match self.books.get_mut(&id) {
            Some(book) => {
                book.status = status;
                true
            }
            None => false,
        }
    }

    /// All books in ascending id order
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Number of books held
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog holds no books
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
