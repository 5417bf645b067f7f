use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    ids::{BookId, MemberId},
    money::Money,
};

/// Identity fields shared by anyone the library knows about
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Person {
    /// Directory identifier
    pub id: MemberId,
    /// Full name as entered
    pub name: String,
    /// Free-text contact detail (phone, email, ...)
    pub contact: String,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {}, Name: {}, Contact: {}", self.id, self.name, self.contact)
    }
}

/// A registered borrower
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Member {
    /// Who the member is
    pub person: Person,
    /// Upper bound on `borrowed.len()`
    pub max_books: usize,
    /// Books currently checked out
    borrowed: BTreeSet<BookId>,
    /// Unpaid overdue fines
    fine: Money,
}

impl Member {
    /// Create a member with no loans and no fine
    #[must_use]
    pub fn new(id: MemberId, name: &str, contact: &str, max_books: usize) -> Self {
        Self {
            person: Person { id, name: name.to_string(), contact: contact.to_string() },
            max_books,
            borrowed: BTreeSet::new(),
            fine: Money::ZERO,
        }
    }

    /// Directory identifier
    #[must_use]
    pub fn id(&self) -> MemberId {
        self.person.id
    }

    /// Member name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.person.name
    }

    /// Books currently checked out, in ascending id order
    #[must_use]
    pub fn borrowed_books(&self) -> &BTreeSet<BookId> {
        &self.borrowed
    }

    /// Outstanding fine
    #[must_use]
    pub fn fine(&self) -> Money {
        self.fine
    }

    /// Whether one more book would stay within the limit
    #[must_use]
    pub fn can_borrow(&self) -> bool {
        self.borrowed.len() < self.max_books
    }

    /// Add a book to the loan set.
    ///
    /// Returns `false` when the member is at the limit or already holds the book.
    pub(crate) fn borrow_book(&mut self, book: BookId) -> bool {
        self.can_borrow() && self.borrowed.insert(book)
    }

    /// Drop a book from the loan set, returning `false` if it was not there
    pub(crate) fn return_book(&mut self, book: BookId) -> bool {
        self.borrowed.remove(&book)
    }

    /// Add to the outstanding fine
    pub(crate) fn add_fine(&mut self, amount: Money) {
        self.fine = self.fine.saturating_add(amount);
    }

    /// Reset the fine to zero, returning what was owed
    pub(crate) fn clear_fine(&mut self) -> Money {
        std::mem::take(&mut self.fine)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{} books, fine {})",
            self.person,
            self.borrowed.len(),
            self.max_books,
            self.fine
        )
    }
}
