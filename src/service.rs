use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    book::{Book, BookStatus},
    catalog::Catalog,
    clock::{Clock, SystemClock},
    config::LibraryConfig,
    directory::Directory,
    error::{CirculationError, Missing, Precondition},
    events::CirculationEvent,
    ids::{BookId, MemberId, RecordId},
    ledger::LendingLedger,
    member::Member,
    money::Money,
    observers::CirculationObserver,
};

/// Details of a successful issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueReceipt {
    /// Ledger entry opened for the loan
    pub record: RecordId,
    /// Borrower
    pub member: MemberId,
    /// Borrower's name
    pub member_name: String,
    /// Issued book
    pub book: BookId,
    /// Issued book's title
    pub title: String,
    /// When the loan started
    pub issued_at: DateTime<Utc>,
    /// Last day before fines accrue
    pub due_at: DateTime<Utc>,
}

/// Details of a successful return
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnReceipt {
    /// Member who returned the book
    pub member: MemberId,
    /// Returned book
    pub book: BookId,
    /// Returned book's title
    pub title: String,
    /// Whole days past the grace period
    pub overdue_days: u64,
    /// Fine added to the member for this return
    pub fine_charged: Money,
}

/// Issue, return, search and fine handling over the catalog, the member
/// directory and the lending ledger.
///
/// Each request is validated completely before any store is touched, so a
/// refused request leaves every store unchanged.
pub struct CirculationService {
    /// Books
    catalog: Catalog,
    /// Members
    directory: Directory,
    /// Loan history
    ledger: LendingLedger,
    /// Fine charged per overdue day
    fine_per_day: Money,
    /// Registered event observers
    observers: Vec<Box<dyn CirculationObserver>>,
}

impl fmt::Debug for CirculationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CirculationService")
            .field("catalog", &self.catalog)
            .field("directory", &self.directory)
            .field("ledger", &self.ledger)
            .field("fine_per_day", &self.fine_per_day)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for CirculationService {
    fn default() -> Self {
        Self::new(&LibraryConfig::default(), Box::new(SystemClock))
    }
}

impl CirculationService {
    /// Create an empty library using the given settings and time source
    #[must_use]
    pub fn new(config: &LibraryConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            catalog: Catalog::new(config.first_book_id()),
            directory: Directory::new(config.first_member_id(), config.max_books),
            ledger: LendingLedger::new(config.grace_period_days, clock),
            fine_per_day: config.fine_per_day(),
            observers: Vec::new(),
        }
    }

    /// Register an observer to be notified of circulation changes
    pub fn register_observer(&mut self, observer: Box<dyn CirculationObserver>) {
        self.observers.push(observer);
    }

    /// Notify observers in registration order
    fn emit(&self, event: &CirculationEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Add a book to the catalog
    ///
    /// # Errors
    ///
    /// Returns `IdsExhausted` when no book id is left to assign.
    pub fn add_book(&mut self, title: &str, author: &str, isbn: &str) -> Result<BookId, CirculationError> {
        let id = self.catalog.add_book(title, author, isbn).inspect_err(|e| warn!(title, "{e}"))?;
        info!(book = %id, title, "book added");
        Ok(id)
    }

    /// Register a member with the configured borrowing limit
    ///
    /// # Errors
    ///
    /// Returns `IdsExhausted` when no member id is left to assign.
    pub fn add_member(&mut self, name: &str, contact: &str) -> Result<MemberId, CirculationError> {
        let id = self.directory.add_member(name, contact).inspect_err(|e| warn!(name, "{e}"))?;
        info!(member = %id, name, "member added");
        Ok(id)
    }

    /// Look up a book
    #[must_use]
    pub fn find_book(&self, id: BookId) -> Option<&Book> {
        self.catalog.find(id)
    }

    /// Look up a member
    #[must_use]
    pub fn find_member(&self, id: MemberId) -> Option<&Member> {
        self.directory.find(id)
    }

    /// All books in ascending id order
    #[must_use]
    pub fn list_books(&self) -> Vec<&Book> {
        self.catalog.books().collect()
    }

    /// All members in ascending id order
    #[must_use]
    pub fn list_members(&self) -> Vec<&Member> {
        self.directory.members().collect()
    }

    /// The lending history
    #[must_use]
    pub fn ledger(&self) -> &LendingLedger {
        &self.ledger
    }

    /// Books whose title or author contains `query`, ignoring case
    #[must_use]
    pub fn search_books(&self, query: &str) -> Vec<&Book> {
        self.catalog.search_by_title_or_author(query)
    }

    /// Lend a book to a member.
    ///
    /// Rules are checked in a fixed order and the first failure wins: member
    /// exists, book exists, book is available, member is under the limit,
    /// member owes nothing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown member or book, and
    /// `PreconditionFailed` with `BookUnavailable`, `BorrowLimitReached` or
    /// `OutstandingFine` when a rule refuses the loan.
    pub fn issue_book(
        &mut self,
        member_id: MemberId,
        book_id: BookId,
    ) -> Result<IssueReceipt, CirculationError> {
        let member = self.directory.find(member_id).ok_or(Missing::Member(member_id))?;
        let book = self.catalog.find(book_id).ok_or(Missing::Book(book_id))?;

        if let Some(borrower) = book.borrower() {
            warn!(member = %member_id, book = %book_id, borrower = %borrower, "issue refused: book unavailable");
            return Err(Precondition::BookUnavailable { book: book_id, borrower }.into());
        }
        if !member.can_borrow() {
            warn!(member = %member_id, book = %book_id, "issue refused: borrow limit reached");
            return Err(
                Precondition::BorrowLimitReached { member: member_id, limit: member.max_books }
                    .into(),
            );
        }
        if !member.fine().is_zero() {
            warn!(member = %member_id, fine = %member.fine(), "issue refused: outstanding fine");
            return Err(
                Precondition::OutstandingFine { member: member_id, amount: member.fine() }.into()
            );
        }

        let member_name = member.name().to_string();
        let title = book.title.clone();

        self.catalog.set_availability(book_id, BookStatus::Borrowed(member_id));
        if !self.directory.record_borrow(member_id, book_id) {
            warn!(member = %member_id, book = %book_id, "member already listed the book as borrowed");
        }
        let record = self.ledger.open_record(member_id, book_id);

        let issued_at = self.ledger.record(record).map_or_else(|| self.ledger.now(), |r| r.issued_at);
        let due_at = self.ledger.due_date(issued_at);

        self.emit(&CirculationEvent::BookIssued { record, member: member_id, book: book_id });

        Ok(IssueReceipt {
            record,
            member: member_id,
            member_name,
            book: book_id,
            title,
            issued_at,
            due_at,
        })
    }

    /// Take a book back from a member and charge any overdue fine.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown member or book,
    /// `PreconditionFailed(NotBorrowedByThisMember)` when the book is not out
    /// with this member, and `ConsistencyViolation` when the catalog says it
    /// is but the ledger has no open loan. No state changes on any error.
    pub fn return_book(
        &mut self,
        member_id: MemberId,
        book_id: BookId,
    ) -> Result<ReturnReceipt, CirculationError> {
        if self.directory.find(member_id).is_none() {
            return Err(Missing::Member(member_id).into());
        }
        let book = self.catalog.find(book_id).ok_or(Missing::Book(book_id))?;

        if book.borrower() != Some(member_id) {
            warn!(member = %member_id, book = %book_id, "return refused: not borrowed by this member");
            return Err(
                Precondition::NotBorrowedByThisMember { member: member_id, book: book_id }.into()
            );
        }
        let title = book.title.clone();

        let Some(overdue_days) = self.ledger.close_record(member_id, book_id) else {
            warn!(member = %member_id, book = %book_id, "no open lending record for borrowed book");
            return Err(CirculationError::ConsistencyViolation { member: member_id, book: book_id });
        };

        self.catalog.set_availability(book_id, BookStatus::Available);
        if !self.directory.record_return(member_id, book_id) {
            warn!(member = %member_id, book = %book_id, "member did not list the returned book");
        }

        let fine_charged = self.fine_per_day.times(overdue_days);
        self.emit(&CirculationEvent::BookReturned { member: member_id, book: book_id, overdue_days });
        if overdue_days > 0 {
            self.directory.add_fine(member_id, fine_charged);
            self.emit(&CirculationEvent::FineCharged { member: member_id, amount: fine_charged });
        }

        Ok(ReturnReceipt { member: member_id, book: book_id, title, overdue_days, fine_charged })
    }

    /// Quote a member's outstanding fine without changing it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown member and
    /// `PreconditionFailed(NoFineDue)` when nothing is owed.
    pub fn pay_fine(&self, member_id: MemberId) -> Result<Money, CirculationError> {
        let fine = self.directory.fine_of(member_id).ok_or(Missing::Member(member_id))?;
        if fine.is_zero() {
            return Err(Precondition::NoFineDue { member: member_id }.into());
        }
        Ok(fine)
    }

    /// Settle a member's fine, returning the amount cleared.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown member.
    pub fn clear_fine(&mut self, member_id: MemberId) -> Result<Money, CirculationError> {
        let cleared = self.directory.clear_fine(member_id).ok_or(Missing::Member(member_id))?;
        if !cleared.is_zero() {
            self.emit(&CirculationEvent::FineCleared { member: member_id, amount: cleared });
        }
        Ok(cleared)
    }
}
