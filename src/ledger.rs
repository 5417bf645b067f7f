//! Append-only history of loans.
//!
//! Each issue opens a [`LendingRecord`]; the matching return closes it and
//! reports how many days past the grace period the book was kept.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    clock::{Clock, SystemClock},
    ids::{BookId, MemberId, RecordId},
};

/// Default borrowing period before fines start
pub const DEFAULT_GRACE_PERIOD_DAYS: u32 = 14;

/// One loan of one book to one member
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LendingRecord {
    /// Ledger-wide sequential id
    pub id: RecordId,
    /// Borrower
    pub member: MemberId,
    /// Borrowed book
    pub book: BookId,
    /// When the book left the shelf
    pub issued_at: DateTime<Utc>,
    /// When the book came back, if it has
    pub returned_at: Option<DateTime<Utc>>,
}

impl LendingRecord {
    /// Whether the book has been returned
    #[must_use]
    pub fn is_returned(&self) -> bool {
        self.returned_at.is_some()
    }

    /// Whether this record is the open loan of `book` to `member`
    fn is_open_for(&self, member: MemberId, book: BookId) -> bool {
        !self.is_returned() && self.member == member && self.book == book
    }
}

/// Days past the grace period between `issued_at` and `until`.
///
/// Partial days are dropped before the grace period is subtracted, and a
/// clock that went backwards counts as zero days.
#[must_use]
pub fn overdue_days(issued_at: DateTime<Utc>, until: DateTime<Utc>, grace_days: u32) -> u64 {
    let days_kept = until.signed_duration_since(issued_at).num_days();
    let overdue = days_kept.saturating_sub(i64::from(grace_days));
    u64::try_from(overdue).unwrap_or(0)
}

/// The lending history, oldest first
#[derive(Debug)]
pub struct LendingLedger {
    /// Every record ever opened
    records: Vec<LendingRecord>,
    /// Id handed to the next record
    next_id: RecordId,
    /// Days a book may be kept before it is overdue
    grace_days: u32,
    /// Time source for issue and return stamps
    clock: Box<dyn Clock>,
}

impl Default for LendingLedger {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE_PERIOD_DAYS, Box::new(SystemClock))
    }
}

impl LendingLedger {
    /// Create an empty ledger
    #[must_use]
    pub fn new(grace_days: u32, clock: Box<dyn Clock>) -> Self {
        Self { records: Vec::new(), next_id: RecordId(1), grace_days, clock }
    }

    /// Days a book may be kept before it is overdue
    #[must_use]
    pub fn grace_days(&self) -> u32 {
        self.grace_days
    }

    /// The current time according to the ledger's clock
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// When a book issued at `issued_at` is due back
    #[must_use]
    pub fn due_date(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::try_days(i64::from(self.grace_days))
            .and_then(|grace| issued_at.checked_add_signed(grace))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Record that `book` was issued to `member` now
    pub fn open_record(&mut self, member: MemberId, book: BookId) -> RecordId {
        let id = self.next_id;
        self.next_id = id.next();
        self.records.push(LendingRecord {
            id,
            member,
            book,
            issued_at: self.clock.now(),
            returned_at: None,
        });
        debug!(record = %id, member = %member, book = %book, "lending record opened");
        id
    }

    /// Close the most recent open loan of `book` to `member`.
    ///
    /// Returns the number of overdue days, or `None` when no open record
    /// matches the pair.
    pub fn close_record(&mut self, member: MemberId, book: BookId) -> Option<u64> {
        let now = self.clock.now();
        let grace_days = self.grace_days;
        let record = self.records.iter_mut().rev().find(|r| r.is_open_for(member, book))?;
        record.returned_at = Some(now);
        debug!(record = %record.id, member = %member, book = %book, "lending record closed");
        Some(overdue_days(record.issued_at, now, grace_days))
    }

    /// Overdue days so far for a record; closed records are measured up to their return
    #[must_use]
    pub fn overdue_days(&self, record: &LendingRecord) -> u64 {
        let until = record.returned_at.unwrap_or_else(|| self.clock.now());
        overdue_days(record.issued_at, until, self.grace_days)
    }

    /// Look up a record by id
    #[must_use]
    pub fn record(&self, id: RecordId) -> Option<&LendingRecord> {
        self.records.binary_search_by_key(&id, |r| r.id).ok().and_then(|idx| self.records.get(idx))
    }

    /// Every record, oldest first
    #[must_use]
    pub fn records(&self) -> &[LendingRecord] {
        &self.records
    }

    /// Loans that have not been returned yet
    pub fn open_records(&self) -> impl Iterator<Item = &LendingRecord> {
        self.records.iter().filter(|r| !r.is_returned())
    }

    /// All loans of one book, oldest first
    pub fn history_for_book(&self, book: BookId) -> impl Iterator<Item = &LendingRecord> {
        self.records.iter().filter(move |r| r.book == book)
    }

    /// All loans to one member, oldest first
    pub fn history_for_member(&self, member: MemberId) -> impl Iterator<Item = &LendingRecord> {
        self.records.iter().filter(move |r| r.member == member)
    }

    /// Number of records ever opened
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has ever been issued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
