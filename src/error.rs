//! Error types for the circulation core and the console application.

use thiserror::Error;

use crate::{
    ids::{BookId, MemberId},
    money::Money,
};

/// An id that did not resolve to anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Missing {
    #[error("book {0} not found")]
    Book(BookId),
    #[error("member {0} not found")]
    Member(MemberId),
}

/// A business rule that refused the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("book {book} is currently borrowed by member {borrower}")]
    BookUnavailable { book: BookId, borrower: MemberId },
    #[error("member {member} has reached the borrowing limit of {limit} books")]
    BorrowLimitReached { member: MemberId, limit: usize },
    #[error("member {member} has a pending fine of {amount}")]
    OutstandingFine { member: MemberId, amount: Money },
    #[error("book {book} was not borrowed by member {member}")]
    NotBorrowedByThisMember { member: MemberId, book: BookId },
    #[error("member {member} has no pending fine")]
    NoFineDue { member: MemberId },
}

/// An id counter that has run past the end of its range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Exhausted {
    #[error("no book ids left to assign")]
    BookIds,
    #[error("no member ids left to assign")]
    MemberIds,
}

/// Why a circulation request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CirculationError {
    #[error(transparent)]
    NotFound(#[from] Missing),
    #[error(transparent)]
    PreconditionFailed(#[from] Precondition),
    #[error(transparent)]
    IdsExhausted(#[from] Exhausted),
    /// Book is marked as borrowed by the member but the ledger has no open loan
    #[error("no open lending record for member {member} and book {book}")]
    ConsistencyViolation { member: MemberId, book: BookId },
}

/// Failures of the console application around the core
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
