//! In-memory library catalog and circulation tracker.
//!
//! Books live in a [`Catalog`], members in a [`Directory`], and every loan in
//! an append-only [`LendingLedger`]. The [`CirculationService`] ties the three
//! together and enforces the lending rules: one borrower per book, a per-member
//! borrowing limit, no new loans while a fine is outstanding, and a daily fine
//! for books kept past the grace period.

pub mod book;
pub mod catalog;
pub mod cli;
pub mod clock;
pub mod config;
pub mod console;
pub mod directory;
pub mod error;
pub mod events;
pub mod ids;
pub mod ledger;
pub mod logger;
pub mod member;
pub mod money;
pub mod observers;
pub mod report;
pub mod service;

pub use book::{Book, BookStatus};
pub use catalog::Catalog;
pub use config::LibraryConfig;
pub use directory::Directory;
pub use error::{AppError, CirculationError, Exhausted, Missing, Precondition};
pub use ids::{BookId, MemberId, RecordId};
pub use ledger::{LendingLedger, LendingRecord};
pub use member::{Member, Person};
pub use money::Money;
pub use service::{CirculationService, IssueReceipt, ReturnReceipt};
