//! Text, markdown and JSON renderings of catalog, directory and ledger state.

use serde::Serialize;

use crate::{
    book::{Book, BookStatus},
    ledger::{LendingLedger, LendingRecord},
    member::Member,
};

/// Formatting helpers for the console
#[derive(Debug)]
pub struct Report;

impl Report {
    /// Format a book status for display
    fn format_status(status: BookStatus) -> String {
        match status {
            BookStatus::Available => "📚 Available".to_string(),
            BookStatus::Borrowed(member) => format!("📖 Borrowed (member {member})"),
        }
    }

    /// Multi-line details of one book
    #[must_use]
    pub fn book_details(book: &Book) -> String {
        let mut out = String::from("--- Book Details ---\n");
        out.push_str(&format!("Book ID: {}\n", book.id));
        out.push_str(&format!("Title: {}\n", book.title));
        out.push_str(&format!("Author: {}\n", book.author));
        out.push_str(&format!("ISBN: {}\n", book.isbn));
        out.push_str(&format!("Status: {}\n", Self::format_status(book.status)));
        out
    }

    /// Multi-line details of one member
    #[must_use]
    pub fn member_details(member: &Member) -> String {
        let mut out = String::from("--- Member Details ---\n");
        out.push_str(&format!("{}\n", member.person));
        out.push_str(&format!(
            "Books Borrowed: {}/{}\n",
            member.borrowed_books().len(),
            member.max_books
        ));
        out.push_str(&format!("Fine Amount: {}\n", member.fine()));
        if !member.borrowed_books().is_empty() {
            let ids: Vec<String> = member.borrowed_books().iter().map(ToString::to_string).collect();
            out.push_str(&format!("Borrowed Book IDs: {}\n", ids.join(" ")));
        }
        out
    }

    /// Format the return column of a lending record
    fn format_return(ledger: &LendingLedger, record: &LendingRecord) -> String {
        match record.returned_at {
            Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
            None => match ledger.overdue_days(record) {
                0 => "not returned".to_string(),
                days => format!("not returned, {days} days overdue"),
            },
        }
    }

    /// Generate a markdown table of the lending history
    #[must_use]
    pub fn history_table(ledger: &LendingLedger) -> String {
        if ledger.is_empty() {
            return "No lending records yet.".to_string();
        }

        let mut table = String::from("| # | Member | Book | Issued | Returned |\n");
        table.push_str("|---|--------|------|--------|----------|\n");

        for record in ledger.records() {
            table.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                record.id,
                record.member,
                record.book,
                record.issued_at.format("%Y-%m-%d %H:%M"),
                Self::format_return(ledger, record)
            ));
        }

        table
    }

    /// Pretty-printed JSON for any serializable view
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `value` cannot be represented as JSON.
    pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(value)
    }
}
