//! Interactive menu loop over a [`CirculationService`].
//!
//! The console owns all user interaction: it parses ids, renders results and
//! failures, and asks for confirmation before a fine is cleared. It is
//! generic over its input and output so sessions can be replayed in tests.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::{
    book::Book,
    cli::OutputFormat,
    error::AppError,
    ids::{BookId, MemberId},
    report::Report,
    service::CirculationService,
};

/// Whether the menu loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Show the menu again
    Continue,
    /// Leave the loop
    Exit,
}

/// Outcome of prompting for a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply<T> {
    /// The user gave a usable value
    Value(T),
    /// The user gave something unusable; already reported
    Rejected,
    /// Input ended
    Closed,
}

/// Menu-driven front-end reading from `R` and writing to `W`
#[derive(Debug)]
pub struct Console<R, W> {
    /// The library being operated
    library: CirculationService,
    /// Line-oriented user input
    input: R,
    /// Menu and result output
    output: W,
    /// Rendering of listings
    format: OutputFormat,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over a library
    pub fn new(library: CirculationService, input: R, output: W, format: OutputFormat) -> Self {
        Self { library, input, output, format }
    }

    /// The library being operated
    #[must_use]
    pub fn library(&self) -> &CirculationService {
        &self.library
    }

    /// Give back the output sink, e.g. to inspect a replayed session
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if reading input or writing output fails.
    pub fn run(&mut self) -> Result<(), AppError> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line("Enter your choice: ")? else {
                break;
            };
            let flow = match choice.trim() {
                "1" => self.add_book()?,
                "2" => self.add_member()?,
                "3" => self.issue_book()?,
                "4" => self.return_book()?,
                "5" => self.search_books()?,
                "6" => self.list_books()?,
                "7" => self.list_members()?,
                "8" => self.pay_fine()?,
                "9" => self.lending_history()?,
                "0" => Flow::Exit,
                _ => {
                    self.failure("Invalid choice! Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }
        writeln!(self.output, "\nThank you for using Library Management System!")?;
        Ok(())
    }

    /// Print the main menu
    fn print_menu(&mut self) -> io::Result<()> {
        let rule = "========================================";
        writeln!(self.output, "\n{rule}")?;
        writeln!(self.output, "{}", "   LIBRARY MANAGEMENT SYSTEM".green().bold())?;
        writeln!(self.output, "{rule}")?;
        for line in [
            "1.  Add Book",
            "2.  Add Member",
            "3.  Issue Book",
            "4.  Return Book",
            "5.  Search Books",
            "6.  Display All Books",
            "7.  Display All Members",
            "8.  Pay Fine",
            "9.  Lending History",
            "0.  Exit",
        ] {
            writeln!(self.output, "{line}")?;
        }
        writeln!(self.output, "{rule}")
    }

    /// Prompt for one line; `None` once input is exhausted
    fn read_line(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt for a numeric id, reporting bad input
    fn read_id(&mut self, label: &str, what: &str) -> io::Result<Reply<u32>> {
        let Some(raw) = self.read_line(label)? else {
            return Ok(Reply::Closed);
        };
        if let Ok(id) = raw.trim().parse::<u32>() {
            return Ok(Reply::Value(id));
        }
        self.failure(&format!("Invalid {what} ID: '{}'", raw.trim()))?;
        Ok(Reply::Rejected)
    }

    /// Prompt for a member id then a book id
    fn read_pair(&mut self) -> io::Result<Reply<(MemberId, BookId)>> {
        let member = match self.read_id("\nEnter Member ID: ", "member")? {
            Reply::Value(id) => MemberId(id),
            Reply::Rejected => return Ok(Reply::Rejected),
            Reply::Closed => return Ok(Reply::Closed),
        };
        Ok(match self.read_id("Enter Book ID: ", "book")? {
            Reply::Value(id) => Reply::Value((member, BookId(id))),
            Reply::Rejected => Reply::Rejected,
            Reply::Closed => Reply::Closed,
        })
    }

    /// Print a success line
    fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "\n{} {}", "✓".green().bold(), message.green())
    }

    /// Print a failure line
    fn failure(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "\n{} {}", "✗".red().bold(), message.red())
    }

    /// Write books in the selected format
    fn write_books(output: &mut W, format: OutputFormat, books: &[&Book]) -> Result<(), AppError> {
        match format {
            OutputFormat::Json => {
                let json = Report::to_json(books).map_err(io::Error::from)?;
                writeln!(output, "{json}")?;
            }
            OutputFormat::Text => {
                for book in books {
                    writeln!(output, "\n{}", Report::book_details(book))?;
                }
            }
        }
        Ok(())
    }

    /// Menu 1
    fn add_book(&mut self) -> Result<Flow, AppError> {
        let Some(title) = self.read_line("\nEnter Book Title: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.read_line("Enter Author: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(isbn) = self.read_line("Enter ISBN: ")? else {
            return Ok(Flow::Exit);
        };
        match self.library.add_book(&title, &author, &isbn) {
            Ok(id) => self.success(&format!("Book added successfully! Book ID: {id}"))?,
            Err(e) => self.failure(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    /// Menu 2
    fn add_member(&mut self) -> Result<Flow, AppError> {
        let Some(name) = self.read_line("\nEnter Member Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(contact) = self.read_line("Enter Contact: ")? else {
            return Ok(Flow::Exit);
        };
        match self.library.add_member(&name, &contact) {
            Ok(id) => self.success(&format!("Member registered successfully! Member ID: {id}"))?,
            Err(e) => self.failure(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    /// Menu 3
    fn issue_book(&mut self) -> Result<Flow, AppError> {
        let (member, book) = match self.read_pair()? {
            Reply::Value(pair) => pair,
            Reply::Rejected => return Ok(Flow::Continue),
            Reply::Closed => return Ok(Flow::Exit),
        };
        match self.library.issue_book(member, book) {
            Ok(receipt) => {
                self.success("Book issued successfully!")?;
                writeln!(self.output, "Member: {}", receipt.member_name)?;
                writeln!(self.output, "Book: {}", receipt.title)?;
                writeln!(
                    self.output,
                    "Return by {} to avoid a fine.",
                    receipt.due_at.format("%Y-%m-%d")
                )?;
            }
            Err(e) => self.failure(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    /// Menu 4
    fn return_book(&mut self) -> Result<Flow, AppError> {
        let (member, book) = match self.read_pair()? {
            Reply::Value(pair) => pair,
            Reply::Rejected => return Ok(Flow::Continue),
            Reply::Closed => return Ok(Flow::Exit),
        };
        match self.library.return_book(member, book) {
            Ok(receipt) => {
                self.success("Book returned successfully!")?;
                if receipt.overdue_days > 0 {
                    let line = format!(
                        "Overdue by {} days. Fine: {}",
                        receipt.overdue_days, receipt.fine_charged
                    );
                    writeln!(self.output, "{}", line.yellow())?;
                }
            }
            Err(e) => self.failure(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    /// Menu 5
    fn search_books(&mut self) -> Result<Flow, AppError> {
        let Some(query) = self.read_line("\nEnter search query (title/author): ")? else {
            return Ok(Flow::Exit);
        };
        let hits = self.library.search_books(&query);
        writeln!(self.output, "\n{}", "--- Search Results ---".yellow().bold())?;
        if hits.is_empty() {
            writeln!(self.output, "No books found matching: {query}")?;
        } else {
            Self::write_books(&mut self.output, self.format, &hits)?;
        }
        Ok(Flow::Continue)
    }

    /// Menu 6
    fn list_books(&mut self) -> Result<Flow, AppError> {
        let books = self.library.list_books();
        if books.is_empty() {
            writeln!(self.output, "\nNo books in library.")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "\n{}", "========== ALL BOOKS ==========".yellow().bold())?;
        Self::write_books(&mut self.output, self.format, &books)?;
        Ok(Flow::Continue)
    }

    /// Menu 7
    fn list_members(&mut self) -> Result<Flow, AppError> {
        let members = self.library.list_members();
        if members.is_empty() {
            writeln!(self.output, "\nNo members registered.")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "\n{}", "========== ALL MEMBERS ==========".yellow().bold())?;
        match self.format {
            OutputFormat::Json => {
                let json = Report::to_json(&members).map_err(io::Error::from)?;
                writeln!(self.output, "{json}")?;
            }
            OutputFormat::Text => {
                for member in members {
                    writeln!(self.output, "\n{}", Report::member_details(member))?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Menu 8: quote, confirm, then clear
    fn pay_fine(&mut self) -> Result<Flow, AppError> {
        let member = match self.read_id("\nEnter Member ID: ", "member")? {
            Reply::Value(id) => MemberId(id),
            Reply::Rejected => return Ok(Flow::Continue),
            Reply::Closed => return Ok(Flow::Exit),
        };
        let fine = match self.library.pay_fine(member) {
            Ok(fine) => fine,
            Err(e) => {
                self.failure(&e.to_string())?;
                return Ok(Flow::Continue);
            }
        };
        writeln!(self.output, "\nFine Amount: {fine}")?;
        let Some(answer) = self.read_line("Do you want to pay? (y/n): ")? else {
            return Ok(Flow::Exit);
        };
        if answer.trim().eq_ignore_ascii_case("y") {
            match self.library.clear_fine(member) {
                Ok(paid) => self.success(&format!("Fine of {paid} paid successfully!"))?,
                Err(e) => self.failure(&e.to_string())?,
            }
        } else {
            writeln!(self.output, "Payment cancelled.")?;
        }
        Ok(Flow::Continue)
    }

    /// Menu 9
    fn lending_history(&mut self) -> Result<Flow, AppError> {
        writeln!(self.output, "\n{}", "========== LENDING HISTORY ==========".yellow().bold())?;
        match self.format {
            OutputFormat::Json => {
                let json = Report::to_json(self.library.ledger().records()).map_err(io::Error::from)?;
                writeln!(self.output, "{json}")?;
            }
            OutputFormat::Text => {
                writeln!(self.output, "{}", Report::history_table(self.library.ledger()))?;
            }
        }
        Ok(Flow::Continue)
    }
}
