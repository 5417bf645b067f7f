//! Configuration loading with env-var overrides.
//!
//! Reads the TOML file passed on the command line, or `library.toml` in the
//! current working directory when present, then applies `LIBRARY_LOG_LEVEL`
//! and `LIBRARY_MAX_BOOKS` env overrides. Every key is optional.

use std::{env, fs, path::Path};

use serde::Deserialize;

use crate::{
    catalog::DEFAULT_FIRST_BOOK_ID,
    directory::{DEFAULT_FIRST_MEMBER_ID, DEFAULT_MAX_BOOKS},
    error::AppError,
    ids::{BookId, MemberId},
    ledger::DEFAULT_GRACE_PERIOD_DAYS,
    money::Money,
};

/// Config file picked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "library.toml";

/// Runtime settings for the library
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Id of the first book added
    pub first_book_id: u32,
    /// Id of the first member registered
    pub first_member_id: u32,
    /// Books a member may hold at once
    pub max_books: usize,
    /// Days a book may be kept before it is overdue
    pub grace_period_days: u32,
    /// Fine per overdue day, in cents
    pub fine_per_day_cents: u64,
    /// `tracing` filter directive for the console application
    pub log_level: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            first_book_id: DEFAULT_FIRST_BOOK_ID.0,
            first_member_id: DEFAULT_FIRST_MEMBER_ID.0,
            max_books: DEFAULT_MAX_BOOKS,
            grace_period_days: DEFAULT_GRACE_PERIOD_DAYS,
            fine_per_day_cents: 100,
            log_level: "warn".to_string(),
        }
    }
}

impl LibraryConfig {
    /// Id of the first book added
    #[must_use]
    pub fn first_book_id(&self) -> BookId {
        BookId(self.first_book_id)
    }

    /// Id of the first member registered
    #[must_use]
    pub fn first_member_id(&self) -> MemberId {
        MemberId(self.first_member_id)
    }

    /// Fine per overdue day
    #[must_use]
    pub fn fine_per_day(&self) -> Money {
        Money::from_cents(self.fine_per_day_cents)
    }

    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the document is not valid TOML, has
    /// unknown keys, or fails validation.
    pub fn from_toml(raw: &str) -> Result<Self, AppError> {
        let config: Self =
            toml::from_str(raw).map_err(|e| AppError::Config(format!("parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the library cannot operate with
    fn validate(&self) -> Result<(), AppError> {
        if self.max_books == 0 {
            return Err(AppError::Config("max_books must be at least 1".into()));
        }
        if self.log_level.trim().is_empty() {
            return Err(AppError::Config("log_level must not be empty".into()));
        }
        Ok(())
    }

    /// Apply overrides from the given values, as read from the environment
    fn apply_overrides(
        &mut self,
        log_level: Option<String>,
        max_books: Option<String>,
    ) -> Result<(), AppError> {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(raw) = max_books {
            self.max_books = raw.trim().parse().map_err(|e| {
                AppError::Config(format!("LIBRARY_MAX_BOOKS is not a number ('{raw}'): {e}"))
            })?;
        }
        self.validate()
    }
}

/// Load config from the given path, or [`DEFAULT_CONFIG_FILE`], then apply env-var overrides.
///
/// With no path and no default file the built-in defaults are used.
///
/// # Errors
///
/// Returns `AppError::Config` if the file cannot be read or parsed, or if an
/// override is invalid.
pub fn load(config_path: Option<&Path>) -> Result<LibraryConfig, AppError> {
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let path = match config_path {
        Some(path) => Some(path),
        None if default_path.exists() => Some(default_path),
        None => None,
    };

    let mut config = match path {
        Some(path) => load_from(path)?,
        None => LibraryConfig::default(),
    };

    config.apply_overrides(env::var("LIBRARY_LOG_LEVEL").ok(), env::var("LIBRARY_MAX_BOOKS").ok())?;
    Ok(config)
}

/// Read and parse one config file, without env overrides
///
/// # Errors
///
/// Returns `AppError::Config` if the file cannot be read or parsed.
pub fn load_from(path: &Path) -> Result<LibraryConfig, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    LibraryConfig::from_toml(&raw)
        .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{LibraryConfig, load_from};
    use crate::{
        error::AppError,
        ids::{BookId, MemberId},
        money::Money,
    };

    #[test]
    fn empty_document_gives_defaults() {
        let config = LibraryConfig::from_toml("");
        assert!(matches!(config, Ok(ref c) if *c == LibraryConfig::default()));
    }

    #[test]
    fn defaults_match_the_circulation_rules() {
        let config = LibraryConfig::default();
        assert_eq!(config.first_book_id(), BookId(1001));
        assert_eq!(config.max_books, 3);
        assert_eq!(config.grace_period_days, 14);
        assert_eq!(config.fine_per_day(), Money::from_cents(100));
    }

    #[test]
    fn partial_document_overrides_only_given_keys() {
        let config = LibraryConfig::from_toml("max_books = 5\nfine_per_day_cents = 25\n");
        assert!(matches!(
            config,
            Ok(ref c) if c.max_books == 5 && c.fine_per_day_cents == 25 && c.grace_period_days == 14
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let config = LibraryConfig::from_toml("max_book = 5\n");
        assert!(matches!(config, Err(AppError::Config(_))));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = LibraryConfig::from_toml("max_books = 0\n");
        assert!(matches!(config, Err(AppError::Config(msg)) if msg.contains("max_books")));
    }

    #[test]
    fn counter_bounds() {
        let config = LibraryConfig::from_toml("first_book_id = 4294967295\nfirst_member_id = 0\n");
        assert!(matches!(
            config,
            Ok(ref c) if c.first_book_id() == BookId(u32::MAX) && c.first_member_id() == MemberId(0)
        ));

        let config = LibraryConfig::from_toml("first_book_id = 4294967296\n");
        assert!(matches!(config, Err(AppError::Config(msg)) if msg.contains("parse error")));
        let config = LibraryConfig::from_toml("first_member_id = -1\n");
        assert!(matches!(config, Err(AppError::Config(_))));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = LibraryConfig::default();
        let result = config.apply_overrides(Some("debug".into()), Some(" 7 ".into()));
        assert!(result.is_ok());
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.max_books, 7);
    }

    #[test]
    fn bad_numeric_override_is_reported() {
        let mut config = LibraryConfig::default();
        let result = config.apply_overrides(None, Some("many".into()));
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("LIBRARY_MAX_BOOKS")));
    }

    #[test]
    fn loads_from_file() {
        let Ok(mut file) = tempfile::NamedTempFile::new() else {
            return;
        };
        assert!(writeln!(file, "first_member_id = 100\nlog_level = \"info\"").is_ok());

        let config = load_from(file.path());
        assert!(matches!(
            config,
            Ok(ref c) if c.first_member_id == 100 && c.log_level == "info"
        ));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let config = load_from(std::path::Path::new("/nonexistent/library.toml"));
        assert!(matches!(config, Err(AppError::Config(msg)) if msg.contains("cannot read")));
    }
}
