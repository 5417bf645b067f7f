use std::{cell::Cell, fmt, rc::Rc};

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current time for lending records
pub trait Clock: fmt::Debug {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and give
/// another to the ledger.
#[derive(Debug, Clone)]
pub struct ManualClock {
    /// Shared current instant
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Start the clock at `start`
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    /// Move the clock forward by `delta`, saturating at the far future
    pub fn advance(&self, delta: TimeDelta) {
        let current = self.now.get();
        self.now.set(current.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC));
    }

    /// Move the clock forward by whole days
    pub fn advance_days(&self, days: i64) {
        self.advance(TimeDelta::try_days(days).unwrap_or(TimeDelta::MAX));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
