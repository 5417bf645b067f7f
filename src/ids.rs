use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a book in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct BookId(pub u32);

/// Identifier of a registered member
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct MemberId(pub u32);

/// Identifier of a lending record in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct RecordId(pub u64);

impl BookId {
    /// The id that follows this one, or `None` past the end of the range
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl MemberId {
    /// The id that follows this one, or `None` past the end of the range
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl RecordId {
    /// The id that follows this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{BookId, MemberId};

    #[test]
    fn next_stops_at_the_top_of_the_range() {
        assert_eq!(BookId(1001).next(), Some(BookId(1002)));
        assert_eq!(BookId(u32::MAX).next(), None);
        assert_eq!(MemberId(u32::MAX - 1).next(), Some(MemberId(u32::MAX)));
        assert_eq!(MemberId(u32::MAX).next(), None);
    }
}
