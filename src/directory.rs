use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    error::Exhausted,
    ids::{BookId, MemberId},
    member::Member,
    money::Money,
};

/// Id given to the first member of a fresh directory
pub const DEFAULT_FIRST_MEMBER_ID: MemberId = MemberId(1);

/// Books a member may hold at once unless configured otherwise
pub const DEFAULT_MAX_BOOKS: usize = 3;

/// Every registered member, keyed by id
#[derive(Debug, Clone)]
pub struct Directory {
    /// Members in ascending id order
    members: BTreeMap<MemberId, Member>,
    /// Id handed to the next member, `None` once the range is used up
    next_id: Option<MemberId>,
    /// Limit applied by [`Directory::add_member`]
    default_max_books: usize,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_MEMBER_ID, DEFAULT_MAX_BOOKS)
    }
}

impl Directory {
    /// Create an empty directory
    #[must_use]
    pub fn new(first_id: MemberId, default_max_books: usize) -> Self {
        Self { members: BTreeMap::new(), next_id: Some(first_id), default_max_books }
    }

    /// Register a member with the default borrowing limit
    ///
    /// # Errors
    ///
    /// Returns `Exhausted::MemberIds` once every id has been handed out.
    pub fn add_member(&mut self, name: &str, contact: &str) -> Result<MemberId, Exhausted> {
        self.add_member_with_limit(name, contact, self.default_max_books)
    }

    /// Register a member with an explicit borrowing limit
    ///
    /// # Errors
    ///
    /// Returns `Exhausted::MemberIds` once every id has been handed out. The
    /// directory is left untouched.
    pub fn add_member_with_limit(
        &mut self,
        name: &str,
        contact: &str,
        max_books: usize,
    ) -> Result<MemberId, Exhausted> {
        let id = self.next_id.ok_or(Exhausted::MemberIds)?;
        self.next_id = id.next();
        self.members.insert(id, Member::new(id, name, contact, max_books));
        debug!(member = %id, name, max_books, "member registered");
        Ok(id)
    }

    /// Look up a member
    #[must_use]
    pub fn find(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    /// Whether the member may take one more book; unknown members may not
    #[must_use]
    pub fn can_borrow(&self, id: MemberId) -> bool {
        self.find(id).is_some_and(Member::can_borrow)
    }

    /// Add `book` to the member's loans.
    ///
    /// Returns `false` if the member is unknown, already holds the book, or is
    /// at the limit.
    pub fn record_borrow(&mut self, id: MemberId, book: BookId) -> bool {
        self.members.get_mut(&id).is_some_and(|m| m.borrow_book(book))
    }

    /// Remove `book` from the member's loans.
    ///
    /// Returns `false` if the member is unknown or did not hold the book.
    pub fn record_return(&mut self, id: MemberId, book: BookId) -> bool {
        self.members.get_mut(&id).is_some_and(|m| m.return_book(book))
    }

    /// Add to a member's fine, returning `false` for an unknown member
    pub fn add_fine(&mut self, id: MemberId, amount: Money) -> bool {
        match self.members.get_mut(&id) {
            Some(member) => {
                member.add_fine(amount);
                true
            }
            None => false,
        }
    }

    /// Reset a member's fine, returning what was owed
    pub fn clear_fine(&mut self, id: MemberId) -> Option<Money> {
        self.members.get_mut(&id).map(Member::clear_fine)
    }

    /// Outstanding fine of a member
    #[must_use]
    pub fn fine_of(&self, id: MemberId) -> Option<Money> {
        self.find(id).map(Member::fine)
    }

    /// All members in ascending id order
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Number of registered members
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether nobody has registered yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
