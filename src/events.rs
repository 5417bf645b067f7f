use serde::{Deserialize, Serialize};

use crate::{
    ids::{BookId, MemberId, RecordId},
    money::Money,
};

/// Something that changed circulation state
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum CirculationEvent {
    /// A book left the shelf
    BookIssued { record: RecordId, member: MemberId, book: BookId },
    /// A book came back
    BookReturned { member: MemberId, book: BookId, overdue_days: u64 },
    /// An overdue return added to a member's fine
    FineCharged { member: MemberId, amount: Money },
    /// A member paid off their fine
    FineCleared { member: MemberId, amount: Money },
}
