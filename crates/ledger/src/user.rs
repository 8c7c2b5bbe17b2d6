use tally_core::{Money, UserId};

/// A user account record.
///
/// Owned exclusively by the [`LedgerStore`](crate::store::LedgerStore):
/// created once, never deleted, and only the balance is ever mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub balance: Money,
}
