//! `tally-ledger` — the in-memory authority for user records and balances.

pub mod store;
pub mod user;

pub use store::{LedgerStore, TransferOutcome};
pub use user::User;
