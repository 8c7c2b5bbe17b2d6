use std::collections::HashMap;
use std::sync::Mutex;

use tally_core::{DomainError, DomainResult, Money, UserId};

use crate::user::User;

/// Result of a successful transfer: a human-readable message plus both
/// post-transfer balances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub message: String,
    pub from_balance: Money,
    pub to_balance: Money,
}

struct Inner {
    users: HashMap<UserId, User>,
    /// Lowercased email -> owning user. Every entry points at a user whose
    /// email lowercases to the key.
    email_index: HashMap<String, UserId>,
}

/// In-memory ledger store: all user records plus the email-uniqueness index.
///
/// A single mutex guards every read-modify-write, so two concurrent
/// transfers cannot both pass the sufficient-funds check before either
/// debit lands. Business-rule checks run to completion before any mutation;
/// on error the store is unchanged.
pub struct LedgerStore {
    inner: Mutex<Inner>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: HashMap::new(),
                email_index: HashMap::new(),
            }),
        }
    }

    /// Register a new user with an initial balance.
    ///
    /// Fails with [`DomainError::Conflict`] if the email (case-insensitive)
    /// is already registered.
    pub fn create_user(&self, name: &str, email: &str, balance: Money) -> DomainResult<User> {
        if balance.is_negative() {
            return Err(DomainError::validation("initial balance must not be negative"));
        }

        let index_key = email.to_lowercase();

        let mut inner = self.inner.lock().unwrap();
        if inner.email_index.contains_key(&index_key) {
            return Err(DomainError::conflict("a user with this email already exists"));
        }

        let user = User {
            id: UserId::new(),
            name: name.to_string(),
            email: email.to_string(),
            balance,
        };
        inner.email_index.insert(index_key, user.id);
        inner.users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Snapshot of all users. Iteration order is not meaningful.
    pub fn list_users(&self) -> Vec<User> {
        let inner = self.inner.lock().unwrap();
        inner.users.values().cloned().collect()
    }

    pub fn get_user(&self, id: UserId) -> DomainResult<User> {
        let inner = self.inner.lock().unwrap();
        inner
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("user not found"))
    }

    /// Move `amount` from one account to another.
    ///
    /// Validation order (first failure wins): sender exists, receiver
    /// exists, not a self-transfer, sender holds sufficient funds. Both
    /// balance updates happen under the lock acquisition that performed the
    /// checks, or neither does.
    pub fn transfer(&self, from: UserId, to: UserId, amount: Money) -> DomainResult<TransferOutcome> {
        if !amount.is_positive() {
            return Err(DomainError::validation("transfer amount must be positive"));
        }

        let mut inner = self.inner.lock().unwrap();

        let (sender_name, sender_balance) = match inner.users.get(&from) {
            Some(user) => (user.name.clone(), user.balance),
            None => return Err(DomainError::not_found("sender not found")),
        };
        let (receiver_name, receiver_balance) = match inner.users.get(&to) {
            Some(user) => (user.name.clone(), user.balance),
            None => return Err(DomainError::not_found("receiver not found")),
        };

        if from == to {
            return Err(DomainError::invalid_operation(
                "cannot transfer funds to the same account",
            ));
        }

        if sender_balance < amount {
            return Err(DomainError::InsufficientFunds);
        }

        let from_balance = sender_balance
            .checked_sub(amount)
            .ok_or_else(|| DomainError::invalid_operation("sender balance out of range"))?;
        let to_balance = receiver_balance
            .checked_add(amount)
            .ok_or_else(|| DomainError::invalid_operation("receiver balance out of range"))?;

        let sender = inner
            .users
            .get_mut(&from)
            .ok_or_else(|| DomainError::not_found("sender not found"))?;
        sender.balance = from_balance;
        let receiver = inner
            .users
            .get_mut(&to)
            .ok_or_else(|| DomainError::not_found("receiver not found"))?;
        receiver.balance = to_balance;

        tracing::info!(from = %from, to = %to, amount = %amount, "transfer applied");

        Ok(TransferOutcome {
            message: format!(
                "Successfully transferred {amount} from {sender_name} to {receiver_name}"
            ),
            from_balance,
            to_balance,
        })
    }
}
