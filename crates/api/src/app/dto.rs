use serde::Deserialize;

use tally_core::Money;
use tally_ledger::{TransferOutcome, User};

use crate::app::errors::{self, FieldError};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub balance: Money,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount: Money,
}

// -------------------------
// Schema validation
// -------------------------

/// Field constraints checked before the request reaches the store, so the
/// store's own invariant checks stay independent of HTTP concerns.
pub fn validate_create_user(req: &CreateUserRequest) -> Result<(), axum::response::Response> {
    let mut details = Vec::new();

    let name_chars = req.name.chars().count();
    if name_chars < 1 || name_chars > 100 {
        details.push(FieldError::new(
            "name",
            "name must be between 1 and 100 characters",
        ));
    }
    if !is_valid_email(&req.email) {
        details.push(FieldError::new("email", "email is not a valid address"));
    }
    if req.balance.is_negative() {
        details.push(FieldError::new("balance", "balance must not be negative"));
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(errors::validation_failed(details))
    }
}

pub fn validate_transfer(req: &TransferRequest) -> Result<(), axum::response::Response> {
    if req.amount.is_positive() {
        Ok(())
    } else {
        Err(errors::validation_failed(vec![FieldError::new(
            "amount",
            "amount must be greater than zero",
        )]))
    }
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain,
/// no whitespace.
fn is_valid_email(s: &str) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn user_to_json(user: User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id.to_string(),
        "name": user.name,
        "email": user.email,
        "balance": user.balance.to_string(),
    })
}

pub fn transfer_to_json(outcome: TransferOutcome) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "message": outcome.message,
        "from_user_balance": outcome.from_balance.to_string(),
        "to_user_balance": outcome.to_balance.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        for ok in [
            "alice@example.com",
            "a.b+tag@sub.example.co",
            "UPPER@Example.COM",
        ] {
            assert!(is_valid_email(ok), "rejected {ok:?}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "no-at-sign",
            "@example.com",
            "alice@",
            "alice@nodot",
            "alice@.com",
            "alice@example.com.",
            "two@@example.com",
            "spa ce@example.com",
        ] {
            assert!(!is_valid_email(bad), "accepted {bad:?}");
        }
    }

    #[test]
    fn name_length_is_measured_in_chars() {
        let req = CreateUserRequest {
            name: "ä".repeat(100),
            email: "alice@example.com".to_string(),
            balance: Money::ZERO,
        };
        assert!(validate_create_user(&req).is_ok());

        let req = CreateUserRequest {
            name: "ä".repeat(101),
            email: "alice@example.com".to_string(),
            balance: Money::ZERO,
        };
        assert!(validate_create_user(&req).is_err());
    }

    #[test]
    fn empty_name_is_rejected() {
        let req = CreateUserRequest {
            name: String::new(),
            email: "alice@example.com".to_string(),
            balance: Money::ZERO,
        };
        assert!(validate_create_user(&req).is_err());
    }

    #[test]
    fn zero_amount_transfer_is_rejected() {
        let req = TransferRequest {
            from_user_id: "a".to_string(),
            to_user_id: "b".to_string(),
            amount: Money::ZERO,
        };
        assert!(validate_transfer(&req).is_err());
    }
}
