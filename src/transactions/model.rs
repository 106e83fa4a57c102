use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A single ledger entry.
///
/// Debits are stored with a negated amount, so a session's balance is a plain
/// sum over its rows. Rows are written once and never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub session_id: Option<Uuid>,
    pub title: String,
    pub amount: f64,
    pub created_at: OffsetDateTime,
}

/// Direction of a ledger entry as submitted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    /// Applies the sign convention: credits keep their value, debits negate it.
    pub fn signed_amount(self, amount: f64) -> f64 {
        match self {
            TransactionType::Credit => amount,
            TransactionType::Debit => -amount,
        }
    }
}

/// Column values for an insert; `created_at` is stamped by the store.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub id: Uuid,
    pub session_id: Uuid,
    pub title: String,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_keep_their_sign() {
        assert_eq!(TransactionType::Credit.signed_amount(5000.0), 5000.0);
    }

    #[test]
    fn debits_are_negated() {
        assert_eq!(TransactionType::Debit.signed_amount(2000.0), -2000.0);
    }

    #[test]
    fn transaction_type_parses_lowercase_names() {
        assert_eq!(
            serde_json::from_str::<TransactionType>("\"credit\"").unwrap(),
            TransactionType::Credit
        );
        assert_eq!(
            serde_json::from_str::<TransactionType>("\"debit\"").unwrap(),
            TransactionType::Debit
        );
    }

    #[test]
    fn transaction_type_rejects_unknown_names() {
        assert!(serde_json::from_str::<TransactionType>("\"transfer\"").is_err());
        assert!(serde_json::from_str::<TransactionType>("\"Credit\"").is_err());
    }
}
