use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

use super::model::{Transaction, TransactionType};

/// Body of `POST /transactions`.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub title: String,
    #[serde(deserialize_with = "amount_from_number_or_string")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl CreateTransactionRequest {
    /// Structural checks beyond what deserialization enforces, collected so
    /// the client sees every violated field at once.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut violations = Vec::new();

        if self.title.trim().is_empty() {
            violations.push("title must not be empty".to_string());
        }
        if !self.amount.is_finite() {
            violations.push("amount must be a finite number".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(violations))
        }
    }
}

/// Accepts both JSON numbers and numeric strings for `amount`.
fn amount_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(number) => Ok(number),
        Raw::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom("amount must be a number")),
    }
}

#[derive(Debug, Serialize)]
pub struct ListTransactionsResponse {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize)]
pub struct GetTransactionResponse {
    pub transaction: Option<Transaction>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub amount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> Result<CreateTransactionRequest, serde_json::Error> {
        serde_json::from_value(body)
    }

    #[test]
    fn accepts_numeric_amounts() {
        let request =
            parse(json!({ "title": "Rent", "amount": 5000, "type": "credit" })).unwrap();
        assert_eq!(request.amount, 5000.0);
        assert_eq!(request.transaction_type, TransactionType::Credit);
    }

    #[test]
    fn coerces_numeric_strings() {
        let request =
            parse(json!({ "title": "Rent", "amount": "2500.5", "type": "debit" })).unwrap();
        assert_eq!(request.amount, 2500.5);
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        assert!(parse(json!({ "title": "Rent", "amount": "abc", "type": "credit" })).is_err());
        assert!(parse(json!({ "title": "Rent", "amount": true, "type": "credit" })).is_err());
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(parse(json!({ "title": "Rent", "amount": 10 })).is_err());
        assert!(parse(json!({ "amount": 10, "type": "credit" })).is_err());
    }

    #[test]
    fn validate_collects_all_violations() {
        let request =
            parse(json!({ "title": "  ", "amount": 10, "type": "credit" })).unwrap();

        match request.validate() {
            Err(ApiError::Validation(details)) => {
                assert_eq!(details, vec!["title must not be empty".to_string()]);
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_passes_well_formed_requests() {
        let request =
            parse(json!({ "title": "Groceries", "amount": 120.5, "type": "debit" })).unwrap();
        assert!(request.validate().is_ok());
    }
}
