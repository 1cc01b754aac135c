//! Customer entity

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Prefix of the names generated for placeholder customers
pub const PLACEHOLDER_PREFIX: &str = "Random ";

/// A customer row. `id` stays `None` until the store assigns one on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: Option<i64>,
    name: String,
}

impl Customer {
    /// Create a customer that has not been persisted yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Rebuild a persisted customer from a stored row
    pub fn with_id(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Create an unsaved customer named after the current time in epoch millis
    pub fn placeholder() -> Self {
        Self::new(format!(
            "{}{}",
            PLACEHOLDER_PREFIX,
            Utc::now().timestamp_millis()
        ))
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_has_no_id() {
        let customer = Customer::new("alice");
        assert_eq!(customer.id(), None);
        assert_eq!(customer.name(), "alice");
        assert!(!customer.is_persisted());
    }

    #[test]
    fn test_placeholder_name_embeds_timestamp() {
        let customer = Customer::placeholder();
        let suffix = customer
            .name()
            .strip_prefix(PLACEHOLDER_PREFIX)
            .expect("placeholder prefix");

        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
        assert!(!customer.is_persisted());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Customer::with_id(7, "bob")).unwrap();
        assert_eq!(json, r#"{"id":7,"name":"bob"}"#);

        let json = serde_json::to_string(&Customer::new("carol")).unwrap();
        assert_eq!(json, r#"{"id":null,"name":"carol"}"#);
    }

    #[test]
    fn test_deserialization_without_id() {
        let customer: Customer = serde_json::from_str(r#"{"id":null,"name":"dave"}"#).unwrap();
        assert_eq!(customer, Customer::new("dave"));
    }
}
