//! Customer entity and the payload accepted by create/update

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Persisted customer record
///
/// `id` and `created_at` are assigned by the repository on create and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Candidate customer data from a create or update request
///
/// Missing or `null` `name`/`email` decode as empty strings so they surface
/// as validation errors. Unknown fields such as `id` or `created_at` are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerPayload {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    pub phone: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl CustomerPayload {
    /// Copy the mutable fields onto an existing record.
    pub fn apply_to(self, customer: &mut Customer) {
        customer.name = self.name;
        customer.email = self.email;
        customer.phone = self.phone;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Customer {
        Customer {
            id: 3,
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            phone: Some("123".to_string()),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
        }
    }

    #[test]
    fn test_payload_ignores_id_and_created_at() {
        let payload: CustomerPayload = serde_json::from_value(serde_json::json!({
            "id": 999,
            "name": "Ana2",
            "email": "a2@x.com",
            "created_at": "2001-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(payload.name, "Ana2");
        assert_eq!(payload.phone, None);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let payload: CustomerPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload, CustomerPayload::default());
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let payload: CustomerPayload =
            serde_json::from_str(r#"{"name": null, "email": null, "phone": null}"#).unwrap();
        assert_eq!(payload, CustomerPayload::default());
    }

    #[test]
    fn test_apply_to_copies_only_mutable_fields() {
        let mut customer = stored();
        let created_at = customer.created_at;

        CustomerPayload {
            name: "Ana2".to_string(),
            email: "a2@x.com".to_string(),
            phone: Some("999".to_string()),
        }
        .apply_to(&mut customer);

        assert_eq!(customer.id, 3);
        assert_eq!(customer.created_at, created_at);
        assert_eq!(customer.name, "Ana2");
        assert_eq!(customer.email, "a2@x.com");
        assert_eq!(customer.phone.as_deref(), Some("999"));
    }

    #[test]
    fn test_customer_serializes_snake_case_fields() {
        let value = serde_json::to_value(stored()).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["name"], "Ana");
        assert!(value["created_at"].is_string());
    }
}
