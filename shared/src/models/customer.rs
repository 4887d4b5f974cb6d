//! Customer Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::de;

/// Customer entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Create customer payload (`POST /api/customers`)
///
/// The server accepts any subset of fields but rejects a phone number
/// that is not exactly ten digits; the same rule is enforced here so the
/// request fails locally without a round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CustomerCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(equal = 10, message = "Phone number must be 10 digits."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CustomerCreate {
    /// At least one field must be present; the server rejects an empty payload.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone_number.is_none()
            && self.email.is_none()
            && self.address.is_none()
    }
}

/// Update customer payload (`PUT /api/customers/:id`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(equal = 10, message = "Phone number must be 10 digits."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Customer list response (`GET /api/customers`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomersResponse {
    #[serde(default)]
    pub customers: Vec<Customer>,
}

/// Create customer response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(deserialize_with = "de::id")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn phone_length_enforced() {
        let payload = CustomerCreate {
            name: Some("Asha".into()),
            phone_number: Some("98765".into()),
            ..Default::default()
        };
        assert!(payload.validate().is_err());

        let payload = CustomerCreate {
            phone_number: Some("9876543210".into()),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn phoneless_payload_is_valid() {
        let payload = CustomerCreate {
            name: Some("Walk-in".into()),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
        assert!(!payload.is_empty());
        assert!(CustomerCreate::default().is_empty());
    }
}
