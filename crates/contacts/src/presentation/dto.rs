//! API DTOs (Data Transfer Objects)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Contact;
use crate::domain::value_objects::{ContactEmail, PhoneNumber};
use crate::error::ContactsResult;

/// Contact payload for create and replace requests
#[derive(Debug, Clone, Deserialize)]
pub struct ContactBody {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub birthday: NaiveDate,
}

impl ContactBody {
    /// Validate the payload into domain values
    pub fn into_parts(self) -> ContactsResult<(String, String, ContactEmail, PhoneNumber, NaiveDate)> {
        let email = ContactEmail::new(self.email)?;
        let phone = PhoneNumber::new(self.phone)?;
        Ok((self.firstname, self.lastname, email, phone, self.birthday))
    }
}

/// Contact representation in responses
#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub birthday: NaiveDate,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.contact_id.into_uuid(),
            firstname: contact.firstname,
            lastname: contact.lastname,
            email: contact.email.into(),
            phone: contact.phone.into(),
            birthday: contact.birthday,
        }
    }
}

/// Query parameters for the debug seeding endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SeedParams {
    /// Number of contacts to generate
    #[serde(default = "default_seed_quantity")]
    pub quantity: u32,
}

fn default_seed_quantity() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_validation() {
        let body = ContactBody {
            firstname: "Jane".to_string(),
            lastname: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 123 4567".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        };
        assert!(body.into_parts().is_ok());
    }

    #[test]
    fn test_body_rejects_bad_email() {
        let body = ContactBody {
            firstname: "Jane".to_string(),
            lastname: "Doe".to_string(),
            email: "not-an-email".to_string(),
            phone: "+1 555 123 4567".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        };
        assert!(body.into_parts().is_err());
    }

    #[test]
    fn test_seed_params_default() {
        let params: SeedParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.quantity, 5);
    }
}
