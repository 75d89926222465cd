//! Domain DTOs for the member API.
//!
//! # Design
//! Field names match the API payload verbatim (snake_case, `type` spelled
//! `r#type`); there is no renaming or mapping layer. These types mirror the
//! mock-server's schema but are defined independently — integration tests
//! catch any drift between the two crates. Timestamps are opaque strings and
//! are never parsed.

use serde::{Deserialize, Serialize};

/// A labeled role/status entry attached to a member.
///
/// Role ids are unique within their owning member's sequence only; they are
/// used as render keys and never cross-referenced elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonRole {
    pub id: u64,
    pub r#type: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A person record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub date_of_birth: String,
    pub gender_code: Option<String>,
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub person_roles: Vec<PersonRole>,
}

impl Member {
    /// "First Last", as shown in list rows, the detail header, and the
    /// enlarged-avatar overlay.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// One-line address in the list-row format: "street, zip city".
    pub fn address_line(&self) -> String {
        format!("{}, {} {}", self.street, self.zip_code, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_json() -> &'static str {
        r#"{
            "id": 1,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@x.io",
            "mobile": null,
            "date_of_birth": "1815-12-10",
            "gender_code": "female",
            "street": "12 St James Square",
            "city": "London",
            "zip_code": "SW1Y",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "person_roles": [
                {
                    "id": 10,
                    "type": "volunteer",
                    "active": true,
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": "2024-01-01T00:00:00Z"
                }
            ]
        }"#
    }

    #[test]
    fn member_deserializes_from_api_payload() {
        let member: Member = serde_json::from_str(member_json()).unwrap();
        assert_eq!(member.id, 1);
        assert_eq!(member.full_name(), "Ada Lovelace");
        assert!(member.mobile.is_none());
        assert_eq!(member.person_roles.len(), 1);
        assert_eq!(member.person_roles[0].r#type, "volunteer");
        assert!(member.person_roles[0].active);
    }

    #[test]
    fn person_roles_default_to_empty_when_absent() {
        let json = r#"{
            "id": 2,
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@x.io",
            "mobile": "+1 555 0100",
            "date_of_birth": "1906-12-09",
            "gender_code": "female",
            "street": "1 Navy Way",
            "city": "Arlington",
            "zip_code": "22202",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert!(member.person_roles.is_empty());
    }

    #[test]
    fn role_type_serializes_as_type() {
        let member: Member = serde_json::from_str(member_json()).unwrap();
        let json = serde_json::to_value(&member.person_roles[0]).unwrap();
        assert_eq!(json["type"], "volunteer");
    }

    #[test]
    fn address_line_joins_street_zip_city() {
        let member: Member = serde_json::from_str(member_json()).unwrap();
        assert_eq!(member.address_line(), "12 St James Square, SW1Y London");
    }
}
