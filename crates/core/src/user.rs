//! User accounts as returned by the backend.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{id_as_text, null_as_default, DbId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Mentor,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Mentor => "MENTOR",
            Self::Admin => "ADMIN",
        }
    }

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "STUDENT" => Ok(Self::Student),
            "MENTOR" => Ok(Self::Mentor),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: STUDENT, MENTOR, ADMIN"
            ))),
        }
    }
}

/// A user profile (students, mentors and admins share the shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: DbId,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub department_id: Option<DbId>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub department_code: Option<String>,
    #[serde(default)]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub year_of_study: Option<i32>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub linkedin_profile: Option<String>,
    #[serde(default)]
    pub placed_company: Option<String>,
    #[serde(default)]
    pub placed_position: Option<String>,
    #[serde(default)]
    pub placement_year: Option<i32>,
    /// Mentor accounts stay unapproved until an admin approves them.
    #[serde(default)]
    pub is_approved: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub last_login: Option<Timestamp>,
}

impl UserProfile {
    pub fn is_pending_mentor(&self) -> bool {
        self.role == UserRole::Mentor && self.is_approved == Some(false)
    }
}

/// A mentor record kept by administrators. Unlike [`UserProfile`] it has no
/// role and may belong to several departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    #[serde(deserialize_with = "id_as_text")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub linkedin_profile: Option<String>,
    #[serde(default)]
    pub placed_company: Option<String>,
    #[serde(default)]
    pub placed_position: Option<String>,
    #[serde(default)]
    pub placement_year: Option<i32>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department_ids: Vec<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_roundtrip() {
        for role in [UserRole::Student, UserRole::Mentor, UserRole::Admin] {
            assert_eq!(UserRole::from_str_db(role.as_str()).unwrap(), role);
        }
        assert!(UserRole::from_str_db("student").is_err());
    }

    #[test]
    fn profile_decodes_minimal_backend_payload() {
        let user: UserProfile = serde_json::from_value(json!({
            "id": 7,
            "email": "mentor@gct.ac.in",
            "role": "MENTOR",
            "isApproved": false,
            "createdAt": "2025-08-14T10:32:00"
        }))
        .unwrap();
        assert_eq!(user.role, UserRole::Mentor);
        assert!(user.is_pending_mentor());
        assert_eq!(user.full_name, "");
        assert!(user.created_at.is_some());
    }
}
