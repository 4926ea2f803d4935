//! Registration forms and the other account request/response bodies.
//!
//! A registration is a tagged union over the two self-service roles; each
//! variant carries exactly the fields its role requires. Field-level rules
//! come from the `validator` derive, the cross-field rules (institution
//! domain, password confirmation) are checked in [`Registration::validate`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::types::{id_as_text, DbId, Timestamp};
use crate::user::{UserProfile, UserRole};

/// Institution e-mail domain used when none is configured.
pub const DEFAULT_EMAIL_DOMAIN: &str = "gct.ac.in";

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegistration {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
    /// Checked against `password`; never sent to the backend.
    #[serde(default, skip_serializing)]
    pub confirm_password: String,
    pub department_id: DbId,
    #[validate(length(min = 1, message = "Roll number is required"))]
    pub roll_number: String,
    #[validate(range(min = 1, max = 5, message = "Year of study must be between 1 and 5"))]
    pub year_of_study: i32,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MentorRegistration {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing)]
    pub confirm_password: String,
    pub department_id: DbId,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    #[serde(default)]
    pub linkedin_profile: Option<String>,
    #[validate(length(min = 1, message = "Placed company is required"))]
    pub placed_company: String,
    #[validate(length(min = 1, message = "Placed position is required"))]
    pub placed_position: String,
    #[validate(range(min = 1990, max = 2100, message = "Placement year is out of range"))]
    pub placement_year: i32,
    #[serde(default)]
    pub graduation_year: Option<i32>,
}

/// Body of `POST /auth/register`, tagged by `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Registration {
    Student(StudentRegistration),
    Mentor(MentorRegistration),
}

impl Registration {
    pub fn role(&self) -> UserRole {
        match self {
            Self::Student(_) => UserRole::Student,
            Self::Mentor(_) => UserRole::Mentor,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Student(s) => &s.email,
            Self::Mentor(m) => &m.email,
        }
    }

    pub fn password(&self) -> &str {
        self.credentials().0
    }

    fn credentials(&self) -> (&str, &str, DbId) {
        match self {
            Self::Student(s) => (&s.password, &s.confirm_password, s.department_id),
            Self::Mentor(m) => (&m.password, &m.confirm_password, m.department_id),
        }
    }

    /// Check the form before it is sent.
    ///
    /// Order: institution domain, password confirmation, password length,
    /// department, then the per-role field rules.
    pub fn validate(&self, email_domain: &str) -> Result<(), CoreError> {
        if !is_institution_email(self.email(), email_domain) {
            return Err(CoreError::Validation(format!(
                "Please use your @{email_domain} email address"
            )));
        }
        let (password, confirm, department_id) = self.credentials();
        if password != confirm {
            return Err(CoreError::Validation("Passwords do not match".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CoreError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }
        if department_id <= 0 {
            return Err(CoreError::Validation("Please select a department".into()));
        }
        let fields = match self {
            Self::Student(s) => s.validate(),
            Self::Mentor(m) => m.validate(),
        };
        fields.map_err(|e| CoreError::Validation(describe(&e)))
    }
}

/// True when `email` ends with `@<domain>`, ignoring case.
pub fn is_institution_email(email: &str, domain: &str) -> bool {
    let suffix = format!("@{}", domain.trim_start_matches('@'));
    email.trim().to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase())
}

/// Flatten derive errors into one line, ordered by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut by_field: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("{field} is invalid ({})", e.code),
            })
            .collect();
        by_field.insert(field.to_string(), messages);
    }
    by_field.into_values().flatten().collect::<Vec<_>>().join("; ")
}

// ---------------------------------------------------------------------------
// Password strength
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLabel {
    Weak,
    Medium,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    /// 0..=5, one point per satisfied criterion.
    pub score: u8,
    pub label: StrengthLabel,
}

/// Score a password on length, lowercase, uppercase, digit and symbol.
pub fn password_strength(password: &str) -> PasswordStrength {
    let criteria = [
        password.chars().count() >= MIN_PASSWORD_LEN,
        password.chars().any(|c| c.is_lowercase()),
        password.chars().any(|c| c.is_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
    ];
    let score = criteria.iter().filter(|&&ok| ok).count() as u8;
    let label = match score {
        0..=2 => StrengthLabel::Weak,
        3..=4 => StrengthLabel::Medium,
        _ => StrengthLabel::Strong,
    };
    PasswordStrength { score, label }
}

// ---------------------------------------------------------------------------
// Other account payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: String,
    pub user: UserProfile,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OtpRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Body of the OTP and institution-email endpoints; fields vary by route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtpResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub verified: Option<bool>,
    #[serde(rename = "isGCTEmail")]
    pub is_institution_email: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MentorCodeRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyMentorCodeRequest {
    pub email: String,
    pub verification_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Partial profile update; absent fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_study: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placed_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placed_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConvertToMentorRequest {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub placed_company: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub placed_position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// The backend's administrator record. Admin ids are opaque text, unlike
/// user ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(deserialize_with = "id_as_text")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub last_login: Option<Timestamp>,
}

impl AdminProfile {
    /// The profile kept in the session after an admin login. Its numeric
    /// id is the admin id when that is numeric and 0 otherwise; the text id
    /// stays on the [`AdminProfile`].
    pub fn to_user_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.trim().parse().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            full_name: self
                .full_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| self.username.clone()),
            role: UserRole::Admin,
            department_id: None,
            department_name: None,
            department_code: None,
            roll_number: None,
            year_of_study: None,
            graduation_year: None,
            phone_number: None,
            linkedin_profile: None,
            placed_company: None,
            placed_position: None,
            placement_year: None,
            is_approved: None,
            is_active: self.is_active,
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMentorRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub linkedin_profile: Option<String>,
    #[validate(length(min = 1, message = "Placed company is required"))]
    pub placed_company: String,
    #[serde(default)]
    pub placed_position: Option<String>,
    #[serde(default)]
    pub placement_year: Option<i32>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[validate(length(min = 1, message = "At least one department must be assigned"))]
    pub department_ids: Vec<String>,
}
