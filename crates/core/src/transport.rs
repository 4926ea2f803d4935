//! Wire codec between the nested experience form and the backend's flat
//! record.
//!
//! The backend stores an experience as one flat object whose rounds (with
//! their questions) travel as JSON text in a single `roundsJson` field.
//!
//! - Outbound, [`encode_submission`] copies the scalar fields, sets
//!   `totalRounds` from the round list and serialises the rounds into
//!   `roundsJson`. The payload has no `rounds` key.
//! - Inbound, [`decode_record`] copies scalar fields with empty defaults and
//!   parses `roundsJson`. Malformed, missing or empty round data never fails
//!   the load: it is logged and replaced by one blank round.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::experience::{
    normalize_rounds, CompanyType, ExperienceSubmission, FinalResult, InterviewRound,
};
use crate::types::{DbId, Timestamp};
use crate::user::UserProfile;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePayload {
    pub student_name: String,
    pub roll_number: String,
    pub department: String,
    pub personal_email: String,
    pub contact_number: String,
    pub company_name: String,
    pub company_type: Option<CompanyType>,
    pub placement_year: i32,
    pub salary: String,
    pub intern_offered: bool,
    pub has_bond: bool,
    pub bond_details: String,
    pub total_rounds: i32,
    pub rounds_json: String,
    pub overall_experience: String,
    pub general_tips: String,
    pub areas_to_prepare_final: String,
    pub suggested_resources: String,
    pub final_result: FinalResult,
}

/// A stored experience as returned by the backend.
///
/// Every field is optional; older records and partially filled rows are
/// common, so nothing here is allowed to fail deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceRecord {
    pub id: Option<DbId>,
    pub student_name: Option<String>,
    pub roll_number: Option<String>,
    pub department: Option<String>,
    pub personal_email: Option<String>,
    pub contact_number: Option<String>,
    pub company_name: Option<String>,
    pub company_type: Option<String>,
    pub placement_year: Option<i32>,
    pub salary: Option<String>,
    pub intern_offered: Option<bool>,
    pub has_bond: Option<bool>,
    pub bond_details: Option<String>,
    pub total_rounds: Option<i32>,
    pub rounds_json: Option<String>,
    pub overall_experience: Option<String>,
    pub general_tips: Option<String>,
    pub areas_to_prepare_final: Option<String>,
    pub suggested_resources: Option<String>,
    pub final_result: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub academic_year: Option<String>,
}

impl ExperienceRecord {
    /// Rounds parsed leniently, for detail views.
    pub fn rounds(&self) -> Vec<InterviewRound> {
        decode_rounds(self.rounds_json.as_deref())
    }

    /// Parsed final result, `None` when blank or unknown.
    pub fn final_result(&self) -> Option<FinalResult> {
        self.final_result
            .as_deref()
            .and_then(|s| FinalResult::from_str_db(s).ok())
    }

    pub fn company_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or_default()
    }

    /// Whether this record was submitted by `user`: same e-mail, or the
    /// same student name ignoring case.
    pub fn owned_by(&self, user: &UserProfile) -> bool {
        let email_matches = self
            .personal_email
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case(&user.email));
        let name_matches = match self.student_name.as_deref() {
            Some(name) if !user.full_name.trim().is_empty() => {
                name.trim().to_lowercase() == user.full_name.trim().to_lowercase()
            }
            _ => false,
        };
        email_matches || name_matches
    }
}

// ---------------------------------------------------------------------------
// Rounds
// ---------------------------------------------------------------------------

/// Serialise rounds (with questions) to the `roundsJson` text.
pub fn encode_rounds(rounds: &[InterviewRound]) -> Result<String, CoreError> {
    serde_json::to_string(rounds)
        .map_err(|e| CoreError::Internal(format!("Failed to encode rounds: {e}")))
}

/// Parse `roundsJson`, falling back to one blank round.
///
/// Parsed rounds are renumbered by position and any round without
/// questions receives one blank question.
pub fn decode_rounds(rounds_json: Option<&str>) -> Vec<InterviewRound> {
    let fallback = || vec![InterviewRound::new(1)];

    let Some(raw) = rounds_json.filter(|s| !s.trim().is_empty()) else {
        tracing::debug!("Experience record has no rounds data, using a default round");
        return fallback();
    };

    match serde_json::from_str::<Vec<InterviewRound>>(raw) {
        Ok(rounds) if rounds.is_empty() => {
            tracing::warn!("Experience record has an empty rounds list, using a default round");
            fallback()
        }
        Ok(mut rounds) => {
            normalize_rounds(&mut rounds);
            rounds
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse roundsJson, using a default round");
            fallback()
        }
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Placement year sent with a submission: the user's graduation year, or
/// the current calendar year when the profile has none.
pub fn default_placement_year(user: Option<&UserProfile>, today: NaiveDate) -> i32 {
    user.and_then(|u| u.graduation_year)
        .unwrap_or_else(|| today.year())
}

/// Flatten the form into the backend's create/update body.
pub fn encode_submission(
    form: &ExperienceSubmission,
    placement_year: i32,
) -> Result<ExperiencePayload, CoreError> {
    let total_rounds = i32::try_from(form.total_rounds())
        .map_err(|_| CoreError::Validation("Too many rounds".to_string()))?;

    Ok(ExperiencePayload {
        student_name: form.student_name.clone(),
        roll_number: form.roll_number.clone(),
        department: form.department.clone(),
        personal_email: form.personal_email.clone(),
        contact_number: form.contact_number.clone(),
        company_name: form.company_name.clone(),
        company_type: form.company_type,
        placement_year,
        salary: form.salary.clone(),
        intern_offered: form.intern_offered,
        has_bond: form.has_bond,
        bond_details: form.bond_details.clone(),
        total_rounds,
        rounds_json: encode_rounds(form.rounds())?,
        overall_experience: form.overall_experience.clone(),
        general_tips: form.general_tips.clone(),
        areas_to_prepare_final: form.areas_to_prepare_final.clone(),
        suggested_resources: form.suggested_resources.clone(),
        final_result: form.final_result,
    })
}

/// Rebuild the form from a stored record for editing.
pub fn decode_record(record: &ExperienceRecord) -> ExperienceSubmission {
    let text = |field: &Option<String>| field.clone().unwrap_or_default();

    let company_type = record.company_type.as_deref().and_then(|raw| {
        let parsed = CompanyType::parse(raw);
        if parsed.is_none() && !raw.trim().is_empty() {
            tracing::warn!(company_type = %raw, "Unknown company type on stored experience");
        }
        parsed
    });

    let final_result = record.final_result().unwrap_or_default();

    ExperienceSubmission {
        student_name: text(&record.student_name),
        roll_number: text(&record.roll_number),
        department: text(&record.department),
        personal_email: text(&record.personal_email),
        contact_number: text(&record.contact_number),
        company_name: text(&record.company_name),
        company_type,
        salary: text(&record.salary),
        intern_offered: record.intern_offered.unwrap_or(false),
        has_bond: record.has_bond.unwrap_or(false),
        bond_details: text(&record.bond_details),
        rounds: decode_rounds(record.rounds_json.as_deref()),
        overall_experience: text(&record.overall_experience),
        general_tips: text(&record.general_tips),
        areas_to_prepare_final: text(&record.areas_to_prepare_final),
        suggested_resources: text(&record.suggested_resources),
        final_result,
    }
}
