//! Interview-experience aggregate.
//!
//! An [`ExperienceSubmission`] is what a student fills out in the
//! experience wizard: identity, offer details, an ordered list of
//! [`InterviewRound`]s (each holding at least one [`InterviewQuestion`]) and
//! a closing summary. The aggregate keeps two invariants at all times:
//!
//! - there is at least one round, and every round has at least one question;
//! - round numbers are dense and 1-based (`1..=rounds.len()`).
//!
//! The round count is derived from the round list, so it can never drift.
//! Collection edits live in [`crate::round_editor`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::department::{find_by_id, Department};
use crate::error::CoreError;
use crate::types::null_as_default;
use crate::user::UserProfile;

// ---------------------------------------------------------------------------
// Round platform
// ---------------------------------------------------------------------------

/// Mode in which an interview round was conducted.
///
/// Wire values are the human-readable labels the backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundPlatform {
    #[default]
    #[serde(rename = "Online Test")]
    OnlineTest,
    #[serde(rename = "Written Test (Offline)")]
    WrittenTestOffline,
    #[serde(rename = "Technical Interview")]
    TechnicalInterview,
    #[serde(rename = "HR Interview")]
    HrInterview,
    #[serde(rename = "Group Discussion")]
    GroupDiscussion,
    #[serde(rename = "Coding Round")]
    CodingRound,
    #[serde(rename = "Video Call")]
    VideoCall,
    #[serde(rename = "In-Person")]
    InPerson,
    #[serde(rename = "Hybrid")]
    Hybrid,
}

/// Every platform, in selector order.
pub const ALL_PLATFORMS: [RoundPlatform; 9] = [
    RoundPlatform::OnlineTest,
    RoundPlatform::WrittenTestOffline,
    RoundPlatform::TechnicalInterview,
    RoundPlatform::HrInterview,
    RoundPlatform::GroupDiscussion,
    RoundPlatform::CodingRound,
    RoundPlatform::VideoCall,
    RoundPlatform::InPerson,
    RoundPlatform::Hybrid,
];

impl RoundPlatform {
    pub fn label(self) -> &'static str {
        match self {
            Self::OnlineTest => "Online Test",
            Self::WrittenTestOffline => "Written Test (Offline)",
            Self::TechnicalInterview => "Technical Interview",
            Self::HrInterview => "HR Interview",
            Self::GroupDiscussion => "Group Discussion",
            Self::CodingRound => "Coding Round",
            Self::VideoCall => "Video Call",
            Self::InPerson => "In-Person",
            Self::Hybrid => "Hybrid",
        }
    }

    /// Parse a stored label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        ALL_PLATFORMS
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
    }
}

/// Unknown or missing platform labels fall back to the default instead of
/// failing the whole rounds document.
fn lenient_platform<'de, D>(deserializer: D) -> Result<RoundPlatform, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw {
        Some(label) => RoundPlatform::from_label(&label).unwrap_or_else(|| {
            tracing::warn!(label = %label, "Unknown round platform, using default");
            RoundPlatform::default()
        }),
        None => RoundPlatform::default(),
    })
}

fn default_cleared() -> bool {
    true
}

/// A round counts as cleared unless the record says otherwise.
fn null_as_cleared<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_cleared))
}

// ---------------------------------------------------------------------------
// Questions and rounds
// ---------------------------------------------------------------------------

/// One question asked within a round. Every field is optional free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub approach: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub references: String,
}

impl InterviewQuestion {
    pub fn apply(&mut self, edit: QuestionEdit) {
        match edit {
            QuestionEdit::Domain(v) => self.domain = v,
            QuestionEdit::Question(v) => self.question = v,
            QuestionEdit::Approach(v) => self.approach = v,
            QuestionEdit::References(v) => self.references = v,
        }
    }
}

/// A single-field update to an [`InterviewQuestion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionEdit {
    Domain(String),
    Question(String),
    Approach(String),
    References(String),
}

/// One stage of a selection process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRound {
    #[serde(default, deserialize_with = "null_as_default")]
    pub round_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub round_name: String,
    #[serde(default, deserialize_with = "lenient_platform")]
    pub platform: RoundPlatform,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub round_details: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics_covered: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub study_links: String,
    #[serde(default = "default_cleared", deserialize_with = "null_as_cleared")]
    pub cleared: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<InterviewQuestion>,
}

impl InterviewRound {
    /// A blank round at the given 1-based position with one blank question.
    pub fn new(round_number: u32) -> Self {
        Self {
            round_number,
            round_name: String::new(),
            platform: RoundPlatform::default(),
            duration: String::new(),
            round_details: String::new(),
            topics_covered: String::new(),
            comments: String::new(),
            study_links: String::new(),
            cleared: true,
            questions: vec![InterviewQuestion::default()],
        }
    }

    pub fn apply(&mut self, edit: RoundEdit) {
        match edit {
            RoundEdit::Name(v) => self.round_name = v,
            RoundEdit::Platform(p) => self.platform = p,
            RoundEdit::Duration(v) => self.duration = v,
            RoundEdit::Details(v) => self.round_details = v,
            RoundEdit::TopicsCovered(v) => self.topics_covered = v,
            RoundEdit::Comments(v) => self.comments = v,
            RoundEdit::StudyLinks(v) => self.study_links = v,
            RoundEdit::Cleared(c) => self.cleared = c,
        }
    }

    /// Non-blank lines of the study-links field.
    pub fn study_link_list(&self) -> Vec<&str> {
        self.study_links
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}

/// A single-field update to an [`InterviewRound`].
///
/// The round number is not editable; it follows the round's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEdit {
    Name(String),
    Platform(RoundPlatform),
    Duration(String),
    Details(String),
    TopicsCovered(String),
    Comments(String),
    StudyLinks(String),
    Cleared(bool),
}

/// Restore the round invariants on a list coming from outside the editor:
/// numbers follow positions and no round is left without a question.
pub(crate) fn normalize_rounds(rounds: &mut [InterviewRound]) {
    for (idx, round) in rounds.iter_mut().enumerate() {
        round.round_number = idx as u32 + 1;
        if round.questions.is_empty() {
            round.questions.push(InterviewQuestion::default());
        }
    }
}

// ---------------------------------------------------------------------------
// Company type and final result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyType {
    It,
    Core,
    Product,
    Service,
    Startup,
    Other,
}

impl CompanyType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::Core => "CORE",
            Self::Product => "PRODUCT",
            Self::Service => "SERVICE",
            Self::Startup => "STARTUP",
            Self::Other => "OTHER",
        }
    }

    /// Case-insensitive parse; `None` for blank or unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IT" => Some(Self::It),
            "CORE" => Some(Self::Core),
            "PRODUCT" => Some(Self::Product),
            "SERVICE" => Some(Self::Service),
            "STARTUP" => Some(Self::Startup),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Outcome of the whole selection process for the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalResult {
    #[default]
    Selected,
    Rejected,
    Pending,
}

impl FinalResult {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Selected => "SELECTED",
            Self::Rejected => "REJECTED",
            Self::Pending => "PENDING",
        }
    }

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SELECTED" => Ok(Self::Selected),
            "REJECTED" => Ok(Self::Rejected),
            "PENDING" => Ok(Self::Pending),
            _ => Err(CoreError::Validation(format!(
                "Invalid final result '{s}'. Must be one of: SELECTED, REJECTED, PENDING"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Submission aggregate
// ---------------------------------------------------------------------------

/// The interview-experience form, edited as one unit by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ExperienceDraft")]
pub struct ExperienceSubmission {
    // Student identity.
    pub student_name: String,
    pub roll_number: String,
    /// Department code, e.g. `CSE`.
    pub department: String,
    pub personal_email: String,
    pub contact_number: String,

    // Offer details.
    pub company_name: String,
    pub company_type: Option<CompanyType>,
    pub salary: String,
    pub intern_offered: bool,
    pub has_bond: bool,
    pub bond_details: String,

    pub(crate) rounds: Vec<InterviewRound>,

    // Summary.
    pub overall_experience: String,
    pub general_tips: String,
    pub areas_to_prepare_final: String,
    pub suggested_resources: String,
    pub final_result: FinalResult,
}

impl Default for ExperienceSubmission {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceSubmission {
    /// An empty form: one default round holding one blank question.
    pub fn new() -> Self {
        Self {
            student_name: String::new(),
            roll_number: String::new(),
            department: String::new(),
            personal_email: String::new(),
            contact_number: String::new(),
            company_name: String::new(),
            company_type: None,
            salary: String::new(),
            intern_offered: false,
            has_bond: false,
            bond_details: String::new(),
            rounds: vec![InterviewRound::new(1)],
            overall_experience: String::new(),
            general_tips: String::new(),
            areas_to_prepare_final: String::new(),
            suggested_resources: String::new(),
            final_result: FinalResult::default(),
        }
    }

    /// An empty form with the student identity taken from the signed-in user.
    ///
    /// The department code comes from the lookup list when the user's
    /// department id is found there, otherwise from the profile itself.
    pub fn prefilled(user: &UserProfile, departments: &[Department]) -> Self {
        let department = user
            .department_id
            .and_then(|id| find_by_id(departments, &id.to_string()))
            .map(|d| d.department_code.clone())
            .or_else(|| user.department_code.clone())
            .unwrap_or_default();

        Self {
            student_name: user.full_name.clone(),
            roll_number: user.roll_number.clone().unwrap_or_default(),
            personal_email: user.email.clone(),
            contact_number: user.phone_number.clone().unwrap_or_default(),
            department,
            ..Self::new()
        }
    }

    /// Build from an external draft, re-establishing the round invariants.
    ///
    /// An empty round list is rejected; rounds are renumbered by position
    /// and rounds without questions receive one blank question.
    pub fn from_draft(draft: ExperienceDraft) -> Result<Self, CoreError> {
        if draft.rounds.is_empty() {
            return Err(CoreError::Validation(
                "An experience must contain at least one round".to_string(),
            ));
        }
        let mut rounds = draft.rounds;
        normalize_rounds(&mut rounds);

        Ok(Self {
            student_name: draft.student_name,
            roll_number: draft.roll_number,
            department: draft.department,
            personal_email: draft.personal_email,
            contact_number: draft.contact_number,
            company_name: draft.company_name,
            company_type: draft.company_type,
            salary: draft.salary,
            intern_offered: draft.intern_offered,
            has_bond: draft.has_bond,
            bond_details: draft.bond_details,
            rounds,
            overall_experience: draft.overall_experience,
            general_tips: draft.general_tips,
            areas_to_prepare_final: draft.areas_to_prepare_final,
            suggested_resources: draft.suggested_resources,
            final_result: draft.final_result,
        })
    }

    pub fn rounds(&self) -> &[InterviewRound] {
        &self.rounds
    }

    /// Number of rounds; always equal to `rounds().len()`.
    pub fn total_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn round(&self, index: usize) -> Option<&InterviewRound> {
        self.rounds.get(index)
    }
}

/// Plain, invariant-free mirror of [`ExperienceSubmission`] used when a form
/// is loaded from a file or another external source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceDraft {
    pub student_name: String,
    pub roll_number: String,
    pub department: String,
    pub personal_email: String,
    pub contact_number: String,
    pub company_name: String,
    pub company_type: Option<CompanyType>,
    pub salary: String,
    pub intern_offered: bool,
    pub has_bond: bool,
    pub bond_details: String,
    pub rounds: Vec<InterviewRound>,
    pub overall_experience: String,
    pub general_tips: String,
    pub areas_to_prepare_final: String,
    pub suggested_resources: String,
    pub final_result: FinalResult,
}

impl TryFrom<ExperienceDraft> for ExperienceSubmission {
    type Error = CoreError;

    fn try_from(draft: ExperienceDraft) -> Result<Self, Self::Error> {
        Self::from_draft(draft)
    }
}

/// Partial form laid over an existing one, e.g. a hand-written draft file
/// applied to a stored experience.
///
/// Absent fields keep the base value. So do blank text fields and an empty
/// round list; flags and the result only change when given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperiencePatch {
    pub student_name: Option<String>,
    pub roll_number: Option<String>,
    pub department: Option<String>,
    pub personal_email: Option<String>,
    pub contact_number: Option<String>,
    pub company_name: Option<String>,
    pub company_type: Option<CompanyType>,
    pub salary: Option<String>,
    pub intern_offered: Option<bool>,
    pub has_bond: Option<bool>,
    pub bond_details: Option<String>,
    pub rounds: Vec<InterviewRound>,
    pub overall_experience: Option<String>,
    pub general_tips: Option<String>,
    pub areas_to_prepare_final: Option<String>,
    pub suggested_resources: Option<String>,
    pub final_result: Option<FinalResult>,
}

impl ExperiencePatch {
    pub fn apply_to(self, base: &ExperienceSubmission) -> Result<ExperienceSubmission, CoreError> {
        fn text(patch: Option<String>, kept: &str) -> String {
            patch
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| kept.to_string())
        }

        let rounds = if self.rounds.is_empty() {
            base.rounds().to_vec()
        } else {
            self.rounds
        };

        ExperienceSubmission::from_draft(ExperienceDraft {
            student_name: text(self.student_name, &base.student_name),
            roll_number: text(self.roll_number, &base.roll_number),
            department: text(self.department, &base.department),
            personal_email: text(self.personal_email, &base.personal_email),
            contact_number: text(self.contact_number, &base.contact_number),
            company_name: text(self.company_name, &base.company_name),
            company_type: self.company_type.or(base.company_type),
            salary: text(self.salary, &base.salary),
            intern_offered: self.intern_offered.unwrap_or(base.intern_offered),
            has_bond: self.has_bond.unwrap_or(base.has_bond),
            bond_details: text(self.bond_details, &base.bond_details),
            rounds,
            overall_experience: text(self.overall_experience, &base.overall_experience),
            general_tips: text(self.general_tips, &base.general_tips),
            areas_to_prepare_final: text(self.areas_to_prepare_final, &base.areas_to_prepare_final),
            suggested_resources: text(self.suggested_resources, &base.suggested_resources),
            final_result: self.final_result.unwrap_or(base.final_result),
        })
    }
}
