//! Final-submit validation of the experience form.
//!
//! Runs once, against the whole aggregate, when the user submits from the
//! last wizard step. Checks run in a fixed order and stop at the first
//! failure, so exactly one problem is reported per attempt: top-level
//! fields first, then each round in order. Platform, cleared flag and the
//! question annotations are never required.

use crate::error::CoreError;
use crate::experience::{ExperienceSubmission, InterviewRound};

/// Top-level form fields that are checked for presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionField {
    StudentName,
    RollNumber,
    Department,
    PersonalEmail,
    ContactNumber,
    CompanyName,
    CompanyType,
    Salary,
    BondDetails,
    OverallExperience,
    GeneralTips,
    AreasToPrepare,
    SuggestedResources,
    FinalResult,
}

impl SubmissionField {
    pub fn label(self) -> &'static str {
        match self {
            Self::StudentName => "Student Name",
            Self::RollNumber => "Roll Number",
            Self::Department => "Department",
            Self::PersonalEmail => "Personal Email",
            Self::ContactNumber => "Contact Number",
            Self::CompanyName => "Company Name",
            Self::CompanyType => "Company Type",
            Self::Salary => "Salary",
            Self::BondDetails => "Bond Details",
            Self::OverallExperience => "Overall Experience",
            Self::GeneralTips => "General Tips",
            Self::AreasToPrepare => "Areas to Prepare",
            Self::SuggestedResources => "Suggested Resources",
            Self::FinalResult => "Result Status",
        }
    }
}

/// Round fields that are checked for presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundFieldName {
    Name,
    Details,
    TopicsCovered,
    Duration,
    Comments,
    StudyLinks,
}

impl RoundFieldName {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Details => "details",
            Self::TopicsCovered => "topics covered",
            Self::Duration => "duration",
            Self::Comments => "comments",
            Self::StudyLinks => "study links",
        }
    }

    fn value(self, round: &InterviewRound) -> &str {
        match self {
            Self::Name => &round.round_name,
            Self::Details => &round.round_details,
            Self::TopicsCovered => &round.topics_covered,
            Self::Duration => &round.duration,
            Self::Comments => &round.comments,
            Self::StudyLinks => &round.study_links,
        }
    }
}

/// Round checks, in reporting order.
const ROUND_CHECKS: [RoundFieldName; 6] = [
    RoundFieldName::Name,
    RoundFieldName::Details,
    RoundFieldName::TopicsCovered,
    RoundFieldName::Duration,
    RoundFieldName::Comments,
    RoundFieldName::StudyLinks,
];

/// Which field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FailedField {
    #[error("{} is required", .0.label())]
    Submission(SubmissionField),
    #[error("Round {round_number} {} is required", .field.label())]
    Round {
        round_number: u32,
        field: RoundFieldName,
    },
}

/// The first failed check of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}")]
pub struct ValidationFailure {
    pub field: FailedField,
}

impl From<ValidationFailure> for CoreError {
    fn from(failure: ValidationFailure) -> Self {
        CoreError::Validation(failure.to_string())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate the whole form, reporting only the first missing field.
pub fn validate_submission(form: &ExperienceSubmission) -> Result<(), ValidationFailure> {
    let top_level: [(SubmissionField, bool); 14] = [
        (SubmissionField::StudentName, is_blank(&form.student_name)),
        (SubmissionField::RollNumber, is_blank(&form.roll_number)),
        (SubmissionField::Department, is_blank(&form.department)),
        (SubmissionField::PersonalEmail, is_blank(&form.personal_email)),
        (SubmissionField::ContactNumber, is_blank(&form.contact_number)),
        (SubmissionField::CompanyName, is_blank(&form.company_name)),
        (SubmissionField::CompanyType, form.company_type.is_none()),
        (SubmissionField::Salary, is_blank(&form.salary)),
        (
            SubmissionField::BondDetails,
            form.has_bond && is_blank(&form.bond_details),
        ),
        (
            SubmissionField::OverallExperience,
            is_blank(&form.overall_experience),
        ),
        (SubmissionField::GeneralTips, is_blank(&form.general_tips)),
        (
            SubmissionField::AreasToPrepare,
            is_blank(&form.areas_to_prepare_final),
        ),
        (
            SubmissionField::SuggestedResources,
            is_blank(&form.suggested_resources),
        ),
        // Always present in the typed form; kept so the order stays explicit.
        (SubmissionField::FinalResult, false),
    ];

    if let Some((field, _)) = top_level.into_iter().find(|(_, missing)| *missing) {
        return Err(ValidationFailure {
            field: FailedField::Submission(field),
        });
    }

    for round in form.rounds() {
        if let Some(field) = ROUND_CHECKS
            .into_iter()
            .find(|field| is_blank(field.value(round)))
        {
            return Err(ValidationFailure {
                field: FailedField::Round {
                    round_number: round.round_number,
                    field,
                },
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experience::RoundEdit;
    use crate::test_support::complete_form;
    use assert_matches::assert_matches;

    #[test]
    fn complete_form_is_valid() {
        assert!(validate_submission(&complete_form(3)).is_ok());
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut form = complete_form(1);
        form.roll_number = "   \t".into();
        let failure = validate_submission(&form).unwrap_err();
        assert_eq!(
            failure.field,
            FailedField::Submission(SubmissionField::RollNumber)
        );
        assert_eq!(failure.to_string(), "Roll Number is required");
    }

    #[test]
    fn top_level_fields_are_checked_before_rounds() {
        let mut form = complete_form(2);
        form.company_name.clear();
        form.update_round(1, RoundEdit::Duration(String::new()));
        let failure = validate_submission(&form).unwrap_err();
        assert_eq!(
            failure.field,
            FailedField::Submission(SubmissionField::CompanyName)
        );
    }

    #[test]
    fn first_top_level_failure_wins() {
        let mut form = complete_form(1);
        form.student_name.clear();
        form.suggested_resources.clear();
        assert_matches!(
            validate_submission(&form),
            Err(ValidationFailure {
                field: FailedField::Submission(SubmissionField::StudentName)
            })
        );
    }

    #[test]
    fn missing_company_type_is_reported() {
        let mut form = complete_form(1);
        form.company_type = None;
        assert_eq!(
            validate_submission(&form).unwrap_err().to_string(),
            "Company Type is required"
        );
    }

    #[test]
    fn bond_details_required_only_with_bond() {
        let mut form = complete_form(1);
        assert!(validate_submission(&form).is_ok());
        form.has_bond = true;
        assert_eq!(
            validate_submission(&form).unwrap_err().field,
            FailedField::Submission(SubmissionField::BondDetails)
        );
        form.bond_details = "2 years".into();
        assert!(validate_submission(&form).is_ok());
    }

    #[test]
    fn round_failure_names_round_and_field() {
        let mut form = complete_form(3);
        form.update_round(1, RoundEdit::Duration(" ".into()));
        form.update_round(2, RoundEdit::Name(String::new()));
        let failure = validate_submission(&form).unwrap_err();
        assert_eq!(
            failure.field,
            FailedField::Round {
                round_number: 2,
                field: RoundFieldName::Duration
            }
        );
        assert_eq!(failure.to_string(), "Round 2 duration is required");
    }

    #[test]
    fn round_fields_checked_in_order() {
        let mut form = complete_form(1);
        form.update_round(0, RoundEdit::StudyLinks(String::new()));
        form.update_round(0, RoundEdit::TopicsCovered(String::new()));
        assert_eq!(
            validate_submission(&form).unwrap_err().field,
            FailedField::Round {
                round_number: 1,
                field: RoundFieldName::TopicsCovered
            }
        );
    }

    #[test]
    fn blank_questions_are_allowed() {
        let mut form = complete_form(1);
        form.add_question(0);
        assert!(validate_submission(&form).is_ok());
    }

    #[test]
    fn failure_converts_to_core_validation_error() {
        let mut form = complete_form(1);
        form.salary.clear();
        let err: CoreError = validate_submission(&form).unwrap_err().into();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Salary is required");
    }

    #[test]
    fn failure_is_a_std_error_worded_like_its_field() {
        let failure = ValidationFailure {
            field: FailedField::Round {
                round_number: 3,
                field: RoundFieldName::StudyLinks,
            },
        };
        assert_eq!(failure.field.to_string(), "Round 3 study links is required");
        let err: &dyn std::error::Error = &failure;
        assert_eq!(err.to_string(), "Round 3 study links is required");
        assert_eq!(
            FailedField::Submission(SubmissionField::FinalResult).to_string(),
            "Result Status is required"
        );
    }
}
