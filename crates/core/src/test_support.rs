//! Shared fixtures for unit tests.

use crate::experience::{CompanyType, ExperienceSubmission, RoundEdit};

/// A form that passes validation, with `rounds` fully filled rounds.
pub(crate) fn complete_form(rounds: usize) -> ExperienceSubmission {
    let mut form = ExperienceSubmission::new();
    form.student_name = "Asha Raman".into();
    form.roll_number = "21CS042".into();
    form.department = "CSE".into();
    form.personal_email = "asha@example.com".into();
    form.contact_number = "9876543210".into();
    form.company_name = "Acme".into();
    form.company_type = Some(CompanyType::Product);
    form.salary = "12 LPA".into();
    form.overall_experience = "Smooth".into();
    form.general_tips = "Practice".into();
    form.areas_to_prepare_final = "DSA".into();
    form.suggested_resources = "Books".into();
    form.set_total_rounds(rounds);
    for idx in 0..rounds {
        form.update_round(idx, RoundEdit::Name(format!("Round {}", idx + 1)));
        form.update_round(idx, RoundEdit::Details("details".into()));
        form.update_round(idx, RoundEdit::TopicsCovered("arrays".into()));
        form.update_round(idx, RoundEdit::Duration("1h".into()));
        form.update_round(idx, RoundEdit::Comments("ok".into()));
        form.update_round(idx, RoundEdit::StudyLinks("https://x.example".into()));
    }
    form
}
