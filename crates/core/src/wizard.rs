//! Experience wizard: step definitions, step controller and the open
//! wizard session.
//!
//! The wizard is a fixed, linear sequence of four steps. Navigation is free
//! in both directions and never validates or clears data; the whole form is
//! validated once, on submit (see [`crate::submission_validation`]).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::experience::ExperienceSubmission;
use crate::submission_validation::{validate_submission, ValidationFailure};
use crate::transport::{encode_submission, ExperiencePayload};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The four steps of the experience wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    StudentInfo,
    RoundsSetup,
    RoundDetails,
    Summary,
}

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 4;

impl WizardStep {
    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::StudentInfo),
            2 => Ok(Self::RoundsSetup),
            3 => Ok(Self::RoundDetails),
            4 => Ok(Self::Summary),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::StudentInfo => 1,
            Self::RoundsSetup => 2,
            Self::RoundDetails => 3,
            Self::Summary => 4,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::StudentInfo => "Student Info",
            Self::RoundsSetup => "Rounds Setup",
            Self::RoundDetails => "Round Details",
            Self::Summary => "Summary",
        }
    }
}

// ---------------------------------------------------------------------------
// Step controller
// ---------------------------------------------------------------------------

/// Tracks the current step. Moves clamp at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepController {
    current: WizardStep,
}

impl Default for StepController {
    fn default() -> Self {
        Self {
            current: WizardStep::StudentInfo,
        }
    }
}

impl StepController {
    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Advance one step; no-op on the last step.
    pub fn next(&mut self) -> WizardStep {
        let n = (self.current.to_number() + 1).min(MAX_STEP);
        self.current = WizardStep::from_number(n).unwrap_or(WizardStep::Summary);
        self.current
    }

    /// Go back one step; no-op on the first step.
    pub fn previous(&mut self) -> WizardStep {
        let n = self.current.to_number().saturating_sub(1).max(MIN_STEP);
        self.current = WizardStep::from_number(n).unwrap_or(WizardStep::StudentInfo);
        self.current
    }

    pub fn is_final(&self) -> bool {
        self.current == WizardStep::Summary
    }

    pub fn reset(&mut self) {
        self.current = WizardStep::StudentInfo;
    }
}

// ---------------------------------------------------------------------------
// Wizard session
// ---------------------------------------------------------------------------

/// Whether the wizard creates a new experience or edits a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit { id: DbId },
}

/// Why a submit attempt did not start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejection {
    /// A previous submission from this wizard is still outstanding.
    #[error("A submission is already in progress")]
    InFlight,

    /// Submitting is only offered on the summary step.
    #[error("Cannot submit from step {} ({}); go to the summary step first", .0.to_number(), .0.label())]
    NotOnFinalStep(WizardStep),

    #[error("{0}")]
    Invalid(ValidationFailure),

    #[error("Could not prepare submission: {0}")]
    Encoding(String),
}

/// One open wizard: the form being edited, its step and submit state.
///
/// Each open constructs a fresh wizard; cancelling is dropping it.
#[derive(Debug, Clone)]
pub struct ExperienceWizard {
    mode: WizardMode,
    steps: StepController,
    form: ExperienceSubmission,
    submitting: bool,
}

impl ExperienceWizard {
    pub fn create(form: ExperienceSubmission) -> Self {
        Self {
            mode: WizardMode::Create,
            steps: StepController::default(),
            form,
            submitting: false,
        }
    }

    pub fn edit(id: DbId, form: ExperienceSubmission) -> Self {
        Self {
            mode: WizardMode::Edit { id },
            steps: StepController::default(),
            form,
            submitting: false,
        }
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn step(&self) -> WizardStep {
        self.steps.current()
    }

    pub fn next(&mut self) -> WizardStep {
        self.steps.next()
    }

    pub fn previous(&mut self) -> WizardStep {
        self.steps.previous()
    }

    pub fn form(&self) -> &ExperienceSubmission {
        &self.form
    }

    /// Mutable access for field edits and round/question operations.
    pub fn form_mut(&mut self) -> &mut ExperienceSubmission {
        &mut self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate the whole form and, if valid, mark a submission as
    /// outstanding and return the request body.
    ///
    /// Refused while another submission is outstanding or when the wizard
    /// is not on the summary step. A refusal leaves the wizard exactly as it
    /// was.
    pub fn begin_submit(
        &mut self,
        placement_year: i32,
    ) -> Result<ExperiencePayload, SubmitRejection> {
        if self.submitting {
            tracing::warn!("Ignoring submit while a submission is in progress");
            return Err(SubmitRejection::InFlight);
        }
        if !self.steps.is_final() {
            return Err(SubmitRejection::NotOnFinalStep(self.step()));
        }
        validate_submission(&self.form).map_err(SubmitRejection::Invalid)?;
        let payload = encode_submission(&self.form, placement_year)
            .map_err(|e| SubmitRejection::Encoding(e.to_string()))?;
        self.submitting = true;
        Ok(payload)
    }

    /// Release the submit guard after a failed request; the form and the
    /// current step are kept so the user can retry.
    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }

    /// Take the form out, discarding the wizard.
    pub fn into_form(self) -> ExperienceSubmission {
        self.form
    }
}
