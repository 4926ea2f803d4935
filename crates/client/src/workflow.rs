//! Opening, submitting and deleting experiences through the wizard.
//!
//! The network calls sit only at the wizard's edges: the department lookup
//! when it opens, the fetch-for-edit, and the final create or update. There
//! are no retries; a failed submit leaves the form intact for a manual retry.

use async_trait::async_trait;
use chrono::NaiveDate;

use placement_core::department::Department;
use placement_core::experience::ExperienceSubmission;
use placement_core::session::Session;
use placement_core::transport::{
    decode_record, default_placement_year, ExperiencePayload, ExperienceRecord,
};
use placement_core::types::DbId;
use placement_core::wizard::{ExperienceWizard, SubmitRejection, WizardMode};

use crate::api::{ApiError, PlacementApi};

const CREATE_FAILED: &str = "Failed to submit experience. Please check all required fields.";
const UPDATE_FAILED: &str = "Failed to update experience";
const DEPARTMENTS_FAILED: &str = "Could not load departments; enter the department code manually";

/// The backend operations the wizard needs.
#[async_trait]
pub trait ExperienceBackend: Send + Sync {
    async fn list_departments(&self) -> Result<Vec<Department>, ApiError>;
    async fn get_experience(&self, id: DbId) -> Result<ExperienceRecord, ApiError>;
    async fn create_experience(&self, payload: &ExperiencePayload) -> Result<ExperienceRecord, ApiError>;
    async fn update_experience(
        &self,
        id: DbId,
        payload: &ExperiencePayload,
    ) -> Result<ExperienceRecord, ApiError>;
    async fn delete_experience(&self, id: DbId) -> Result<(), ApiError>;
}

#[async_trait]
impl ExperienceBackend for PlacementApi {
    async fn list_departments(&self) -> Result<Vec<Department>, ApiError> {
        PlacementApi::list_departments(self).await
    }

    async fn get_experience(&self, id: DbId) -> Result<ExperienceRecord, ApiError> {
        PlacementApi::get_experience(self, id).await
    }

    async fn create_experience(&self, payload: &ExperiencePayload) -> Result<ExperienceRecord, ApiError> {
        PlacementApi::create_experience(self, payload).await
    }

    async fn update_experience(
        &self,
        id: DbId,
        payload: &ExperiencePayload,
    ) -> Result<ExperienceRecord, ApiError> {
        PlacementApi::update_experience(self, id, payload).await
    }

    async fn delete_experience(&self, id: DbId) -> Result<(), ApiError> {
        PlacementApi::delete_experience(self, id).await
    }
}

/// A freshly opened wizard with its department selector options.
#[derive(Debug)]
pub struct OpenedWizard {
    pub wizard: ExperienceWizard,
    pub departments: Vec<Department>,
    /// Non-blocking message for the user, e.g. a failed lookup.
    pub notice: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Refused locally; nothing was sent.
    #[error(transparent)]
    Rejected(#[from] SubmitRejection),

    /// The request failed; the wizard's form is unchanged.
    #[error("{message}")]
    Backend {
        message: String,
        #[source]
        source: ApiError,
    },
}

pub struct ExperienceWorkflow<B> {
    backend: B,
}

impl<B: ExperienceBackend> ExperienceWorkflow<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Open an empty wizard, pre-filled from the signed-in user.
    ///
    /// A failed department lookup still opens the wizard, with an empty
    /// selector and a notice.
    pub async fn open_create(&self, session: &Session) -> OpenedWizard {
        let (departments, notice) = self.load_departments().await;
        let form = match session.user() {
            Some(user) => ExperienceSubmission::prefilled(user, &departments),
            None => ExperienceSubmission::new(),
        };
        OpenedWizard {
            wizard: ExperienceWizard::create(form),
            departments,
            notice,
        }
    }

    /// Fetch a stored experience and open it for editing at step one.
    ///
    /// Malformed round data in the record does not fail the open.
    pub async fn open_edit(&self, id: DbId) -> Result<OpenedWizard, ApiError> {
        let record = self.backend.get_experience(id).await.inspect_err(|e| {
            tracing::error!(experience_id = id, error = %e, "Failed to load experience for editing");
        })?;
        let (departments, notice) = self.load_departments().await;
        Ok(OpenedWizard {
            wizard: ExperienceWizard::edit(id, decode_record(&record)),
            departments,
            notice,
        })
    }

    /// Validate and send the wizard's form.
    ///
    /// On success the server's record is returned and the wizard should be
    /// dropped. On a backend failure the submit guard is released and the
    /// form is kept so the user can retry.
    pub async fn submit(
        &self,
        wizard: &mut ExperienceWizard,
        session: &Session,
        today: NaiveDate,
    ) -> Result<ExperienceRecord, SubmitError> {
        let placement_year = default_placement_year(session.user(), today);
        let payload = wizard.begin_submit(placement_year)?;

        let (result, fallback) = match wizard.mode() {
            WizardMode::Create => (self.backend.create_experience(&payload).await, CREATE_FAILED),
            WizardMode::Edit { id } => (
                self.backend.update_experience(id, &payload).await,
                UPDATE_FAILED,
            ),
        };

        match result {
            Ok(record) => {
                tracing::info!(
                    experience_id = ?record.id,
                    company = %payload.company_name,
                    rounds = payload.total_rounds,
                    "Experience submitted"
                );
                Ok(record)
            }
            Err(source) => {
                wizard.submit_failed();
                tracing::error!(error = %source, "Experience submission failed");
                Err(SubmitError::Backend {
                    message: source.user_message(fallback),
                    source,
                })
            }
        }
    }

    pub async fn delete(&self, id: DbId) -> Result<(), ApiError> {
        self.backend.delete_experience(id).await?;
        tracing::info!(experience_id = id, "Experience deleted");
        Ok(())
    }

    async fn load_departments(&self) -> (Vec<Department>, Option<String>) {
        match self.backend.list_departments().await {
            Ok(departments) => (departments, None),
            Err(e) => {
                tracing::warn!(error = %e, "Department lookup failed, opening wizard without it");
                (Vec::new(), Some(DEPARTMENTS_FAILED.to_string()))
            }
        }
    }
}
