//! `/placement-experiences` routes, the backend of the experience wizard.

use std::collections::BTreeMap;

use reqwest::Method;

use placement_core::experience::FinalResult;
use placement_core::transport::{ExperiencePayload, ExperienceRecord};
use placement_core::types::DbId;

use crate::api::{ApiError, PlacementApi};

/// Records keyed by placement year.
pub type ByYear = BTreeMap<i32, Vec<ExperienceRecord>>;

impl PlacementApi {
    pub async fn list_experiences(&self) -> Result<Vec<ExperienceRecord>, ApiError> {
        Self::fetch(self.get("/placement-experiences")).await
    }

    pub async fn get_experience(&self, id: DbId) -> Result<ExperienceRecord, ApiError> {
        Self::fetch(self.get(&format!("/placement-experiences/{id}"))).await
    }

    pub async fn create_experience(
        &self,
        payload: &ExperiencePayload,
    ) -> Result<ExperienceRecord, ApiError> {
        Self::fetch(self.post("/placement-experiences").json(payload)).await
    }

    pub async fn update_experience(
        &self,
        id: DbId,
        payload: &ExperiencePayload,
    ) -> Result<ExperienceRecord, ApiError> {
        Self::fetch(self.put(&format!("/placement-experiences/{id}")).json(payload)).await
    }

    pub async fn delete_experience(&self, id: DbId) -> Result<(), ApiError> {
        Self::execute(self.delete(&format!("/placement-experiences/{id}"))).await
    }

    pub async fn search_experiences_by_company(
        &self,
        name: &str,
    ) -> Result<Vec<ExperienceRecord>, ApiError> {
        Self::fetch(
            self.get("/placement-experiences/search/company")
                .query(&[("name", name)]),
        )
        .await
    }

    pub async fn search_experiences_by_department(
        &self,
        name: &str,
    ) -> Result<Vec<ExperienceRecord>, ApiError> {
        Self::fetch(
            self.get("/placement-experiences/search/department")
                .query(&[("name", name)]),
        )
        .await
    }

    pub async fn experiences_by_result(
        &self,
        result: FinalResult,
    ) -> Result<Vec<ExperienceRecord>, ApiError> {
        Self::fetch(
            self.get("/placement-experiences/filter/result")
                .query(&[("result", result.as_str())]),
        )
        .await
    }

    /// Company name to year to records, grouped server-side.
    pub async fn experiences_grouped_by_company(
        &self,
    ) -> Result<BTreeMap<String, ByYear>, ApiError> {
        Self::fetch(self.get("/placement-experiences/grouped/company")).await
    }

    /// One company's records grouped by year. The backend matches the name
    /// as a case-insensitive substring.
    pub async fn company_experiences_by_year(&self, company_name: &str) -> Result<ByYear, ApiError> {
        Self::fetch(self.request_with_segment(
            Method::GET,
            "/placement-experiences/company",
            company_name,
        )?)
        .await
    }
}
