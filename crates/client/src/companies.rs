//! `/companies` routes.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use placement_core::types::{optional_id_as_text, Timestamp};

use crate::api::{ApiError, PlacementApi};

/// A company known to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    /// Opaque identifier; the backend emits it as text or as a number.
    #[serde(deserialize_with = "optional_id_as_text")]
    pub id: Option<String>,
    pub company_name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub headquarters: Option<String>,
    pub experience_count: Option<i64>,
    pub created_at: Option<Timestamp>,
}

impl PlacementApi {
    pub async fn list_companies(&self) -> Result<Vec<Company>, ApiError> {
        Self::fetch(self.get("/companies")).await
    }

    pub async fn get_company(&self, id: &str) -> Result<Company, ApiError> {
        Self::fetch(self.request_with_segment(Method::GET, "/companies", id)?).await
    }

    pub async fn company_by_name(&self, name: &str) -> Result<Company, ApiError> {
        Self::fetch(self.request_with_segment(Method::GET, "/companies/name", name)?).await
    }

    pub async fn search_companies(&self, query: &str) -> Result<Vec<Company>, ApiError> {
        Self::fetch(self.get("/companies/search").query(&[("query", query)])).await
    }

    pub async fn company_exists(&self, company_name: &str) -> Result<bool, ApiError> {
        Self::fetch(
            self.get("/companies/exists")
                .query(&[("companyName", company_name)]),
        )
        .await
    }
}
