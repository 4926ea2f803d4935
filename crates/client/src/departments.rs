//! `/departments` routes.

use reqwest::Method;

use placement_core::department::{Department, DepartmentGroup, DepartmentInput};

use crate::api::{ApiError, PlacementApi};

impl PlacementApi {
    pub async fn list_departments(&self) -> Result<Vec<Department>, ApiError> {
        Self::fetch(self.get("/departments")).await
    }

    pub async fn get_department(&self, id: &str) -> Result<Department, ApiError> {
        Self::fetch(self.request_with_segment(Method::GET, "/departments", id)?).await
    }

    pub async fn create_department(&self, input: &DepartmentInput) -> Result<Department, ApiError> {
        Self::fetch(self.post("/departments").json(input)).await
    }

    pub async fn update_department(
        &self,
        id: &str,
        input: &DepartmentInput,
    ) -> Result<Department, ApiError> {
        Self::fetch(
            self.request_with_segment(Method::PUT, "/departments", id)?
                .json(input),
        )
        .await
    }

    pub async fn delete_department(&self, id: &str) -> Result<(), ApiError> {
        Self::execute(self.request_with_segment(Method::DELETE, "/departments", id)?).await
    }

    /// Departments sharing a group with `id`, as computed by the backend.
    pub async fn related_departments(&self, id: &str) -> Result<Vec<Department>, ApiError> {
        Self::fetch(self.request_with_segments(Method::GET, "/departments", &[id, "related"])?).await
    }

    pub async fn departments_by_group(
        &self,
        group: DepartmentGroup,
    ) -> Result<Vec<Department>, ApiError> {
        Self::fetch(self.get(&format!("/departments/group/{}", group.as_str()))).await
    }
}
