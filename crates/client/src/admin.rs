//! `/admin` routes: administrator login and user/mentor management.

use reqwest::Method;

use placement_core::registration::{AdminLoginRequest, AdminProfile, CreateMentorRequest};
use placement_core::types::DbId;
use placement_core::user::{Mentor, UserProfile};

use crate::api::{ApiError, PlacementApi};

impl PlacementApi {
    pub async fn admin_login(&self, credentials: &AdminLoginRequest) -> Result<AdminProfile, ApiError> {
        Self::fetch(self.post("/admin/login").json(credentials)).await
    }

    // ---- mentors ----

    pub async fn admin_list_mentors(&self) -> Result<Vec<Mentor>, ApiError> {
        Self::fetch(self.get("/admin/mentors")).await
    }

    pub async fn admin_get_mentor(&self, id: &str) -> Result<Mentor, ApiError> {
        Self::fetch(self.request_with_segment(Method::GET, "/admin/mentors", id)?).await
    }

    pub async fn admin_create_mentor(&self, request: &CreateMentorRequest) -> Result<Mentor, ApiError> {
        Self::fetch(self.post("/admin/mentors").json(request)).await
    }

    pub async fn admin_update_mentor(
        &self,
        id: &str,
        request: &CreateMentorRequest,
    ) -> Result<Mentor, ApiError> {
        Self::fetch(
            self.request_with_segment(Method::PUT, "/admin/mentors", id)?
                .json(request),
        )
        .await
    }

    pub async fn admin_delete_mentor(&self, id: &str) -> Result<(), ApiError> {
        Self::execute(self.request_with_segment(Method::DELETE, "/admin/mentors", id)?).await
    }

    pub async fn admin_mentors_by_department(&self, department_id: &str) -> Result<Vec<Mentor>, ApiError> {
        Self::fetch(self.request_with_segment(Method::GET, "/admin/mentors/department", department_id)?)
            .await
    }

    pub async fn admin_mentors_by_company(&self, company_name: &str) -> Result<Vec<Mentor>, ApiError> {
        Self::fetch(
            self.get("/admin/mentors/company")
                .query(&[("companyName", company_name)]),
        )
        .await
    }

    // ---- users ----

    pub async fn admin_list_users(&self) -> Result<Vec<UserProfile>, ApiError> {
        Self::fetch(self.get("/admin/users")).await
    }

    pub async fn admin_get_user(&self, id: DbId) -> Result<UserProfile, ApiError> {
        Self::fetch(self.get(&format!("/admin/users/{id}"))).await
    }

    pub async fn admin_update_user(&self, user: &UserProfile) -> Result<UserProfile, ApiError> {
        Self::fetch(self.put(&format!("/admin/users/{}", user.id)).json(user)).await
    }

    pub async fn admin_delete_user(&self, id: DbId) -> Result<(), ApiError> {
        Self::execute(self.delete(&format!("/admin/users/{id}"))).await
    }

    /// Flip the user's active flag; returns the updated profile.
    pub async fn admin_toggle_user_active(&self, id: DbId) -> Result<UserProfile, ApiError> {
        Self::fetch(self.patch(&format!("/admin/users/{id}/activate"))).await
    }
}
