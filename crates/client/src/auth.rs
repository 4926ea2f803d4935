//! `/auth` routes: registration, login, profiles and mentor moderation.

use reqwest::Method;

use placement_core::registration::{
    AuthResponse, ConvertToMentorRequest, ForgotPasswordRequest, LoginRequest, MentorCodeRequest,
    OtpRequest, OtpResponse, Registration, ResetPasswordRequest, UpdateProfileRequest,
    VerifyMentorCodeRequest, VerifyOtpRequest,
};
use placement_core::types::DbId;
use placement_core::user::UserProfile;

use crate::api::{ApiError, PlacementApi};

impl PlacementApi {
    pub async fn register(&self, form: &Registration) -> Result<AuthResponse, ApiError> {
        Self::fetch(self.post("/auth/register").json(form)).await
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        Self::fetch(self.post("/auth/login").json(credentials)).await
    }

    pub async fn get_user(&self, id: DbId) -> Result<UserProfile, ApiError> {
        Self::fetch(self.get(&format!("/auth/user/{id}"))).await
    }

    pub async fn update_profile(
        &self,
        id: DbId,
        changes: &UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        Self::fetch(self.put(&format!("/auth/user/{id}/profile")).json(changes)).await
    }

    pub async fn update_user(&self, user: &UserProfile) -> Result<UserProfile, ApiError> {
        Self::fetch(self.put(&format!("/auth/user/{}", user.id)).json(user)).await
    }

    pub async fn convert_to_mentor(
        &self,
        id: DbId,
        request: &ConvertToMentorRequest,
    ) -> Result<UserProfile, ApiError> {
        Self::fetch(
            self.put(&format!("/auth/user/{id}/convert-to-mentor"))
                .json(request),
        )
        .await
    }

    // ---- mentors ----

    /// Approved mentors only.
    pub async fn list_mentors(&self) -> Result<Vec<UserProfile>, ApiError> {
        Self::fetch(self.get("/auth/mentors")).await
    }

    pub async fn list_pending_mentors(&self) -> Result<Vec<UserProfile>, ApiError> {
        Self::fetch(self.get("/auth/mentors/pending")).await
    }

    /// Approved and pending mentors.
    pub async fn list_all_mentors(&self) -> Result<Vec<UserProfile>, ApiError> {
        Self::fetch(self.get("/auth/mentors/all")).await
    }

    pub async fn approve_mentor(&self, id: DbId) -> Result<(), ApiError> {
        Self::execute(self.put(&format!("/auth/mentors/{id}/approve"))).await
    }

    pub async fn reject_mentor(&self, id: DbId) -> Result<(), ApiError> {
        Self::execute(self.delete(&format!("/auth/mentors/{id}/reject"))).await
    }

    pub async fn mentors_by_department(
        &self,
        department_id: &str,
    ) -> Result<Vec<UserProfile>, ApiError> {
        Self::fetch(self.request_with_segment(Method::GET, "/auth/mentors/department", department_id)?)
            .await
    }

    pub async fn mentors_by_company(&self, company_name: &str) -> Result<Vec<UserProfile>, ApiError> {
        Self::fetch(
            self.get("/auth/mentors/company")
                .query(&[("companyName", company_name)]),
        )
        .await
    }

    // ---- e-mail verification ----

    pub async fn send_otp(&self, email: &str) -> Result<OtpResponse, ApiError> {
        let body = OtpRequest {
            email: email.to_string(),
        };
        Self::fetch(self.post("/auth/send-otp").json(&body)).await
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<OtpResponse, ApiError> {
        let body = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        Self::fetch(self.post("/auth/verify-otp").json(&body)).await
    }

    pub async fn check_institution_email(&self, email: &str) -> Result<bool, ApiError> {
        let response: OtpResponse =
            Self::fetch(self.get("/auth/check-gct-email").query(&[("email", email)])).await?;
        Ok(response.is_institution_email.unwrap_or(false))
    }

    pub async fn send_mentor_verification_code(&self, email: &str) -> Result<OtpResponse, ApiError> {
        let body = MentorCodeRequest {
            email: email.to_string(),
        };
        Self::fetch(self.post("/auth/mentors/send-verification-code").json(&body)).await
    }

    pub async fn verify_mentor_code(&self, email: &str, code: &str) -> Result<OtpResponse, ApiError> {
        let body = VerifyMentorCodeRequest {
            email: email.to_string(),
            verification_code: code.to_string(),
        };
        Self::fetch(self.post("/auth/mentors/verify-code").json(&body)).await
    }

    // ---- password reset ----

    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let body = ForgotPasswordRequest {
            email: email.to_string(),
        };
        Self::fetch_text(self.post("/auth/forgot-password").json(&body)).await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<String, ApiError> {
        Self::fetch_text(self.post("/auth/reset-password").json(request)).await
    }
}
