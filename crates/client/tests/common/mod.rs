#![allow(dead_code)]

//! In-process stand-in for the placement backend, served by axum on an
//! ephemeral port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use placement_core::experience::{CompanyType, ExperienceSubmission, RoundEdit};

type Reply = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

/// Shared state of the mock backend.
#[derive(Clone, Default)]
pub struct MockBackend {
    pub experiences: Arc<Mutex<Vec<Value>>>,
    /// Every create/update body received, in order.
    pub received: Arc<Mutex<Vec<Value>>>,
    pub fail_departments: bool,
    pub fail_writes: bool,
}

impl MockBackend {
    pub fn seed(&self, record: Value) {
        self.experiences.lock().unwrap().push(record);
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

/// Serve `backend` on `127.0.0.1:0`; returns the API base URL.
pub async fn spawn(backend: MockBackend) -> String {
    let app = Router::new()
        .route("/api/departments", get(departments).post(create_department))
        .route(
            "/api/departments/{id}",
            get(get_department)
                .put(update_department)
                .delete(delete_department),
        )
        .route("/api/departments/{id}/related", get(related_departments))
        .route("/api/departments/group/{group}", get(departments_in_group))
        .route("/api/admin/login", post(admin_login))
        .route("/api/admin/mentors", get(admin_mentors).post(admin_create_mentor))
        .route(
            "/api/admin/mentors/{id}",
            get(admin_get_mentor)
                .put(admin_update_mentor)
                .delete(no_content),
        )
        .route(
            "/api/admin/mentors/department/{department_id}",
            get(admin_mentors_in_department),
        )
        .route("/api/admin/mentors/company", get(admin_mentors_at_company))
        .route("/api/admin/users", get(admin_users))
        .route(
            "/api/admin/users/{id}",
            get(admin_get_user).put(admin_update_user).delete(no_content),
        )
        .route("/api/admin/users/{id}/activate", patch(admin_toggle_user))
        .route("/api/auth/user/{id}/profile", put(update_profile))
        .route("/api/auth/user/{id}/convert-to-mentor", put(convert_to_mentor))
        .route("/api/auth/send-otp", post(send_otp))
        .route("/api/auth/verify-otp", post(verify_otp))
        .route("/api/auth/check-gct-email", get(check_institution_email))
        .route(
            "/api/auth/mentors/send-verification-code",
            post(send_mentor_code),
        )
        .route("/api/auth/mentors/verify-code", post(verify_mentor_code))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password", post(reset_password))
        .route("/api/companies", get(malformed_companies))
        .route("/api/companies/name/{name}", get(company_by_name))
        .route("/api/auth/login", post(login))
        .route("/api/auth/mentors/pending", get(pending_mentors))
        .route("/api/auth/mentors/{id}/approve", put(approve_mentor))
        .route("/api/auth/mentors/{id}/reject", delete(no_content))
        .route("/api/auth/mentors", get(approved_mentors))
        .route("/api/auth/mentors/all", get(all_mentors))
        .route(
            "/api/auth/mentors/department/{department_id}",
            get(mentors_in_department),
        )
        .route("/api/auth/mentors/company", get(mentors_at_company))
        .route("/api/auth/user/{id}", get(admin_get_user).put(admin_update_user))
        .route(
            "/api/placement-experiences",
            get(list_experiences).post(create_experience),
        )
        .route(
            "/api/placement-experiences/search/company",
            get(search_by_company),
        )
        .route(
            "/api/placement-experiences/{id}",
            get(get_experience)
                .put(update_experience)
                .delete(delete_experience),
        )
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub fn student_json() -> Value {
    json!({
        "id": 3,
        "email": "asha@gct.ac.in",
        "fullName": "Asha Raman",
        "role": "STUDENT",
        "departmentId": 1,
        "rollNumber": "21CS042",
        "phoneNumber": "9876543210",
        "graduationYear": 2026
    })
}

/// Fill every required field of `form`. Identity fields already present
/// are kept.
pub fn complete(form: &mut ExperienceSubmission, rounds: usize) {
    for (field, value) in [
        (&mut form.student_name, "Asha Raman"),
        (&mut form.roll_number, "21CS042"),
        (&mut form.department, "CSE"),
        (&mut form.personal_email, "asha@gct.ac.in"),
        (&mut form.contact_number, "9876543210"),
    ] {
        if field.trim().is_empty() {
            *field = value.to_string();
        }
    }
    form.company_name = "Acme".into();
    form.company_type = Some(CompanyType::Product);
    form.salary = "12 LPA".into();
    form.overall_experience = "Smooth".into();
    form.general_tips = "Practice".into();
    form.areas_to_prepare_final = "DSA".into();
    form.suggested_resources = "Books".into();
    form.set_total_rounds(rounds);
    for idx in 0..rounds {
        for edit in [
            RoundEdit::Name(format!("Round {}", idx + 1)),
            RoundEdit::Details("details".into()),
            RoundEdit::TopicsCovered("arrays".into()),
            RoundEdit::Duration("1h".into()),
            RoundEdit::Comments("ok".into()),
            RoundEdit::StudyLinks("https://x.example".into()),
        ] {
            form.update_round(idx, edit);
        }
    }
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message, "status": status.as_u16() })))
}

// ---- handlers ----

async fn departments(State(backend): State<MockBackend>) -> Reply {
    if backend.fail_departments {
        return Err(error(StatusCode::SERVICE_UNAVAILABLE, "Departments unavailable"));
    }
    Ok((
        StatusCode::OK,
        Json(json!([
            { "id": "1", "departmentName": "Computer Science", "departmentCode": "CSE", "departmentGroup": "CS_IT" },
            { "id": "2", "departmentName": "Information Technology", "departmentCode": "IT", "departmentGroup": "CS_IT" }
        ])),
    ))
}

fn department_json(id: &str) -> Value {
    match id {
        "1" => json!({ "id": "1", "departmentName": "Computer Science", "departmentCode": "CSE", "departmentGroup": "CS_IT" }),
        "2" => json!({ "id": "2", "departmentName": "Information Technology", "departmentCode": "IT", "departmentGroup": "CS_IT" }),
        other => json!({ "id": other, "departmentName": "Mechanical", "departmentCode": "MECH", "departmentGroup": "MECHANICAL" }),
    }
}

async fn get_department(Path(id): Path<String>) -> Reply {
    if id == "404" {
        return Err(error(StatusCode::NOT_FOUND, "Department not found"));
    }
    Ok((StatusCode::OK, Json(department_json(&id))))
}

async fn create_department(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut created = body;
    created["id"] = json!("9");
    (StatusCode::CREATED, Json(created))
}

async fn update_department(Path(id): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    let mut updated = body;
    updated["id"] = json!(id);
    Json(updated)
}

async fn delete_department(Path(id): Path<String>) -> StatusCode {
    if id == "404" {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn related_departments(Path(id): Path<String>) -> Json<Value> {
    let related: Vec<Value> = ["1", "2"]
        .into_iter()
        .filter(|other| *other != id)
        .map(department_json)
        .collect();
    Json(Value::Array(related))
}

async fn departments_in_group(Path(group): Path<String>) -> Json<Value> {
    let all = [department_json("1"), department_json("2"), department_json("3")];
    Json(Value::Array(
        all.into_iter()
            .filter(|d| d["departmentGroup"] == group.as_str())
            .collect(),
    ))
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

// -- admin --

pub fn mentor_json(id: i64) -> Value {
    json!({
        "id": id,
        "fullName": "Ravi K",
        "email": "ravi@example.com",
        "phoneNumber": "9000000000",
        "placedCompany": "Globex",
        "placedPosition": "SDE",
        "placementYear": 2024,
        "graduationYear": 2024,
        "departmentIds": ["1", "2"],
        "createdAt": "2025-07-01T10:00:00",
        "isActive": true
    })
}

async fn admin_login(Json(body): Json<Value>) -> Reply {
    if body["username"] == "admin" && body["password"] == "admin-pass" {
        Ok((
            StatusCode::OK,
            Json(json!({
                "id": "65f0c2a1",
                "username": "admin",
                "fullName": "Placement Cell",
                "email": "placement@gct.ac.in",
                "createdAt": "2025-06-01T09:00:00",
                "lastLogin": null,
                "isActive": true
            })),
        ))
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Invalid admin credentials"))
    }
}

async fn admin_mentors() -> Json<Value> {
    let mut other = mentor_json(8);
    other["fullName"] = json!("Meera S");
    other["placedCompany"] = json!("Initech");
    other["departmentIds"] = json!(["3"]);
    Json(json!([mentor_json(7), other]))
}

async fn admin_get_mentor(Path(id): Path<String>) -> Reply {
    match id.parse::<i64>() {
        Ok(id) if id < 100 => Ok((StatusCode::OK, Json(mentor_json(id)))),
        _ => Err(error(StatusCode::NOT_FOUND, "Mentor not found")),
    }
}

async fn admin_create_mentor(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut created = body;
    created["id"] = json!(21);
    created["isActive"] = json!(true);
    (StatusCode::CREATED, Json(created))
}

async fn admin_update_mentor(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    let mut updated = body;
    updated["id"] = json!(id);
    Json(updated)
}

async fn admin_mentors_in_department(Path(department_id): Path<String>) -> Json<Value> {
    let mentors = mentor_json(7);
    let listed = mentors["departmentIds"]
        .as_array()
        .is_some_and(|ids| ids.iter().any(|d| *d == department_id.as_str()));
    Json(if listed { json!([mentors]) } else { json!([]) })
}

async fn admin_mentors_at_company(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let company = params.get("companyName").cloned().unwrap_or_default();
    let mut mentor = mentor_json(7);
    mentor["placedCompany"] = json!(company);
    Json(json!([mentor]))
}

async fn admin_users() -> Json<Value> {
    let mut mentor = student_json();
    mentor["id"] = json!(4);
    mentor["role"] = json!("MENTOR");
    mentor["isApproved"] = json!(true);
    Json(json!([student_json(), mentor]))
}

async fn admin_get_user(Path(id): Path<i64>) -> Json<Value> {
    let mut user = student_json();
    user["id"] = json!(id);
    Json(user)
}

async fn admin_update_user(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    let mut updated = body;
    updated["id"] = json!(id);
    Json(updated)
}

async fn admin_toggle_user(Path(id): Path<i64>) -> Json<Value> {
    let mut user = student_json();
    user["id"] = json!(id);
    user["isActive"] = json!(false);
    Json(user)
}

// -- account --

async fn update_profile(Path(id): Path<i64>, Json(changes): Json<Value>) -> Json<Value> {
    let mut user = student_json();
    user["id"] = json!(id);
    if let (Some(user), Some(changes)) = (user.as_object_mut(), changes.as_object()) {
        for (key, value) in changes {
            user.insert(key.clone(), value.clone());
        }
    }
    Json(user)
}

async fn convert_to_mentor(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    let mut user = student_json();
    user["id"] = json!(id);
    user["role"] = json!("MENTOR");
    user["isApproved"] = json!(false);
    user["placedCompany"] = body["placedCompany"].clone();
    user["placedPosition"] = body["placedPosition"].clone();
    Json(user)
}

async fn send_otp(Json(body): Json<Value>) -> Reply {
    let institution = body["email"]
        .as_str()
        .is_some_and(|e| e.ends_with("@gct.ac.in"));
    if institution {
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "message": "OTP sent to your email!", "isGCTEmail": true })),
        ))
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Only GCT email addresses (@gct.ac.in) are allowed",
                "isGCTEmail": false
            })),
        ))
    }
}

async fn verify_otp(Json(body): Json<Value>) -> Reply {
    if body["otp"] == "123456" {
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Email verified successfully", "verified": true })),
        ))
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Invalid or expired OTP. Please try again.",
                "verified": false
            })),
        ))
    }
}

async fn check_institution_email(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let email = params.get("email").cloned().unwrap_or_default();
    Json(json!({ "isGCTEmail": email.ends_with("@gct.ac.in"), "email": email }))
}

async fn send_mentor_code(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "success": true, "message": format!("Verification code sent to {}", body["email"].as_str().unwrap_or_default()) }))
}

async fn verify_mentor_code(Json(body): Json<Value>) -> Json<Value> {
    let verified = body["verificationCode"] == "MNT-42";
    Json(json!({ "success": verified, "verified": verified }))
}

async fn forgot_password(Json(body): Json<Value>) -> Result<String, (StatusCode, Json<Value>)> {
    if body["email"] == "ghost@gct.ac.in" {
        return Err(error(StatusCode::NOT_FOUND, "No account found with this email"));
    }
    Ok("Password reset OTP sent to your email".to_string())
}

async fn reset_password(Json(body): Json<Value>) -> (StatusCode, String) {
    if body["otp"] == "123456" && body["newPassword"].as_str().is_some_and(|p| p.len() >= 8) {
        (StatusCode::OK, "Password reset successful".to_string())
    } else {
        (StatusCode::BAD_REQUEST, "Invalid or expired OTP".to_string())
    }
}

async fn malformed_companies() -> Json<Value> {
    Json(json!({ "unexpected": true }))
}

async fn company_by_name(Path(name): Path<String>) -> Json<Value> {
    Json(json!({ "id": 5, "companyName": name }))
}

async fn login(Json(body): Json<Value>) -> Reply {
    if body["password"] == "correct-horse" {
        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Login successful", "user": student_json(), "token": "t-123" })),
        ))
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Invalid email or password"))
    }
}

fn mentor_user_json(id: i64, approved: bool) -> Value {
    json!({
        "id": id,
        "email": "ravi@gct.ac.in",
        "fullName": "Ravi K",
        "role": "MENTOR",
        "departmentId": 1,
        "departmentName": "Computer Science",
        "placedCompany": "Globex",
        "isApproved": approved
    })
}

async fn pending_mentors() -> Json<Value> {
    Json(json!([mentor_user_json(9, false)]))
}

async fn approved_mentors() -> Json<Value> {
    Json(json!([mentor_user_json(4, true)]))
}

async fn all_mentors() -> Json<Value> {
    Json(json!([mentor_user_json(4, true), mentor_user_json(9, false)]))
}

async fn mentors_in_department(Path(department_id): Path<i64>) -> Json<Value> {
    if department_id == 1 {
        Json(json!([mentor_user_json(4, true)]))
    } else {
        Json(json!([]))
    }
}

async fn mentors_at_company(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let company = params.get("companyName").cloned().unwrap_or_default();
    let mut mentor = mentor_user_json(4, true);
    mentor["placedCompany"] = json!(company);
    Json(json!([mentor]))
}

async fn approve_mentor(Path(id): Path<i64>) -> (StatusCode, String) {
    (StatusCode::OK, format!("Mentor {id} approved"))
}

async fn list_experiences(State(backend): State<MockBackend>) -> Json<Value> {
    let all = backend.experiences.lock().unwrap().clone();
    Json(Value::Array(all))
}

async fn search_by_company(
    State(backend): State<MockBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let needle = params.get("name").cloned().unwrap_or_default().to_lowercase();
    let hits: Vec<Value> = backend
        .experiences
        .lock()
        .unwrap()
        .iter()
        .filter(|r| {
            r["companyName"]
                .as_str()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();
    Json(Value::Array(hits))
}

async fn get_experience(State(backend): State<MockBackend>, Path(id): Path<i64>) -> Reply {
    let found = backend
        .experiences
        .lock()
        .unwrap()
        .iter()
        .find(|r| r["id"] == id)
        .cloned();
    found
        .map(|r| (StatusCode::OK, Json(r)))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Experience not found"))
}

async fn create_experience(State(backend): State<MockBackend>, Json(body): Json<Value>) -> Reply {
    backend.received.lock().unwrap().push(body.clone());
    if backend.fail_writes {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable"));
    }
    let mut stored = backend.experiences.lock().unwrap();
    let mut record = body;
    record["id"] = json!(stored.len() as i64 + 1);
    record["submittedAt"] = json!("2026-10-16T09:30:00");
    stored.push(record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_experience(
    State(backend): State<MockBackend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    backend.received.lock().unwrap().push(body.clone());
    if backend.fail_writes {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable"));
    }
    let mut stored = backend.experiences.lock().unwrap();
    let slot = stored
        .iter_mut()
        .find(|r| r["id"] == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Experience not found"))?;
    let mut record = body;
    record["id"] = json!(id);
    *slot = record.clone();
    Ok((StatusCode::OK, Json(record)))
}

async fn delete_experience(State(backend): State<MockBackend>, Path(id): Path<i64>) -> StatusCode {
    let mut stored = backend.experiences.lock().unwrap();
    let before = stored.len();
    stored.retain(|r| r["id"] != id);
    if stored.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
