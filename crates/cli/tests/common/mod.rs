#![allow(dead_code)]

//! Minimal placement backend for driving whole commands.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};

use placement_cli::commands::Context;
use placement_client::api::PlacementApi;
use placement_core::session::{MemoryStore, SessionStore};

#[derive(Clone, Default)]
pub struct Backend {
    pub experiences: Arc<Mutex<Vec<Value>>>,
    /// `METHOD path` of every request, in order.
    pub hits: Arc<Mutex<Vec<String>>>,
}

impl Backend {
    pub fn seed(&self, record: Value) {
        self.experiences.lock().unwrap().push(record);
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    fn hit(&self, call: impl Into<String>) {
        self.hits.lock().unwrap().push(call.into());
    }
}

pub async fn context(backend: Backend) -> Context<MemoryStore> {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/admin/login", post(admin_login))
        .route("/api/auth/mentors/pending", get(pending_mentors))
        .route("/api/auth/mentors/{id}/approve", put(approve_mentor))
        .route("/api/auth/mentors/{id}/reject", delete(reject_mentor))
        .route("/api/departments", get(departments))
        .route(
            "/api/placement-experiences",
            get(list_experiences).post(create_experience),
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

    Context::new(
        PlacementApi::new(format!("http://{addr}/api")),
        SessionStore::new(MemoryStore::new()),
        "gct.ac.in",
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
    )
}

pub fn student() -> Value {
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

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

async fn login(State(backend): State<Backend>, Json(body): Json<Value>) -> Reply {
    backend.hit("POST /auth/login");
    if body["password"] == "correct-horse" {
        Ok(Json(json!({ "message": "Login successful", "user": student(), "token": "t-123" })))
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Invalid email or password"))
    }
}

async fn register(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend.hit("POST /auth/register");
    let mut user = body.clone();
    user["id"] = json!(11);
    user.as_object_mut().unwrap().remove("password");
    if body["role"] == "MENTOR" {
        user["isApproved"] = json!(false);
    }
    Json(json!({ "message": "Registration successful", "user": user, "token": "t-new" }))
}

async fn admin_login(State(backend): State<Backend>, Json(body): Json<Value>) -> Reply {
    backend.hit("POST /admin/login");
    if body["username"] == "admin" && body["password"] == "admin-pass" {
        Ok(Json(json!({
            "id": "65f0c2a1",
            "username": "admin",
            "fullName": "Placement Cell",
            "email": "placement@gct.ac.in",
            "createdAt": "2025-06-01T09:00:00",
            "lastLogin": null,
            "isActive": true
        })))
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Invalid admin credentials"))
    }
}

async fn pending_mentors(State(backend): State<Backend>) -> Json<Value> {
    backend.hit("GET /auth/mentors/pending");
    Json(json!([
        {
            "id": 9,
            "email": "ravi@gct.ac.in",
            "fullName": "Ravi K",
            "role": "MENTOR",
            "placedCompany": "Globex",
            "placedPosition": "SDE",
            "isApproved": false
        },
        {
            "id": 10,
            "email": "meera@gct.ac.in",
            "fullName": "Meera S",
            "role": "MENTOR",
            "placedCompany": "Initech",
            "isApproved": false
        }
    ]))
}

async fn approve_mentor(State(backend): State<Backend>, Path(id): Path<i64>) -> String {
    backend.hit(format!("PUT /auth/mentors/{id}/approve"));
    format!("Mentor {id} approved")
}

async fn reject_mentor(State(backend): State<Backend>, Path(id): Path<i64>) -> StatusCode {
    backend.hit(format!("DELETE /auth/mentors/{id}/reject"));
    StatusCode::OK
}

async fn departments(State(backend): State<Backend>) -> Json<Value> {
    backend.hit("GET /departments");
    Json(json!([
        { "id": "1", "departmentName": "Computer Science", "departmentCode": "CSE", "departmentGroup": "CS_IT" },
        { "id": "2", "departmentName": "Information Technology", "departmentCode": "IT", "departmentGroup": "CS_IT" },
        { "id": "3", "departmentName": "Mechanical", "departmentCode": "MECH", "departmentGroup": "MECHANICAL" }
    ]))
}

async fn list_experiences(State(backend): State<Backend>) -> Json<Value> {
    backend.hit("GET /placement-experiences");
    let all = backend.experiences.lock().unwrap().clone();
    Json(Value::Array(all))
}

async fn create_experience(State(backend): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    backend.hit("POST /placement-experiences");
    let mut stored = backend.experiences.lock().unwrap();
    let mut record = body;
    record["id"] = json!(stored.len() as i64 + 1);
    stored.push(record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn get_experience(State(backend): State<Backend>, Path(id): Path<i64>) -> Reply {
    backend.hit(format!("GET /placement-experiences/{id}"));
    let found = backend
        .experiences
        .lock()
        .unwrap()
        .iter()
        .find(|r| r["id"] == id)
        .cloned();
    found
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Experience not found"))
}

async fn update_experience(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    backend.hit(format!("PUT /placement-experiences/{id}"));
    let mut stored = backend.experiences.lock().unwrap();
    let slot = stored
        .iter_mut()
        .find(|r| r["id"] == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Experience not found"))?;
    let mut record = body;
    record["id"] = json!(id);
    *slot = record.clone();
    Ok(Json(record))
}

async fn delete_experience(State(backend): State<Backend>, Path(id): Path<i64>) -> StatusCode {
    backend.hit(format!("DELETE /placement-experiences/{id}"));
    backend.experiences.lock().unwrap().retain(|r| r["id"] != id);
    StatusCode::NO_CONTENT
}
