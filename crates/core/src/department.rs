//! Department lookup data.
//!
//! Departments populate the department selector of the experience wizard
//! and drive the "related departments" view: departments in the same
//! [`DepartmentGroup`] can browse each other's placements.

use serde::{Deserialize, Serialize};

use crate::types::id_as_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepartmentGroup {
    CsIt,
    Electronics,
    Mechanical,
    Civil,
    Biotech,
}

impl DepartmentGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CsIt => "CS_IT",
            Self::Electronics => "ELECTRONICS",
            Self::Mechanical => "MECHANICAL",
            Self::Civil => "CIVIL",
            Self::Biotech => "BIOTECH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Sent as text (`"3"`) by the backend; numeric ids are accepted too.
    #[serde(deserialize_with = "id_as_text")]
    pub id: String,
    pub department_name: String,
    pub department_code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub department_group: Option<DepartmentGroup>,
}

/// DTO for creating or updating a department.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInput {
    pub department_name: String,
    pub department_code: String,
    pub description: Option<String>,
    pub department_group: Option<DepartmentGroup>,
}

/// Find a department by code, ignoring case.
pub fn find_by_code<'a>(departments: &'a [Department], code: &str) -> Option<&'a Department> {
    let code = code.trim();
    departments
        .iter()
        .find(|d| d.department_code.eq_ignore_ascii_case(code))
}

pub fn find_by_id<'a>(departments: &'a [Department], id: &str) -> Option<&'a Department> {
    let id = id.trim();
    departments.iter().find(|d| d.id == id)
}

/// Other departments in the same group as `id`. Empty when the department
/// is unknown or ungrouped.
pub fn related_departments<'a>(departments: &'a [Department], id: &str) -> Vec<&'a Department> {
    let Some(origin) = find_by_id(departments, id) else {
        return Vec::new();
    };
    let Some(group) = origin.department_group else {
        return Vec::new();
    };
    departments
        .iter()
        .filter(|d| d.id != origin.id && d.department_group == Some(group))
        .collect()
}
