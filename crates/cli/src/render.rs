//! Plain-text rendering of API results.
//!
//! Every function is pure and returns the full text; printing is left to
//! the caller.

use placement_client::companies::Company;
use placement_core::catalog::CompanyGroup;
use placement_core::department::Department;
use placement_core::experience::InterviewRound;
use placement_core::registration::AdminProfile;
use placement_core::transport::ExperienceRecord;
use placement_core::user::UserProfile;

const NOT_GIVEN: &str = "-";

fn or_dash(value: Option<&str>) -> &str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(NOT_GIVEN)
}

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => NOT_GIVEN,
    }
}

pub fn user(user: &UserProfile) -> String {
    let mut lines = vec![
        format!("{} <{}>", user.full_name, user.email),
        format!("Role: {}", user.role.as_str()),
    ];
    if let Some(department) = user.department_name.as_deref().or(user.department_code.as_deref()) {
        lines.push(format!("Department: {department}"));
    }
    if let Some(roll) = user.roll_number.as_deref() {
        lines.push(format!("Roll number: {roll}"));
    }
    if let Some(company) = user.placed_company.as_deref() {
        let position = or_dash(user.placed_position.as_deref());
        lines.push(format!("Placed at: {company} ({position})"));
    }
    if user.is_pending_mentor() {
        lines.push("Awaiting admin approval".to_string());
    }
    lines.join("\n")
}

pub fn admin(admin: &AdminProfile) -> String {
    let name = admin
        .full_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(admin.username.as_str());
    let mut lines = vec![
        format!("{name} <{}>", or_dash(admin.email.as_deref())),
        "Role: ADMIN".to_string(),
        format!("Admin id: {}", admin.id),
    ];
    if admin.is_active == Some(false) {
        lines.push("Account inactive".to_string());
    }
    lines.join("\n")
}

pub fn departments(departments: &[Department]) -> String {
    if departments.is_empty() {
        return "No departments found".to_string();
    }
    departments
        .iter()
        .map(|d| {
            let group = d.department_group.map(|g| g.as_str()).unwrap_or(NOT_GIVEN);
            format!("{:>4}  {:<6} {} [{group}]", d.id, d.department_code, d.department_name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn companies(companies: &[Company]) -> String {
    if companies.is_empty() {
        return "No companies found".to_string();
    }
    companies
        .iter()
        .map(|c| match c.experience_count {
            Some(n) => format!("{} ({n} experiences)", c.company_name),
            None => c.company_name.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per record: id, company, student, year and result.
pub fn experience_list(records: &[&ExperienceRecord]) -> String {
    if records.is_empty() {
        return "No experiences found".to_string();
    }
    records
        .iter()
        .map(|r| experience_line(r))
        .collect::<Vec<_>>()
        .join("\n")
}

fn experience_line(record: &ExperienceRecord) -> String {
    let id = record.id.map(|id| id.to_string()).unwrap_or_else(|| NOT_GIVEN.into());
    let year = record
        .placement_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| NOT_GIVEN.into());
    let result = record.final_result().map(|r| r.as_str()).unwrap_or(NOT_GIVEN);
    format!(
        "#{id}  {}  {}  {year}  {result}  ({} rounds)",
        or_dash(Some(record.company_name())),
        or_dash(record.student_name.as_deref()),
        record.total_rounds.unwrap_or_default(),
    )
}

pub fn grouped(groups: &[CompanyGroup<'_>]) -> String {
    if groups.is_empty() {
        return "No experiences found".to_string();
    }
    let mut lines = Vec::new();
    for group in groups {
        lines.push(format!("{} ({})", group.company, group.total()));
        for year in &group.years {
            lines.push(format!("  {}", year.year));
            for record in &year.experiences {
                lines.push(format!("    {}", experience_line(record)));
            }
        }
    }
    lines.join("\n")
}

/// Full view of a stored experience, rounds and questions included.
pub fn experience_detail(record: &ExperienceRecord) -> String {
    let mut lines = vec![
        format!(
            "{} at {}",
            or_dash(record.student_name.as_deref()),
            or_dash(Some(record.company_name()))
        ),
        format!(
            "Department: {}  Roll number: {}",
            or_dash(record.department.as_deref()),
            or_dash(record.roll_number.as_deref())
        ),
        format!(
            "Type: {}  Salary: {}  Year: {}",
            or_dash(record.company_type.as_deref()),
            or_dash(record.salary.as_deref()),
            record
                .placement_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| NOT_GIVEN.into())
        ),
        format!(
            "Internship offered: {}  Bond: {}",
            yes_no(record.intern_offered),
            yes_no(record.has_bond)
        ),
    ];
    if record.has_bond == Some(true) {
        lines.push(format!("Bond details: {}", or_dash(record.bond_details.as_deref())));
    }
    lines.push(format!(
        "Result: {}",
        record.final_result().map(|r| r.as_str()).unwrap_or(NOT_GIVEN)
    ));

    for round in record.rounds() {
        lines.push(String::new());
        lines.extend(round_lines(&round));
    }

    lines.push(String::new());
    for (label, value) in [
        ("Overall experience", &record.overall_experience),
        ("General tips", &record.general_tips),
        ("Areas to prepare", &record.areas_to_prepare_final),
        ("Suggested resources", &record.suggested_resources),
    ] {
        lines.push(format!("{label}: {}", or_dash(value.as_deref())));
    }
    lines.join("\n")
}

fn round_lines(round: &InterviewRound) -> Vec<String> {
    let status = if round.cleared { "cleared" } else { "not cleared" };
    let mut lines = vec![
        format!(
            "Round {}: {} ({}, {}, {status})",
            round.round_number,
            or_dash(Some(round.round_name.as_str())),
            round.platform.label(),
            or_dash(Some(round.duration.as_str())),
        ),
        format!("  Details: {}", or_dash(Some(round.round_details.as_str()))),
        format!("  Topics: {}", or_dash(Some(round.topics_covered.as_str()))),
        format!("  Comments: {}", or_dash(Some(round.comments.as_str()))),
    ];
    for link in round.study_link_list() {
        lines.push(format!("  Link: {link}"));
    }
    for (n, q) in round
        .questions
        .iter()
        .filter(|q| !q.question.trim().is_empty())
        .enumerate()
    {
        lines.push(format!("  Q{}. [{}] {}", n + 1, or_dash(Some(q.domain.as_str())), q.question));
        if !q.approach.trim().is_empty() {
            lines.push(format!("      Approach: {}", q.approach));
        }
        if !q.references.trim().is_empty() {
            lines.push(format!("      References: {}", q.references));
        }
    }
    lines
}

pub fn mentors(mentors: &[&UserProfile]) -> String {
    if mentors.is_empty() {
        return "No mentors found".to_string();
    }
    mentors
        .iter()
        .map(|m| {
            let year = m
                .placement_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| NOT_GIVEN.into());
            let mut line = format!(
                "#{}  {}  {} ({})  {year}  {}",
                m.id,
                m.full_name,
                or_dash(m.placed_company.as_deref()),
                or_dash(m.placed_position.as_deref()),
                or_dash(m.department_name.as_deref()),
            );
            if m.is_pending_mentor() {
                line.push_str("  [pending]");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
