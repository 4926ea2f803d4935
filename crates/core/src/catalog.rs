//! Browsing helpers over fetched experience records and mentor profiles:
//! filters, grouping and the option lists behind filter selectors.

use std::collections::{BTreeMap, BTreeSet};

use crate::experience::FinalResult;
use crate::transport::ExperienceRecord;
use crate::user::UserProfile;

/// Lowercase, trim, collapse inner whitespace and drop `.` and `,`.
///
/// `"Acme  Corp."` and `"acme corp"` normalise to the same key.
pub fn normalize_company_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .replace(['.', ','], "")
}

// ---------------------------------------------------------------------------
// Experience filter
// ---------------------------------------------------------------------------

/// Conjunctive filter over experience records. Unset criteria match all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceFilter {
    /// Exact match after [`normalize_company_name`].
    pub company: Option<String>,
    /// Case-insensitive substring of the record's department.
    pub department: Option<String>,
    pub year: Option<i32>,
    pub result: Option<FinalResult>,
}

impl ExperienceFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, record: &ExperienceRecord) -> bool {
        if let Some(company) = non_blank(self.company.as_deref()) {
            if normalize_company_name(record.company_name()) != normalize_company_name(company) {
                return false;
            }
        }
        if let Some(department) = non_blank(self.department.as_deref()) {
            let needle = department.to_lowercase();
            let hay = record.department.as_deref().unwrap_or_default().to_lowercase();
            if !hay.contains(&needle) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if record.placement_year != Some(year) {
                return false;
            }
        }
        if let Some(result) = self.result {
            if record.final_result() != Some(result) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, records: &'a [ExperienceRecord]) -> Vec<&'a ExperienceRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGroup<'a> {
    pub year: i32,
    pub experiences: Vec<&'a ExperienceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyGroup<'a> {
    pub company: String,
    pub years: Vec<YearGroup<'a>>,
}

impl CompanyGroup<'_> {
    pub fn total(&self) -> usize {
        self.years.iter().map(|y| y.experiences.len()).sum()
    }
}

/// Group records by company name, then by placement year.
///
/// Companies are sorted alphabetically and years newest first. Records
/// without a placement year are counted under `current_year`. Input order
/// is kept within each year.
pub fn group_by_company_and_year(
    records: &[ExperienceRecord],
    current_year: i32,
) -> Vec<CompanyGroup<'_>> {
    let mut companies: BTreeMap<&str, BTreeMap<i32, Vec<&ExperienceRecord>>> = BTreeMap::new();
    for record in records {
        let year = record.placement_year.unwrap_or(current_year);
        companies
            .entry(record.company_name())
            .or_default()
            .entry(year)
            .or_default()
            .push(record);
    }
    companies
        .into_iter()
        .map(|(company, years)| CompanyGroup {
            company: company.to_string(),
            years: years
                .into_iter()
                .rev()
                .map(|(year, experiences)| YearGroup { year, experiences })
                .collect(),
        })
        .collect()
}

/// Records submitted by `user`, for the "my experiences" view.
pub fn owned_by<'a>(records: &'a [ExperienceRecord], user: &UserProfile) -> Vec<&'a ExperienceRecord> {
    records.iter().filter(|r| r.owned_by(user)).collect()
}

// ---------------------------------------------------------------------------
// Mentors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorFilter {
    /// Case-insensitive substring of name, company or position.
    pub search: Option<String>,
    /// Exact placed company.
    pub company: Option<String>,
    /// Exact department name.
    pub department: Option<String>,
    pub year: Option<i32>,
}

impl MentorFilter {
    pub fn matches(&self, mentor: &UserProfile) -> bool {
        if let Some(search) = non_blank(self.search.as_deref()) {
            let needle = search.to_lowercase();
            let hit = [
                Some(mentor.full_name.as_str()),
                mentor.placed_company.as_deref(),
                mentor.placed_position.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(company) = non_blank(self.company.as_deref()) {
            if mentor.placed_company.as_deref() != Some(company) {
                return false;
            }
        }
        if let Some(department) = non_blank(self.department.as_deref()) {
            if mentor.department_name.as_deref() != Some(department) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if mentor.placement_year != Some(year) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, mentors: &'a [UserProfile]) -> Vec<&'a UserProfile> {
        mentors.iter().filter(|m| self.matches(m)).collect()
    }
}

/// Distinct placed companies, sorted.
pub fn mentor_companies(mentors: &[UserProfile]) -> Vec<String> {
    mentors
        .iter()
        .filter_map(|m| non_blank(m.placed_company.as_deref()))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct placement years, newest first.
pub fn mentor_years(mentors: &[UserProfile]) -> Vec<i32> {
    mentors
        .iter()
        .filter_map(|m| m.placement_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}
