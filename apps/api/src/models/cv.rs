use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Every field the extractor can populate on a CV record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CvField {
    Name,
    Email,
    Phone,
    Linkedin,
    Education,
    WorkExperience,
    Projects,
    Skills,
}

impl CvField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CvField::Name => "name",
            CvField::Email => "email",
            CvField::Phone => "phone",
            CvField::Linkedin => "linkedin",
            CvField::Education => "education",
            CvField::WorkExperience => "work_experience",
            CvField::Projects => "projects",
            CvField::Skills => "skills",
        }
    }
}

impl fmt::Display for CvField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured output of a single extraction pass over one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: Option<String>,
    pub education: Option<String>,
    pub work_experience: Option<String>,
    pub projects: Option<String>,
    pub skills: Option<String>,
}

/// A persisted record as returned by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CvRecordRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: Option<String>,
    pub education: Option<String>,
    pub work_experience: Option<String>,
    pub projects: Option<String>,
    pub skills: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CvRecordRow {
    pub fn from_extracted(id: i64, record: ExtractedRecord, now: DateTime<Utc>) -> Self {
        CvRecordRow {
            id,
            name: record.name,
            email: record.email,
            phone: record.phone,
            linkedin: record.linkedin,
            education: record.education,
            work_experience: record.work_experience,
            projects: record.projects,
            skills: record.skills,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial overwrite of the contact fields of a stored record.
/// Empty strings count as "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CvUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
}

impl CvUpdate {
    /// Drops blank values so that only genuinely provided fields are written.
    pub fn normalized(self) -> Self {
        fn keep(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.is_empty())
        }
        CvUpdate {
            name: keep(self.name),
            email: keep(self.email),
            phone: keep(self.phone),
            linkedin: keep(self.linkedin),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.linkedin.is_none()
    }

    pub fn apply_to(&self, row: &mut CvRecordRow) {
        if let Some(name) = &self.name {
            row.name = name.clone();
        }
        if let Some(email) = &self.email {
            row.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            row.phone = phone.clone();
        }
        if let Some(linkedin) = &self.linkedin {
            row.linkedin = Some(linkedin.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row() -> CvRecordRow {
        let record = ExtractedRecord {
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555 123 4567".to_string(),
            linkedin: None,
            education: Some("BA Economics".to_string()),
            work_experience: None,
            projects: None,
            skills: Some("SQL".to_string()),
        };
        CvRecordRow::from_extracted(7, record, Utc::now())
    }

    #[test]
    fn test_cv_field_display_matches_column_names() {
        assert_eq!(CvField::WorkExperience.to_string(), "work_experience");
        assert_eq!(CvField::Linkedin.to_string(), "linkedin");
    }

    #[test]
    fn test_update_normalized_drops_blank_values() {
        let update = CvUpdate {
            name: Some(String::new()),
            email: Some("new@example.com".to_string()),
            phone: None,
            linkedin: Some(String::new()),
        }
        .normalized();
        assert_eq!(update.name, None);
        assert_eq!(update.email.as_deref(), Some("new@example.com"));
        assert_eq!(update.linkedin, None);
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_all_blank_is_empty() {
        let update = CvUpdate {
            name: Some(String::new()),
            ..Default::default()
        }
        .normalized();
        assert!(update.is_empty());
    }

    #[test]
    fn test_apply_to_overwrites_only_provided_fields() {
        let mut row = make_row();
        let update = CvUpdate {
            phone: Some("+44 20 7946 0000".to_string()),
            linkedin: Some("linkedin.com/in/jane".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut row);
        assert_eq!(row.name, "Jane Smith");
        assert_eq!(row.email, "jane@example.com");
        assert_eq!(row.phone, "+44 20 7946 0000");
        assert_eq!(row.linkedin.as_deref(), Some("linkedin.com/in/jane"));
        assert_eq!(row.education.as_deref(), Some("BA Economics"));
    }
}
