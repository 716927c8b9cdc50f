//! Job posting model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Job posting row. Mutated (closed) or deleted only by its owning employer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub employer_id: Uuid,
    pub is_closed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJob {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 200))]
    pub company: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
}

/// Search filters for open jobs; absent fields are no-ops, not empty matches.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct JobFilters {
    pub title: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}

impl JobFilters {
    // Blank query parameters count as absent.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|s| !s.is_empty())
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|s| !s.is_empty())
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_job_validation() {
        let valid = CreateJob {
            title: "Backend Engineer".to_string(),
            description: "Build APIs".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreateJob {
            title: String::new(),
            ..valid
        };
        assert!(empty_title.validate().is_err());
    }

    #[test]
    fn job_filters_treat_blank_as_absent() {
        let blank = JobFilters {
            title: Some(String::new()),
            location: None,
            company: Some("Acme".to_string()),
        };
        assert_eq!(blank.title(), None);
        assert_eq!(blank.location(), None);
        assert_eq!(blank.company(), Some("Acme"));
    }

    #[test]
    fn job_serializes_owner_and_closed_flag() {
        let job = Job {
            id: Uuid::nil(),
            title: "Backend Engineer".to_string(),
            description: "Build APIs".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            employer_id: Uuid::nil(),
            is_closed: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["is_closed"], false);
        assert!(json.get("employer_id").is_some());
    }
}
