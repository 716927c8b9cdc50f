//! Application model and lifecycle status machine.
//!
//! An application moves `submitted -> {reviewed, shortlisted, rejected}`.
//! The three reviewer states may be overwritten by one another; `submitted`
//! is only ever set by the initial insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Submitted,
    Reviewed,
    Shortlisted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Parse a status an employer may set. The accepted set is exactly
    /// {reviewed, shortlisted, rejected}; `submitted` is not re-enterable.
    pub fn parse_reviewer_status(value: &str) -> Result<Self, AppError> {
        match value {
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(AppError::InvalidStatus(format!(
                "'{other}' is not one of: reviewed, shortlisted, rejected"
            ))),
        }
    }

    /// Parse any member of the status set (used by list filters).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "submitted" => Some(ApplicationStatus::Submitted),
            "reviewed" => Some(ApplicationStatus::Reviewed),
            "shortlisted" => Some(ApplicationStatus::Shortlisted),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

/// Application row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Outcome of an apply call. A second apply for the same (applicant, job)
/// pair is an idempotent no-op, not an error.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApplyOutcome {
    Applied { application: Application },
    AlreadyApplied,
}

/// An applicant's own application joined with its job posting.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationView {
    pub id: Uuid,
    pub job_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// One applicant row in an employer's per-job listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicantView {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub name: String,
    pub email: String,
    pub skills: Option<String>,
    pub bio: Option<String>,
    pub resume_path: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serialization() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Submitted).unwrap(),
            "\"submitted\""
        );
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Shortlisted).unwrap(),
            "\"shortlisted\""
        );
    }

    #[test]
    fn reviewer_status_accepts_exactly_three_values() {
        assert_eq!(
            ApplicationStatus::parse_reviewer_status("reviewed").unwrap(),
            ApplicationStatus::Reviewed
        );
        assert_eq!(
            ApplicationStatus::parse_reviewer_status("shortlisted").unwrap(),
            ApplicationStatus::Shortlisted
        );
        assert_eq!(
            ApplicationStatus::parse_reviewer_status("rejected").unwrap(),
            ApplicationStatus::Rejected
        );

        for bad in ["submitted", "SHORTLISTED", "hired", ""] {
            let err = ApplicationStatus::parse_reviewer_status(bad).unwrap_err();
            assert!(matches!(err, AppError::InvalidStatus(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn filter_parse_covers_full_set() {
        assert_eq!(
            ApplicationStatus::parse("submitted"),
            Some(ApplicationStatus::Submitted)
        );
        assert_eq!(ApplicationStatus::parse("hired"), None);
    }

    #[test]
    fn apply_outcome_serialization() {
        let already = serde_json::to_value(&ApplyOutcome::AlreadyApplied).unwrap();
        assert_eq!(already["outcome"], "already_applied");

        let applied = ApplyOutcome::Applied {
            application: Application {
                id: Uuid::nil(),
                job_id: Uuid::nil(),
                applicant_id: Uuid::nil(),
                status: ApplicationStatus::Submitted,
                applied_at: Utc::now(),
            },
        };
        let json = serde_json::to_value(&applied).unwrap();
        assert_eq!(json["outcome"], "applied");
        assert_eq!(json["application"]["status"], "submitted");
    }
}
