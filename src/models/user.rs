//! User model with role-based access control.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Account role gating which mutating operations are permitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Applicant,
    Employer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Applicant => "applicant",
            UserRole::Employer => "employer",
        }
    }

    /// Parse a role from its wire form; anything outside the closed set is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "applicant" => Some(UserRole::Applicant),
            "employer" => Some(UserRole::Employer),
            _ => None,
        }
    }
}

/// Full user row from database (includes password_hash — never serialize to API).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub resume_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile DTO — excludes password_hash and internal fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub resume_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            bio: u.bio,
            skills: u.skills,
            resume_path: u.resume_path,
            created_at: u.created_at,
        }
    }
}

/// Registration payload assembled from the multipart form.
#[derive(Debug, Clone, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub role: UserRole,
    pub bio: Option<String>,
}

/// Partial profile update; absent fields keep their stored values.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    pub skills: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::Applicant).unwrap(), "\"applicant\"");
        assert_eq!(serde_json::to_string(&UserRole::Employer).unwrap(), "\"employer\"");
    }

    #[test]
    fn user_role_parse_closed_set() {
        assert_eq!(UserRole::parse("applicant"), Some(UserRole::Applicant));
        assert_eq!(UserRole::parse("employer"), Some(UserRole::Employer));
        assert_eq!(UserRole::parse("admin"), None);
        assert_eq!(UserRole::parse("Applicant"), None);
        assert_eq!(UserRole::parse(""), None);
    }

    #[test]
    fn user_response_excludes_password() {
        let json = serde_json::to_string(&UserResponse {
            id: Uuid::nil(),
            name: "Bob".to_string(),
            email: "bob@test.com".to_string(),
            role: UserRole::Applicant,
            bio: None,
            skills: Some("rust,sql".to_string()),
            resume_path: None,
            created_at: Utc::now(),
        })
        .unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }

    #[test]
    fn user_to_response_conversion() {
        let user = User {
            id: Uuid::nil(),
            name: "Alice".to_string(),
            email: "alice@test.com".to_string(),
            password_hash: "secret_hash".to_string(),
            role: UserRole::Employer,
            bio: Some("hiring".to_string()),
            skills: None,
            resume_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let response: UserResponse = user.into();
        assert_eq!(response.name, "Alice");
        assert_eq!(response.role, UserRole::Employer);
    }

    #[test]
    fn register_user_validation() {
        let valid = RegisterUser {
            name: "Bob".to_string(),
            email: "bob@test.com".to_string(),
            password: "longenough".to_string(),
            role: UserRole::Applicant,
            bio: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterUser {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterUser {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }
}
