//! Role-based access control extractors for Axum handlers.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::user::UserRole;
use crate::AppState;

/// Extractor that requires the caller to have the applicant role.
#[derive(Debug, Clone)]
pub struct RequireApplicant(pub CurrentUser);

impl FromRequestParts<AppState> for RequireApplicant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        match user.role {
            UserRole::Applicant => Ok(RequireApplicant(user)),
            UserRole::Employer => Err(AppError::Forbidden(
                "Applicant access required".to_string(),
            )),
        }
    }
}

/// Extractor that requires the caller to have the employer role.
#[derive(Debug, Clone)]
pub struct RequireEmployer(pub CurrentUser);

impl FromRequestParts<AppState> for RequireEmployer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        match user.role {
            UserRole::Employer => Ok(RequireEmployer(user)),
            UserRole::Applicant => Err(AppError::Forbidden(
                "Employer access required".to_string(),
            )),
        }
    }
}
