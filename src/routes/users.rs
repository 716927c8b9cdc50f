//! User routes: registration, profile, and resume upload.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireApplicant;
use crate::models::user::{RegisterUser, UpdateProfile, UserResponse, UserRole};
use crate::services::auth as auth_service;
use crate::services::user as user_service;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeUploaded {
    pub resume_path: String,
}

/// POST /users/register — multipart form: name, email, password, role,
/// bio?, resume? (resume accepted only for applicants).
pub async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let mut name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut password: Option<String> = None;
    let mut role: Option<String> = None;
    let mut bio: Option<String> = None;
    let mut resume: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => name = Some(read_text(field).await?),
            "email" => email = Some(read_text(field).await?),
            "password" => password = Some(read_text(field).await?),
            "role" => role = Some(read_text(field).await?),
            "bio" => bio = Some(read_text(field).await?),
            "resume" => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                resume = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let role = role.ok_or_else(|| missing("role"))?;
    let role = UserRole::parse(&role).ok_or_else(|| {
        AppError::Validation("role must be 'applicant' or 'employer'".to_string())
    })?;

    if resume.is_some() && role != UserRole::Applicant {
        return Err(AppError::Validation(
            "Only applicants can attach a resume".to_string(),
        ));
    }

    let input = RegisterUser {
        name: name.ok_or_else(|| missing("name"))?,
        email: email.ok_or_else(|| missing("email"))?,
        password: password.ok_or_else(|| missing("password"))?,
        role,
        bio,
    };
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mut user = auth_service::register(&state.db, &input).await?;

    if let Some((filename, data)) = resume {
        let key =
            user_service::attach_resume(&state.db, &state.storage, user.id, &filename, &data)
                .await?;
        user.resume_path = Some(key);
    }

    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// GET /users/me — current user profile.
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = user_service::get_profile(&state.db, current_user.id).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// PUT /users/update_profile — partial bio/skills update (applicant).
pub async fn update_profile(
    State(state): State<AppState>,
    RequireApplicant(current_user): RequireApplicant,
    Json(body): Json<UpdateProfile>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = user_service::update_profile(&state.db, current_user.id, &body).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// POST /users/upload_resume — multipart file upload (applicant only).
pub async fn upload_resume(
    State(state): State<AppState>,
    RequireApplicant(current_user): RequireApplicant,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ResumeUploaded>>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("resume").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
            file = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, data) = file.ok_or_else(|| missing("file"))?;
    let key = user_service::attach_resume(
        &state.db,
        &state.storage,
        current_user.id,
        &filename,
        &data,
    )
    .await?;

    Ok(ApiResponse::success(ResumeUploaded { resume_path: key }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read field: {e}")))
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("Missing '{field}' field"))
}
