//! Application lifecycle routes: apply, listings, status updates, resume
//! download.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::header,
    response::Response,
    Json,
};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::{RequireApplicant, RequireEmployer};
use crate::models::application::{ApplicantView, Application, ApplicationView, ApplyOutcome};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::application::{self as application_service, ApplicantFilters};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub job_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// POST /applications/apply — apply to a job (applicant). A repeat apply is
/// reported as already-applied, not an error.
pub async fn apply(
    State(state): State<AppState>,
    RequireApplicant(applicant): RequireApplicant,
    Json(body): Json<ApplyRequest>,
) -> Result<Json<ApiResponse<ApplyOutcome>>, AppError> {
    let outcome = application_service::apply(&state.db, applicant.id, body.job_id).await?;
    Ok(ApiResponse::success(outcome))
}

/// GET /applications/user/list — the caller's applications (applicant).
pub async fn list_mine(
    State(state): State<AppState>,
    RequireApplicant(applicant): RequireApplicant,
) -> Result<Json<ApiResponse<Vec<ApplicationView>>>, AppError> {
    let views = application_service::list_for_applicant(&state.db, applicant.id).await?;
    Ok(ApiResponse::success(views))
}

/// GET /applications/job/:job_id/applicants — paginated, filtered applicant
/// listing for one of the employer's jobs.
pub async fn applicants_for_job(
    State(state): State<AppState>,
    RequireEmployer(employer): RequireEmployer,
    Path(job_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<ApplicantFilters>,
) -> Result<Json<ApiResponse<PagedResult<ApplicantView>>>, AppError> {
    let result = application_service::list_applicants_for_job(
        &state.db,
        employer.id,
        job_id,
        &filters,
        &pagination,
    )
    .await?;
    Ok(ApiResponse::success(result))
}

/// PUT /applications/update_status/:application_id — overwrite the status of
/// an application on one of the employer's jobs.
pub async fn update_status(
    State(state): State<AppState>,
    RequireEmployer(employer): RequireEmployer,
    Path(application_id): Path<Uuid>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<ApiResponse<Application>>, AppError> {
    let application = application_service::update_status(
        &state.db,
        employer.id,
        application_id,
        &body.status,
    )
    .await?;
    Ok(ApiResponse::success(application))
}

/// GET /applications/resume/:applicant_id — stream an applicant's resume.
/// Allowed for the applicant themself or an employer with a job the
/// applicant applied to.
pub async fn download_resume(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(applicant_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let key = application_service::resume_key_for_download(
        &state.db,
        current_user.id,
        current_user.role,
        applicant_id,
    )
    .await?;

    let file = state.storage.open(&key).await?;
    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{key}\""),
        )
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
