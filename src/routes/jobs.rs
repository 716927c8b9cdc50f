//! Job registry routes: public listing/search plus employer-owned mutation.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireEmployer;
use crate::models::job::{CreateJob, Job, JobFilters};
use crate::services::job as job_service;
use crate::AppState;

/// GET /jobs — all jobs, newest first.
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Job>>>, AppError> {
    let jobs = job_service::list(&state.db).await?;
    Ok(ApiResponse::success(jobs))
}

/// GET /jobs/search — open jobs matching the supplied substring filters.
pub async fn search(
    State(state): State<AppState>,
    Query(filters): Query<JobFilters>,
) -> Result<Json<ApiResponse<Vec<Job>>>, AppError> {
    let jobs = job_service::search(&state.db, &filters).await?;
    Ok(ApiResponse::success(jobs))
}

/// GET /jobs/:id — a single open job.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Job>>, AppError> {
    let job = job_service::find_open_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(job))
}

/// POST /jobs — create a posting (employer).
pub async fn create(
    State(state): State<AppState>,
    RequireEmployer(employer): RequireEmployer,
    Json(body): Json<CreateJob>,
) -> Result<Json<ApiResponse<Job>>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let job = job_service::create(&state.db, employer.id, &body).await?;
    Ok(ApiResponse::success(job))
}

/// PUT /jobs/close/:id — close a posting (employer-owner, idempotent).
pub async fn close(
    State(state): State<AppState>,
    RequireEmployer(employer): RequireEmployer,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Job>>, AppError> {
    let job = job_service::close(&state.db, employer.id, id).await?;
    Ok(ApiResponse::success(job))
}

/// DELETE /jobs/delete/:id — hard-delete a posting (employer-owner).
pub async fn delete(
    State(state): State<AppState>,
    RequireEmployer(employer): RequireEmployer,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    job_service::delete(&state.db, employer.id, id).await?;
    Ok(ApiResponse::success("Job deleted successfully"))
}
