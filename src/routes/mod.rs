//! Route definitions for the job portal API.

pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;
pub mod users;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::AppState;

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    let user_routes = Router::new()
        .route("/users/register", post(users::register))
        .route("/users/me", get(users::me))
        .route("/users/update_profile", put(users::update_profile))
        .route("/users/upload_resume", post(users::upload_resume));

    let job_routes = Router::new()
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route("/jobs/search", get(jobs::search))
        .route("/jobs/close/{id}", put(jobs::close))
        .route("/jobs/delete/{id}", delete(jobs::delete))
        .route("/jobs/{id}", get(jobs::get_by_id));

    let application_routes = Router::new()
        .route("/applications/apply", post(applications::apply))
        .route("/applications/user/list", get(applications::list_mine))
        .route(
            "/applications/job/{job_id}/applicants",
            get(applications::applicants_for_job),
        )
        .route(
            "/applications/update_status/{application_id}",
            put(applications::update_status),
        )
        .route(
            "/applications/resume/{applicant_id}",
            get(applications::download_resume),
        );

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .merge(auth_routes)
        .merge(user_routes)
        .merge(job_routes)
        .merge(application_routes)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
