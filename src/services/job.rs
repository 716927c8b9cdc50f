//! Job registry service: listing, search, and owner-guarded mutation.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{CreateJob, Job, JobFilters};

/// List all jobs, newest first, no filter.
pub async fn list(pool: &PgPool) -> Result<Vec<Job>, AppError> {
    let jobs = sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(jobs)
}

/// Search open jobs by case-insensitive substring on any supplied field.
/// Absent filters are no-ops, not empty-string matches.
pub async fn search(pool: &PgPool, filters: &JobFilters) -> Result<Vec<Job>, AppError> {
    let mut conditions: Vec<String> = vec!["is_closed = false".to_string()];
    let mut param_index = 0u32;

    if filters.title().is_some() {
        param_index += 1;
        conditions.push(format!("title ILIKE ${param_index}"));
    }
    if filters.location().is_some() {
        param_index += 1;
        conditions.push(format!("location ILIKE ${param_index}"));
    }
    if filters.company().is_some() {
        param_index += 1;
        conditions.push(format!("company ILIKE ${param_index}"));
    }

    let sql = format!(
        "SELECT * FROM jobs WHERE {} ORDER BY created_at DESC",
        conditions.join(" AND ")
    );

    let mut query = sqlx::query_as::<_, Job>(&sql);
    if let Some(title) = filters.title() {
        query = query.bind(format!("%{title}%"));
    }
    if let Some(location) = filters.location() {
        query = query.bind(format!("%{location}%"));
    }
    if let Some(company) = filters.company() {
        query = query.bind(format!("%{company}%"));
    }

    Ok(query.fetch_all(pool).await?)
}

/// Fetch a single open job; closed or absent jobs are NotFound.
pub async fn find_open_by_id(pool: &PgPool, id: Uuid) -> Result<Job, AppError> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1 AND is_closed = false")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}

/// Create a job posting owned by the given employer.
pub async fn create(pool: &PgPool, employer_id: Uuid, input: &CreateJob) -> Result<Job, AppError> {
    let job = sqlx::query_as::<_, Job>(
        r#"
        INSERT INTO jobs (title, description, company, location, employer_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.company)
    .bind(&input.location)
    .bind(employer_id)
    .fetch_one(pool)
    .await?;

    tracing::info!(job_id = %job.id, employer_id = %employer_id, "Job created");
    Ok(job)
}

/// Load a job and verify the caller owns it: absent -> NotFound, owned by
/// another employer -> Forbidden.
async fn find_owned(pool: &PgPool, employer_id: Uuid, job_id: Uuid) -> Result<Job, AppError> {
    let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    if job.employer_id != employer_id {
        return Err(AppError::Forbidden(
            "Job belongs to another employer".to_string(),
        ));
    }
    Ok(job)
}

/// Close a job posting. Idempotent regardless of the current flag.
pub async fn close(pool: &PgPool, employer_id: Uuid, job_id: Uuid) -> Result<Job, AppError> {
    find_owned(pool, employer_id, job_id).await?;

    let job = sqlx::query_as::<_, Job>(
        "UPDATE jobs SET is_closed = true WHERE id = $1 RETURNING *",
    )
    .bind(job_id)
    .fetch_one(pool)
    .await?;

    tracing::info!(job_id = %job_id, "Job closed");
    Ok(job)
}

/// Hard-delete a job posting and its applications.
pub async fn delete(pool: &PgPool, employer_id: Uuid, job_id: Uuid) -> Result<(), AppError> {
    find_owned(pool, employer_id, job_id).await?;

    sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id)
        .execute(pool)
        .await?;

    tracing::info!(job_id = %job_id, "Job deleted");
    Ok(())
}
