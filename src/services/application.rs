//! Application lifecycle service.
//!
//! Governs apply/duplicate handling, the applicant's own listing, the
//! employer's paginated applicant listing, and status transitions. Every
//! employer-side operation walks Application -> Job -> employer_id to
//! confirm ownership before disclosing anything else.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{
    ApplicantView, Application, ApplicationStatus, ApplicationView, ApplyOutcome,
};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::user::UserRole;

/// Filters for the employer's applicant listing; ANDed together.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApplicantFilters {
    pub name: Option<String>,
    pub skills: Option<String>,
    pub status: Option<String>,
}

impl ApplicantFilters {
    // Blank query parameters are absent filters, not empty-string matches.
    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    fn skills(&self) -> Option<&str> {
        self.skills.as_deref().filter(|s| !s.is_empty())
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }
}

/// Apply to a job. The job must exist and be open. Duplicate applications
/// are absorbed by the (job_id, applicant_id) unique constraint: a conflict
/// means "already applied" and leaves the existing row untouched.
pub async fn apply(
    pool: &PgPool,
    applicant_id: Uuid,
    job_id: Uuid,
) -> Result<ApplyOutcome, AppError> {
    super::job::find_open_by_id(pool, job_id).await?;

    let inserted = sqlx::query_as::<_, Application>(
        r#"
        INSERT INTO applications (job_id, applicant_id)
        VALUES ($1, $2)
        ON CONFLICT (job_id, applicant_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(applicant_id)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(application) => {
            tracing::info!(application_id = %application.id, job_id = %job_id, "Application submitted");
            Ok(ApplyOutcome::Applied { application })
        }
        None => Ok(ApplyOutcome::AlreadyApplied),
    }
}

/// All applications by the caller, joined with the job posting, newest first.
pub async fn list_for_applicant(
    pool: &PgPool,
    applicant_id: Uuid,
) -> Result<Vec<ApplicationView>, AppError> {
    let views = sqlx::query_as::<_, ApplicationView>(
        r#"
        SELECT a.id, a.job_id, j.title, j.company, j.location, a.status, a.applied_at
        FROM applications a
        JOIN jobs j ON a.job_id = j.id
        WHERE a.applicant_id = $1
        ORDER BY a.applied_at DESC
        "#,
    )
    .bind(applicant_id)
    .fetch_all(pool)
    .await?;
    Ok(views)
}

/// Paginated, filtered applicant listing for one of the employer's jobs.
///
/// Guard order: job absent -> NotFound, owned by another employer ->
/// Forbidden. `total` reflects the filtered count independent of
/// limit/offset; rows are ordered by application time, descending.
pub async fn list_applicants_for_job(
    pool: &PgPool,
    employer_id: Uuid,
    job_id: Uuid,
    filters: &ApplicantFilters,
    pagination: &Pagination,
) -> Result<PagedResult<ApplicantView>, AppError> {
    let owner: Option<Uuid> = sqlx::query_scalar("SELECT employer_id FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?;

    match owner {
        None => return Err(AppError::NotFound("Job not found".to_string())),
        Some(owner) if owner != employer_id => {
            return Err(AppError::Forbidden(
                "Job belongs to another employer".to_string(),
            ))
        }
        Some(_) => {}
    }

    let status_filter = filters
        .status()
        .map(|s| {
            ApplicationStatus::parse(s).ok_or_else(|| {
                AppError::Validation(format!("Unknown status filter '{s}'"))
            })
        })
        .transpose()?;

    let mut conditions: Vec<String> = vec!["a.job_id = $1".to_string()];
    let mut param_index = 1u32;

    if filters.name().is_some() {
        param_index += 1;
        conditions.push(format!("u.name ILIKE ${param_index}"));
    }
    if filters.skills().is_some() {
        param_index += 1;
        conditions.push(format!("u.skills ILIKE ${param_index}"));
    }
    if status_filter.is_some() {
        param_index += 1;
        conditions.push(format!("a.status = ${param_index}"));
    }

    let where_clause = conditions.join(" AND ");
    let count_sql = format!(
        "SELECT COUNT(*) FROM applications a JOIN users u ON a.applicant_id = u.id \
         WHERE {where_clause}"
    );
    let data_sql = format!(
        "SELECT a.id, u.id AS applicant_id, u.name, u.email, u.skills, u.bio, \
                u.resume_path, a.status, a.applied_at \
         FROM applications a JOIN users u ON a.applicant_id = u.id \
         WHERE {where_clause} \
         ORDER BY a.applied_at DESC LIMIT {} OFFSET {}",
        pagination.limit(),
        pagination.offset()
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(job_id);
    let mut data_query = sqlx::query_as::<_, ApplicantView>(&data_sql).bind(job_id);

    // Bind parameters in the same order for both queries.
    macro_rules! bind_both {
        ($val:expr) => {
            count_query = count_query.bind($val);
            data_query = data_query.bind($val);
        };
    }

    if let Some(name) = filters.name() {
        let pattern = format!("%{name}%");
        count_query = count_query.bind(pattern.clone());
        data_query = data_query.bind(pattern);
    }
    if let Some(skills) = filters.skills() {
        let pattern = format!("%{skills}%");
        count_query = count_query.bind(pattern.clone());
        data_query = data_query.bind(pattern);
    }
    if let Some(status) = status_filter {
        bind_both!(status);
    }

    let total = count_query.fetch_one(pool).await?;
    let items = data_query.fetch_all(pool).await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// Overwrite an application's status.
///
/// The accepted set is exactly {reviewed, shortlisted, rejected}; anything
/// else fails InvalidStatus before any row is touched. The caller must own
/// the application's parent job.
pub async fn update_status(
    pool: &PgPool,
    employer_id: Uuid,
    application_id: Uuid,
    new_status: &str,
) -> Result<Application, AppError> {
    let status = ApplicationStatus::parse_reviewer_status(new_status)?;

    let owner: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT j.employer_id
        FROM applications a
        JOIN jobs j ON a.job_id = j.id
        WHERE a.id = $1
        "#,
    )
    .bind(application_id)
    .fetch_optional(pool)
    .await?;

    match owner {
        None => return Err(AppError::NotFound("Application not found".to_string())),
        Some(owner) if owner != employer_id => {
            return Err(AppError::Forbidden(
                "Application belongs to another employer's job".to_string(),
            ))
        }
        Some(_) => {}
    }

    let application = sqlx::query_as::<_, Application>(
        "UPDATE applications SET status = $1 WHERE id = $2 RETURNING *",
    )
    .bind(status)
    .bind(application_id)
    .fetch_one(pool)
    .await?;

    tracing::info!(
        application_id = %application_id,
        status = status.as_str(),
        "Application status updated"
    );
    Ok(application)
}

/// Resolve the storage key of an applicant's resume, enforcing access:
/// the applicant themself, or an employer owning at least one job that
/// applicant applied to.
pub async fn resume_key_for_download(
    pool: &PgPool,
    caller_id: Uuid,
    caller_role: UserRole,
    applicant_id: Uuid,
) -> Result<String, AppError> {
    let allowed = if caller_id == applicant_id {
        true
    } else if caller_role == UserRole::Employer {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM applications a
                JOIN jobs j ON a.job_id = j.id
                WHERE a.applicant_id = $1 AND j.employer_id = $2
            )
            "#,
        )
        .bind(applicant_id)
        .bind(caller_id)
        .fetch_one(pool)
        .await?
    } else {
        false
    };

    if !allowed {
        return Err(AppError::Forbidden(
            "No application links this resume to you".to_string(),
        ));
    }

    let resume_path: Option<Option<String>> =
        sqlx::query_scalar("SELECT resume_path FROM users WHERE id = $1")
            .bind(applicant_id)
            .fetch_optional(pool)
            .await?;

    resume_path
        .flatten()
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
}
