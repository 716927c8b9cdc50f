//! Profile service: reads, partial updates, and resume attachment.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{UpdateProfile, User};
use crate::storage::ResumeStore;

/// Fetch a user's profile row.
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<User, AppError> {
    super::auth::find_user_by_id(pool, user_id).await
}

/// Partial profile update. Absent fields preserve the stored values.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    input: &UpdateProfile,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            bio = COALESCE($2, bio),
            skills = COALESCE($3, skills),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&input.bio)
    .bind(&input.skills)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(user)
}

/// Store a resume blob and point the user's row at it.
///
/// The blob lands first; if the row update then fails, the orphaned blob is
/// removed so storage and database stay consistent.
pub async fn attach_resume(
    pool: &PgPool,
    storage: &ResumeStore,
    user_id: Uuid,
    filename: &str,
    data: &[u8],
) -> Result<String, AppError> {
    let key = storage.store(user_id, filename, data).await?;

    let updated = sqlx::query("UPDATE users SET resume_path = $1, updated_at = NOW() WHERE id = $2")
        .bind(&key)
        .bind(user_id)
        .execute(pool)
        .await;

    match updated {
        Ok(result) if result.rows_affected() == 1 => {
            tracing::info!(user_id = %user_id, key, "Resume attached");
            Ok(key)
        }
        Ok(_) => {
            storage.remove(&key).await;
            Err(AppError::NotFound("User not found".to_string()))
        }
        Err(e) => {
            storage.remove(&key).await;
            Err(AppError::Database(e))
        }
    }
}
