//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use sqlx::PgPool;
use uuid::Uuid;

const SEED_PASSWORD: &str = "Test123!pass";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== Job Portal Seed Script ===");

    let employer_id = seed_user(&pool, "Alice Hiring", "alice@acme.test", "employer").await?;
    let applicant_id = seed_user(&pool, "Bob Candidate", "bob@example.test", "applicant").await?;

    sqlx::query("UPDATE users SET bio = $1, skills = $2 WHERE id = $3")
        .bind("Backend developer with a focus on data-heavy services")
        .bind("rust,sql,docker")
        .bind(applicant_id)
        .execute(&pool)
        .await?;

    let job_id = seed_job(
        &pool,
        employer_id,
        "Backend Engineer",
        "Design and build the services behind our hiring platform.",
        "Acme Corp",
        "Remote",
    )
    .await?;
    seed_job(
        &pool,
        employer_id,
        "Data Engineer",
        "Own the pipelines feeding our analytics warehouse.",
        "Acme Corp",
        "Berlin",
    )
    .await?;

    sqlx::query(
        "INSERT INTO applications (job_id, applicant_id)
         VALUES ($1, $2)
         ON CONFLICT (job_id, applicant_id) DO NOTHING",
    )
    .bind(job_id)
    .bind(applicant_id)
    .execute(&pool)
    .await?;
    println!("[done] Bob applied to Backend Engineer");

    println!("\n=== Seed complete! ===");
    println!("Employer login: alice@acme.test / {SEED_PASSWORD}");
    println!("Applicant login: bob@example.test / {SEED_PASSWORD}");

    Ok(())
}

async fn seed_user(pool: &PgPool, name: &str, email: &str, role: &str) -> anyhow::Result<Uuid> {
    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    if let Some(id) = existing {
        println!("[skip] {email} already present");
        return Ok(id);
    }

    let hash = jobportal::services::auth::hash_password(SEED_PASSWORD)?;
    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash, role)
         VALUES ($1, $2, $3, $4::user_role)
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(&hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("[done] Created {role} {email}");
    Ok(id)
}

async fn seed_job(
    pool: &PgPool,
    employer_id: Uuid,
    title: &str,
    description: &str,
    company: &str,
    location: &str,
) -> anyhow::Result<Uuid> {
    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM jobs WHERE title = $1 AND employer_id = $2")
            .bind(title)
            .bind(employer_id)
            .fetch_optional(pool)
            .await?;

    if let Some(id) = existing {
        println!("[skip] Job '{title}' already present");
        return Ok(id);
    }

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO jobs (title, description, company, location, employer_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(title)
    .bind(description)
    .bind(company)
    .bind(location)
    .bind(employer_id)
    .fetch_one(pool)
    .await?;

    println!("[done] Created job '{title}'");
    Ok(id)
}
