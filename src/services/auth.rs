//! Authentication service: password hashing, JWT issuance, login, registration.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{RegisterUser, User, UserRole};

/// JWT claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

/// Response returned on successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub role: UserRole,
    pub token_type: String,
}

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Issue a signed token embedding the user's identity claims.
pub fn issue_token(user: &User, jwt_secret: &str, expiry_secs: i64) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
}

/// Validate a JWT and return the claims. Expiry and signature/shape failures
/// are reported distinctly.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let validation = Validation::default();

    jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::TokenMalformed,
        })
}

/// Authenticate by email and password, returning a fresh token.
///
/// Absent user and password mismatch are indistinguishable to the caller.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password: &str,
    jwt_secret: &str,
    expiry_secs: i64,
) -> Result<TokenResponse, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email.trim())
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let access_token = issue_token(&user, jwt_secret, expiry_secs)?;
    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User logged in");

    Ok(TokenResponse {
        access_token,
        role: user.role,
        token_type: "Bearer".to_string(),
    })
}

/// Create a new user with hashed password. A duplicate email surfaces as a
/// conflict via the unique constraint, not a pre-check.
pub async fn register(pool: &PgPool, input: &RegisterUser) -> Result<User, AppError> {
    let password_hash = hash_password(&input.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password_hash, role, bio)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(input.email.trim())
    .bind(&password_hash)
    .bind(input.role)
    .bind(&input.bio)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Email already registered".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User registered");
    Ok(user)
}

/// Find a user by ID.
pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            role,
            bio: None,
            skills: None,
            resume_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn password_hash_and_verify() {
        let password = "SecurePassword123!";
        let hash = hash_password(password).unwrap();
        assert_ne!(hash, password);
        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("WrongPassword", &hash).unwrap());
    }

    #[test]
    fn token_roundtrip_carries_identity() {
        let user = sample_user(UserRole::Employer);
        let secret = "test-secret-key-for-jwt";

        let token = issue_token(&user, secret, 3600).unwrap();
        let claims = validate_token(&token, secret).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.name, "Test User");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, UserRole::Employer);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn malformed_token_rejected() {
        let err = validate_token("garbage.token.here", "secret").unwrap_err();
        assert!(matches!(err, AppError::TokenMalformed));
    }

    #[test]
    fn wrong_secret_rejected() {
        let user = sample_user(UserRole::Applicant);
        let token = issue_token(&user, "secret-a", 3600).unwrap();
        let err = validate_token(&token, "secret-b").unwrap_err();
        assert!(matches!(err, AppError::TokenMalformed));
    }

    #[test]
    fn expired_token_rejected_distinctly() {
        let user = sample_user(UserRole::Applicant);
        let secret = "test-secret";
        // Expired well beyond the default 60s leeway window.
        let token = issue_token(&user, secret, -3600).unwrap();
        let err = validate_token(&token, secret).unwrap_err();
        assert!(matches!(err, AppError::TokenExpired));
    }
}
