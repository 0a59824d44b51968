//! Account registration and the token lifecycle.
//!
//! Login hands out an access token plus a refresh token. Every refresh
//! revokes the presented session and opens a new one, so a refresh token
//! is single-use.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use vetrecords_core::account::{validate_email, validate_username, MAX_PERSON_NAME_LEN};
use vetrecords_core::error::CoreError;
use vetrecords_core::records::validate_optional_text;
use vetrecords_core::types::{DbId, Timestamp};
use vetrecords_db::models::session::CreateSession;
use vetrecords_db::models::user::{CreateUser, User, UserResponse};
use vetrecords_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{hash_refresh_token, RefreshToken};
use crate::auth::password::{hash_password, validate_new_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Consecutive bad passwords that lock an account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

const LOCK_DURATION_MINS: i64 = 15;

/// Shared by unknown-user and wrong-password so neither leaks which it was.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Body of a successful login or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub display_name: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name(),
            username: user.username,
            email: user.email,
        }
    }
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let username = input.username.trim();
    let email = input.email.trim();

    validate_username(username)?;
    validate_email("email", email)?;
    validate_optional_text("first_name", input.first_name.as_deref(), MAX_PERSON_NAME_LEN)?;
    validate_optional_text("last_name", input.last_name.as_deref(), MAX_PERSON_NAME_LEN)?;
    validate_new_password(&input.password, &input.password_confirm)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_username(&state.pool, username).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Username '{username}' is already taken"
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            first_name: non_blank(input.first_name),
            last_name: non_blank(input.last_name),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(|| unauthorized(INVALID_CREDENTIALS))?;

    let now = Utc::now();
    ensure_can_sign_in(&user, now)?;

    let password_ok = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_ok {
        record_failed_attempt(&state, &user, now).await?;
        return Err(unauthorized(INVALID_CREDENTIALS));
    }

    UserRepo::record_successful_login(&state.pool, user.id, now).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(open_session(&state, user.into()).await?))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let hash = hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_active_by_refresh_token_hash(&state.pool, &hash, Utc::now())
        .await?
        .ok_or_else(|| unauthorized("Invalid or expired refresh token"))?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| unauthorized("User no longer exists"))?;
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    Ok(Json(open_session(&state, user.into()).await?))
}

/// POST /api/v1/auth/logout
///
/// Revokes every session of the caller; 204 on success.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// Refuse deactivated accounts and accounts still inside a lock window.
fn ensure_can_sign_in(user: &User, now: Timestamp) -> AppResult<()> {
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }
    match user.locked_until {
        Some(until) if until > now => Err(AppError::Core(CoreError::Forbidden(
            "Account is temporarily locked. Try again later.".into(),
        ))),
        _ => Ok(()),
    }
}

async fn record_failed_attempt(state: &AppState, user: &User, now: Timestamp) -> AppResult<()> {
    let until = now + Duration::minutes(LOCK_DURATION_MINS);
    let failures =
        UserRepo::record_failed_login(&state.pool, user.id, MAX_FAILED_ATTEMPTS, until).await?;
    if failures >= MAX_FAILED_ATTEMPTS {
        tracing::warn!(user_id = user.id, failures, %until, "Account locked");
    }
    Ok(())
}

/// Persist a new session and build the token pair for it.
async fn open_session(state: &AppState, user: UserInfo) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = jwt
        .issue_access_token(user.id)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh = RefreshToken::generate();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh.hash,
            expires_at: Utc::now() + Duration::days(jwt.refresh_token_expiry_days),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: jwt.access_token_ttl_secs(),
        user,
    })
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

/// Trim an optional name, mapping blank input to `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
