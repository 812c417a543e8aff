use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::auth;
use crate::db::{self, DbError};
use crate::error::ApiError;
use crate::models::{CredentialsRequest, NewUser, User, UserEnvelope};
use crate::AppState;

const SIGNUP_FAILED: &str = "Error creating user";
const LOGIN_FAILED: &str = "Error logging in";

// POST /api/signup - Register a new user
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserEnvelope>), ApiError> {
    let Json(payload) = payload?;
    let credentials = payload.validate().map_err(ApiError::Validation)?;

    // Fast path; the UNIQUE constraint below still settles concurrent signups
    let existing = db::get_user_by_username(&state.pool, &credentials.username)
        .await
        .map_err(ApiError::internal(SIGNUP_FAILED))?;
    if existing.is_some() {
        tracing::debug!(username = %credentials.username, "signup rejected, username taken");
        return Err(ApiError::DuplicateUser);
    }

    let password_hash = auth::hash_password_blocking(credentials.password, state.hash_cost)
        .await
        .map_err(ApiError::internal(SIGNUP_FAILED))?;

    let new_user = NewUser::with_defaults(credentials.username, password_hash);
    let user = insert_user(&state.pool, &new_user).await?;

    tracing::info!(user_id = user.id, username = %user.username, "user created");

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "User created successfully".to_string(),
            user: user.into(),
        }),
    ))
}

/// Insert step of signup. A unique-constraint hit means another signup for
/// the same username committed after our existence check.
async fn insert_user(pool: &SqlitePool, new_user: &NewUser) -> Result<User, ApiError> {
    match db::create_user(pool, new_user).await {
        Ok(user) => Ok(user),
        Err(DbError::DuplicateKey) => {
            tracing::warn!(username = %new_user.username, "signup lost a race on username");
            Err(ApiError::DuplicateUser)
        }
        Err(err) => Err(ApiError::internal(SIGNUP_FAILED)(err)),
    }
}

// POST /api/login - Check a username/password pair
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let Json(payload) = payload?;
    let credentials = payload.validate().map_err(ApiError::Validation)?;

    let user = db::get_user_by_username(&state.pool, &credentials.username)
        .await
        .map_err(ApiError::internal(LOGIN_FAILED))?
        .ok_or(ApiError::NotFound)?;

    let valid = auth::verify_password_blocking(credentials.password, user.password.clone())
        .await
        .map_err(ApiError::internal(LOGIN_FAILED))?;
    if !valid {
        tracing::debug!(username = %user.username, "login rejected, bad password");
        return Err(ApiError::InvalidCredentials);
    }

    Ok(Json(UserEnvelope {
        message: "Login successful".to_string(),
        user: user.into(),
    }))
}
