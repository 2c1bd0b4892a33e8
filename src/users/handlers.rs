use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

use super::dto::{CreateUserRequest, MessageResponse, UpdateUserRequest};
use super::repo_types::User;
use super::store::StoreError;

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:uid", get(get_user))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:uid", put(update_user).delete(delete_user))
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .users
        .find_all()
        .await
        .map_err(|e| store_failure(e, "Failed to fetch users"))?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<User>, ApiError> {
    let uid = parse_uid(&uid)?;
    match state.users.find_by_id(uid).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err(not_found()),
        Err(e) => Err(store_failure(e, "Failed to fetch user")),
    }
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(payload) = payload.map_err(bad_json)?;

    let new = payload.into_new_user().map_err(|missing| {
        warn!(?missing, "create user rejected");
        ApiError::BadRequest(format!("Missing required fields: {}", missing.join(", ")))
    })?;

    let user = state
        .users
        .insert(new)
        .await
        .map_err(|e| store_failure(e, "Failed to create user"))?;

    info!(uid = %user.uid, email = %user.email, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let uid = parse_uid(&uid)?;
    let Json(payload) = payload.map_err(bad_json)?;

    let user = state
        .users
        .update(uid, payload.into())
        .await
        .map_err(|e| store_failure(e, "Failed to update user"))?;

    info!(uid = %user.uid, "user updated");
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let uid = parse_uid(&uid)?;
    state
        .users
        .delete(uid)
        .await
        .map_err(|e| store_failure(e, "Failed to delete user"))?;

    info!(%uid, "user deleted");
    Ok(Json(MessageResponse {
        message: "User deleted successfully".into(),
    }))
}

// --- helpers ---

fn not_found() -> ApiError {
    ApiError::NotFound("User not found".into())
}

/// Ids are opaque to clients; one that is not a UUID cannot name a stored user.
fn parse_uid(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        warn!(uid = %raw, "malformed user id");
        not_found()
    })
}

fn bad_json(rejection: JsonRejection) -> ApiError {
    warn!(error = %rejection, "invalid json body");
    ApiError::BadRequest(rejection.body_text())
}

/// Driver detail goes to the log, never into the response body.
fn store_failure(e: StoreError, message: &str) -> ApiError {
    match e {
        StoreError::NotFound => not_found(),
        StoreError::Conflict(detail) => {
            warn!(%detail, "user store conflict");
            ApiError::Conflict("Email already in use".into())
        }
        StoreError::Unavailable(detail) => {
            error!(%detail, "{}", message);
            ApiError::Internal(message.into())
        }
    }
}
