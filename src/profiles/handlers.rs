use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{MessageResponse, ProfileResponse, UserProfile};
use super::services;
use crate::{error::AppError, state::AppState};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/user", post(create_user_profile))
        .route(
            "/api/users/user/:email",
            get(get_user_profile)
                .put(update_user_profile)
                .delete(delete_user_profile),
        )
}

fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse { message: text.into() })
}

#[instrument(skip(state, payload))]
pub async fn create_user_profile(
    State(state): State<AppState>,
    Json(payload): Json<UserProfile>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    services::create_profile(&state, payload).await?;
    Ok((StatusCode::CREATED, message("User profile created successfully")))
}

#[instrument(skip(state))]
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = services::get_profile(&state, &email).await?;
    Ok(Json(ProfileResponse { user }))
}

#[instrument(skip(state, payload))]
pub async fn update_user_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(payload): Json<UserProfile>,
) -> Result<Json<MessageResponse>, AppError> {
    services::update_profile(&state, &email, payload).await?;
    Ok(message("User profile updated successfully"))
}

#[instrument(skip(state))]
pub async fn delete_user_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    services::delete_profile(&state, &email).await?;
    Ok(message("User profile deleted successfully"))
}
