use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{dto::RecipesResponse, services::refresh_recipes};
use crate::{error::AppError, state::AppState};

pub fn recipe_routes() -> Router<AppState> {
    Router::new().route("/api/recipes/", get(get_recipes))
}

/// GET /api/recipes/ runs a retention cycle and returns the fetched recipes.
#[instrument(skip(state))]
pub async fn get_recipes(
    State(state): State<AppState>,
) -> Result<Json<RecipesResponse>, AppError> {
    let recipes = refresh_recipes(&state).await?;
    Ok(Json(RecipesResponse {
        message: "Recipes fetched and stored successfully".into(),
        recipes,
    }))
}
