use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use super::{
    dto::{MessageResponse, StoreIngredientsRequest},
    repo::insert_ingredient,
};
use crate::{error::AppError, state::AppState};

pub fn ingredient_routes() -> Router<AppState> {
    Router::new().route("/api/ingredients/store-ingredients", post(store_ingredients))
}

/// Each submitted name becomes its own document; duplicates are kept.
#[instrument(skip(state, payload), fields(count = payload.ingredients.len()))]
pub async fn store_ingredients(
    State(state): State<AppState>,
    Json(payload): Json<StoreIngredientsRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    for name in &payload.ingredients {
        insert_ingredient(state.store.as_ref(), name).await?;
    }
    info!(count = payload.ingredients.len(), "ingredients stored");
    Ok(Json(MessageResponse {
        message: "Ingredients successfully stored in the database".into(),
    }))
}
