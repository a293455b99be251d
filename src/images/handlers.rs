use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{ClassifiedImage, ImageList, ImageUrl, StoredClassification};
use super::services;
use crate::{error::AppError, state::AppState};

pub fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/images", get(list_images))
        .route("/images/:document_id", get(get_image))
}

pub fn process_routes() -> Router<AppState> {
    Router::new()
        .route("/process-image/:document_id", get(process_image))
        .route(
            "/process-database-image/:document_id",
            get(process_database_image),
        )
}

#[instrument(skip(state))]
pub async fn get_image(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<ImageUrl>, AppError> {
    let image_url = services::image_url(&state, &document_id).await?;
    Ok(Json(ImageUrl { document_id, image_url }))
}

#[instrument(skip(state))]
pub async fn list_images(State(state): State<AppState>) -> Result<Json<ImageList>, AppError> {
    let images = services::list_image_urls(&state).await?;
    Ok(Json(ImageList { images }))
}

#[instrument(skip(state))]
pub async fn process_image(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<ClassifiedImage>, AppError> {
    Ok(Json(services::classify_image(&state, &document_id).await?))
}

#[instrument(skip(state))]
pub async fn process_database_image(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<StoredClassification>, AppError> {
    Ok(Json(services::classify_and_store(&state, &document_id).await?))
}
