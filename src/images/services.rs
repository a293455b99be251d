use tracing::{info, instrument};

use super::dto::{ClassifiedImage, ImageUrl, StoredClassification};
use super::repo::{self, IMAGE_URL_FIELD};
use crate::{error::AppError, ingredients, state::AppState};

/// The `imageURL` of one image record.
pub async fn image_url(st: &AppState, document_id: &str) -> Result<String, AppError> {
    let doc = repo::get_image(st.store.as_ref(), document_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Document with ID '{}' not found", document_id))
        })?;
    doc.str_field(IMAGE_URL_FIELD)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No 'imageURL' field found in document '{}'",
                document_id
            ))
        })
}

/// Every image record that carries a URL. Records without one are skipped;
/// an empty result is reported as not found.
pub async fn list_image_urls(st: &AppState) -> Result<Vec<ImageUrl>, AppError> {
    let images: Vec<ImageUrl> = repo::list_images(st.store.as_ref())
        .await?
        .into_iter()
        .filter_map(|doc| {
            let url = doc
                .str_field(IMAGE_URL_FIELD)
                .filter(|url| !url.is_empty())?
                .to_string();
            Some(ImageUrl { document_id: doc.id, image_url: url })
        })
        .collect();
    if images.is_empty() {
        return Err(AppError::NotFound("No images found in the database".into()));
    }
    Ok(images)
}

#[instrument(skip(st))]
pub async fn classify_image(st: &AppState, document_id: &str) -> Result<ClassifiedImage, AppError> {
    let image_url = image_url(st, document_id).await?;
    let ingredients = st.classifier.classify(&image_url).await?;
    Ok(ClassifiedImage {
        document_id: document_id.to_string(),
        image_url,
        ingredients,
    })
}

/// Classify, then record each label as a pantry ingredient and attach the
/// full label list to the image record.
#[instrument(skip(st))]
pub async fn classify_and_store(
    st: &AppState,
    document_id: &str,
) -> Result<StoredClassification, AppError> {
    let image_url = image_url(st, document_id).await?;
    let labels = st.classifier.classify(&image_url).await?;

    let store = st.store.as_ref();
    for label in &labels {
        ingredients::repo::insert_ingredient(store, label).await?;
    }
    if !repo::set_ingredients(store, document_id, &labels).await? {
        return Err(AppError::NotFound(format!(
            "Document with ID '{}' not found",
            document_id
        )));
    }
    info!(document_id, count = labels.len(), "image ingredients stored");

    Ok(StoredClassification {
        document_id: document_id.to_string(),
        ingredients: labels,
    })
}
