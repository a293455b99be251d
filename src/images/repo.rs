use serde_json::{Map, Value};

use crate::store::{collections::IMAGES, Document, DocumentStore};

pub const IMAGE_URL_FIELD: &str = "imageURL";

pub async fn get_image(store: &dyn DocumentStore, id: &str) -> anyhow::Result<Option<Document>> {
    store.get(IMAGES, id).await
}

pub async fn list_images(store: &dyn DocumentStore) -> anyhow::Result<Vec<Document>> {
    store.list(IMAGES).await
}

/// Attach detected labels to an image record. Returns false if the record is gone.
pub async fn set_ingredients(
    store: &dyn DocumentStore,
    id: &str,
    labels: &[String],
) -> anyhow::Result<bool> {
    let mut fields = Map::new();
    fields.insert(
        "ingredients".into(),
        Value::Array(labels.iter().cloned().map(Value::String).collect()),
    );
    store.update(IMAGES, id, fields).await
}
