use serde_json::json;

use crate::store::{collections::INGREDIENTS, DocumentStore};

pub async fn insert_ingredient(store: &dyn DocumentStore, name: &str) -> anyhow::Result<String> {
    store.insert(INGREDIENTS, json!({ "name": name })).await
}

/// Names of every stored ingredient, skipping documents without one.
pub async fn list_names(store: &dyn DocumentStore) -> anyhow::Result<Vec<String>> {
    let docs = store.list(INGREDIENTS).await?;
    Ok(docs
        .iter()
        .filter_map(|d| d.str_field("name").map(str::to_string))
        .collect())
}
