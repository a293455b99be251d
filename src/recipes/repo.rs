use anyhow::Context;
use serde_json::Value;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::dto::RecipeCandidate;
use crate::store::{collections::RECIPES, Document, DocumentStore};

/// The parts of a stored recipe the retention cycle ranks on.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecipe {
    pub id: String,
    pub used_ingredient_count: u32,
}

impl From<&Document> for StoredRecipe {
    fn from(doc: &Document) -> Self {
        let count = doc
            .data
            .get("usedIngredientCount")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        Self {
            id: doc.id.clone(),
            used_ingredient_count: u32::try_from(count).unwrap_or(u32::MAX),
        }
    }
}

/// All stored recipes in store order.
pub async fn list_stored(store: &dyn DocumentStore) -> anyhow::Result<Vec<StoredRecipe>> {
    let docs = store.list(RECIPES).await?;
    Ok(docs.iter().map(StoredRecipe::from).collect())
}

/// Write a recipe keyed by its external id, replacing any previous record.
pub async fn put_recipe(
    store: &dyn DocumentStore,
    recipe: &RecipeCandidate,
    created_at: OffsetDateTime,
) -> anyhow::Result<()> {
    let mut body = serde_json::to_value(recipe).context("serialize recipe")?;
    if let Some(obj) = body.as_object_mut() {
        obj.insert(
            "createdAt".into(),
            Value::String(created_at.format(&Rfc3339).context("format createdAt")?),
        );
    }
    store.set(RECIPES, &recipe.id, body).await
}

pub async fn delete_recipe(store: &dyn DocumentStore, id: &str) -> anyhow::Result<bool> {
    store.delete(RECIPES, id).await
}
