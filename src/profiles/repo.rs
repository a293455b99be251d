use anyhow::Context;
use serde_json::Value;

use super::dto::UserProfile;
use crate::store::{collections::USERS, Document, DocumentStore};

impl UserProfile {
    /// First profile document with this email, if any.
    pub async fn find_by_email(
        store: &dyn DocumentStore,
        email: &str,
    ) -> anyhow::Result<Option<(String, UserProfile)>> {
        let docs = store
            .find_eq(USERS, "email", &Value::String(email.to_string()))
            .await?;
        docs.into_iter().next().map(decode).transpose()
    }

    pub async fn create(&self, store: &dyn DocumentStore) -> anyhow::Result<String> {
        store.insert(USERS, encode(self)?).await
    }

    /// Full replace of the document at `id`.
    pub async fn replace(&self, store: &dyn DocumentStore, id: &str) -> anyhow::Result<()> {
        store.set(USERS, id, encode(self)?).await
    }

    pub async fn delete(store: &dyn DocumentStore, id: &str) -> anyhow::Result<bool> {
        store.delete(USERS, id).await
    }
}

fn encode(profile: &UserProfile) -> anyhow::Result<Value> {
    serde_json::to_value(profile).context("serialize profile")
}

fn decode(doc: Document) -> anyhow::Result<(String, UserProfile)> {
    let profile = serde_json::from_value(doc.data)
        .with_context(|| format!("decode profile {}", doc.id))?;
    Ok((doc.id, profile))
}
