use anyhow::Context;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::{Document, DocumentStore};

/// Postgres-backed store: one JSONB row per document in `documents`.
#[derive(Clone)]
pub struct PgDocumentStore {
    db: PgPool,
}

impl PgDocumentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

type Row = (String, Json<Value>);

fn to_doc((id, Json(data)): Row) -> Document {
    Document { id, data }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, data: Value) -> anyhow::Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(Json(data))
        .execute(&self.db)
        .await
        .with_context(|| format!("insert into {}", collection))?;
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE
               SET body = EXCLUDED.body,
                   seq = nextval(pg_get_serial_sequence('documents', 'seq')),
                   updated_at = now()
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(data))
        .execute(&self.db)
        .await
        .with_context(|| format!("set {}/{}", collection, id))?;
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> anyhow::Result<Option<Document>> {
        let row = sqlx::query_as::<_, Row>(
            r#"
            SELECT id, body
              FROM documents
             WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .with_context(|| format!("get {}/{}", collection, id))?;
        Ok(row.map(to_doc))
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> anyhow::Result<Vec<Document>> {
        let rows = sqlx::query_as::<_, Row>(
            r#"
            SELECT id, body
              FROM documents
             WHERE collection = $1 AND body -> $2 = $3
             ORDER BY seq ASC
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(Json(value))
        .fetch_all(&self.db)
        .await
        .with_context(|| format!("query {} by {}", collection, field))?;
        Ok(rows.into_iter().map(to_doc).collect())
    }

    async fn list(&self, collection: &str) -> anyhow::Result<Vec<Document>> {
        let rows = sqlx::query_as::<_, Row>(
            r#"
            SELECT id, body
              FROM documents
             WHERE collection = $1
             ORDER BY seq ASC
            "#,
        )
        .bind(collection)
        .fetch_all(&self.db)
        .await
        .with_context(|| format!("list {}", collection))?;
        Ok(rows.into_iter().map(to_doc).collect())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE documents
               SET body = body || $3,
                   updated_at = now()
             WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(fields)))
        .execute(&self.db)
        .await
        .with_context(|| format!("update {}/{}", collection, id))?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, collection: &str, id: &str) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM documents
             WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .execute(&self.db)
        .await
        .with_context(|| format!("delete {}/{}", collection, id))?;
        Ok(res.rows_affected() > 0)
    }
}
