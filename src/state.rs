use crate::config::AppConfig;
use crate::images::classifier::{ImageClassifier, RoboflowClassifier};
use crate::recipes::lookup::{RecipeLookup, SpoonacularClient};
use crate::store::{DocumentStore, PgDocumentStore};
use crate::upstream;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

/// Everything a handler needs, constructed once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub recipes: Arc<dyn RecipeLookup>,
    pub classifier: Arc<dyn ImageClassifier>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;
        info!("document store ready");

        let http = upstream::http_client(config.upstream_timeout_secs)?;
        let store = Arc::new(PgDocumentStore::new(db)) as Arc<dyn DocumentStore>;
        let recipes =
            Arc::new(SpoonacularClient::new(http.clone(), &config.spoonacular)) as Arc<dyn RecipeLookup>;
        let classifier =
            Arc::new(RoboflowClassifier::new(http, &config.aicook)) as Arc<dyn ImageClassifier>;

        Ok(Self::from_parts(config, store, recipes, classifier))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn DocumentStore>,
        recipes: Arc<dyn RecipeLookup>,
        classifier: Arc<dyn ImageClassifier>,
    ) -> Self {
        Self {
            config,
            store,
            recipes,
            classifier,
        }
    }
}
