//! Spoonacular `findByIngredients` client.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use super::dto::RecipeCandidate;
use crate::config::SpoonacularConfig;
use crate::upstream;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("recipe lookup returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid recipe lookup response: {0}")]
    InvalidResponse(String),
}

impl LookupError {
    pub fn status(&self) -> Option<u16> {
        match self {
            LookupError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            LookupError::Status { status, .. } => Some(*status),
            LookupError::InvalidResponse(_) => None,
        }
    }
}

#[async_trait]
pub trait RecipeLookup: Send + Sync {
    /// Candidate recipes for the given on-hand ingredient names, in service order.
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RecipeCandidate>, LookupError>;
}

pub struct SpoonacularClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    results: u32,
}

impl SpoonacularClient {
    pub fn new(client: reqwest::Client, config: &SpoonacularConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            results: config.results,
        }
    }
}

#[async_trait]
impl RecipeLookup for SpoonacularClient {
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RecipeCandidate>, LookupError> {
        let url = format!("{}/recipes/findByIngredients", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[
                ("ingredients", ingredients.join(",")),
                ("number", self.results.to_string()),
                ("apiKey", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "spoonacular request rejected");
            return Err(LookupError::Status {
                status: status.as_u16(),
                message: upstream::error_message(&body),
            });
        }

        let recipes = parse_candidates(&body)?;
        debug!(count = recipes.len(), "spoonacular returned recipes");
        Ok(recipes)
    }
}

fn parse_candidates(body: &str) -> Result<Vec<RecipeCandidate>, LookupError> {
    serde_json::from_str(body).map_err(|e| LookupError::InvalidResponse(e.to_string()))
}
