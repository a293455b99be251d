//! Roboflow-hosted "aicook" ingredient detector.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AicookConfig;
use crate::upstream;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("image classifier returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid classifier response: {0}")]
    InvalidResponse(String),
}

impl ClassifyError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClassifyError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            ClassifyError::Status { status, .. } => Some(*status),
            ClassifyError::InvalidResponse(_) => None,
        }
    }
}

#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Ingredient labels detected in the image, one per prediction.
    async fn classify(&self, image_url: &str) -> Result<Vec<String>, ClassifyError>;
}

pub struct RoboflowClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl RoboflowClassifier {
    pub fn new(client: reqwest::Client, config: &AicookConfig) -> Self {
        Self {
            client,
            endpoint: format!(
                "{}/{}",
                config.base_url.trim_end_matches('/'),
                config.model.trim_start_matches('/')
            ),
            api_key: config.api_key.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InferResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    class: String,
}

#[async_trait]
impl ImageClassifier for RoboflowClassifier {
    async fn classify(&self, image_url: &str) -> Result<Vec<String>, ClassifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str()), ("image", image_url)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "classifier request rejected");
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                message: upstream::error_message(&body),
            });
        }

        let labels = parse_labels(&body)?;
        debug!(?labels, "classifier predictions");
        Ok(labels)
    }
}

fn parse_labels(body: &str) -> Result<Vec<String>, ClassifyError> {
    let parsed: InferResponse =
        serde_json::from_str(body).map_err(|e| ClassifyError::InvalidResponse(e.to_string()))?;
    Ok(parsed.predictions.into_iter().map(|p| p.class).collect())
}
