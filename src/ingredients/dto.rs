use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct StoreIngredientsRequest {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
