use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub document_id: String,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct ImageList {
    pub images: Vec<ImageUrl>,
}

/// Result of classifying an image without persisting anything.
#[derive(Debug, Serialize)]
pub struct ClassifiedImage {
    pub document_id: String,
    pub image_url: String,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StoredClassification {
    pub document_id: String,
    pub ingredients: Vec<String>,
}
