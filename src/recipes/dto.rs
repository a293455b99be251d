use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A recipe as returned by the lookup service. Only the id and relevance
/// count are interpreted; everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCandidate {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "usedIngredientCount", default)]
    pub used_ingredient_count: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct RecipesResponse {
    pub message: String,
    pub recipes: Vec<RecipeCandidate>,
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid recipe id: {}", other))),
    }
}
