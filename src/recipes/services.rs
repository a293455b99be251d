use std::cmp::Reverse;
use std::collections::HashSet;

use time::OffsetDateTime;
use tracing::{debug, info, instrument};

use super::{dto::RecipeCandidate, repo, repo::StoredRecipe};
use crate::{error::AppError, ingredients, state::AppState};

/// Upper bound on stored recipes after a completed retention cycle.
pub const MAX_RECIPES: usize = 30;

/// Stable sort, most relevant first. Equal counts keep their incoming order.
pub fn rank_by_relevance<T>(items: &mut [T], count: impl Fn(&T) -> u32) {
    items.sort_by_key(|item| Reverse(count(item)));
}

/// Existing recipes to delete so that the union of stored and `incoming`
/// ids fits `capacity`.
///
/// Recipes about to be rewritten are never evicted. Of the rest, the least
/// relevant go first; among equal counts, the ones that come last in store
/// order. When the overflow is larger than what can be evicted, all of it
/// goes and the result may still exceed `capacity`.
pub fn plan_evictions(
    existing: Vec<StoredRecipe>,
    incoming: &HashSet<&str>,
    capacity: usize,
) -> Vec<StoredRecipe> {
    let mut evictable: Vec<StoredRecipe> = existing
        .into_iter()
        .filter(|r| !incoming.contains(r.id.as_str()))
        .collect();
    let total = evictable.len() + incoming.len();
    if total <= capacity {
        return Vec::new();
    }
    rank_by_relevance(&mut evictable, |r| r.used_ingredient_count);
    let excess = (total - capacity).min(evictable.len());
    evictable.split_off(evictable.len() - excess)
}

/// One retention cycle: look up recipes for the stored ingredients, make
/// room for them by evicting the least relevant stored recipes, then write
/// them. Returns the freshly fetched recipes, most relevant first.
///
/// Evictions and writes are separate store calls; a failure part way
/// leaves whatever was already committed.
#[instrument(skip_all)]
pub async fn refresh_recipes(st: &AppState) -> Result<Vec<RecipeCandidate>, AppError> {
    let store = st.store.as_ref();

    let ingredients = ingredients::repo::list_names(store).await?;
    if ingredients.is_empty() {
        return Err(AppError::NoIngredients);
    }
    debug!(
        count = ingredients.len(),
        limit = st.config.spoonacular.results,
        "looking up recipes"
    );

    let mut recipes = st.recipes.find_by_ingredients(&ingredients).await?;
    rank_by_relevance(&mut recipes, |r| r.used_ingredient_count);

    let existing = repo::list_stored(store).await?;
    let incoming: HashSet<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
    let evicted = plan_evictions(existing, &incoming, MAX_RECIPES);
    if !evicted.is_empty() {
        info!(count = evicted.len(), "evicting least relevant recipes");
    }
    for old in &evicted {
        repo::delete_recipe(store, &old.id).await?;
    }

    for recipe in &recipes {
        repo::put_recipe(store, recipe, OffsetDateTime::now_utc()).await?;
    }
    info!(stored = recipes.len(), evicted = evicted.len(), "recipes refreshed");

    Ok(recipes)
}
