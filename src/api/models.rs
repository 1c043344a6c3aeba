use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{Field, Overview, Recipe};
use crate::search::{image_search_url, LengthPreference, MatchMode, SearchHit};

/// Deserialize optional string, treating empty strings as None
fn deserialize_optional_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Ok(Some(s.to_string())),
    }
}

/// Search request parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub ingredients: String, // Raw ingredient text, comma or space separated
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(default)]
    pub length: LengthPreference,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub total: usize,
    pub limit: usize,
    pub results: Vec<RecipeCard>,
}

/// Ranked recipe in search results
#[derive(Debug, Clone, Serialize)]
pub struct RecipeCard {
    #[serde(flatten)]
    pub recipe: RecipeDetail,
    pub match_score: usize,
}

impl From<&SearchHit<'_>> for RecipeCard {
    fn from(hit: &SearchHit<'_>) -> Self {
        Self {
            recipe: RecipeDetail::from(hit.recipe),
            match_score: hit.match_score,
        }
    }
}

/// Full recipe details
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub id: usize,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub ingredients: Field,
    pub directions: Field,
    pub num_ingredients: Option<i64>,
    pub num_steps: Option<i64>,
    pub image_url: String,
}

impl From<&Recipe> for RecipeDetail {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            category: recipe.category.clone(),
            subcategory: recipe.subcategory.clone(),
            ingredients: recipe.ingredients.clone(),
            directions: recipe.directions.clone(),
            num_ingredients: recipe.num_ingredients,
            num_steps: recipe.num_steps,
            image_url: image_search_url(&recipe.title),
        }
    }
}

/// Category list response
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Subcategory query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SubcategoryParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
}

/// Subcategory list response
#[derive(Debug, Clone, Serialize)]
pub struct SubcategoriesResponse {
    pub category: Option<String>,
    pub subcategories: Vec<String>,
}

/// Common ingredient query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CommonIngredientsParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub top: Option<usize>,
}

/// Common ingredient response
#[derive(Debug, Clone, Serialize)]
pub struct CommonIngredientsResponse {
    pub ingredients: Vec<String>,
}

/// Dataset statistics
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    #[serde(flatten)]
    pub overview: Overview,
    pub loaded_at: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub catalog: String,
    pub recipes: usize,
}
