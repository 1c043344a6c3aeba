// Ingredient search: category filter -> ingredient match -> rank -> limit

pub mod matcher;
pub mod ranker;

use crate::catalog::{selection, Catalog, ALL};
use crate::error::Result;
use tracing::debug;

// Re-exports
pub use matcher::{match_recipes, match_score, parse_ingredients, MatchMode, Matches, ScoredRecipe};
pub use ranker::{rank_and_limit, LengthPreference, Ranking, QUICK_RECIPE_MAX_CHARS};

pub type SearchHit<'a> = ScoredRecipe<'a>;

const IMAGE_SEARCH_URL: &str = "https://www.google.com/search?tbm=isch&q=";

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub category: String,
    pub subcategory: String,
    pub ingredients: String, // Raw user text, e.g. "chicken, garlic onion"
    pub mode: MatchMode,
    pub length: LengthPreference,
    pub max_results: usize,
    pub quick_max_chars: usize,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            category: ALL.to_string(),
            subcategory: ALL.to_string(),
            ingredients: String::new(),
            mode: MatchMode::All,
            length: LengthPreference::All,
            max_results: 20,
            quick_max_chars: QUICK_RECIPE_MAX_CHARS,
        }
    }
}

/// Run one search against the catalog.
///
/// `max_results` is expected to be clamped by the caller.
pub fn search<'a>(catalog: &'a Catalog, request: &SearchRequest) -> Result<Vec<SearchHit<'a>>> {
    let view = catalog.filter_by(selection(&request.category), selection(&request.subcategory));
    let tokens = parse_ingredients(&request.ingredients);

    debug!(
        "Search: {} recipes after category filter, tokens {:?} ({:?})",
        view.len(),
        tokens,
        request.mode
    );

    let matches = match_recipes(&view, &tokens, request.mode)?;
    let matched = matches.hits.len();

    let results = Ranking::new(request.length, request.max_results)
        .with_quick_max_chars(request.quick_max_chars)
        .apply(matches);

    debug!(
        "Search: {} matched ingredients, {} returned ({:?}, limit {})",
        matched,
        results.len(),
        request.length,
        request.max_results
    );

    Ok(results)
}

/// Image search link for a recipe title; only spaces are rewritten
pub fn image_search_url(title: &str) -> String {
    format!("{IMAGE_SEARCH_URL}{}", title.replace(' ', "+"))
}
