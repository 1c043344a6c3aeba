use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*,
    catalog::{selection, CatalogStore, ALL},
    search::{self, SearchRequest},
    Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub settings: crate::config::Settings,
}

/// GET /api/search - Search recipes by ingredients
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    debug!("Search request: {:?}", params);

    let request = SearchRequest {
        category: params.category.unwrap_or_else(|| ALL.to_string()),
        subcategory: params.subcategory.unwrap_or_else(|| ALL.to_string()),
        ingredients: params.ingredients,
        mode: params.mode,
        length: params.length,
        max_results: state.settings.search.clamp_results(params.limit),
        quick_max_chars: state.settings.search.quick_max_chars,
    };

    let catalog = state.store.current().await;
    let hits = search::search(&catalog, &request)?;
    let results: Vec<RecipeCard> = hits.iter().map(RecipeCard::from).collect();

    Ok(Json(SearchResponse {
        total: results.len(),
        limit: request.max_results,
        results,
    }))
}

/// GET /api/recipes/:id - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<usize>,
) -> Result<Json<RecipeDetail>> {
    debug!("Get recipe request: {}", id);

    let catalog = state.store.current().await;
    let recipe = catalog
        .get(id)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))?;

    Ok(Json(RecipeDetail::from(recipe)))
}

/// GET /api/categories - List categories
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<CategoriesResponse>> {
    let catalog = state.store.current().await;

    Ok(Json(CategoriesResponse {
        categories: catalog.categories(),
    }))
}

/// GET /api/subcategories - List subcategories of a category
pub async fn list_subcategories(
    State(state): State<AppState>,
    Query(params): Query<SubcategoryParams>,
) -> Result<Json<SubcategoriesResponse>> {
    debug!("List subcategories request: {:?}", params);

    let catalog = state.store.current().await;
    let category = params.category.as_deref().and_then(selection);

    Ok(Json(SubcategoriesResponse {
        category: category.map(str::to_string),
        subcategories: catalog.subcategories_for(category),
    }))
}

/// GET /api/ingredients/common - Most frequent ingredient words in a selection
pub async fn common_ingredients(
    State(state): State<AppState>,
    Query(params): Query<CommonIngredientsParams>,
) -> Result<Json<CommonIngredientsResponse>> {
    debug!("Common ingredients request: {:?}", params);

    let config = &state.settings.search;
    let top = params.top.unwrap_or(config.common_top);
    if top == 0 {
        return Err(Error::Validation("top must be at least 1".to_string()));
    }

    let catalog = state.store.current().await;
    let view = catalog.filter_by(
        params.category.as_deref().and_then(selection),
        params.subcategory.as_deref().and_then(selection),
    );

    Ok(Json(CommonIngredientsResponse {
        ingredients: view.common_ingredient_tokens(top, config.common_min_len),
    }))
}

/// GET /api/stats - Dataset statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    debug!("Get stats request");

    let catalog = state.store.current().await;

    Ok(Json(Stats {
        overview: catalog.overview(),
        loaded_at: state.store.loaded_at().await.to_rfc3339(),
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let recipes = state.store.current().await.len();
    let ready = recipes > 0;

    Ok(Json(ReadinessResponse {
        ready,
        catalog: if ready { "ok" } else { "empty" }.to_string(),
        recipes,
    }))
}
