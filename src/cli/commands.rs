use crate::catalog::{selection, Catalog, Recipe};
use crate::config::SearchConfig;
use crate::search::{self, image_search_url, SearchHit, SearchRequest};
use crate::{Error, Result};

/// Run a search against a local catalog and print the results
pub fn search(catalog: &Catalog, request: &SearchRequest) -> Result<()> {
    let hits = search::search(catalog, request)?;
    print!("{}", render_search_results(&hits));
    Ok(())
}

/// List categories, or the subcategories of `category`
pub fn categories(catalog: &Catalog, category: Option<&str>) -> Result<()> {
    match category.and_then(selection) {
        Some(category) => {
            let subcategories = catalog.subcategories_for(Some(category));
            if subcategories.is_empty() {
                return Err(Error::NotFound(format!(
                    "No subcategories for category \"{category}\""
                )));
            }
            println!("Subcategories of {category}:");
            for name in subcategories {
                println!("  {name}");
            }
        }
        None => {
            println!("Categories:");
            for name in catalog.categories() {
                println!("  {name}");
            }
        }
    }

    Ok(())
}

/// Print the most frequent ingredient words for a selection
pub fn common_ingredients(
    catalog: &Catalog,
    category: &str,
    subcategory: &str,
    top: Option<usize>,
    config: &SearchConfig,
) -> Result<()> {
    let top = top.unwrap_or(config.common_top);
    if top == 0 {
        return Err(Error::Validation("--top must be at least 1".to_string()));
    }

    let view = catalog.filter_by(selection(category), selection(subcategory));
    let words = view.common_ingredient_tokens(top, config.common_min_len);

    println!(
        "Common ingredients in {} recipes: {}",
        view.len(),
        words.join(", ")
    );
    Ok(())
}

/// Print the dataset overview
pub fn stats(catalog: &Catalog) -> Result<()> {
    let overview = catalog.overview();
    let avg = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));

    println!("Total recipes:   {}", overview.total_recipes);
    println!("Categories:      {}", overview.categories);
    println!("Subcategories:   {}", overview.subcategories);
    println!("Avg ingredients: {}", avg(overview.avg_ingredients));
    println!("Avg steps:       {}", avg(overview.avg_steps));
    Ok(())
}

// Helper functions

pub fn render_search_results(hits: &[SearchHit<'_>]) -> String {
    let mut out = format!("Found {} recipes\n", hits.len());

    if hits.is_empty() {
        out.push_str("No recipes found. Try different filters.\n");
        return out;
    }

    for (rank, hit) in hits.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {} (score {})\n",
            rank + 1,
            hit.recipe.title,
            hit.match_score
        ));
        out.push_str(&render_recipe(hit.recipe));
    }

    out
}

/// Description, image link, ingredients and directions of one recipe
pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();

    if !recipe.description.is_empty() {
        out.push_str(&format!("   {}\n", recipe.description));
    }
    out.push_str(&format!("   Images: {}\n", image_search_url(&recipe.title)));

    out.push_str("   Ingredients:\n");
    let bullet = if recipe.ingredients.is_structured() { "- " } else { "" };
    for item in recipe.ingredients.items() {
        out.push_str(&format!("     {bullet}{item}\n"));
    }

    out.push_str("   Directions:\n");
    let numbered = recipe.directions.is_structured();
    for (i, step) in recipe.directions.items().into_iter().enumerate() {
        if numbered {
            out.push_str(&format!("     Step {}: {step}\n", i + 1));
        } else {
            out.push_str(&format!("     {step}\n"));
        }
    }

    out
}
