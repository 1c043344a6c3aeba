// In-memory recipe catalog built once from the CSV dataset

pub mod field;
pub mod normalize;
pub mod recipe;
pub mod store;

use crate::error::LoadError;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

// Re-exports
pub use field::Field;
pub use normalize::normalize;
pub use recipe::{Recipe, RecipeRow, REQUIRED_COLUMNS};
pub use store::{CatalogStore, ReloadWatcher};

/// Filter value meaning "no filter on this dimension"
pub const ALL: &str = "All";

/// Map a user-facing filter value to an equality filter; `All` and blank mean none
pub fn selection(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value == ALL {
        None
    } else {
        Some(value)
    }
}

pub struct Catalog {
    recipes: Vec<Recipe>,
}

/// Borrowed subset of a catalog, in catalog order
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    recipes: Vec<&'a Recipe>,
}

/// Aggregate figures over the whole dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_recipes: usize,
    pub categories: usize,
    pub subcategories: usize,
    pub avg_ingredients: Option<f64>,
    pub avg_steps: Option<f64>,
}

impl Catalog {
    /// Load every row of a CSV dataset
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LoadError::Missing(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_reader(file)?;
        info!(
            "Loaded {} recipes from {}",
            catalog.len(),
            path.display()
        );

        Ok(catalog)
    }

    /// Build a catalog from CSV data with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader.headers()?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let mut rows = Vec::new();
        for row in reader.deserialize::<RecipeRow>() {
            rows.push(row?);
        }

        debug!("Parsed {} dataset rows", rows.len());
        Ok(Self::from_rows(rows))
    }

    /// Build a catalog from already-decoded rows; ids follow row order
    pub fn from_rows(rows: impl IntoIterator<Item = RecipeRow>) -> Self {
        let recipes = rows
            .into_iter()
            .enumerate()
            .map(|(id, row)| Recipe::from_row(id, row))
            .collect();

        Self { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Distinct categories, ascending
    pub fn categories(&self) -> Vec<String> {
        self.recipes
            .iter()
            .filter_map(|r| r.category.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Distinct subcategories among recipes in `category` (every recipe when `None`), ascending
    pub fn subcategories_for(&self, category: Option<&str>) -> Vec<String> {
        self.filter_by(category, None)
            .iter()
            .filter_map(|r| r.subcategory.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Recipes whose category and subcategory equal the given values; `None` matches anything
    pub fn filter_by(&self, category: Option<&str>, subcategory: Option<&str>) -> CatalogView<'_> {
        let recipes = self
            .recipes
            .iter()
            .filter(|r| category.map_or(true, |c| r.category.as_deref() == Some(c)))
            .filter(|r| subcategory.map_or(true, |s| r.subcategory.as_deref() == Some(s)))
            .collect();

        CatalogView { recipes }
    }

    pub fn all(&self) -> CatalogView<'_> {
        self.filter_by(None, None)
    }

    pub fn overview(&self) -> Overview {
        let distinct = |field: fn(&Recipe) -> Option<&str>| {
            self.recipes
                .iter()
                .filter_map(field)
                .collect::<BTreeSet<_>>()
                .len()
        };

        Overview {
            total_recipes: self.recipes.len(),
            categories: distinct(|r| r.category.as_deref()),
            subcategories: distinct(|r| r.subcategory.as_deref()),
            avg_ingredients: mean_rounded(self.recipes.iter().filter_map(|r| r.num_ingredients)),
            avg_steps: mean_rounded(self.recipes.iter().filter_map(|r| r.num_steps)),
        }
    }
}

/// Mean to one decimal place, `None` for no values
fn mean_rounded(values: impl Iterator<Item = i64>) -> Option<f64> {
    let (sum, count) = values.fold((0i64, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return None;
    }
    let mean = sum as f64 / count as f64;
    Some((mean * 10.0).round_ties_even() / 10.0)
}

impl<'a> CatalogView<'a> {
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Recipe> + '_ {
        self.recipes.iter().copied()
    }

    pub fn recipes(&self) -> &[&'a Recipe] {
        &self.recipes
    }

    /// Most frequent ingredient words in this subset.
    ///
    /// Takes the `top_n` highest counts (ties keep first-seen order) and then
    /// drops words shorter than `min_len`, so fewer than `top_n` may come back.
    pub fn common_ingredient_tokens(&self, top_n: usize, min_len: usize) -> Vec<String> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for recipe in &self.recipes {
            for token in recipe.normalized_field.split_whitespace() {
                let first_seen = counts.len();
                counts.entry(token).or_insert((0, first_seen)).0 += 1;
            }
        }

        let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|(_, (count_a, seen_a)), (_, (count_b, seen_b))| {
            count_b.cmp(count_a).then(seen_a.cmp(seen_b))
        });

        ranked
            .into_iter()
            .take(top_n)
            .filter(|(token, _)| token.len() >= min_len)
            .map(|(token, _)| token.to_string())
            .collect()
    }
}
