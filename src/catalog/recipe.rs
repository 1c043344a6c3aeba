use super::field::Field;
use super::normalize::normalize;
use serde::{Deserialize, Deserializer};

/// Columns a dataset must carry to be loaded
pub const REQUIRED_COLUMNS: &[&str] = &[
    "recipe_title",
    "category",
    "subcategory",
    "ingredients",
    "directions",
    "description",
    "num_ingredients",
    "num_steps",
];

/// One dataset row as it appears in the CSV file
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRow {
    pub recipe_title: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub category: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub subcategory: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub ingredients: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub directions: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "optional_count")]
    pub num_ingredients: Option<i64>,
    #[serde(deserialize_with = "optional_count")]
    pub num_steps: Option<i64>,
}

/// Deserialize a cell, treating empty strings as None
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Ok(Some(s.to_string())),
    }
}

/// Counts are integers, possibly written as `7.0` by spreadsheet exports
fn optional_count<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(cell) = empty_as_none(deserializer)? else {
        return Ok(None);
    };
    let cell = cell.trim();

    if let Ok(n) = cell.parse::<i64>() {
        return Ok(Some(n));
    }
    match cell.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f.is_finite() => Ok(Some(f as i64)),
        _ => Err(serde::de::Error::custom(format!(
            "invalid count value: {cell:?}"
        ))),
    }
}

/// A loaded recipe. Never mutated after the catalog is built.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: usize,
    pub title: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub ingredients: Field,
    pub directions: Field,
    /// Directions text exactly as stored, measured by the length preference
    pub raw_directions: Option<String>,
    pub description: String,
    pub num_ingredients: Option<i64>,
    pub num_steps: Option<i64>,
    /// Lowercase letters-and-spaces projection of the ingredients text
    pub normalized_field: String,
}

impl Recipe {
    pub fn from_row(id: usize, row: RecipeRow) -> Self {
        let raw_ingredients = row.ingredients.unwrap_or_default();
        let normalized_field = normalize(&raw_ingredients);

        Self {
            id,
            title: row.recipe_title,
            category: row.category,
            subcategory: row.subcategory,
            ingredients: Field::parse(&raw_ingredients),
            directions: Field::parse(row.directions.as_deref().unwrap_or_default()),
            raw_directions: row.directions,
            description: row.description,
            num_ingredients: row.num_ingredients,
            num_steps: row.num_steps,
            normalized_field,
        }
    }

    /// Character length of the stored directions text
    pub fn directions_len(&self) -> Option<usize> {
        self.raw_directions.as_ref().map(|d| d.chars().count())
    }
}
