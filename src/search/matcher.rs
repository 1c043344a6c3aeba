use crate::catalog::{CatalogView, Recipe};
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// How the query ingredients decide whether a recipe is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every ingredient must appear as a whole word
    #[default]
    All,
    /// At least one ingredient must appear as a whole word
    Any,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredRecipe<'a> {
    pub recipe: &'a Recipe,
    pub match_score: usize,
}

/// Recipes kept by the matcher, in catalog order
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    pub hits: Vec<ScoredRecipe<'a>>,
    /// False when no ingredients were given; scores are then all zero and carry no ranking
    pub scored: bool,
}

/// Split free text like `"Chicken, garlic  onion"` into lowercase tokens.
/// Duplicates are kept and each counts toward the score.
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn whole_word(token: &str) -> String {
    format!(r"\b{}\b", regex::escape(token))
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::Validation(format!("Ingredient query too complex: {e}")))
}

/// Compiled whole-word test for one query
enum Retention {
    Every(Vec<Regex>),
    Either(Regex),
}

impl Retention {
    fn new(tokens: &[String], mode: MatchMode) -> Result<Self> {
        match mode {
            MatchMode::All => tokens
                .iter()
                .map(|t| compile(&whole_word(t)))
                .collect::<Result<_>>()
                .map(Retention::Every),
            MatchMode::Any => {
                let alternation = tokens
                    .iter()
                    .map(|t| whole_word(t))
                    .collect::<Vec<_>>()
                    .join("|");
                compile(&alternation).map(Retention::Either)
            }
        }
    }

    fn retains(&self, field: &str) -> bool {
        match self {
            Retention::Every(patterns) => patterns.iter().all(|p| p.is_match(field)),
            Retention::Either(pattern) => pattern.is_match(field),
        }
    }
}

/// Number of tokens found anywhere in the field, whole word or not
pub fn match_score(field: &str, tokens: &[String]) -> usize {
    tokens
        .iter()
        .filter(|token| field.contains(token.as_str()))
        .count()
}

/// Keep recipes whose ingredients satisfy `mode` for `tokens` and score them.
///
/// Retention uses whole-word matching on the normalized field while the
/// score counts plain substring hits, so `"egg"` scores against `"eggplant"`
/// without retaining it.
pub fn match_recipes<'a>(
    view: &CatalogView<'a>,
    tokens: &[String],
    mode: MatchMode,
) -> Result<Matches<'a>> {
    if tokens.is_empty() {
        return Ok(Matches {
            hits: view
                .iter()
                .map(|recipe| ScoredRecipe {
                    recipe,
                    match_score: 0,
                })
                .collect(),
            scored: false,
        });
    }

    let retention = Retention::new(tokens, mode)?;
    let hits = view
        .iter()
        .filter(|recipe| retention.retains(&recipe.normalized_field))
        .map(|recipe| ScoredRecipe {
            recipe,
            match_score: match_score(&recipe.normalized_field, tokens),
        })
        .collect();

    Ok(Matches { hits, scored: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::row;
    use crate::catalog::Catalog;

    fn tokens(raw: &str) -> Vec<String> {
        parse_ingredients(raw)
    }

    fn titles(matches: &Matches<'_>) -> Vec<String> {
        matches.hits.iter().map(|h| h.recipe.title.clone()).collect()
    }

    fn kitchen() -> Catalog {
        Catalog::from_rows(vec![
            row("Garlic Chicken", None, None, "chicken, garlic, olive oil", "x"),
            row("Ratatouille", None, None, "fresh eggplant and eggs", "x"),
            row("Fried Rice", None, None, "rice, eggs, garlic, soy sauce", "x"),
            row("Beef Stew", None, None, "beef, onion, carrot", "x"),
        ])
    }

    #[test]
    fn test_parse_ingredients() {
        assert_eq!(
            parse_ingredients("Chicken, GARLIC  onion,,\t, "),
            vec!["chicken", "garlic", "onion"]
        );
        assert_eq!(parse_ingredients("egg egg"), vec!["egg", "egg"]);
        assert!(parse_ingredients(" , ,").is_empty());
        assert!(parse_ingredients("").is_empty());
    }

    #[test]
    fn test_empty_tokens_keep_everything_unscored() {
        let catalog = kitchen();
        let matches = match_recipes(&catalog.all(), &[], MatchMode::All).unwrap();

        assert!(!matches.scored);
        assert_eq!(matches.hits.len(), 4);
        assert!(matches.hits.iter().all(|h| h.match_score == 0));
        assert_eq!(titles(&matches)[0], "Garlic Chicken");
    }

    #[test]
    fn test_all_mode_requires_every_token() {
        let catalog = kitchen();
        let matches = match_recipes(&catalog.all(), &tokens("garlic, eggs"), MatchMode::All).unwrap();
        assert_eq!(titles(&matches), vec!["Fried Rice"]);
        assert_eq!(matches.hits[0].match_score, 2);
    }

    #[test]
    fn test_any_mode_accepts_one_token() {
        let catalog = kitchen();
        let matches = match_recipes(&catalog.all(), &tokens("beef chicken"), MatchMode::Any).unwrap();
        assert_eq!(titles(&matches), vec!["Garlic Chicken", "Beef Stew"]);
        assert!(matches.hits.iter().all(|h| h.match_score == 1));
    }

    #[test]
    fn test_whole_word_retention_substring_scoring() {
        let field = "fresh eggplant and eggs";
        let egg = tokens("egg");

        assert!(!Retention::new(&egg, MatchMode::All).unwrap().retains(field));
        assert!(!Retention::new(&egg, MatchMode::Any).unwrap().retains(field));
        assert!(match_score(field, &egg) >= 1);

        let catalog = kitchen();
        let matches = match_recipes(&catalog.all(), &egg, MatchMode::Any).unwrap();
        assert!(matches.hits.is_empty());
    }

    #[test]
    fn test_score_counts_substrings_of_longer_words() {
        let catalog = kitchen();
        // "eggs" retains; "egg" only scores as a substring of "eggplant"/"eggs"
        let matches =
            match_recipes(&catalog.all(), &tokens("eggs, egg"), MatchMode::Any).unwrap();
        assert_eq!(titles(&matches), vec!["Ratatouille", "Fried Rice"]);
        assert!(matches.hits.iter().all(|h| h.match_score == 2));
    }

    #[test]
    fn test_tokens_are_literal_text() {
        let catalog = kitchen();
        for raw in ["(", "a.c", "*", "oil|beef", "[rice]"] {
            let result = match_recipes(&catalog.all(), &tokens(raw), MatchMode::Any);
            assert!(result.unwrap().hits.is_empty(), "{raw:?} matched");
        }
    }

    #[test]
    fn test_all_mode_monotonic_and_any_mode_monotonic() {
        let catalog = kitchen();
        let view = catalog.all();
        let mut query: Vec<String> = Vec::new();
        let mut all_sizes = Vec::new();
        let mut any_sizes = Vec::new();

        for token in ["garlic", "eggs", "rice", "beef"] {
            query.push(token.to_string());
            all_sizes.push(match_recipes(&view, &query, MatchMode::All).unwrap().hits.len());
            any_sizes.push(match_recipes(&view, &query, MatchMode::Any).unwrap().hits.len());
        }

        assert!(all_sizes.windows(2).all(|w| w[1] <= w[0]), "{all_sizes:?}");
        assert!(any_sizes.windows(2).all(|w| w[1] >= w[0]), "{any_sizes:?}");
        assert_eq!(all_sizes, vec![2, 1, 1, 0]);
        assert_eq!(any_sizes, vec![2, 3, 3, 4]);
    }
}
