use super::matcher::{Matches, ScoredRecipe};
use crate::catalog::Recipe;
use serde::{Deserialize, Serialize};

/// Directions shorter than this many characters make a "quick" recipe
pub const QUICK_RECIPE_MAX_CHARS: usize = 500;

/// Recipe length preference, judged by the stored directions text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LengthPreference {
    #[default]
    All,
    Quick,
    Full,
}

impl LengthPreference {
    /// Recipes without directions text are neither quick nor full
    pub fn accepts(self, recipe: &Recipe, quick_max_chars: usize) -> bool {
        match (self, recipe.directions_len()) {
            (LengthPreference::All, _) => true,
            (LengthPreference::Quick, Some(len)) => len < quick_max_chars,
            (LengthPreference::Full, Some(len)) => len >= quick_max_chars,
            (_, None) => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Ranking {
    pub length: LengthPreference,
    pub max_results: usize,
    pub quick_max_chars: usize,
}

impl Ranking {
    pub fn new(length: LengthPreference, max_results: usize) -> Self {
        Self {
            length,
            max_results,
            quick_max_chars: QUICK_RECIPE_MAX_CHARS,
        }
    }

    pub fn with_quick_max_chars(mut self, quick_max_chars: usize) -> Self {
        self.quick_max_chars = quick_max_chars;
        self
    }

    /// Order by score when the matches were scored, drop recipes of the
    /// wrong length, then cut to `max_results`
    pub fn apply<'a>(&self, matches: Matches<'a>) -> Vec<ScoredRecipe<'a>> {
        let Matches { mut hits, scored } = matches;

        if scored {
            // sort_by is stable: equal scores keep catalog order
            hits.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        }

        hits.into_iter()
            .filter(|hit| self.length.accepts(hit.recipe, self.quick_max_chars))
            .take(self.max_results)
            .collect()
    }
}

pub fn rank_and_limit<'a>(
    matches: Matches<'a>,
    length: LengthPreference,
    max_results: usize,
) -> Vec<ScoredRecipe<'a>> {
    Ranking::new(length, max_results).apply(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::row;
    use crate::catalog::Catalog;

    fn scored<'a>(catalog: &'a Catalog, scores: &[usize]) -> Matches<'a> {
        Matches {
            hits: catalog
                .all()
                .iter()
                .zip(scores)
                .map(|(recipe, &match_score)| ScoredRecipe {
                    recipe,
                    match_score,
                })
                .collect(),
            scored: true,
        }
    }

    fn titles(hits: &[ScoredRecipe<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.recipe.title.clone()).collect()
    }

    #[test]
    fn test_stable_descending_sort() {
        let catalog = Catalog::from_rows(vec![
            row("R3", None, None, "a", "x"),
            row("R1", None, None, "a", "x"),
            row("R2", None, None, "a", "x"),
        ]);
        let ranked = rank_and_limit(scored(&catalog, &[1, 2, 2]), LengthPreference::All, 20);
        assert_eq!(titles(&ranked), vec!["R1", "R2", "R3"]);
    }

    #[test]
    fn test_unscored_keeps_order() {
        let catalog = Catalog::from_rows(vec![
            row("First", None, None, "a", "x"),
            row("Second", None, None, "a", "x"),
        ]);
        let mut matches = scored(&catalog, &[0, 5]);
        matches.scored = false;

        let ranked = rank_and_limit(matches, LengthPreference::All, 20);
        assert_eq!(titles(&ranked), vec!["First", "Second"]);
    }

    #[test]
    fn test_length_boundary_is_full() {
        let catalog = Catalog::from_rows(vec![
            row("Exactly", None, None, "a", &"d".repeat(500)),
            row("Shorter", None, None, "a", &"d".repeat(499)),
            row("Empty", None, None, "a", ""),
        ]);
        let exactly = catalog.get(0).unwrap();
        let shorter = catalog.get(1).unwrap();
        let empty = catalog.get(2).unwrap();

        assert!(LengthPreference::Full.accepts(exactly, QUICK_RECIPE_MAX_CHARS));
        assert!(!LengthPreference::Quick.accepts(exactly, QUICK_RECIPE_MAX_CHARS));
        assert!(LengthPreference::Quick.accepts(shorter, QUICK_RECIPE_MAX_CHARS));
        assert!(!LengthPreference::Full.accepts(shorter, QUICK_RECIPE_MAX_CHARS));

        assert!(LengthPreference::All.accepts(empty, QUICK_RECIPE_MAX_CHARS));
        assert!(!LengthPreference::Quick.accepts(empty, QUICK_RECIPE_MAX_CHARS));
        assert!(!LengthPreference::Full.accepts(empty, QUICK_RECIPE_MAX_CHARS));
    }

    #[test]
    fn test_length_filter_applies_before_truncation() {
        let catalog = Catalog::from_rows(vec![
            row("Long A", None, None, "a", &"d".repeat(600)),
            row("Short B", None, None, "a", "Stir."),
            row("Long C", None, None, "a", &"d".repeat(700)),
            row("Short D", None, None, "a", "Serve."),
        ]);

        let ranked = rank_and_limit(scored(&catalog, &[3, 2, 1, 0]), LengthPreference::Quick, 2);
        assert_eq!(titles(&ranked), vec!["Short B", "Short D"]);
    }

    #[test]
    fn test_truncates_to_max_results() {
        let rows = (0..30)
            .map(|i| row(&format!("Recipe {i:02}"), None, None, "a", "x"))
            .collect::<Vec<_>>();
        let catalog = Catalog::from_rows(rows);
        let scores: Vec<usize> = (0..30).map(|i| i % 3).collect();

        let ranked = rank_and_limit(scored(&catalog, &scores), LengthPreference::All, 20);
        assert_eq!(ranked.len(), 20);
        assert!(ranked.windows(2).all(|w| w[0].match_score >= w[1].match_score));
        // All ten score-2 recipes come first, in catalog order
        assert_eq!(ranked[0].recipe.title, "Recipe 02");
        assert_eq!(ranked[9].recipe.title, "Recipe 29");
        assert_eq!(ranked[10].match_score, 1);
    }

    #[test]
    fn test_custom_threshold() {
        let catalog = Catalog::from_rows(vec![row("Mid", None, None, "a", &"d".repeat(200))]);
        let matches = scored(&catalog, &[0]);

        let ranking = Ranking::new(LengthPreference::Full, 10).with_quick_max_chars(150);
        assert_eq!(ranking.apply(matches).len(), 1);
    }
}
