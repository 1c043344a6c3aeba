use cookmate::catalog::{Catalog, Field};
use cookmate::search::{search, LengthPreference, MatchMode, SearchRequest};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/recipes.csv");

fn catalog() -> Catalog {
    Catalog::load(FIXTURE).expect("Failed to load fixture dataset")
}

fn titles(catalog: &Catalog, request: &SearchRequest) -> Vec<String> {
    search(catalog, request)
        .expect("Search failed")
        .iter()
        .map(|hit| hit.recipe.title.clone())
        .collect()
}

fn ingredients(raw: &str, mode: MatchMode) -> SearchRequest {
    SearchRequest {
        ingredients: raw.to_string(),
        mode,
        ..Default::default()
    }
}

#[test]
fn test_fixture_loads_every_row() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 7);

    assert_eq!(
        catalog.categories(),
        vec!["Dessert", "Main Course", "Side Dish", "Soup"]
    );
    assert_eq!(
        catalog.subcategories_for(Some("Main Course")),
        vec!["Beef", "Poultry", "Vegetarian"]
    );

    let toast = catalog.get(6).unwrap();
    assert_eq!(toast.title, "Plain Toast");
    assert_eq!(toast.category, None);
    assert_eq!(
        toast.ingredients,
        Field::Raw {
            text: "bread, butter".to_string()
        }
    );
    assert_eq!(toast.normalized_field, "bread butter");
    assert_eq!(toast.num_steps, None);
}

#[test]
fn test_length_preference_end_to_end() {
    let catalog = catalog();

    let quick = SearchRequest {
        length: LengthPreference::Quick,
        ..ingredients("chicken", MatchMode::All)
    };
    assert_eq!(titles(&catalog, &quick), vec!["Chicken Noodle Soup"]);

    let full = SearchRequest {
        length: LengthPreference::Full,
        ..ingredients("chicken", MatchMode::All)
    };
    assert_eq!(titles(&catalog, &full), vec!["Garlic Roast Chicken"]);
}

#[test]
fn test_whole_word_retention() {
    let catalog = catalog();

    // "egg" must not retain "eggplant" or "eggs"
    assert_eq!(
        titles(&catalog, &ingredients("egg", MatchMode::Any)),
        vec!["Chicken Noodle Soup"]
    );
}

#[test]
fn test_any_mode_ranks_by_score() {
    let catalog = catalog();
    let hits = search(&catalog, &ingredients("chicken, garlic", MatchMode::Any)).unwrap();

    let ranked: Vec<(&str, usize)> = hits
        .iter()
        .map(|hit| (hit.recipe.title.as_str(), hit.match_score))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("Garlic Roast Chicken", 2),
            ("Chicken Noodle Soup", 1),
            ("Egg Fried Rice", 1),
        ]
    );
}

#[test]
fn test_all_mode_requires_every_ingredient() {
    let catalog = catalog();

    assert_eq!(
        titles(&catalog, &ingredients("Soy Sauce", MatchMode::All)),
        vec!["Quick Beef Stir Fry", "Egg Fried Rice"]
    );
    assert!(titles(&catalog, &ingredients("soy sauce chocolate", MatchMode::All)).is_empty());
}

#[test]
fn test_empty_ingredients_keep_filtered_order() {
    let catalog = catalog();

    let request = SearchRequest {
        category: "Main Course".to_string(),
        ..Default::default()
    };
    assert_eq!(
        titles(&catalog, &request),
        vec!["Garlic Roast Chicken", "Quick Beef Stir Fry", "Ratatouille"]
    );

    // Recipes without directions text are neither quick nor full
    let request = SearchRequest {
        length: LengthPreference::Quick,
        ..Default::default()
    };
    let quick = titles(&catalog, &request);
    assert_eq!(quick.len(), 5);
    assert!(!quick.contains(&"Plain Toast".to_string()));
}

#[test]
fn test_max_results_caps_output() {
    let catalog = catalog();
    let request = SearchRequest {
        max_results: 2,
        ..ingredients("onion garlic", MatchMode::Any)
    };

    assert_eq!(
        titles(&catalog, &request),
        vec!["Garlic Roast Chicken", "Quick Beef Stir Fry"]
    );
}

#[test]
fn test_common_ingredients_and_overview() {
    let catalog = catalog();

    let common = catalog
        .filter_by(Some("Main Course"), None)
        .common_ingredient_tokens(20, 3);
    assert_eq!(&common[..2], ["tbsp", "onion"]);
    assert!(!common.contains(&"lb".to_string()));

    let overview = catalog.overview();
    assert_eq!(overview.total_recipes, 7);
    assert_eq!(overview.categories, 4);
    assert_eq!(overview.subcategories, 6);
    assert_eq!(overview.avg_ingredients, Some(3.7));
    assert_eq!(overview.avg_steps, Some(2.0));
}
