use query::RecommendationEngine;
use shopgraph_core::model::Product;
use storage::{InteractionGraph, ProductCatalog};

fn seeded_catalog() -> ProductCatalog {
    let mut catalog = ProductCatalog::default();
    catalog
        .add_product(Product::new("P1", "Shoe", "Footwear", 10))
        .unwrap();
    catalog
        .add_product(Product::new("P2", "Shoebox", "Storage", 5))
        .unwrap();
    catalog
        .add_product(Product::new("P3", "Desk Lamp", "Lighting", 2))
        .unwrap();
    catalog
}

fn ids(products: Vec<&Product>) -> Vec<&str> {
    products.iter().map(|p| p.product_id.as_str()).collect()
}

#[test]
fn recommend_lists_most_recent_first() {
    let catalog = seeded_catalog();
    let mut graph = InteractionGraph::default();
    graph.record_interaction(0, "P1").unwrap();
    graph.record_interaction(0, "P2").unwrap();

    let engine = RecommendationEngine::new(&graph, &catalog);
    let products: Vec<&Product> = engine.recommend(0).unwrap().collect();

    assert_eq!(ids(products.clone()), vec!["P2", "P1"]);
    assert_eq!(products[1], &Product::new("P1", "Shoe", "Footwear", 10));
}

#[test]
fn recommend_skips_products_missing_from_catalog() {
    let catalog = seeded_catalog();
    let mut graph = InteractionGraph::default();
    graph.record_interaction(4, "P1").unwrap();
    graph.record_interaction(4, "GONE").unwrap();
    graph.record_interaction(4, "P3").unwrap();

    let engine = RecommendationEngine::new(&graph, &catalog);
    let products: Vec<&Product> = engine.recommend(4).unwrap().collect();

    assert_eq!(ids(products), vec!["P3", "P1"]);
}

#[test]
fn recommend_is_empty_without_interactions() {
    let catalog = seeded_catalog();
    let graph = InteractionGraph::default();
    let engine = RecommendationEngine::new(&graph, &catalog);

    assert_eq!(engine.recommend(7).unwrap().count(), 0);
}

#[test]
fn repeated_interaction_recommends_once() {
    let catalog = seeded_catalog();
    let mut graph = InteractionGraph::default();
    graph.record_interaction(0, "P1").unwrap();
    graph.record_interaction(0, "P1").unwrap();

    let engine = RecommendationEngine::new(&graph, &catalog);
    assert_eq!(ids(engine.recommend(0).unwrap().collect()), vec!["P1"]);
}

#[test]
fn suggest_matches_catalog_search() {
    let catalog = seeded_catalog();
    let graph = InteractionGraph::default();
    let engine = RecommendationEngine::new(&graph, &catalog);

    assert_eq!(ids(engine.suggest("Shoe").collect()), vec!["P1", "P2"]);
    assert_eq!(ids(engine.suggest("Lamp").collect()), vec!["P3"]);
    assert!(engine.suggest("Chair").next().is_none());

    let direct: Vec<&Product> = catalog.search_by_name_substring("o").collect();
    let suggested: Vec<&Product> = engine.suggest("o").collect();
    assert_eq!(direct, suggested);
}
