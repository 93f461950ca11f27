use shopgraph_core::error::{ErrorCode, ShopgraphError};
use shopgraph_core::model::{Product, UserIndex};
use storage::catalog::ProductCatalog;
use storage::index::{GraphError, InteractionGraph};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

impl ShopgraphError for QueryError {
    fn error_code(&self) -> ErrorCode {
        match self {
            QueryError::Graph(err) => err.error_code(),
        }
    }
}

/// Read-only view joining the interaction graph with the catalog.
pub struct RecommendationEngine<'a> {
    graph: &'a InteractionGraph,
    catalog: &'a ProductCatalog,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(graph: &'a InteractionGraph, catalog: &'a ProductCatalog) -> Self {
        Self { graph, catalog }
    }

    /// Products the user interacted with, most recent first.
    ///
    /// Edges whose product id is not in the catalog are skipped.
    pub fn recommend(
        &self,
        user: UserIndex,
    ) -> Result<impl Iterator<Item = &'a Product> + 'a, QueryError> {
        let (graph, catalog) = (self.graph, self.catalog);
        let edges = graph.edges_for(user)?;

        Ok(edges.filter_map(move |product_id| {
            let product = catalog.get_product(product_id);
            if product.is_none() {
                debug!(user, product_id, "skipping edge to unknown product");
            }
            product
        }))
    }

    pub fn suggest(&self, query: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.catalog.search_by_name_substring(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(products: impl Iterator<Item = &'a Product>) -> Vec<&'a str> {
        products.map(|p| p.product_id.as_str()).collect()
    }

    #[test]
    fn test_recommend_resolves_in_edge_order() {
        let mut catalog = ProductCatalog::default();
        catalog
            .add_product(Product::new("P1", "Shoe", "Footwear", 10))
            .unwrap();
        catalog
            .add_product(Product::new("P2", "Shoebox", "Storage", 5))
            .unwrap();
        let mut graph = InteractionGraph::default();
        graph.record_interaction(0, "P1").unwrap();
        graph.record_interaction(0, "P2").unwrap();

        let engine = RecommendationEngine::new(&graph, &catalog);
        assert_eq!(ids(engine.recommend(0).unwrap()), vec!["P2", "P1"]);
    }

    #[test]
    fn test_recommend_out_of_range() {
        let catalog = ProductCatalog::default();
        let graph = InteractionGraph::new(1);
        let engine = RecommendationEngine::new(&graph, &catalog);

        let err = engine.recommend(1).err().unwrap();
        assert_eq!(err.error_code(), ErrorCode::OutOfRange);
    }
}
