use shopgraph_core::config::MAX_PRODUCTS;
use shopgraph_core::error::{ErrorCode, ShopgraphError};
use shopgraph_core::model::UserIndex;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("user index {index} out of range (graph has {num_vertices} vertices)")]
    OutOfRange {
        index: UserIndex,
        num_vertices: usize,
    },
}

impl ShopgraphError for GraphError {
    fn error_code(&self) -> ErrorCode {
        match self {
            GraphError::OutOfRange { .. } => ErrorCode::OutOfRange,
        }
    }
}

/// Directed user -> product adjacency over a fixed number of user vertices.
///
/// Each vertex keeps its product ids in the order they were first recorded;
/// iteration runs newest first.
pub struct InteractionGraph {
    adjacency: Vec<Vec<String>>,
}

impl InteractionGraph {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_vertices],
        }
    }

    /// Record an edge. Returns `false` when the edge already existed.
    pub fn record_interaction(
        &mut self,
        user: UserIndex,
        product_id: &str,
    ) -> Result<bool, GraphError> {
        let num_vertices = self.adjacency.len();
        let edges = self
            .adjacency
            .get_mut(user)
            .ok_or(GraphError::OutOfRange {
                index: user,
                num_vertices,
            })?;

        if edges.iter().any(|existing| existing == product_id) {
            debug!(user, product_id, "edge already recorded");
            return Ok(false);
        }
        edges.push(product_id.to_string());
        Ok(true)
    }

    /// Product ids for `user`, most recently recorded first.
    pub fn edges_for(
        &self,
        user: UserIndex,
    ) -> Result<impl Iterator<Item = &str> + '_, GraphError> {
        let edges = self.vertex(user)?;
        Ok(edges.iter().rev().map(String::as_str))
    }

    pub fn has_edge(&self, user: UserIndex, product_id: &str) -> bool {
        self.adjacency
            .get(user)
            .is_some_and(|edges| edges.iter().any(|existing| existing == product_id))
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|v| v.len()).sum()
    }

    /// Users with at least one recorded edge.
    pub fn node_count(&self) -> usize {
        self.adjacency.iter().filter(|v| !v.is_empty()).count()
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    fn vertex(&self, user: UserIndex) -> Result<&Vec<String>, GraphError> {
        self.adjacency.get(user).ok_or(GraphError::OutOfRange {
            index: user,
            num_vertices: self.adjacency.len(),
        })
    }
}

impl Default for InteractionGraph {
    fn default() -> Self {
        Self::new(MAX_PRODUCTS)
    }
}
