pub mod graph;

pub use graph::{GraphError, InteractionGraph};
