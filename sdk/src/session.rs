use crate::command::{Command, Outcome};
use crate::error::SessionError;
use query::RecommendationEngine;
use shopgraph_core::config::AppConfig;
use shopgraph_core::model::{validate_field, Interaction, Product, UserIndex};
use storage::{InteractionGraph, ProductCatalog, UserDirectory};
use tracing::{debug, info};

/// Owner of the user directory, product catalog and interaction graph.
///
/// All cross-references between the three stores are copied strings or user
/// indexes; nothing borrows into another store's storage between calls.
pub struct Session {
    users: UserDirectory,
    catalog: ProductCatalog,
    graph: InteractionGraph,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        info!(
            table_size = config.store.table_size,
            max_records = config.store.max_records,
            num_vertices = config.graph.num_vertices,
            "session created"
        );
        Self {
            users: UserDirectory::from_config(&config.store),
            catalog: ProductCatalog::from_config(&config.store, config.catalog.on_duplicate),
            graph: InteractionGraph::new(config.graph.num_vertices),
        }
    }

    pub fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserIndex, SessionError> {
        Ok(self.users.register(username, email, password)?)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        let success = self.users.authenticate(username, password);
        debug!(username, success, "login attempt");
        success
    }

    pub fn add_product(
        &mut self,
        product_id: &str,
        name: &str,
        category: &str,
        inventory: u32,
    ) -> Result<(), SessionError> {
        self.catalog
            .add_product(Product::new(product_id, name, category, inventory))?;
        Ok(())
    }

    pub fn get_product(&self, product_id: &str) -> Option<Product> {
        self.catalog.get_product(product_id).cloned()
    }

    /// Returns `true` when a new edge was added.
    pub fn record_interaction(
        &mut self,
        user_index: UserIndex,
        product_id: &str,
    ) -> Result<bool, SessionError> {
        validate_field("product_id", product_id)?;
        Ok(self.graph.record_interaction(user_index, product_id)?)
    }

    pub fn recommend(&self, user_index: UserIndex) -> Result<Vec<Product>, SessionError> {
        let engine = RecommendationEngine::new(&self.graph, &self.catalog);
        Ok(engine.recommend(user_index)?.cloned().collect())
    }

    pub fn suggest(&self, query: &str) -> Vec<Product> {
        let engine = RecommendationEngine::new(&self.graph, &self.catalog);
        engine.suggest(query).cloned().collect()
    }

    /// Run one parsed command against the session.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, SessionError> {
        match command {
            Command::Register {
                username,
                email,
                password,
            } => {
                let user_index = self.register(&username, &email, &password)?;
                Ok(Outcome::Registered { user_index })
            }
            Command::Login { username, password } => Ok(Outcome::LoggedIn {
                success: self.authenticate(&username, &password),
            }),
            Command::AddProduct {
                product_id,
                name,
                category,
                inventory,
            } => {
                self.add_product(&product_id, &name, &category, inventory)?;
                Ok(Outcome::ProductAdded { product_id })
            }
            Command::Browse {
                user_index,
                product_id,
            } => self.interact(Interaction::Browse, user_index, product_id),
            Command::Purchase {
                user_index,
                product_id,
            } => self.interact(Interaction::Purchase, user_index, product_id),
            Command::Recommend { user_index } => Ok(Outcome::Recommendations {
                user_index,
                products: self.recommend(user_index)?,
            }),
            Command::Suggest { query } => {
                let products = self.suggest(&query);
                Ok(Outcome::Suggestions { query, products })
            }
            Command::Exit => Ok(Outcome::Exit),
        }
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &InteractionGraph {
        &self.graph
    }

    fn interact(
        &mut self,
        kind: Interaction,
        user_index: UserIndex,
        product_id: String,
    ) -> Result<Outcome, SessionError> {
        let new_edge = self.record_interaction(user_index, &product_id)?;
        info!(%kind, user_index, product_id = %product_id, new_edge, "interaction recorded");
        Ok(Outcome::InteractionRecorded {
            kind,
            user_index,
            product_id,
            new_edge,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
