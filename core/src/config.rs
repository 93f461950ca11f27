use crate::hashing::HasherKind;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Slot count of the original fixed tables.
pub const TABLE_SIZE: usize = 100;
/// Vertex count of the original interaction graph.
pub const MAX_PRODUCTS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// A record with an existing key overwrites the stored one.
    #[default]
    Replace,
    /// A record with an existing key is refused.
    Reject,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub table_size: usize,
    pub max_records: usize,
    pub hasher: HasherKind,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    pub num_vertices: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub on_duplicate: DuplicatePolicy,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub graph: GraphConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                table_size: TABLE_SIZE,
                max_records: TABLE_SIZE,
                hasher: HasherKind::ShiftAdd,
            },
            graph: GraphConfig {
                num_vertices: MAX_PRODUCTS,
            },
            catalog: CatalogConfig {
                on_duplicate: DuplicatePolicy::Replace,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json: false,
            },
        }
    }
}

impl AppConfig {
    /// Defaults, then `config/default`, then `config/{RUN_MODE}`, then `SHOPGRAPH__*` env.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    /// Same layering as [`AppConfig::load`] with an explicit file applied before the env.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()))
    }

    fn build(path: Option<&Path>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config: AppConfig = builder
            .add_source(Environment::with_prefix("SHOPGRAPH").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.table_size == 0 {
            return Err(ConfigError::Message(
                "store.table_size must be greater than 0".into(),
            ));
        }
        if self.store.max_records == 0 {
            return Err(ConfigError::Message(
                "store.max_records must be greater than 0".into(),
            ));
        }
        // Every registered user needs a graph vertex.
        if self.graph.num_vertices < self.store.max_records {
            return Err(ConfigError::Message(format!(
                "graph.num_vertices ({}) must be at least store.max_records ({})",
                self.graph.num_vertices, self.store.max_records
            )));
        }
        Ok(())
    }
}
