use crate::keyed_store::{KeyedStore, StoreError};
use shopgraph_core::config::{DuplicatePolicy, StoreConfig};
use shopgraph_core::hashing::KeyHasher;
use shopgraph_core::model::Product;
use std::sync::Arc;
use tracing::{info, warn};

/// Products keyed by product id.
pub struct ProductCatalog {
    store: KeyedStore<String, Product>,
    on_duplicate: DuplicatePolicy,
}

impl ProductCatalog {
    pub fn new(
        table_size: usize,
        max_records: usize,
        hasher: Arc<dyn KeyHasher>,
        on_duplicate: DuplicatePolicy,
    ) -> Self {
        Self {
            store: KeyedStore::new(table_size, max_records, hasher),
            on_duplicate,
        }
    }

    pub fn from_config(config: &StoreConfig, on_duplicate: DuplicatePolicy) -> Self {
        Self::new(
            config.table_size,
            config.max_records,
            config.hasher.build(),
            on_duplicate,
        )
    }

    /// Store a product and return its slot.
    pub fn add_product(&mut self, product: Product) -> Result<usize, StoreError> {
        product.validate()?;
        let product_id = product.product_id.clone();

        match self.on_duplicate {
            DuplicatePolicy::Replace => {
                let (slot, previous) = self.store.upsert(product_id.clone(), product)?;
                if previous.is_some() {
                    info!(product_id = %product_id, slot, "product replaced");
                } else {
                    info!(product_id = %product_id, slot, "product added");
                }
                Ok(slot)
            }
            DuplicatePolicy::Reject => {
                let slot = self.store.insert(product_id.clone(), product).map_err(|err| {
                    warn!(product_id = %product_id, error = %err, "product rejected");
                    err
                })?;
                info!(product_id = %product_id, slot, "product added");
                Ok(slot)
            }
        }
    }

    pub fn get_product(&self, product_id: &str) -> Option<&Product> {
        self.store.get(product_id)
    }

    /// Case-sensitive substring match over names, in slot order.
    ///
    /// An empty query matches every product.
    pub fn search_by_name_substring<'a>(
        &'a self,
        query: &'a str,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.store
            .values()
            .filter(move |product| product.name.contains(query))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.store.values()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.on_duplicate
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self {
            store: KeyedStore::with_defaults(),
            on_duplicate: DuplicatePolicy::default(),
        }
    }
}
