pub mod catalog;
pub mod index;
pub mod keyed_store;
pub mod users;

pub use catalog::ProductCatalog;
pub use index::{GraphError, InteractionGraph};
pub use keyed_store::{KeyedStore, StoreError};
pub use users::UserDirectory;
