mod demo_data;
mod models;
mod schema;
mod store;
mod trait_def;

pub use demo_data::{DEMO_PLAYLIST_NAME, DEMO_SONGS};
pub use models::*;
pub use schema::CATALOG_VERSIONED_SCHEMAS;
pub use store::SqliteCatalogStore;
pub use trait_def::CatalogStore;
