//! Storage construction for the MongoDB backend.

use std::sync::Arc;

use oauth2_core::StorageError;

pub use oauth2_observability::ObservedStorage;
pub use oauth2_ports::{DynStorage, Storage};
pub use oauth2_storage_mongo::{CollectionConfig, MongoStorage};

/// Create the MongoDB storage backend and wrap it with `ObservedStorage`
/// for tracing.
///
/// Accepts `mongodb://` and `mongodb+srv://` URIs. Callers still need to
/// run `init()` once to bootstrap the unique indexes.
pub async fn create_storage(
    database_url: &str,
    config: CollectionConfig,
) -> Result<DynStorage, StorageError> {
    let storage = MongoStorage::with_config(database_url, config).await?;
    let inner: DynStorage = Arc::new(storage);
    let observed = ObservedStorage::new(inner, "mongodb".to_string());
    Ok(Arc::new(observed))
}
