//! Object store provider implementations.

pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

use std::sync::Arc;

use dataroom_core::config::storage::StorageConfig;
use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::traits::storage::ObjectStore;

pub use memory::MemoryObjectStore;

/// Construct the configured object store provider.
pub async fn from_config(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    match config.provider.as_str() {
        "memory" => Ok(Arc::new(MemoryObjectStore::new())),
        #[cfg(feature = "s3")]
        "s3" => {
            let store = s3::S3ObjectStore::new(
                &config.s3.endpoint,
                &config.s3.region,
                &config.s3.bucket,
                &config.s3.access_key,
                &config.s3.secret_key,
            )
            .await?;
            Ok(Arc::new(store))
        }
        other => Err(AppError::configuration(format!(
            "Unknown storage provider '{other}'"
        ))),
    }
}
