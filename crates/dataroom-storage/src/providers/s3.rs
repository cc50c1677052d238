//! S3-compatible object store (requires the `s3` feature).

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Builder as S3ConfigBuilder, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use bytes::Bytes;
use tracing::debug;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_core::traits::storage::{ListOptions, ObjectEntry, ObjectStore};
use dataroom_core::types::sorting::SortDirection;

/// DeleteObjects accepts at most this many keys per call.
const DELETE_BATCH_SIZE: usize = 1000;

/// S3-compatible object store over a single bucket.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a new S3 object store.
    ///
    /// An empty `endpoint` uses AWS proper; anything else (MinIO, etc.) is
    /// addressed with path-style requests.
    pub async fn new(
        endpoint: &str,
        region: &str,
        bucket: &str,
        access_key: &str,
        secret_key: &str,
    ) -> AppResult<Self> {
        tracing::info!(endpoint, region, bucket, "Initializing S3 object store");

        let credentials = Credentials::new(access_key, secret_key, None, None, "dataroom");
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials);
        if !endpoint.is_empty() {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let config = S3ConfigBuilder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(config),
            bucket: bucket.to_string(),
        })
    }

    /// Fetch the recorded content type of an object.
    async fn content_type_of(&self, key: &str) -> AppResult<Option<String>> {
        let resp = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read metadata for '{key}'"),
                    e,
                )
            })?;
        Ok(resp.content_type().map(String::from))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| true)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Bucket '{}' is not reachable", self.bucket),
                    e,
                )
            })
    }

    async fn list(&self, prefix: &str, options: &ListOptions) -> AppResult<Vec<ObjectEntry>> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));

        let resp = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(&prefix)
            .delimiter("/")
            .max_keys(options.limit as i32)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to list '{prefix}'"),
                    e,
                )
            })?;

        let mut entries = Vec::new();

        // Common prefixes are one level deeper than the listed prefix: the
        // bucket's rendering of a virtual folder.
        for common in resp.common_prefixes() {
            let Some(p) = common.prefix() else { continue };
            let name = p
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string();
            entries.push(ObjectEntry {
                name,
                size: None,
                created_at: None,
                mime_type: None,
            });
        }

        for object in resp.contents() {
            let Some(key) = object.key() else { continue };
            let name = key.rsplit('/').next().unwrap_or(key).to_string();
            let mime_type = self.content_type_of(key).await?;
            entries.push(ObjectEntry {
                name,
                size: object.size().map(|s| s as u64),
                created_at: object
                    .last_modified()
                    .and_then(|t| chrono::DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
                mime_type,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        if options.sort == SortDirection::Desc {
            entries.reverse();
        }
        entries.truncate(options.limit);
        Ok(entries)
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .set_content_type(content_type.map(String::from))
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to upload '{key}'"),
                    e,
                )
            })?;

        debug!(key, bytes = size, "Uploaded object");
        Ok(())
    }

    async fn download(&self, key: &str) -> AppResult<Bytes> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    AppError::not_found(format!("Object not found: {key}"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to download '{key}'"),
                        e,
                    )
                }
            })?;

        let data = resp.body.collect().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read body of '{key}'"),
                e,
            )
        })?;
        Ok(data.into_bytes())
    }

    async fn remove(&self, keys: &[String]) -> AppResult<()> {
        for batch in keys.chunks(DELETE_BATCH_SIZE) {
            let objects = batch
                .iter()
                .map(|key| {
                    ObjectIdentifier::builder().key(key).build().map_err(|e| {
                        AppError::internal(format!("Invalid delete target '{key}': {e}"))
                    })
                })
                .collect::<AppResult<Vec<_>>>()?;

            let delete = Delete::builder()
                .set_objects(Some(objects))
                .quiet(true)
                .build()
                .map_err(|e| AppError::internal(format!("Failed to build delete request: {e}")))?;

            self.client
                .delete_objects()
                .bucket(&self.bucket)
                .delete(delete)
                .send()
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Failed to remove objects", e)
                })?;
        }

        debug!(count = keys.len(), "Removed objects");
        Ok(())
    }

    async fn move_object(&self, from: &str, to: &str) -> AppResult<()> {
        self.client
            .copy_object()
            .bucket(&self.bucket)
            .copy_source(format!("{}/{}", self.bucket, from))
            .key(to)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to copy {from} -> {to}"),
                    e,
                )
            })?;

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(from)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to remove source '{from}' after copy"),
                    e,
                )
            })?;

        Ok(())
    }
}
