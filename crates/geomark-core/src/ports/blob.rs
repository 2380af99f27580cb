use async_trait::async_trait;

use crate::error::StoreResult;

/// Port for blob storage, scoped to a single configured bucket.
///
/// Bucket provisioning and permissions are an operational concern; a
/// missing bucket surfaces as `StoreErrorKind::BucketMissing`.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Upload a blob under the given path within the bucket.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<()>;

    /// Public reference URL for a previously uploaded blob.
    fn public_url(&self, path: &str) -> String;
}
