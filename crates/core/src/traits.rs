//! Object storage seam
//!
//! The orchestrator only needs one capability from the storage backend:
//! store a local file under a key. Keeping it behind a trait lets the core
//! stay independent of any SDK and lets tests substitute a fake store.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Storage backend for uploads
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload the file at `path` under `key` in the configured bucket
    async fn put_object_from_file(&self, key: &str, path: &Path) -> Result<()>;
}
