//! fshare-core: Core library for the file-share CLI
//!
//! This crate provides everything the CLI needs short of talking to the
//! bucket itself:
//! - Layered configuration discovery
//! - Input expansion and URL downloads
//! - Object key generation and zip archive building
//! - Upload orchestration with temporary file cleanup
//! - ObjectStore trait implemented by the storage backend
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! so the orchestration can be tested against in-memory stores.

pub mod archive;
pub mod config;
pub mod error;
pub mod expand;
pub mod fetch;
pub mod key;
pub mod temp;
pub mod traits;
pub mod upload;

#[cfg(test)]
mod test_support;

pub use archive::{build_archive, entry_name};
pub use config::{Config, ConfigCheck, ConfigResolver, ConfigSource};
pub use error::{Error, ExpandError, Result};
pub use expand::{InputKind, expand};
pub use fetch::{DownloadNotice, FetchedFile, UrlFetcher, is_url};
pub use key::{auto_archive_name, make_key};
pub use temp::TempResources;
pub use traits::ObjectStore;
pub use upload::{
    DryRunPreview, FileUrl, Outcome, PreviewEntry, ResolvedFile, UploadMode, UploadOptions,
    UploadPlan, UploadResult, Uploader, run,
};
