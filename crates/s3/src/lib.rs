//! fshare-s3: OSS backend for file-share
//!
//! Implements the `ObjectStore` trait from fshare-core on top of aws-sdk-s3,
//! talking to the S3-compatible OSS API.

mod client;

pub use client::{DEFAULT_REGION, S3Client, endpoint_url, region_from_endpoint};
