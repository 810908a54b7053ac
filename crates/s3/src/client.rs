//! OSS client implementation
//!
//! Wraps aws-sdk-s3 against the S3-compatible OSS endpoint and implements
//! the ObjectStore trait from fshare-core.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::config::RequestChecksumCalculation;
use aws_sdk_s3::primitives::ByteStream;

use fshare_core::{Config, Error, ObjectStore, Result};

/// Region used when the endpoint does not name one
pub const DEFAULT_REGION: &str = "us-east-1";

/// OSS client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Client {
    /// Create a new client from a validated configuration
    pub async fn new(config: Config) -> Result<Self> {
        let endpoint = endpoint_url(&config.endpoint);
        let region = region_from_endpoint(&config.endpoint);

        let credentials = aws_credential_types::Credentials::new(
            config.access_key_id,
            config.access_key_secret,
            None, // session token
            None, // expiry
            "file-share-static-credentials",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(region.clone()))
            .endpoint_url(&endpoint)
            .load()
            .await;

        // OSS only accepts virtual-hosted addressing and rejects the
        // streaming checksum trailers newer SDKs send by default
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(false)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .build();

        tracing::debug!(endpoint = %endpoint, region = %region, bucket = %config.bucket_name, "Created OSS client");

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket_name,
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Format AWS SDK error into a detailed error message
    fn format_sdk_error<E: std::fmt::Display>(error: &aws_sdk_s3::error::SdkError<E>) -> String {
        match error {
            aws_sdk_s3::error::SdkError::ServiceError(service_err) => {
                let err = service_err.err();
                let meta = service_err.raw();
                let mut msg = format!("Service error: {}", err);
                if let Some(code) = meta.headers().get("x-oss-ec") {
                    msg.push_str(&format!(" (code: {})", code));
                }
                msg
            }
            aws_sdk_s3::error::SdkError::ConstructionFailure(err) => {
                format!("Request construction failed: {:?}", err)
            }
            aws_sdk_s3::error::SdkError::TimeoutError(_) => "Request timeout".to_string(),
            aws_sdk_s3::error::SdkError::DispatchFailure(err) => {
                format!("Network dispatch error: {:?}", err)
            }
            aws_sdk_s3::error::SdkError::ResponseError(err) => {
                format!("Response error: {:?}", err)
            }
            _ => error.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put_object_from_file(&self, key: &str, path: &Path) -> Result<()> {
        let upload_error = |reason: String| Error::Upload {
            file: display_file(path),
            reason,
        };

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| upload_error(e.to_string()))?;

        let content_type = content_type_for(key, path);

        self.inner
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| upload_error(Self::format_sdk_error(&e)))?;

        tracing::debug!(bucket = %self.bucket, key, "Stored object");
        Ok(())
    }
}

/// Endpoint URL with a scheme, defaulting to https
pub fn endpoint_url(endpoint: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    }
}

/// Derive the signing region from an OSS endpoint
///
/// `oss-cn-hangzhou.aliyuncs.com` signs as `oss-cn-hangzhou`; hosts that do
/// not follow the OSS naming fall back to [`DEFAULT_REGION`].
pub fn region_from_endpoint(endpoint: &str) -> String {
    url::Url::parse(&endpoint_url(endpoint))
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .and_then(|host| host.split('.').next().map(str::to_string))
        .filter(|label| label.starts_with("oss-"))
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

/// Content type guessed from the key, then the local path
fn content_type_for(key: &str, path: &Path) -> String {
    mime_guess::from_path(key)
        .first()
        .or_else(|| mime_guess::from_path(path).first())
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

fn display_file(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
