//! URL downloads
//!
//! Remote inputs are streamed to a temporary file before upload. The file
//! keeps the extension of the name the server advertises so that content
//! type guessing still works on the temporary path.

use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempPath;

use crate::error::{Error, Result};

/// Connect and read-gap timeout for downloads
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Buffer size used when writing response bodies to disk
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Name used when neither the response nor the URL provides one
pub const FALLBACK_FILENAME: &str = "downloaded_file";

/// Check whether a command-line argument is a remote URL
pub fn is_url(arg: &str) -> bool {
    arg.starts_with("http://") || arg.starts_with("https://")
}

/// Last path segment of a URL, without query string or fragment
pub fn filename_from_url(url: &str) -> String {
    let Ok(parsed) = url::Url::parse(url) else {
        return FALLBACK_FILENAME.to_string();
    };

    parsed
        .path()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// Extract the `filename=` directive of a `Content-Disposition` header
///
/// Handles quoted and unquoted values. Only the final path component is
/// kept.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    const DIRECTIVE: &str = "filename=";

    // ASCII lowercasing keeps byte offsets aligned with `header`
    let idx = header.to_ascii_lowercase().find(DIRECTIVE)?;
    let rest = header[idx + DIRECTIVE.len()..].trim_start();

    let value = match rest.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &rest[1..];
            match inner.find(quote) {
                Some(end) => &inner[..end],
                None => inner,
            }
        }
        _ => rest.split(';').next().unwrap_or_default().trim(),
    };

    let name = Path::new(value).file_name()?.to_string_lossy().into_owned();
    (!name.is_empty()).then_some(name)
}

/// A downloaded URL
#[derive(Debug)]
pub struct FetchedFile {
    /// Temporary file holding the body
    pub path: TempPath,
    /// Name shown in output and used for keys and archive entries
    pub display_name: String,
}

/// Called with each URL just before it is downloaded
pub type DownloadNotice = Arc<dyn Fn(&str) + Send + Sync>;

/// Downloads remote inputs to temporary files
#[derive(Clone)]
pub struct UrlFetcher {
    client: reqwest::Client,
    notice: Option<DownloadNotice>,
}

impl fmt::Debug for UrlFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlFetcher")
            .field("client", &self.client)
            .field("notice", &self.notice.is_some())
            .finish()
    }
}

impl UrlFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DOWNLOAD_TIMEOUT)
    }

    /// `timeout` bounds connecting and each wait for body data, not the
    /// whole transfer
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| Error::General(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            notice: None,
        })
    }

    /// Report each download through `notice` before it starts
    pub fn on_download(mut self, notice: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.notice = Some(Arc::new(notice));
        self
    }

    /// Download `url` into a new temporary file
    pub async fn fetch(&self, url: &str) -> Result<FetchedFile> {
        self.fetch_into(&std::env::temp_dir(), url).await
    }

    async fn fetch_into(&self, temp_dir: &Path, url: &str) -> Result<FetchedFile> {
        let fetch_error = |reason: String| Error::Fetch {
            url: url.to_string(),
            reason,
        };

        if let Some(notice) = &self.notice {
            notice(url);
        }
        tracing::debug!(url, "Downloading");

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {status}")));
        }

        let display_name = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| filename_from_url(url));

        let suffix = Path::new(&display_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let mut temp = tempfile::Builder::new()
            .prefix("file-share-")
            .suffix(&suffix)
            .tempfile_in(temp_dir)
            .map_err(|e| fetch_error(format!("failed to create temp file: {e}")))?;

        let written = match write_body(&mut response, temp.as_file_mut()).await {
            Ok(written) => written,
            Err(reason) => {
                if let Err(e) = temp.close() {
                    tracing::warn!(error = %e, "Failed to remove partial download");
                }
                return Err(fetch_error(format!("failed to save downloaded file: {reason}")));
            }
        };

        tracing::debug!(url, name = %display_name, bytes = written, "Download complete");

        Ok(FetchedFile {
            path: temp.into_temp_path(),
            display_name,
        })
    }
}

async fn write_body(
    response: &mut reqwest::Response,
    file: &mut std::fs::File,
) -> std::result::Result<u64, String> {
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut written = 0u64;

    while let Some(chunk) = response.chunk().await.map_err(|e| e.to_string())? {
        writer.write_all(&chunk).map_err(|e| e.to_string())?;
        written += chunk.len() as u64;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(written)
}
