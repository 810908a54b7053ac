//! Object key generation
//!
//! Keys have the layout `[<prefix>/]<stem>[_<YYYYMMDD_HHMMSS>]<suffix>`.

use std::path::Path;

/// strftime layout of the timestamp embedded in keys and archive names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Placeholder shown by dry runs in place of an auto-generated archive name
pub const ARCHIVE_NAME_PLACEHOLDER: &str = "archive_<timestamp>.zip";

/// Current local time formatted for keys
pub fn timestamp_now() -> String {
    jiff::Zoned::now().strftime(TIMESTAMP_FORMAT).to_string()
}

/// Archive name used when the caller did not supply one
///
/// The name already carries a timestamp, so its key must be built with the
/// timestamp suppressed.
pub fn auto_archive_name() -> String {
    format!("archive_{}.zip", timestamp_now())
}

/// Build the object key for `filename`, stamping it with the current time
/// unless `suppress_timestamp` is set
pub fn make_key(filename: &str, prefix: Option<&str>, suppress_timestamp: bool) -> String {
    let timestamp = (!suppress_timestamp).then(timestamp_now);
    build_key(filename, prefix, timestamp.as_deref())
}

/// Build an object key from an explicit timestamp
pub fn build_key(filename: &str, prefix: Option<&str>, timestamp: Option<&str>) -> String {
    let path = Path::new(filename);
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());

    let name = match timestamp {
        Some(ts) => {
            let base_path = Path::new(&base);
            let stem = base_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            match base_path.extension() {
                Some(ext) => format!("{stem}_{ts}.{}", ext.to_string_lossy()),
                None => format!("{stem}_{ts}"),
            }
        }
        None => base,
    };

    match prefix.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{prefix}/{name}"),
        None => name,
    }
}
