//! Upload orchestration
//!
//! One run goes through: collect inputs (downloads first, then local
//! expansion), stop early for a dry run, resolve configuration, connect the
//! store, optionally build an archive, upload, and finally release every
//! temporary file. Cleanup runs on every exit path.

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::archive::{base_name, build_archive, entry_name};
use crate::config::{Config, ConfigResolver};
use crate::error::{Error, ExpandError, Result};
use crate::expand::expand;
use crate::fetch::{UrlFetcher, is_url};
use crate::key::{ARCHIVE_NAME_PLACEHOLDER, auto_archive_name, make_key};
use crate::temp::TempResources;
use crate::traits::ObjectStore;

/// Options for one upload run
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Files, patterns, directories and URLs in command-line order
    pub inputs: Vec<String>,
    pub zip: bool,
    pub zip_name: Option<String>,
    /// Overrides `OSS_PREFIX` when set
    pub prefix: Option<String>,
    pub no_timestamp: bool,
    pub recursive: bool,
    pub preserve_path: bool,
    pub dry_run: bool,
}

/// A concrete file to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    /// Set for downloads, whose temporary path says nothing about the content
    pub display_name: Option<String>,
}

impl ResolvedFile {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            display_name: None,
        }
    }

    pub fn downloaded(path: impl Into<PathBuf>, display_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: Some(display_name.into()),
        }
    }

    /// Name used in output and for object keys
    pub fn name(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| base_name(&self.path))
    }

    pub fn is_downloaded(&self) -> bool {
        self.display_name.is_some()
    }
}

/// How resolved files are sent to the bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadMode {
    /// One object per file
    Separate,
    /// One archive holding every file
    Zip { name: String, auto_generated: bool },
}

/// Everything needed to perform the upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlan {
    pub files: Vec<ResolvedFile>,
    pub mode: UploadMode,
    /// Base for archive entry names, only set when paths are preserved
    pub base_dir: Option<PathBuf>,
}

impl UploadPlan {
    /// Archive entry names, in file order
    pub fn files_included(&self) -> Vec<String> {
        let base = self.base_dir.as_deref();
        self.files
            .iter()
            .map(|file| entry_name(file, base.is_some(), base))
            .collect()
    }

    /// What a dry run reports
    pub fn preview(&self) -> DryRunPreview {
        let files = self
            .files
            .iter()
            .map(|file| match &file.display_name {
                Some(name) => PreviewEntry {
                    name: name.clone(),
                    from_url: true,
                },
                None => PreviewEntry {
                    name: file.path.display().to_string(),
                    from_url: false,
                },
            })
            .collect();

        let zip_name = match &self.mode {
            UploadMode::Zip {
                auto_generated: true,
                ..
            } => Some(ARCHIVE_NAME_PLACEHOLDER.to_string()),
            UploadMode::Zip { name, .. } => Some(name.clone()),
            UploadMode::Separate => None,
        };

        DryRunPreview { files, zip_name }
    }
}

/// A file listed by a dry run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewEntry {
    pub name: String,
    pub from_url: bool,
}

/// Dry-run listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DryRunPreview {
    pub files: Vec<PreviewEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_name: Option<String>,
}

/// URL of one separately uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileUrl {
    pub file: String,
    pub url: String,
}

/// Outcome of a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum UploadResult {
    Separate {
        results: Vec<FileUrl>,
    },
    Zip {
        zip_name: String,
        files_included: Vec<String>,
        url: String,
    },
}

impl UploadResult {
    /// Every public URL produced, in order
    pub fn urls(&self) -> Vec<&str> {
        match self {
            UploadResult::Separate { results } => results.iter().map(|r| r.url.as_str()).collect(),
            UploadResult::Zip { url, .. } => vec![url.as_str()],
        }
    }
}

/// What a run ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    DryRun(DryRunPreview),
    Uploaded(UploadResult),
}

/// Base directory for preserved paths, derived from the first local argument
pub fn base_dir_for(arg: &str) -> PathBuf {
    let path = Path::new(arg);
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Drives one upload run and owns its temporary files
pub struct Uploader {
    options: UploadOptions,
    temps: TempResources,
}

impl Uploader {
    pub fn new(options: UploadOptions) -> Self {
        Self {
            options,
            temps: TempResources::new(),
        }
    }

    /// Temporary files awaiting cleanup
    pub fn temps(&self) -> &TempResources {
        &self.temps
    }

    /// Download URLs, expand local patterns and choose the upload mode
    pub async fn collect(&mut self, fetcher: &UrlFetcher) -> Result<UploadPlan> {
        let (urls, locals): (Vec<&String>, Vec<&String>) =
            self.options.inputs.iter().partition(|arg| is_url(arg));

        let mut files = Vec::new();
        for url in urls {
            let fetched = fetcher.fetch(url).await?;
            let path = self.temps.track(fetched.path);
            files.push(ResolvedFile::downloaded(path, fetched.display_name));
        }

        if !locals.is_empty() {
            let patterns: Vec<String> = locals.iter().map(|arg| arg.to_string()).collect();
            let expanded = expand(&patterns, self.options.recursive)?;
            files.extend(expanded.into_iter().map(ResolvedFile::local));
        }

        if files.is_empty() {
            return Err(ExpandError::NoFiles.into());
        }

        let base_dir = if self.options.preserve_path {
            locals.first().map(|arg| base_dir_for(arg))
        } else {
            None
        };

        let mode = if self.options.zip {
            match self.options.zip_name.as_deref().filter(|n| !n.is_empty()) {
                Some(name) => UploadMode::Zip {
                    name: name.to_string(),
                    auto_generated: false,
                },
                None => UploadMode::Zip {
                    name: auto_archive_name(),
                    auto_generated: true,
                },
            }
        } else {
            UploadMode::Separate
        };

        tracing::debug!(files = files.len(), ?mode, "Collected inputs");

        Ok(UploadPlan {
            files,
            mode,
            base_dir,
        })
    }

    /// Send the plan to the store and build the result
    pub async fn upload<S>(
        &mut self,
        plan: &UploadPlan,
        store: &S,
        config: &Config,
    ) -> Result<UploadResult>
    where
        S: ObjectStore + ?Sized,
    {
        let prefix = self
            .options
            .prefix
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(config.prefix.as_deref());

        match &plan.mode {
            UploadMode::Zip {
                name,
                auto_generated,
            } => {
                let archive = build_archive(
                    &plan.files,
                    self.options.preserve_path,
                    plan.base_dir.as_deref(),
                )?;
                let archive = self.temps.track(archive);

                // auto-generated names already carry a timestamp
                let key = make_key(name, prefix, self.options.no_timestamp || *auto_generated);
                put(store, &key, &archive, name).await?;

                Ok(UploadResult::Zip {
                    zip_name: name.clone(),
                    files_included: plan.files_included(),
                    url: config.public_url(&key),
                })
            }
            UploadMode::Separate => {
                let mut results = Vec::with_capacity(plan.files.len());
                for file in &plan.files {
                    let name = file.name();
                    let key = make_key(&name, prefix, self.options.no_timestamp);
                    put(store, &key, &file.path, &name).await?;
                    results.push(FileUrl {
                        file: name,
                        url: config.public_url(&key),
                    });
                }
                Ok(UploadResult::Separate { results })
            }
        }
    }

    /// Run every stage up to the result, leaving cleanup to the caller
    pub async fn execute<S, F, Fut>(
        &mut self,
        resolver: &ConfigResolver,
        fetcher: &UrlFetcher,
        connect: F,
    ) -> Result<Outcome>
    where
        S: ObjectStore,
        F: FnOnce(&Config) -> Fut,
        Fut: Future<Output = Result<S>>,
    {
        let plan = self.collect(fetcher).await?;

        if self.options.dry_run {
            return Ok(Outcome::DryRun(plan.preview()));
        }

        let config = resolver.resolve()?;
        let store = connect(&config).await?;
        let result = self.upload(&plan, &store, &config).await?;

        Ok(Outcome::Uploaded(result))
    }

    /// Delete every temporary file created so far
    pub fn cleanup(&mut self) -> usize {
        self.temps.release_all()
    }
}

/// Perform a complete run, always releasing temporary files before returning
pub async fn run<S, F, Fut>(
    options: UploadOptions,
    resolver: &ConfigResolver,
    fetcher: &UrlFetcher,
    connect: F,
) -> Result<Outcome>
where
    S: ObjectStore,
    F: FnOnce(&Config) -> Fut,
    Fut: Future<Output = Result<S>>,
{
    let mut uploader = Uploader::new(options);
    let outcome = uploader.execute(resolver, fetcher, connect).await;

    let released = uploader.cleanup();
    tracing::debug!(released, "Released temporary files");

    outcome
}

async fn put<S>(store: &S, key: &str, path: &Path, name: &str) -> Result<()>
where
    S: ObjectStore + ?Sized,
{
    tracing::info!(key, file = name, "Uploading");
    store
        .put_object_from_file(key, path)
        .await
        .map_err(|e| {
            // stores only see the local path, which is a temp file for downloads
            let reason = match e {
                Error::Upload { reason, .. } => reason,
                other => other.to_string(),
            };
            Error::Upload {
                file: name.to_string(),
                reason,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ACCESS_KEY_ID, ACCESS_KEY_SECRET, BUCKET_NAME, ENDPOINT, PREFIX};
    use crate::test_support::serve_once;
    use crate::traits::MockObjectStore;
    use async_trait::async_trait;
    use std::io::Read;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct RecordingStore {
        uploads: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    }

    impl RecordingStore {
        fn uploads(&self) -> Vec<(String, Vec<u8>)> {
            self.uploads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ObjectStore for RecordingStore {
        async fn put_object_from_file(&self, key: &str, path: &Path) -> Result<()> {
            let content = std::fs::read(path)?;
            self.uploads.lock().unwrap().push((key.to_string(), content));
            Ok(())
        }
    }

    fn resolver() -> ConfigResolver {
        ConfigResolver::new()
            .env_var(ACCESS_KEY_ID, "id")
            .env_var(ACCESS_KEY_SECRET, "secret")
            .env_var(BUCKET_NAME, "bucket")
            .env_var(ENDPOINT, "https://oss-cn-hangzhou.aliyuncs.com")
    }

    fn fetcher() -> UrlFetcher {
        UrlFetcher::new().unwrap()
    }

    fn write(path: &Path, content: &[u8]) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn arg(path: &Path) -> String {
        path.display().to_string()
    }

    /// `<stem>_<YYYYMMDD_HHMMSS><suffix>`
    fn is_stamped(key: &str, stem: &str, suffix: &str) -> bool {
        key.strip_prefix(&format!("{stem}_"))
            .and_then(|rest| rest.strip_suffix(suffix))
            .is_some_and(|ts| {
                ts.len() == 15
                    && ts.as_bytes()[8] == b'_'
                    && ts.chars().filter(|c| c.is_ascii_digit()).count() == 14
            })
    }

    fn zip_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut entries = Vec::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            entries.push((entry.name().to_string(), content));
        }
        entries.sort();
        entries
    }

    #[tokio::test]
    async fn test_separate_mode_timestamps_each_key() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        write(&a, b"alpha");
        write(&b, b"beta");

        let store = RecordingStore::default();
        let options = UploadOptions {
            inputs: vec![arg(&a), arg(&b)],
            ..Default::default()
        };

        let connected = store.clone();
        let outcome = run(options, &resolver(), &fetcher(), |_: &Config| async move {
            Ok(connected)
        })
        .await
        .unwrap();

        let Outcome::Uploaded(UploadResult::Separate { results }) = outcome else {
            panic!("expected separate upload");
        };
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].file, "a.txt");
        assert_eq!(results[1].file, "b.txt");

        let uploads = store.uploads();
        assert_eq!(uploads.len(), 2);
        assert!(is_stamped(&uploads[0].0, "a", ".txt"), "{}", uploads[0].0);
        assert!(is_stamped(&uploads[1].0, "b", ".txt"), "{}", uploads[1].0);
        assert_eq!(uploads[0].1, b"alpha");
        assert_eq!(
            results[0].url,
            format!("https://bucket.oss-cn-hangzhou.aliyuncs.com/{}", uploads[0].0)
        );
    }

    #[tokio::test]
    async fn test_zip_mode_preserves_paths() {
        let dir = TempDir::new().unwrap();
        let reports = dir.path().join("reports");
        write(&reports.join("summary.txt"), b"summary");
        write(&reports.join("q1/sales.csv"), b"1,2,3");

        let store = RecordingStore::default();
        let options = UploadOptions {
            inputs: vec![format!("{}/", reports.display())],
            zip: true,
            recursive: true,
            preserve_path: true,
            ..Default::default()
        };

        let connected = store.clone();
        let outcome = run(options, &resolver(), &fetcher(), |_: &Config| async move {
            Ok(connected)
        })
        .await
        .unwrap();

        let Outcome::Uploaded(UploadResult::Zip {
            zip_name,
            mut files_included,
            url,
        }) = outcome
        else {
            panic!("expected zip upload");
        };

        let uploads = store.uploads();
        assert_eq!(uploads.len(), 1);

        // auto-generated names are not stamped a second time
        assert_eq!(uploads[0].0, zip_name);
        assert!(is_stamped(&zip_name, "archive", ".zip"));
        assert!(url.ends_with(&format!("/{zip_name}")));

        files_included.sort();
        assert_eq!(files_included, vec!["q1/sales.csv", "summary.txt"]);
        assert_eq!(
            zip_entries(&uploads[0].1),
            vec![
                ("q1/sales.csv".to_string(), b"1,2,3".to_vec()),
                ("summary.txt".to_string(), b"summary".to_vec()),
            ]
        );
    }

    #[tokio::test]
    async fn test_explicit_zip_name_is_stamped_unless_suppressed() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        write(&a, b"alpha");

        for (no_timestamp, prefix) in [(false, None), (true, Some("/shared/"))] {
            let store = RecordingStore::default();
            let options = UploadOptions {
                inputs: vec![arg(&a)],
                zip: true,
                zip_name: Some("bundle.zip".to_string()),
                no_timestamp,
                prefix: prefix.map(str::to_string),
                ..Default::default()
            };

            let connected = store.clone();
            run(options, &resolver(), &fetcher(), |_: &Config| async move {
                Ok(connected)
            })
            .await
            .unwrap();

            let key = store.uploads()[0].0.clone();
            if no_timestamp {
                assert_eq!(key, "shared/bundle.zip");
            } else {
                assert!(is_stamped(&key, "bundle", ".zip"), "{key}");
            }
        }
    }

    #[tokio::test]
    async fn test_cli_prefix_overrides_config_prefix() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        write(&a, b"alpha");

        let resolver = resolver().env_var(PREFIX, "from-config");

        let store = RecordingStore::default();
        let connected = store.clone();
        let options = UploadOptions {
            inputs: vec![arg(&a)],
            no_timestamp: true,
            ..Default::default()
        };
        run(options, &resolver, &fetcher(), |_: &Config| async move {
            Ok(connected)
        })
        .await
        .unwrap();
        assert_eq!(store.uploads()[0].0, "from-config/a.txt");

        let store = RecordingStore::default();
        let connected = store.clone();
        let options = UploadOptions {
            inputs: vec![arg(&a)],
            no_timestamp: true,
            prefix: Some("cli".to_string()),
            ..Default::default()
        };
        run(options, &resolver, &fetcher(), |_: &Config| async move {
            Ok(connected)
        })
        .await
        .unwrap();
        assert_eq!(store.uploads()[0].0, "cli/a.txt");
    }

    #[tokio::test]
    async fn test_dry_run_skips_config_and_store() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        write(&a, b"alpha");

        let options = UploadOptions {
            inputs: vec![arg(&a)],
            zip: true,
            dry_run: true,
            ..Default::default()
        };

        // no configuration at all: resolving it would fail
        let outcome = run(options, &ConfigResolver::new(), &fetcher(), |_: &Config| async {
            Err::<RecordingStore, _>(Error::General("store must not be used".to_string()))
        })
        .await
        .unwrap();

        assert_eq!(
            outcome,
            Outcome::DryRun(DryRunPreview {
                files: vec![PreviewEntry {
                    name: arg(&a),
                    from_url: false,
                }],
                zip_name: Some(ARCHIVE_NAME_PLACEHOLDER.to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_dry_run_with_url_releases_download() {
        let base = serve_once(
            "200 OK",
            &[("Content-Disposition", "attachment; filename=\"weekly.csv\"")],
            b"a,b\n",
        )
        .await;

        let mut uploader = Uploader::new(UploadOptions {
            inputs: vec![format!("{base}/export")],
            dry_run: true,
            ..Default::default()
        });

        let plan = uploader.collect(&fetcher()).await.unwrap();
        let preview = plan.preview();
        assert_eq!(
            preview.files,
            vec![PreviewEntry {
                name: "weekly.csv".to_string(),
                from_url: true,
            }]
        );
        assert_eq!(preview.zip_name, None);

        assert_eq!(uploader.temps().len(), 1);
        let downloaded = plan.files[0].path.clone();
        assert!(downloaded.exists());

        assert_eq!(uploader.cleanup(), 1);
        assert!(!downloaded.exists());
    }

    #[tokio::test]
    async fn test_downloads_come_before_local_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        write(&a, b"alpha");
        let base = serve_once("200 OK", &[], b"remote").await;

        let mut uploader = Uploader::new(UploadOptions {
            inputs: vec![arg(&a), format!("{base}/files/remote.bin")],
            ..Default::default()
        });
        let plan = uploader.collect(&fetcher()).await.unwrap();

        let names: Vec<String> = plan.files.iter().map(ResolvedFile::name).collect();
        assert_eq!(names, vec!["remote.bin", "a.txt"]);
        assert!(plan.files[0].is_downloaded());
        assert!(!plan.files[1].is_downloaded());
    }

    #[tokio::test]
    async fn test_download_failure_aborts_before_expansion() {
        let base = serve_once("500 Internal Server Error", &[], b"").await;

        let options = UploadOptions {
            inputs: vec!["definitely-missing.txt".to_string(), format!("{base}/a.txt")],
            ..Default::default()
        };
        let err = run(options, &resolver(), &fetcher(), |_: &Config| async {
            Ok(RecordingStore::default())
        })
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Fetch { .. }), "{err}");
    }

    #[tokio::test]
    async fn test_missing_config_stops_before_connecting() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        write(&a, b"alpha");

        let options = UploadOptions {
            inputs: vec![arg(&a)],
            ..Default::default()
        };
        let resolver = ConfigResolver::new().env_var(BUCKET_NAME, "bucket");
        let err = run(options, &resolver, &fetcher(), |_: &Config| async {
            Err::<RecordingStore, _>(Error::General("connected".to_string()))
        })
        .await
        .unwrap_err();

        match err {
            Error::MissingConfig(keys) => {
                assert_eq!(keys, vec![ACCESS_KEY_ID, ACCESS_KEY_SECRET, ENDPOINT]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_upload_failure_still_cleans_up() {
        let base = serve_once("200 OK", &[], b"remote").await;

        let mut store = MockObjectStore::new();
        store
            .expect_put_object_from_file()
            .times(1)
            .returning(|_, _| Err(Error::General("AccessDenied".to_string())));

        let mut uploader = Uploader::new(UploadOptions {
            inputs: vec![format!("{base}/photo.png")],
            ..Default::default()
        });
        let plan = uploader.collect(&fetcher()).await.unwrap();
        let downloaded = plan.files[0].path.clone();

        let config = resolver().resolve().unwrap();
        let err = uploader.upload(&plan, &store, &config).await.unwrap_err();
        match err {
            Error::Upload { file, reason } => {
                assert_eq!(file, "photo.png");
                assert!(reason.contains("AccessDenied"));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(uploader.cleanup(), 1);
        assert!(!downloaded.exists());
    }

    #[tokio::test]
    async fn test_upload_error_names_the_display_file() {
        let base = serve_once(
            "200 OK",
            &[("Content-Disposition", "attachment; filename=\"weekly.csv\"")],
            b"a,b\n",
        )
        .await;

        let mut store = MockObjectStore::new();
        store
            .expect_put_object_from_file()
            .times(1)
            .returning(|_, path| {
                Err(Error::Upload {
                    file: path.file_name().unwrap().to_string_lossy().into_owned(),
                    reason: "Network dispatch error".to_string(),
                })
            });

        let mut uploader = Uploader::new(UploadOptions {
            inputs: vec![format!("{base}/export?id=7")],
            ..Default::default()
        });
        let plan = uploader.collect(&fetcher()).await.unwrap();
        let temp_name = plan.files[0]
            .path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();

        let config = resolver().resolve().unwrap();
        let err = uploader.upload(&plan, &store, &config).await.unwrap_err();
        assert!(!err.to_string().contains(&temp_name));
        match err {
            Error::Upload { file, reason } => {
                assert_eq!(file, "weekly.csv");
                assert_eq!(reason, "Network dispatch error");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(uploader.cleanup(), 1);
    }

    #[test]
    fn test_base_dir_for() {
        let dir = TempDir::new().unwrap();
        assert_eq!(base_dir_for(&arg(dir.path())), dir.path());
        assert_eq!(
            base_dir_for(&arg(&dir.path().join("a.txt"))),
            dir.path()
        );
        assert_eq!(base_dir_for("a.txt"), PathBuf::from("."));
        assert_eq!(base_dir_for("logs/*.log"), PathBuf::from("logs"));
    }

    #[test]
    fn test_result_document_shape() {
        let result = UploadResult::Zip {
            zip_name: "bundle.zip".to_string(),
            files_included: vec!["a.txt".to_string()],
            url: "https://cdn.example.com/bundle.zip".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "zip");
        assert_eq!(json["zip_name"], "bundle.zip");
        assert_eq!(json["files_included"][0], "a.txt");

        let result = UploadResult::Separate {
            results: vec![FileUrl {
                file: "a.txt".to_string(),
                url: "https://cdn.example.com/a.txt".to_string(),
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "separate");
        assert_eq!(json["results"][0]["file"], "a.txt");
        assert_eq!(result.urls(), vec!["https://cdn.example.com/a.txt"]);
    }
}
