use anyhow::Result;
use futures::stream::{self, Stream, StreamExt};
use glob::glob;
use ignore::{WalkBuilder, WalkState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Configuration for file discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Explicit glob pattern; replaces the directory walk when set
    pub glob: Option<String>,
    /// Descend into hidden files and directories
    pub include_hidden: bool,
}

/// Result of file discovery validation
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|known| known.as_ref().eq_ignore_ascii_case(ext)))
}

/// Walk `root_dir` honouring `.gitignore` and stream every file with one of `extensions`
/// WHY: the walker is blocking, so it runs on its own thread and feeds a channel
pub fn discover_files(
    root_dir: impl AsRef<Path>,
    extensions: &[&str],
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();
    let extensions: Arc<Vec<String>> = Arc::new(extensions.iter().map(|e| e.to_string()).collect());
    let config = Arc::new(config);

    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        info!("Starting directory traversal in: {}", root_path.display());
        let traversal_start = std::time::Instant::now();

        let walker = WalkBuilder::new(&root_path)
            .threads((num_cpus::get() / 2).max(1))
            .follow_links(false)
            .hidden(!config.include_hidden)
            .build_parallel();

        let (result_tx, result_rx) = std::sync::mpsc::channel();
        let walk_extensions = Arc::clone(&extensions);

        std::thread::spawn(move || {
            walker.run(|| {
                let result_tx = result_tx.clone();
                let extensions = Arc::clone(&walk_extensions);
                Box::new(move |result| {
                    match result {
                        Ok(entry) => {
                            if entry.file_type().is_some_and(|ft| ft.is_file())
                                && has_extension(entry.path(), extensions.as_slice())
                            {
                                debug!("Found matching file: {}", entry.path().display());
                                let _ = result_tx.send(entry.path().to_path_buf());
                            }
                        }
                        Err(e) => warn!("Walk error (continuing): {}", e),
                    }
                    WalkState::Continue
                })
            });
            drop(result_tx);
        });

        let mut file_count = 0;
        while let Ok(path) = result_rx.recv() {
            file_count += 1;
            match validate_file(&path, &config).await {
                Ok(validation) => {
                    if tx.send(Ok(validation)).is_err() {
                        debug!("Receiver dropped, stopping discovery");
                        break;
                    }
                }
                Err(e) => {
                    if config.fail_fast {
                        let _ = tx.send(Err(e));
                        break;
                    }
                    warn!("File validation error (continuing): {}", e);
                }
            }
        }

        info!(
            "Discovery completed in {}ms, streamed {} files",
            traversal_start.elapsed().as_millis(),
            file_count
        );
    });

    stream::unfold(rx, |mut receiver| async move {
        receiver.recv().await.map(|result| (result, receiver))
    })
}

/// Expand an explicit glob pattern, keeping files with one of `extensions`
pub fn discover_glob(
    pattern: &str,
    extensions: &[&str],
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let paths: Result<Vec<Result<PathBuf, glob::GlobError>>> = glob(pattern)
        .map(|paths| paths.collect())
        .map_err(|e| anyhow::anyhow!("Invalid glob pattern '{}': {}", pattern, e));
    let extensions: Vec<String> = extensions.iter().map(|e| e.to_string()).collect();

    let items: Vec<Result<Result<PathBuf>>> = match paths {
        Ok(paths) => paths
            .into_iter()
            .map(|p| Ok(p.map_err(|e| anyhow::anyhow!("Glob iteration error: {e}"))))
            .collect(),
        Err(e) => vec![Err(e)],
    };

    stream::iter(items).filter_map(move |item| {
        let config = config.clone();
        let extensions = extensions.clone();
        async move {
            let path = match item {
                Err(e) => return Some(Err(e)),
                Ok(Err(e)) if config.fail_fast => return Some(Err(e)),
                Ok(Err(e)) => {
                    warn!("{}", e);
                    return None;
                }
                Ok(Ok(path)) => path,
            };
            if !has_extension(&path, extensions.as_slice()) || path.is_dir() {
                return None;
            }
            Some(validate_file(&path, &config).await)
        }
    })
}

async fn validate_file(path: &Path, config: &DiscoveryConfig) -> Result<FileValidation> {
    match fs::metadata(path).await {
        Ok(metadata) if !metadata.is_file() => {
            let error = format!("Path is not a file: {}", path.display());
            warn!("{}", error);
            Ok(FileValidation {
                path: path.to_path_buf(),
                error: Some(error),
            })
        }
        Ok(_) => Ok(FileValidation {
            path: path.to_path_buf(),
            error: None,
        }),
        Err(e) => {
            let error = format!("Cannot access file {}: {}", path.display(), e);
            warn!("{}", error);
            if config.fail_fast {
                Err(anyhow::anyhow!(error))
            } else {
                Ok(FileValidation {
                    path: path.to_path_buf(),
                    error: Some(error),
                })
            }
        }
    }
}

/// Collect discovered files, sorted by path so reports are stable
pub async fn collect_discovered_files(
    root_dir: impl AsRef<Path>,
    extensions: &[&str],
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let root_dir = root_dir.as_ref().to_path_buf();
    let mut files = Vec::new();
    let mut stream = match config.glob.clone() {
        Some(pattern) => discover_glob(&pattern, extensions, config).boxed(),
        None => discover_files(root_dir, extensions, config).boxed(),
    };

    while let Some(result) = stream.next().await {
        files.push(result?);
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let valid_count = files.iter().filter(|f| f.error.is_none()).count();
    let invalid_count = files.len() - valid_count;
    if invalid_count > 0 {
        warn!("Found {} files with validation issues", invalid_count);
    }
    info!("File discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(files)
}
