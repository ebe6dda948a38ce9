// WHY: the file-level pipeline shared by every lint command: read, extract spans,
// rewrite, report, and optionally write fixes back

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::adapters::{diagnostics_for, FormatAdapter};
use crate::diagnostic::{Diagnostic, Fix};
use crate::engine::RewriteEngine;
use crate::error::AdapterError;
use crate::fixer::apply_fixes;
use crate::reader::{ReaderConfig, SourceReader};
use crate::stats::{FileStats, RunStats};

/// Configuration for one lint run
#[derive(Debug, Clone, Default)]
pub struct LintConfig {
    /// Abort on the first file that cannot be read or parsed
    pub fail_fast: bool,
    /// Write fixes back to the linted files
    pub fix: bool,
    /// Use memory-mapped reads instead of async buffered reads
    pub use_mmap: bool,
    /// Files in flight at once; 0 picks the number of cores
    pub jobs: usize,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl LintConfig {
    fn effective_jobs(&self) -> usize {
        if self.jobs == 0 {
            num_cpus::get().max(1)
        } else {
            self.jobs
        }
    }
}

/// Result of linting one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    pub error: Option<String>,
    pub stats: FileStats,
}

impl FileReport {
    /// Diagnostics whose fix was not written back
    pub fn unfixed(&self) -> usize {
        self.diagnostics.iter().filter(|d| !d.fixed).count()
    }
}

/// Result of linting a set of files, in input order
#[derive(Debug, Clone)]
pub struct LintReport {
    pub files: Vec<FileReport>,
    pub stats: RunStats,
}

impl LintReport {
    pub fn diagnostic_count(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }

    /// True when a file failed or a diagnostic is still present on disk
    pub fn has_findings(&self) -> bool {
        self.files
            .iter()
            .any(|f| f.error.is_some() || f.unfixed() > 0)
    }
}

/// Lint a single file with `adapter`
pub async fn lint_file(
    engine: &RewriteEngine,
    adapter: &dyn FormatAdapter,
    path: &Path,
    config: &LintConfig,
) -> Result<FileReport, AdapterError> {
    let start_time = Instant::now();
    let reader = SourceReader::new(ReaderConfig {
        use_mmap: config.use_mmap,
        ..Default::default()
    });
    let (source, read_stats) = reader.read_source(path).await?;

    let spans = adapter.extract_spans(&source)?;
    let mut diagnostics = diagnostics_for(engine, &spans);
    debug!(
        "{}: {} spans, {} diagnostics",
        path.display(),
        spans.len(),
        diagnostics.len()
    );

    let mut fixes_applied = 0;
    if config.fix && !diagnostics.is_empty() {
        let (owners, fixes): (Vec<usize>, Vec<Fix>) = diagnostics
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.fix.clone().map(|fix| (i, fix)))
            .unzip();
        let outcome = apply_fixes(&source, &fixes);
        if !outcome.applied.is_empty() {
            tokio::fs::write(path, outcome.source)
                .await
                .map_err(|source| AdapterError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
            info!("Wrote {} fixes to {}", outcome.applied.len(), path.display());
        }
        for &applied in &outcome.applied {
            diagnostics[owners[applied]].fixed = true;
        }
        fixes_applied = outcome.applied.len();
    }

    let status = if fixes_applied > 0 && fixes_applied == diagnostics.len() {
        "fixed"
    } else if diagnostics.is_empty() {
        "clean"
    } else {
        "flagged"
    };
    let stats = FileStats {
        path: path.display().to_string(),
        bytes_read: read_stats.bytes_read,
        spans_checked: spans.len() as u64,
        diagnostics: diagnostics.len() as u64,
        fixes_applied: fixes_applied as u64,
        processing_time_ms: start_time.elapsed().as_millis() as u64,
        status: status.to_string(),
        error: None,
    };

    Ok(FileReport {
        path: path.to_path_buf(),
        diagnostics,
        error: None,
        stats,
    })
}

/// Lint `paths` with bounded concurrency; reports stay in input order.
/// A file that fails is recorded and skipped, or aborts the run with `fail_fast`.
pub async fn lint_files(
    engine: &RewriteEngine,
    adapter: &dyn FormatAdapter,
    paths: &[PathBuf],
    config: &LintConfig,
) -> Result<LintReport> {
    let run_start = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let start_time = Instant::now();
    let jobs = config.effective_jobs();
    info!(
        "Linting {} files with the {} adapter ({} in flight)",
        paths.len(),
        adapter.name(),
        jobs
    );

    let progress = if config.show_progress {
        let bar = ProgressBar::new(paths.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {wide_msg}") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut results = stream::iter(paths)
        .map(|path| async move {
            let file_start = Instant::now();
            let result = lint_file(engine, adapter, path, config).await;
            (path, result, file_start.elapsed().as_millis() as u64)
        })
        .buffered(jobs);

    let mut files = Vec::with_capacity(paths.len());
    while let Some((path, result, elapsed_ms)) = results.next().await {
        progress.inc(1);
        progress.set_message(path.display().to_string());
        match result {
            Ok(report) => files.push(report),
            Err(e) => {
                let error = format!("{}: {}", path.display(), e);
                if config.fail_fast {
                    progress.abandon();
                    return Err(anyhow::Error::new(e).context(format!("failed to lint {}", path.display())));
                }
                warn!("{} (continuing)", error);
                files.push(FileReport {
                    path: path.clone(),
                    diagnostics: Vec::new(),
                    error: Some(error.clone()),
                    stats: FileStats::failed(path, error, elapsed_ms),
                });
            }
        }
    }
    progress.finish_and_clear();

    let total_ms = start_time.elapsed().as_millis() as u64;
    let stats = RunStats::from_files(
        adapter.name(),
        run_start,
        total_ms,
        files.iter().map(|f| f.stats.clone()).collect(),
    );
    info!(
        "Lint completed in {}ms: {} diagnostics in {} files, {} failed",
        total_ms, stats.total_diagnostics, stats.files_flagged, stats.files_failed
    );

    Ok(LintReport { files, stats })
}
