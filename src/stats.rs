// WHY: run statistics are a machine-readable record of a lint run, written with --stats-out

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileStats {
    /// File path as discovered
    pub path: String,
    /// Bytes of source read
    pub bytes_read: u64,
    /// Number of spans the adapter extracted
    pub spans_checked: u64,
    /// Number of diagnostics reported
    pub diagnostics: u64,
    /// Number of fixes written back to the file
    pub fixes_applied: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Processing status (clean, flagged, fixed, failed)
    pub status: String,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl FileStats {
    pub fn failed(path: &Path, error: String, processing_time_ms: u64) -> Self {
        Self {
            path: path.display().to_string(),
            bytes_read: 0,
            spans_checked: 0,
            diagnostics: 0,
            fixes_applied: 0,
            processing_time_ms,
            status: "failed".to_string(),
            error: Some(error),
        }
    }
}

/// Aggregate statistics for one lint run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Adapter that ran (javascript, css, markdown, html)
    pub adapter: String,
    /// Seconds since the Unix epoch when the run started
    pub run_start: u64,
    pub total_processing_time_ms: u64,
    pub total_bytes_read: u64,
    pub total_diagnostics: u64,
    pub total_fixes_applied: u64,
    pub files_processed: u64,
    pub files_flagged: u64,
    pub files_failed: u64,
    pub file_stats: Vec<FileStats>,
}

impl RunStats {
    pub fn from_files(adapter: &str, run_start: u64, total_processing_time_ms: u64, file_stats: Vec<FileStats>) -> Self {
        let failed = file_stats.iter().filter(|s| s.error.is_some()).count() as u64;
        Self {
            adapter: adapter.to_string(),
            run_start,
            total_processing_time_ms,
            total_bytes_read: file_stats.iter().map(|s| s.bytes_read).sum(),
            total_diagnostics: file_stats.iter().map(|s| s.diagnostics).sum(),
            total_fixes_applied: file_stats.iter().map(|s| s.fixes_applied).sum(),
            files_processed: file_stats.len() as u64 - failed,
            files_flagged: file_stats.iter().filter(|s| s.diagnostics > 0).count() as u64,
            files_failed: failed,
            file_stats,
        }
    }

    /// Write as pretty JSON to `path`
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        let file = tokio::fs::File::create(path).await?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&json).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }
}
