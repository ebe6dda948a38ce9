use memmap2::Mmap;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info};

use crate::error::AdapterError;

/// Configuration for file reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
    /// Map files into memory instead of buffered async reads
    pub use_mmap: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            buffer_size: 8192,
            use_mmap: false,
        }
    }
}

/// Statistics for one file read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Reads whole source files as UTF-8 text
#[derive(Debug, Clone, Default)]
pub struct SourceReader {
    config: ReaderConfig,
}

impl SourceReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub async fn read_source<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats), AdapterError> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();
        debug!("Starting read of file: {}", path.display());

        let content = if self.config.use_mmap {
            read_mapped(path)?
        } else {
            self.read_buffered(path).await?
        };

        let stats = ReadStats {
            file_path: path.display().to_string(),
            bytes_read: content.len() as u64,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };
        info!(
            "Read {}: {} bytes in {}ms",
            stats.file_path, stats.bytes_read, stats.duration_ms
        );

        Ok((content, stats))
    }

    async fn read_buffered(&self, path: &Path) -> Result<String, AdapterError> {
        let read_error = |source| AdapterError::Read {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).await.map_err(read_error)?;
        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await.map_err(read_error)?;

        String::from_utf8(bytes).map_err(|_| AdapterError::InvalidUtf8 {
            path: path.to_path_buf(),
        })
    }
}

fn read_mapped(path: &Path) -> Result<String, AdapterError> {
    let read_error = |source| AdapterError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(read_error)?;
    // WHY: mapping a zero-length file fails on some platforms
    if file.metadata().map_err(read_error)?.len() == 0 {
        return Ok(String::new());
    }
    // SAFETY: the map is read once and dropped before returning; concurrent
    // truncation by another process is outside what a linter can guard against
    let mmap = unsafe { Mmap::map(&file) }.map_err(read_error)?;
    std::str::from_utf8(&mmap)
        .map(str::to_string)
        .map_err(|_| AdapterError::InvalidUtf8 {
            path: path.to_path_buf(),
        })
}

/// Convenience function for reading a single file with default configuration
pub async fn read_file_async<P: AsRef<Path>>(file_path: P) -> Result<String, AdapterError> {
    let (content, _stats) = SourceReader::default().read_source(file_path).await?;
    Ok(content)
}
