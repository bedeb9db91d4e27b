use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model path has no file name: {0}")]
    NoFileName(PathBuf),
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64)>;

/// Resolve the cascade model file, downloading it only as a last resort.
///
/// Resolution order:
/// 1. The configured path (relative to the working directory)
/// 2. A file of the same name in the user cache directory
/// 3. Download from `url` into the cache directory
///
/// Step 3 is the only network access anywhere in the pipeline; a run with
/// the model already on disk stays offline.
pub fn resolve(
    configured: &Path,
    url: &str,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    if configured.exists() {
        return Ok(configured.to_path_buf());
    }
    let cache_dir = model_cache_dir()?;
    resolve_with_cache(configured, &cache_dir, url, progress)
}

fn resolve_with_cache(
    configured: &Path,
    cache_dir: &Path,
    url: &str,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    if configured.exists() {
        return Ok(configured.to_path_buf());
    }
    let name = configured
        .file_name()
        .ok_or_else(|| ModelResolveError::NoFileName(configured.to_path_buf()))?;

    let cached_path = cache_dir.join(name);
    if cached_path.exists() {
        log::debug!("Using cached model {}", cached_path.display());
        return Ok(cached_path);
    }

    log::info!(
        "Model not found at {}; downloading from {url}",
        configured.display()
    );
    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - Linux: `$XDG_CACHE_HOME/facerec/models/` or `~/.cache/facerec/models/`
/// - macOS: `~/Library/Caches/facerec/models/`
/// - Windows: `%LOCALAPPDATA%/facerec/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    dirs::cache_dir()
        .map(|d| d.join("facerec").join("models"))
        .ok_or(ModelResolveError::NoCacheDir)
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path, progress);

    // Clean up .part file on any error
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), ModelResolveError> {
    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|source| ModelResolveError::Download {
            url: url.to_string(),
            source,
        })?;
    let write_failed = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| ModelResolveError::Write { path, source }
    };

    let file = File::create(temp_path).map_err(write_failed(temp_path))?;
    let mut sink = ProgressWriter::new(
        BufWriter::new(file),
        response.content_length().unwrap_or(0),
        progress,
    );
    io::copy(&mut response, &mut sink).map_err(write_failed(temp_path))?;
    sink.into_inner()
        .into_inner()
        .map_err(|e| e.into_error())
        .and_then(|file| file.sync_all())
        .map_err(write_failed(temp_path))?;

    fs::rename(temp_path, dest).map_err(write_failed(dest))
}

/// Counts bytes on their way to `inner` and reports them to the callback.
struct ProgressWriter<W: Write> {
    inner: W,
    written: u64,
    total: u64,
    progress: Option<ProgressFn>,
}

impl<W: Write> ProgressWriter<W> {
    fn new(inner: W, total: u64, progress: Option<ProgressFn>) -> Self {
        Self {
            inner,
            written: 0,
            total,
            progress,
        }
    }

    fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        if let Some(report) = &self.progress {
            report(self.written, self.total);
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
