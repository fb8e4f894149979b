//! URL loading behind a trait seam
//!
//! All network traffic goes through the [`Loader`] trait so the whole client
//! can be driven by a stub in tests. [`HttpLoader`] is the reqwest-backed
//! implementation with an optional on-disk response cache.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Loads raw bytes from a URL.
#[async_trait]
pub trait Loader: Send + Sync {
    /// Fetch the resource at `url`.
    ///
    /// With `use_cache` set, a previously stored response may be returned
    /// without touching the network.
    ///
    /// # Errors
    /// - `Error::NotFound` for a definitive 404
    /// - `Error::ConnectionFailed` for any other non-success status
    /// - `Error::Connection` when the transport fails outright
    async fn load(&self, url: &str, use_cache: bool) -> Result<Vec<u8>>;
}

/// HTTP implementation of [`Loader`] with an optional response cache.
///
/// Cached responses never expire; passing `use_cache = false` bypasses the
/// read path while still refreshing the stored copy.
pub struct HttpLoader {
    client: reqwest::Client,
    cache_dir: Option<PathBuf>,
}

impl HttpLoader {
    /// Create a loader, optionally caching responses under `cache_dir` and
    /// applying a per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(cache_dir: Option<PathBuf>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        if let Some(dir) = &cache_dir {
            if let Err(e) = std::fs::create_dir_all(dir) {
                warn!(dir = %dir.display(), "could not create cache directory: {e}");
            }
        }

        Ok(Self { client, cache_dir })
    }

    fn cache_path(&self, url: &str) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.xml", blake3::hash(url.as_bytes()).to_hex())))
    }

    async fn read_cached(path: &Path) -> Option<Vec<u8>> {
        tokio::fs::read(path).await.ok()
    }
}

#[async_trait]
impl Loader for HttpLoader {
    async fn load(&self, url: &str, use_cache: bool) -> Result<Vec<u8>> {
        let cache_path = self.cache_path(url);

        if use_cache {
            if let Some(path) = &cache_path {
                if let Some(bytes) = Self::read_cached(path).await {
                    debug!(url, "serving from response cache");
                    return Ok(bytes);
                }
            }
        }

        debug!(url, "fetching");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url.to_string()));
        }
        if !status.is_success() && status != reqwest::StatusCode::NOT_MODIFIED {
            return Err(Error::ConnectionFailed(format!("{status} from {url}")));
        }

        let bytes = response.bytes().await?.to_vec();

        if let Some(path) = &cache_path {
            if let Err(e) = tokio::fs::write(path, &bytes).await {
                warn!(url, "could not write response cache: {e}");
            }
        }

        Ok(bytes)
    }
}
