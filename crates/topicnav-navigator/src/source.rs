//! Where content fragments come from.

use std::future::Future;
use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;
use url::Url;

/// Errors that can occur when fetching a target.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Request for {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Trait for anything that can resolve a target to fragment markup.
pub trait ContentSource: Send + Sync {
    /// Fetch the body for `target` as text.
    fn fetch(&self, target: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Serves targets from a site directory on disk.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a target to a path under the root.
    ///
    /// Query strings and fragments are dropped, percent-escapes decoded, and
    /// anything that would leave the root is rejected.
    pub fn resolve(&self, target: &str) -> Result<PathBuf, FetchError> {
        if target.contains("://") {
            return Err(FetchError::InvalidTarget(target.to_string()));
        }

        let path_part = target.split(['?', '#']).next().unwrap_or("");
        let decoded = percent_decode_str(path_part).decode_utf8_lossy();
        let relative = decoded.trim_start_matches('/');

        if relative.is_empty() {
            return Err(FetchError::InvalidTarget(target.to_string()));
        }

        let mut path = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                _ => return Err(FetchError::InvalidTarget(target.to_string())),
            }
        }

        Ok(path)
    }
}

impl ContentSource for FsSource {
    async fn fetch(&self, target: &str) -> Result<String, FetchError> {
        let path = self.resolve(target)?;

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FetchError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }
}

/// Fetches targets over HTTP relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source rooted at `base` (e.g. `http://127.0.0.1:7777/`).
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let mut base = Url::parse(base).map_err(|e| FetchError::InvalidTarget(e.to_string()))?;

        // Without a trailing slash, join() would replace the last segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("topicnav/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request {
                url: base.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { base, client })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for a target.
    pub fn url_for(&self, target: &str) -> Result<Url, FetchError> {
        self.base
            .join(target)
            .map_err(|_| FetchError::InvalidTarget(target.to_string()))
    }
}

impl ContentSource for HttpSource {
    async fn fetch(&self, target: &str) -> Result<String, FetchError> {
        let url = self.url_for(target)?;

        let response = self
            .client
            .get(url.as_str())
            .header("Accept", "text/html,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
