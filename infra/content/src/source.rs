use crate::error::{ContentLoadError, ContentLoadErrorExt};
use nf_domain::config::ContentConfig;
use nf_domain::constants::USER_AGENT;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::borrow::Cow;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace};

/// Where the content document body comes from.
///
/// A source returns the raw body; parsing is done by the store so every
/// source reports malformed JSON the same way.
pub trait ContentSource: Send + Sync + 'static {
    /// Human-readable location, used in logs.
    fn location(&self) -> Cow<'_, str>;

    /// Reads the document body once. No retries.
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, ContentLoadError>> + Send;
}

/// Fetches the document with a single HTTP `GET`, bypassing caches.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    client: reqwest::Client,
    url: String,
}

/// Builder for [`HttpContentSource`].
#[derive(Debug, Clone)]
pub struct HttpContentSourceBuilder {
    url: String,
    timeout: Option<Duration>,
    user_agent: Cow<'static, str>,
}

impl HttpContentSource {
    /// Source for `url` with no timeout and the default user agent.
    ///
    /// # Errors
    /// Returns [`ContentLoadError::Transport`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self, ContentLoadError> {
        Self::builder(url).build()
    }

    pub fn builder(url: impl Into<String>) -> HttpContentSourceBuilder {
        HttpContentSourceBuilder {
            url: url.into(),
            timeout: None,
            user_agent: Cow::Borrowed(USER_AGENT),
        }
    }

    /// Source described by the `content` configuration section.
    ///
    /// # Errors
    /// Returns [`ContentLoadError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(config: &ContentConfig) -> Result<Self, ContentLoadError> {
        Self::with_config(config.url(), config).build()
    }

    /// Builder for `url` that takes timeout and user agent from `config`.
    pub fn with_config(url: impl Into<String>, config: &ContentConfig) -> HttpContentSourceBuilder {
        let builder = Self::builder(url).user_agent(config.user_agent.clone());
        match config.timeout_seconds {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl HttpContentSourceBuilder {
    /// Bounds the whole request. Unset means wait for as long as the server takes.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<Cow<'static, str>>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// # Errors
    /// Returns [`ContentLoadError::Transport`] if the HTTP client cannot be built.
    pub fn build(self) -> Result<HttpContentSource, ContentLoadError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));

        let mut client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(self.user_agent.as_ref());
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }

        let client = client
            .build()
            .map_err(ContentLoadError::from)
            .context("Failed to build HTTP client")?;

        Ok(HttpContentSource { client, url: self.url })
    }
}

impl ContentSource for HttpContentSource {
    fn location(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.url)
    }

    async fn fetch(&self) -> Result<Vec<u8>, ContentLoadError> {
        trace!(url = %self.url, "Requesting content document");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(ContentLoadError::from)
            .context(self.url.clone())?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentLoadError::Status {
                status: status.as_u16(),
                context: Some(self.url.clone().into()),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(ContentLoadError::from)
            .context("Failed to read response body")?;

        debug!(url = %self.url, status = status.as_u16(), bytes = body.len(), "Content response received");
        Ok(body.to_vec())
    }
}

/// Reads the document from a local JSON file, for previews of unpublished content.
#[derive(Debug, Clone)]
pub struct FileContentSource {
    path: PathBuf,
}

impl FileContentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for FileContentSource {
    fn location(&self) -> Cow<'_, str> {
        self.path.to_string_lossy()
    }

    async fn fetch(&self) -> Result<Vec<u8>, ContentLoadError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(ContentLoadError::from)
            .context(self.path.display().to_string())?;

        debug!(path = %self.path.display(), bytes = body.len(), "Content file read");
        Ok(body)
    }
}

/// Either source, picked at startup from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(HttpContentSource),
    File(FileContentSource),
}

impl ConfiguredSource {
    /// A configured `file` wins over the HTTP origin.
    ///
    /// # Errors
    /// Returns [`ContentLoadError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(config: &ContentConfig) -> Result<Self, ContentLoadError> {
        match &config.file {
            Some(path) => Ok(Self::File(FileContentSource::new(path))),
            None => HttpContentSource::from_config(config).map(Self::Http),
        }
    }
}

impl ContentSource for ConfiguredSource {
    fn location(&self) -> Cow<'_, str> {
        match self {
            Self::Http(source) => source.location(),
            Self::File(source) => source.location(),
        }
    }

    async fn fetch(&self) -> Result<Vec<u8>, ContentLoadError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_joins_base_url_and_path() {
        let config = ContentConfig {
            base_url: "https://neemafoundation.org/".to_owned(),
            ..ContentConfig::default()
        };
        let source = HttpContentSource::from_config(&config).expect("client");
        assert_eq!(source.url(), "https://neemafoundation.org/content/nf-content.json");
    }

    #[test]
    fn configured_file_wins_over_http() {
        let config = ContentConfig {
            file: Some(PathBuf::from("content/nf-content.json")),
            ..ContentConfig::default()
        };
        let source = ConfiguredSource::from_config(&config).expect("source");
        assert!(matches!(source, ConfiguredSource::File(_)));
        assert_eq!(source.location(), "content/nf-content.json");
    }
}
