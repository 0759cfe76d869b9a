//! Connection options.

use url::Url;

use crate::error::{Error, Result};

pub const URL_SCHEME: &str = "dynamodb";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Where to reach DynamoDB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Custom endpoint URL (LocalStack, DynamoDB Local).
    pub endpoint_url: Option<String>,
    pub region: String,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ConnectOptions {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            endpoint_url: None,
            region: region.into(),
        }
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Reads `AWS_ENDPOINT_URL` and `AWS_REGION`.
    pub fn from_env() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
        }
    }

    /// Parses an engine URL on top of the environment defaults.
    ///
    /// Accepts `dynamodb://?endpoint_url=<url>&region_name=<region>` and the
    /// short form `dynamodb://host:port`, which means `http://host:port`.
    pub fn from_url(url: &str) -> Result<Self> {
        Self::from_env().merge_url(url)
    }

    /// Applies the settings carried by `url` over `self`.
    pub fn merge_url(mut self, url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;

        if parsed.scheme() != URL_SCHEME {
            return Err(Error::InvalidUrl(format!(
                "expected scheme '{URL_SCHEME}', got '{}'",
                parsed.scheme()
            )));
        }

        if let Some(host) = parsed.host_str().filter(|h| !h.is_empty()) {
            self.endpoint_url = Some(match parsed.port() {
                Some(port) => format!("http://{host}:{port}"),
                None => format!("http://{host}"),
            });
        }

        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "endpoint_url" => self.endpoint_url = Some(value.into_owned()),
                "region_name" | "region" => self.region = value.into_owned(),
                other => {
                    return Err(Error::InvalidUrl(format!("unknown parameter '{other}'")));
                }
            }
        }

        Ok(self)
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}
