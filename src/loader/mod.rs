use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::model::{BenefitRecord, Dataset};

/// Relative location of the dataset when no source is given.
pub const DEFAULT_DATA_PATH: &str = "poistovne.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(reqwest::Url),
}

impl DataSource {
    /// `http://` and `https://` values are URLs, everything else is a path.
    /// Paths are taken verbatim, surrounding whitespace included.
    pub fn parse(value: &str) -> Result<Self, LoadError> {
        let trimmed = value.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = reqwest::Url::parse(trimmed).map_err(|e| LoadError::InvalidUrl {
                url: trimmed.to_string(),
                source: Box::new(e),
            })?;
            return Ok(Self::Url(url));
        }
        Ok(Self::Path(PathBuf::from(value)))
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Path(PathBuf::from(DEFAULT_DATA_PATH))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{url}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read data file: {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data URL: {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to fetch data: {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("data request returned HTTP {status}: {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to parse data from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Retrieves the dataset and parses it. No retry, caching or timeout.
pub async fn load_data(source: &DataSource) -> Result<Dataset, LoadError> {
    load_data_with_client(source, None).await
}

/// Like [`load_data`], fetching URLs with `client` when one is given.
pub async fn load_data_with_client(
    source: &DataSource,
    client: Option<&reqwest::Client>,
) -> Result<Dataset, LoadError> {
    debug!(source = %source, "loading dataset");
    let bytes = match source {
        DataSource::Path(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::Read {
                    path: path.display().to_string(),
                    source,
                })?
        }
        DataSource::Url(url) => match client {
            Some(client) => fetch(client, url).await?,
            None => {
                let client = reqwest::Client::builder().build().map_err(|source| {
                    LoadError::Request {
                        url: url.to_string(),
                        source,
                    }
                })?;
                fetch(&client, url).await?
            }
        },
    };
    let dataset = parse_dataset(&bytes, &source.to_string())?;
    info!(source = %source, records = dataset.len(), "dataset loaded");
    Ok(dataset)
}

async fn fetch(client: &reqwest::Client, url: &reqwest::Url) -> Result<Vec<u8>, LoadError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| LoadError::Request {
            url: url.to_string(),
            source,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status,
        });
    }
    let body = response.bytes().await.map_err(|source| LoadError::Request {
        url: url.to_string(),
        source,
    })?;
    Ok(body.to_vec())
}

pub fn parse_dataset(bytes: &[u8], origin: &str) -> Result<Dataset, LoadError> {
    let records: Vec<BenefitRecord> =
        serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
            origin: origin.to_string(),
            source,
        })?;
    Ok(Dataset::new(records))
}
