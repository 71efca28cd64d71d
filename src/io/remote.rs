use std::time::Duration;

use serde_json::Value;

use crate::model::record::{Record, records_from_value};

/// Any reason the remote replica could not be reached or understood.
#[derive(Debug, thiserror::Error)]
pub enum RemoteUnavailable {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Malformed(String),
}

/// The remote replica of the working set.
///
/// `push` replaces the remote list wholesale; there is no partial update.
pub trait RemoteClient {
    fn fetch(&self) -> Result<Vec<Record>, RemoteUnavailable>;
    fn push(&self, records: &[Record]) -> Result<(), RemoteUnavailable>;
}

impl<T: RemoteClient + ?Sized> RemoteClient for Box<T> {
    fn fetch(&self) -> Result<Vec<Record>, RemoteUnavailable> {
        (**self).fetch()
    }

    fn push(&self, records: &[Record]) -> Result<(), RemoteUnavailable> {
        (**self).push(records)
    }
}

/// Blocking HTTP client for a single JSON endpoint.
pub struct HttpRemoteClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpRemoteClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteUnavailable> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(HttpRemoteClient {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteClient for HttpRemoteClient {
    fn fetch(&self) -> Result<Vec<Record>, RemoteUnavailable> {
        tracing::debug!(url = %self.url, "fetching remote projects");
        let resp = self.client.get(&self.url).send()?;
        if !resp.status().is_success() {
            return Err(RemoteUnavailable::Status(resp.status().as_u16()));
        }
        let body = resp.text()?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| RemoteUnavailable::Malformed(e.to_string()))?;
        if !value.is_array() {
            return Err(RemoteUnavailable::Malformed(
                "expected a JSON array of projects".to_string(),
            ));
        }
        Ok(records_from_value(value))
    }

    fn push(&self, records: &[Record]) -> Result<(), RemoteUnavailable> {
        tracing::debug!(url = %self.url, count = records.len(), "pushing remote projects");
        let resp = self.client.post(&self.url).json(records).send()?;
        if !resp.status().is_success() {
            return Err(RemoteUnavailable::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}
