//! Client side: fetch a value from one peer

use crate::peers::PeerGetter;
use crate::protocol::{Request, Response};
use async_trait::async_trait;
use peercache_core::{Error, Result};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

/// Fetches values from a single peer over HTTP
#[derive(Debug, Clone)]
pub struct HttpGetter {
    /// `{peer}{base_path}`, always ending in `/`
    base_url: Url,
    client: Client,
}

impl HttpGetter {
    /// `peer` is the peer's root URL, e.g. `http://10.0.0.2:8008`
    pub fn new(peer: &str, base_path: &str, client: Client) -> Result<Self> {
        let raw = format!("{}{}", peer.trim_end_matches('/'), base_path);
        let base_url = Url::parse(&raw)
            .map_err(|e| Error::configuration(format!("invalid peer url '{raw}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::configuration(format!(
                "peer url '{raw}' cannot be a base"
            )));
        }
        Ok(Self { base_url, client })
    }

    /// Full URL for a request, with group and key escaped as path segments
    pub fn url_for(&self, request: &Request) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::configuration(format!("peer url '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .push(&request.group)
            .push(&request.key);
        Ok(url)
    }

    fn endpoint(&self) -> &str {
        self.base_url.as_str()
    }
}

#[async_trait]
impl PeerGetter for HttpGetter {
    async fn get(&self, request: &Request) -> Result<Response> {
        let url = self.url_for(request)?;
        debug!(url = %url, "fetching from peer");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(self.endpoint(), e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::peer(
                self.endpoint(),
                format!("server returned {status}: {}", body.trim()),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::network(self.endpoint(), format!("reading response body: {e}")))?;
        Response::decode(&body)
    }
}
