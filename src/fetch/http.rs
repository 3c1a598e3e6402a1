// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// A fetch only succeeds when:
// - the URL parses
// - the request completes within the timeout
// - the server answers with a 2xx status
// - the response is HTML (content-type contains "text/html")
//
// Anything else becomes a FetchError, which the crawler treats as
// "no data for this page".
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{extract_page_data, PageData, PageFetcher};
use crate::error::FetchError;

const USER_AGENT: &str = concat!("site-mapper/", env!("CARGO_PKG_VERSION"));

/// PageFetcher backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds a fetcher whose requests give up after `timeout`
    //
    // The client is reused for every page so connections are pooled.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<PageData, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!("Fetching {}", parsed);
        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let is_html = content_type
            .as_deref()
            .map(|ct| ct.contains("text/html"))
            .unwrap_or(false);
        if !is_html {
            return Err(FetchError::NotHtml(content_type));
        }

        let body = response.text().await?;
        Ok(extract_page_data(&body))
    }
}
