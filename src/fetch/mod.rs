// src/fetch/mod.rs
// =============================================================================
// This module turns a URL into the raw link lists the crawler works with.
//
// Submodules:
// - http: fetches pages over HTTP with reqwest
// - html: extracts links, stylesheets and images from HTML
//
// The crawl engine only talks to the PageFetcher trait, so tests can hand
// it scripted pages instead of a real network.
// =============================================================================

mod html;
mod http;

pub use html::extract_page_data;
pub use http::HttpFetcher;

use async_trait::async_trait;

use crate::error::FetchError;

/// Raw references found on one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageData {
    /// `<a href>` values; None stands for a link with no usable href
    pub links: Vec<Option<String>>,
    /// `<link rel="stylesheet" href>` values
    pub css: Vec<String>,
    /// `<img src>` values
    pub images: Vec<String>,
}

/// Anything that can produce a page's raw references from its URL
///
/// Any error means "no data for this page"; the crawler never retries.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<PageData, FetchError>;
}
