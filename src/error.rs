// src/error.rs
// =============================================================================
// Error types for fetching pages and running a crawl.
//
// We use the `thiserror` crate which:
// - Derives std::error::Error and Display from attributes
// - Lets us wrap lower-level errors with #[from]
//
// Two layers:
// - FetchError: one page could not be turned into link lists
// - CrawlError: the whole crawl could not run (only the homepage can cause it)
// =============================================================================

use thiserror::Error;

// Why a single page could not be fetched
//
// The crawl engine treats every variant the same way ("no data for this
// page"); the variants only exist so logs and messages say something useful.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("not an HTML page (content-type: {})", .0.as_deref().unwrap_or("missing"))]
    NotHtml(Option<String>),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

// Why a crawl produced no sitemap at all
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("host unreachable: {url}")]
    HomepageUnreachable {
        url: String,
        #[source]
        source: FetchError,
    },
}
