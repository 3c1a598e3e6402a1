// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Submodules:
// - validate: decides whether a single href is worth following
// - filter: turns a page's hrefs into new absolute URLs to visit
// - engine: the breadth-first crawl that builds the sitemap
//
// Features:
// - Breadth-first crawling starting from the homepage
// - Same-domain restriction (never leaves the homepage's host)
// - Every page fetched at most once, even when linked from many places
// - Optional bounded pool of concurrent fetches
// =============================================================================

mod engine;
mod filter;
mod validate;

pub use engine::{CrawlEngine, CrawlEvent, CrawlOptions};
